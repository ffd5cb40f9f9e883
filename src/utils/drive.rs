//! Rewriting of Google Drive viewer links into renderable image URLs.
//!
//! Sheet editors paste whatever link the Drive UI gives them. Viewer
//! links (`/file/d/<id>/view`, `?id=<id>`, `/open?id=<id>`) don't work
//! as image sources, so the file id is extracted and re-addressed.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

const DRIVE_HOST: &str = "drive.google.com";

lazy_static! {
    // Ordered patterns; first match wins
    static ref FILE_PATH_ID: Regex = Regex::new(r"/file/d/([a-zA-Z0-9_-]+)").unwrap();
    static ref QUERY_ID: Regex = Regex::new(r"id=([a-zA-Z0-9_-]+)").unwrap();
    static ref OPEN_ID: Regex = Regex::new(r"/open\?id=([a-zA-Z0-9_-]+)").unwrap();
}

/// Extract the opaque file id from a Drive link, trying each known
/// link shape in order.
pub fn extract_file_id(url: &str) -> Option<String> {
    for pattern in [&*FILE_PATH_ID, &*QUERY_ID, &*OPEN_ID] {
        if let Some(caps) = pattern.captures(url) {
            if let Some(id) = caps.get(1) {
                return Some(id.as_str().to_string());
            }
        }
    }
    None
}

/// Rewrite a Drive viewer link to the direct-content form.
/// Non-Drive URLs, and Drive URLs with no extractable id, pass through
/// unchanged.
pub fn direct_image_url(url: &str) -> String {
    rewrite(url, |id| {
        format!("https://drive.google.com/uc?export=view&id={}", id)
    })
}

/// Thumbnail form; smaller payload, faster to load.
pub fn thumbnail_image_url(url: &str) -> String {
    rewrite(url, |id| {
        format!("https://drive.google.com/thumbnail?id={}&sz=w1000", id)
    })
}

/// Content-proxy host form; sometimes loads where the others fail.
pub fn proxy_image_url(url: &str) -> String {
    rewrite(url, |id| format!("https://lh3.googleusercontent.com/d/{}", id))
}

/// Ordered fallback list of renderable forms for the same file id,
/// for display layers that retry on image load failure.
pub fn alternate_image_urls(url: &str) -> Vec<String> {
    if url.is_empty() || !url.contains(DRIVE_HOST) {
        return vec![url.to_string()];
    }
    vec![
        direct_image_url(url),
        thumbnail_image_url(url),
        proxy_image_url(url),
    ]
}

fn rewrite(url: &str, to_url: impl Fn(&str) -> String) -> String {
    if url.is_empty() || !url.contains(DRIVE_HOST) {
        return url.to_string();
    }
    match extract_file_id(url) {
        Some(id) => to_url(&id),
        None => {
            warn!(url = url, "could not extract file id from Drive link");
            url.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_file_path() {
        assert_eq!(
            extract_file_id("https://drive.google.com/file/d/ABC_12-3/view"),
            Some("ABC_12-3".to_string())
        );
    }

    #[test]
    fn test_extract_from_id_param() {
        assert_eq!(
            extract_file_id("https://drive.google.com/uc?id=XYZ789"),
            Some("XYZ789".to_string())
        );
    }

    #[test]
    fn test_extract_from_open_link() {
        assert_eq!(
            extract_file_id("https://drive.google.com/open?id=QRS456"),
            Some("QRS456".to_string())
        );
    }

    #[test]
    fn test_direct_rewrites_viewer_link() {
        assert_eq!(
            direct_image_url("https://drive.google.com/file/d/ABC123/view"),
            "https://drive.google.com/uc?export=view&id=ABC123"
        );
    }

    #[test]
    fn test_non_drive_url_passes_through() {
        let url = "https://example.com/photo.jpg";
        assert_eq!(direct_image_url(url), url);
        assert_eq!(alternate_image_urls(url), vec![url.to_string()]);
    }

    #[test]
    fn test_drive_url_without_id_passes_through() {
        let url = "https://drive.google.com/drive/folders";
        assert_eq!(direct_image_url(url), url);
    }

    #[test]
    fn test_empty_url_passes_through() {
        assert_eq!(direct_image_url(""), "");
    }

    #[test]
    fn test_alternate_urls_ordered() {
        let urls = alternate_image_urls("https://drive.google.com/file/d/ABC123/view");
        assert_eq!(
            urls,
            vec![
                "https://drive.google.com/uc?export=view&id=ABC123",
                "https://drive.google.com/thumbnail?id=ABC123&sz=w1000",
                "https://lh3.googleusercontent.com/d/ABC123",
            ]
        );
    }
}
