//! Pure helpers consumed by the display layer.

pub mod drive;
pub mod format;

// Re-export commonly used functions at module level
pub use drive::alternate_image_urls;
pub use format::{format_date, starts_within_week};
