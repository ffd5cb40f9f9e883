use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Request timed out. Please check your internet connection.")]
    Timeout,

    #[error("Feed request failed with HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Timeout
        } else {
            FeedError::Network(err)
        }
    }
}
