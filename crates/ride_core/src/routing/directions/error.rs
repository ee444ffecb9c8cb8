use thiserror::Error;

/// Errors encountered while talking to the directions provider.
#[derive(Debug, Error)]
pub enum DirectionsError {
    #[cfg(feature = "http")]
    #[error("directions request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to decode directions response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("directions provider error: {0}")]
    Api(String),
}
