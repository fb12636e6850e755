//! Error types for nirgam-guide

use thiserror::Error;

/// nirgam-guide error type
#[derive(Error, Debug)]
pub enum GuideError {
    #[error(transparent)]
    Route(#[from] nirgam_route::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Unknown hazard zone: {0}")]
    UnknownZone(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<serde_yaml::Error> for GuideError {
    fn from(e: serde_yaml::Error) -> Self {
        GuideError::Scenario(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GuideError>;
