//! Error types for nirgam-route

use std::path::PathBuf;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Engine-level errors.
///
/// Only configuration-time failures are fatal. Search failures never
/// show up here: an unreachable exit is reported as
/// [`Direction::Blocked`](crate::guidance::Direction::Blocked) for the
/// affected node.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Static map image missing or unreadable
    #[error("Failed to load map image {}: {source}", path.display())]
    MapLoad {
        /// Path that was attempted
        path: PathBuf,
        /// Decoder error
        #[source]
        source: image::ImageError,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(String),

    /// Configuration values violate an invariant
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Scene calibration failed
    #[error("Calibration failed: {0}")]
    Calibration(#[from] CalibrationError),
}

/// Why a frame could not be calibrated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalibrationError {
    /// Fewer than four boundary markers survived filtering
    #[error("expected 4 boundary markers, found {found}")]
    MarkersNotFound {
        /// Number of qualifying marker blobs
        found: usize,
    },

    /// Marker quadrilateral is degenerate (collinear or coincident points)
    #[error("degenerate marker quadrilateral, homography is singular")]
    DegenerateHomography,
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::ConfigParse(e.to_string())
    }
}
