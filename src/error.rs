//! Errors raised while locating barcodes

use thiserror::Error;

/// Failure kinds of a locate run.
///
/// The first four describe images that simply hold no recognisable barcode
/// and are reported to callers as `Ok(None)`. Everything else is a genuine
/// fault and propagates.
#[derive(Debug, Error)]
pub enum LocateError {
    /// Too few bar-like rectangles survived normalization to build a histogram
    #[error("only {found} bar candidates survived normalization, need at least {required}")]
    InputTooSparse {
        /// Rectangles left after normalization
        found: usize,
        /// Configured minimum
        required: usize,
    },

    /// No histogram window reached a dominant orientation peak
    #[error("no orientation peak exceeded the minimum group mass")]
    NoQualifyingCluster,

    /// Clusters were found but none held a large enough connected chain
    #[error("no connected candidate exceeded the minimum group mass")]
    NoQualifyingCandidate,

    /// A rectangle or point cloud with no usable area
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Configuration values outside their valid range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Pixel buffer does not match the stated dimensions
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Image decoding failure
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// Filesystem failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed JSON input
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl LocateError {
    /// True for the outcomes that mean "no barcode in this image"
    pub fn is_no_barcode(&self) -> bool {
        matches!(
            self,
            LocateError::InputTooSparse { .. }
                | LocateError::NoQualifyingCluster
                | LocateError::NoQualifyingCandidate
                | LocateError::DegenerateGeometry(_)
        )
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, LocateError>;
