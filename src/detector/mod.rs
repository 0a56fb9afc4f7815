//! Region detection: the stage that feeds the locator core
//!
//! Binarized pixels are grouped into dark connected regions and each region
//! is summarised by its minimal-area oriented rectangle.

/// Two-pass labeling of 8-connected dark regions
pub mod connected_components;
/// Oriented rectangles around dark regions
pub mod regions;

pub use regions::RegionDetector;
