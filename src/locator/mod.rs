//! Barcode locator core
//!
//! Turns an unordered set of oriented bar candidates into barcode regions:
//! - Normalization (canonical orientation, elongation filter)
//! - Adjacency merging of fragmented bars
//! - Orientation histogram clustering
//! - Spatial grouping into candidates
//! - Minimal bounding rectangle of each candidate

/// Minimal oriented rectangle around a group
pub mod bounding;
/// Connectivity grouping within an orientation cluster
pub mod grouping;
/// 36-bin orientation histogram and peak extraction
pub mod histogram;
/// Greedy merging of consecutive overlapping rectangles
pub mod merge;
/// Canonical orientation and elongation gate
pub mod normalize;

pub use bounding::bounding_rect;
pub use grouping::{connected_components, group_candidates};
pub use histogram::{AngleHistogram, cluster_by_angle};
pub use merge::merge_adjacent;
pub use normalize::{normalize_all, normalize_rect};
