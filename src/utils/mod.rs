//! Utility functions for image processing
//!
//! This module provides helpers shared by region detection and the locator:
//! - Grayscale conversion (RGB to luminance)
//! - Sharpening and Otsu binarization
//! - Geometry (convex hull, minimal-area rectangle)
//! - Union-find for connected components

pub mod binarization;
pub mod geometry;
pub mod grayscale;
pub mod sharpen;
pub mod union_find;
