use crate::config::LocatorConfig;
use crate::detector::connected_components::find_dark_regions;
use crate::models::{BitMatrix, Point, RawRect};
use crate::utils::geometry::min_area_rect;
use std::collections::BTreeMap;

/// Turns dark blobs of a binarized image into raw oriented rectangles.
///
/// Each 8-connected region within the configured area range yields the
/// minimal-area rectangle around its pixels. Rectangles are not filtered by
/// shape here; that is the normalizer's job.
#[derive(Debug, Clone, Copy)]
pub struct RegionDetector {
    min_area: usize,
    max_area: usize,
}

impl RegionDetector {
    /// Accept regions of `min_area..=max_area` pixels
    pub fn new(min_area: usize, max_area: usize) -> Self {
        Self { min_area, max_area }
    }

    /// Area limits derived from the config for a `width` x `height` image
    pub fn for_image(config: &LocatorConfig, width: usize, height: usize) -> Self {
        let max_area = ((width * height) as f32 * config.max_region_fraction) as usize;
        Self::new(config.min_region_area, max_area.max(config.min_region_area))
    }

    /// Detect raw rectangles in raster order of their regions
    pub fn detect(&self, binary: &BitMatrix) -> Vec<RawRect> {
        find_dark_regions(binary)
            .into_iter()
            .filter(|pixels| (self.min_area..=self.max_area).contains(&pixels.len()))
            .filter_map(|pixels| min_area_rect(&outline_corners(&pixels)))
            .collect()
    }
}

/// Corner points of the leftmost and rightmost pixel on every row.
/// Their hull equals the hull of all pixel squares in the region.
fn outline_corners(pixels: &[(usize, usize)]) -> Vec<Point> {
    let mut rows: BTreeMap<usize, (usize, usize)> = BTreeMap::new();
    for &(x, y) in pixels {
        let span = rows.entry(y).or_insert((x, x));
        span.0 = span.0.min(x);
        span.1 = span.1.max(x);
    }

    let mut corners = Vec::with_capacity(rows.len() * 4);
    for (y, (min_x, max_x)) in rows {
        let (top, bottom) = (y as f32, (y + 1) as f32);
        let (left, right) = (min_x as f32, (max_x + 1) as f32);
        corners.push(Point::new(left, top));
        corners.push(Point::new(left, bottom));
        corners.push(Point::new(right, top));
        corners.push(Point::new(right, bottom));
    }
    corners
}
