//! Oriented rectangles flowing through the locator pipeline

use super::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wrap any finite angle in degrees into `[-90, 90)`.
pub fn normalize_angle(degrees: f32) -> f32 {
    let wrapped = (degrees + 90.0).rem_euclid(180.0) - 90.0;
    // rem_euclid rounds tiny negative remainders up to the modulus
    if wrapped >= 90.0 {
        wrapped - 180.0
    } else {
        wrapped
    }
}

/// Rectangle as reported by a region detector, before normalization.
///
/// `extent` is `(first, second)` in the detector's own axis order; `angle`
/// (degrees) orients the first axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawRect {
    /// Rectangle center
    pub center: Point,
    /// Side lengths along the rotated x and y axes
    pub extent: (f32, f32),
    /// Rotation in degrees
    pub angle: f32,
}

impl RawRect {
    /// Create a raw rectangle
    pub fn new(cx: f32, cy: f32, extent: (f32, f32), angle: f32) -> Self {
        Self {
            center: Point::new(cx, cy),
            extent,
            angle,
        }
    }
}

/// Canonical oriented rectangle: `length >= width`, `angle` in `[-90, 90)`
/// gives the direction of the long axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedRect {
    /// Rectangle center
    pub center: Point,
    /// Long-axis extent
    pub length: f32,
    /// Short-axis extent
    pub width: f32,
    /// Long-axis orientation in degrees
    pub angle: f32,
}

/// Ordered rectangles sharing an orientation band; lives for one run only.
pub type RectGroup = Vec<OrientedRect>;

impl OrientedRect {
    /// Create a rectangle from already-canonical fields
    pub fn new(center: Point, length: f32, width: f32, angle: f32) -> Self {
        Self {
            center,
            length,
            width,
            angle,
        }
    }

    /// Put a raw rectangle into canonical orientation.
    ///
    /// When the second extent is longer the axes are swapped and the angle
    /// turns by 90 degrees. The angle is always re-wrapped into `[-90, 90)`.
    pub fn canonical(raw: &RawRect) -> Self {
        let (first, second) = raw.extent;
        let (length, width, angle) = if second > first {
            (second, first, raw.angle + 90.0)
        } else {
            (first, second, raw.angle)
        };
        Self {
            center: raw.center,
            length,
            width,
            angle: normalize_angle(angle),
        }
    }

    /// Unit vectors along the long and short axes
    pub fn axes(&self) -> (Point, Point) {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        (Point::new(cos, sin), Point::new(-sin, cos))
    }

    /// The four corners, walking around the rectangle
    pub fn corners(&self) -> [Point; 4] {
        let (along, across) = self.axes();
        let hl = self.length / 2.0;
        let hw = self.width / 2.0;
        [(-hl, -hw), (hl, -hw), (hl, hw), (-hl, hw)].map(|(a, b)| {
            self.center
                .translate(along.x * a + across.x * b, along.y * a + across.y * b)
        })
    }

    /// Whether `point` lies inside the rectangle or within `tolerance` of its edge
    pub fn contains(&self, point: &Point, tolerance: f32) -> bool {
        let (along, across) = self.axes();
        let offset = Point::new(point.x - self.center.x, point.y - self.center.y);
        offset.dot(&along).abs() <= self.length / 2.0 + tolerance
            && offset.dot(&across).abs() <= self.width / 2.0 + tolerance
    }

    /// `((center_x, center_y), (length, width), angle)`
    pub fn as_tuple(&self) -> ((f32, f32), (f32, f32), f32) {
        (
            (self.center.x, self.center.y),
            (self.length, self.width),
            self.angle,
        )
    }
}

impl fmt::Display for OrientedRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(({:.2}, {:.2}), ({:.2}, {:.2}), {:.2})",
            self.center.x, self.center.y, self.length, self.width, self.angle
        )
    }
}

/// Pixel extent of the image the rectangles were detected in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageBounds {
    /// Image width in pixels
    pub width: f32,
    /// Image height in pixels
    pub height: f32,
}

impl ImageBounds {
    /// Bounds of a `width` x `height` image
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    /// Clamp a point onto the image
    pub fn clamp(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(0.0, self.width),
            point.y.clamp(0.0, self.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle_range() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(90.0), -90.0);
        assert_eq!(normalize_angle(-90.0), -90.0);
        assert!((normalize_angle(100.0) - -80.0).abs() < 1e-4);
        assert!((normalize_angle(-135.0) - 45.0).abs() < 1e-4);
        assert!((normalize_angle(540.0) - 0.0).abs() < 1e-4);
        let tiny = normalize_angle(-90.0 - 1e-7);
        assert!((-90.0..90.0).contains(&tiny));
    }

    #[test]
    fn test_canonical_swaps_short_first() {
        let rect = OrientedRect::canonical(&RawRect::new(0.0, 0.0, (5.0, 10.0), 10.0));
        assert_eq!(rect.length, 10.0);
        assert_eq!(rect.width, 5.0);
        assert!((rect.angle - -80.0).abs() < 1e-4);
    }

    #[test]
    fn test_corners_axis_aligned() {
        let rect = OrientedRect::new(Point::new(10.0, 20.0), 8.0, 2.0, 0.0);
        let corners = rect.corners();
        let xs: Vec<f32> = corners.iter().map(|p| p.x).collect();
        let ys: Vec<f32> = corners.iter().map(|p| p.y).collect();
        assert!(xs.iter().all(|&x| (x - 6.0).abs() < 1e-4 || (x - 14.0).abs() < 1e-4));
        assert!(ys.iter().all(|&y| (y - 19.0).abs() < 1e-4 || (y - 21.0).abs() < 1e-4));
        for corner in &corners {
            assert!(rect.contains(corner, 1e-3));
        }
        assert!(!rect.contains(&Point::new(10.0, 22.0), 1e-3));
    }

    #[test]
    fn test_corners_rotated() {
        let rect = OrientedRect::new(Point::new(0.0, 0.0), 10.0, 2.0, 90.0);
        assert!(rect.contains(&Point::new(0.0, 4.9), 1e-3));
        assert!(!rect.contains(&Point::new(4.9, 0.0), 1e-3));
    }

    #[test]
    fn test_display_tuple_format() {
        let rect = OrientedRect::new(Point::new(1.0, 2.0), 30.0, 4.0, -12.5);
        assert_eq!(rect.to_string(), "((1.00, 2.00), (30.00, 4.00), -12.50)");
        assert_eq!(rect.as_tuple(), ((1.0, 2.0), (30.0, 4.0), -12.5));
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = ImageBounds::new(64, 48);
        assert_eq!(bounds.clamp(Point::new(-3.0, 50.0)), Point::new(0.0, 48.0));
        assert_eq!(bounds.clamp(Point::new(10.0, 20.0)), Point::new(10.0, 20.0));
    }
}
