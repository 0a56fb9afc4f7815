//! Minimal oriented rectangle around a group of rectangles

use crate::error::{LocateError, Result};
use crate::models::{ImageBounds, OrientedRect, Point};
use crate::utils::geometry::min_area_rect;

/// Smallest-area rectangle enclosing every corner of every member.
///
/// With `bounds`, corners are clamped to the image before fitting. The
/// result is canonical (`length >= width`, angle in `[-90, 90)`).
pub fn bounding_rect(rects: &[OrientedRect], bounds: Option<ImageBounds>) -> Result<OrientedRect> {
    if rects.is_empty() {
        return Err(LocateError::DegenerateGeometry(
            "cannot bound an empty rectangle group".into(),
        ));
    }

    let cloud: Vec<Point> = rects
        .iter()
        .flat_map(|rect| rect.corners())
        .map(|corner| match bounds {
            Some(bounds) => bounds.clamp(corner),
            None => corner,
        })
        .collect();

    let fitted = min_area_rect(&cloud).ok_or_else(|| {
        LocateError::DegenerateGeometry(format!(
            "{} corner points of {} rectangles enclose no area",
            cloud.len(),
            rects.len()
        ))
    })?;
    Ok(OrientedRect::canonical(&fitted))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(x: f32, y: f32, angle: f32) -> OrientedRect {
        OrientedRect::new(Point::new(x, y), 20.0, 4.0, angle)
    }

    #[test]
    fn test_contains_all_member_corners() {
        let group: Vec<OrientedRect> = (0..12)
            .map(|i| bar(i as f32 * 6.0, 3.0 * (i % 3) as f32, 85.0 + (i % 4) as f32))
            .collect();
        let rect = bounding_rect(&group, None).unwrap();
        assert!(rect.length >= rect.width);
        assert!((-90.0..90.0).contains(&rect.angle));
        for member in &group {
            for corner in member.corners() {
                assert!(rect.contains(&corner, 1e-2), "{corner:?} outside {rect}");
            }
        }
    }

    #[test]
    fn test_side_by_side_bars() {
        // Vertical bars stacked left to right: the bound runs horizontally
        let group: Vec<OrientedRect> = (0..10).map(|i| bar(i as f32 * 8.0, 0.0, -90.0)).collect();
        let rect = bounding_rect(&group, None).unwrap();
        assert!((rect.length - 76.0).abs() < 1e-2);
        assert!((rect.width - 20.0).abs() < 1e-2);
        assert!(rect.angle.abs() < 1e-2);
        assert!((rect.center.x - 36.0).abs() < 1e-2);
    }

    #[test]
    fn test_single_member_reproduces_itself() {
        let source = bar(50.0, 40.0, 25.0);
        let rect = bounding_rect(&[source], None).unwrap();
        assert!((rect.length - 20.0).abs() < 1e-2);
        assert!((rect.width - 4.0).abs() < 1e-2);
        assert!((rect.angle - 25.0).abs() < 1e-2);
    }

    #[test]
    fn test_clamped_to_bounds() {
        let group = vec![bar(5.0, 50.0, 0.0), bar(5.0, 56.0, 0.0)];
        let rect = bounding_rect(&group, Some(ImageBounds::new(100, 100))).unwrap();
        for corner in rect.corners() {
            assert!(corner.x >= -1e-3);
        }
    }

    #[test]
    fn test_empty_group_is_degenerate() {
        let err = bounding_rect(&[], None).unwrap_err();
        assert!(matches!(err, LocateError::DegenerateGeometry(_)));
        assert!(err.is_no_barcode());
    }
}
