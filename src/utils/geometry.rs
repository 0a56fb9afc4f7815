//! Point-cloud geometry: convex hull and minimal-area enclosing rectangle
use crate::models::{Point, RawRect};

/// Convex hull in counter-clockwise order (Andrew's monotone chain).
///
/// Collinear points on hull edges are dropped. Fewer than three distinct
/// input points return the distinct points themselves.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut sorted: Vec<Point> = points.iter().copied().filter(Point::is_finite).collect();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();
    if sorted.len() < 3 {
        return sorted;
    }

    let mut hull: Vec<Point> = Vec::with_capacity(sorted.len() * 2);
    // Lower hull
    for &p in &sorted {
        while hull.len() >= 2 && hull[hull.len() - 2].cross(&hull[hull.len() - 1], &p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    // Upper hull
    let lower_len = hull.len() + 1;
    for &p in sorted.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && hull[hull.len() - 2].cross(&hull[hull.len() - 1], &p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }
    // Last point repeats the first
    hull.pop();
    hull
}

/// Minimal-area rectangle enclosing `points`, found with rotating calipers
/// over the edges of the convex hull.
///
/// `extent.0` runs along the hull edge that produced the minimum and `angle`
/// is that edge's direction in degrees, unnormalized. Returns `None` when the
/// cloud has no area (fewer than three non-collinear points).
pub fn min_area_rect(points: &[Point]) -> Option<RawRect> {
    let hull = convex_hull(points);
    if hull.len() < 3 {
        return None;
    }

    let n = hull.len();
    let mut best: Option<(f32, RawRect)> = None;
    for i in 0..n {
        let origin = hull[i];
        let next = hull[(i + 1) % n];
        let edge_x = next.x - origin.x;
        let edge_y = next.y - origin.y;
        let edge_length = edge_x.hypot(edge_y);
        if edge_length < f32::EPSILON {
            continue;
        }
        let along = Point::new(edge_x / edge_length, edge_y / edge_length);
        let across = Point::new(-along.y, along.x);

        let mut min_a = f32::MAX;
        let mut max_a = f32::MIN;
        let mut min_b = f32::MAX;
        let mut max_b = f32::MIN;
        for p in &hull {
            let offset = Point::new(p.x - origin.x, p.y - origin.y);
            let a = offset.dot(&along);
            let b = offset.dot(&across);
            min_a = min_a.min(a);
            max_a = max_a.max(a);
            min_b = min_b.min(b);
            max_b = max_b.max(b);
        }

        let extent = (max_a - min_a, max_b - min_b);
        let area = extent.0 * extent.1;
        if best.as_ref().is_some_and(|(best_area, _)| area >= *best_area) {
            continue;
        }

        let mid_a = (min_a + max_a) / 2.0;
        let mid_b = (min_b + max_b) / 2.0;
        let center = origin.translate(
            along.x * mid_a + across.x * mid_b,
            along.y * mid_a + across.y * mid_b,
        );
        let angle = along.y.atan2(along.x).to_degrees();
        best = Some((
            area,
            RawRect {
                center,
                extent,
                angle,
            },
        ));
    }

    best.and_then(|(area, rect)| (area > 0.0).then_some(rect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrientedRect;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
            Point::new(2.0, 2.0),
            Point::new(1.0, 3.0),
        ]
    }

    #[test]
    fn test_convex_hull_drops_interior() {
        let hull = convex_hull(&square());
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Point::new(2.0, 2.0)));
    }

    #[test]
    fn test_convex_hull_collinear() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        ];
        assert_eq!(convex_hull(&points).len(), 2);
        assert!(min_area_rect(&points).is_none());
    }

    #[test]
    fn test_min_area_rect_axis_aligned() {
        let points = vec![
            Point::new(10.0, 5.0),
            Point::new(40.0, 5.0),
            Point::new(40.0, 9.0),
            Point::new(10.0, 9.0),
        ];
        let rect = OrientedRect::canonical(&min_area_rect(&points).unwrap());
        assert!((rect.center.x - 25.0).abs() < 1e-3);
        assert!((rect.center.y - 7.0).abs() < 1e-3);
        assert!((rect.length - 30.0).abs() < 1e-3);
        assert!((rect.width - 4.0).abs() < 1e-3);
        assert!(rect.angle.abs() < 1e-3);
    }

    #[test]
    fn test_min_area_rect_rotated() {
        let source = OrientedRect::new(Point::new(50.0, 50.0), 40.0, 6.0, 30.0);
        let rect = OrientedRect::canonical(&min_area_rect(&source.corners()).unwrap());
        assert!((rect.length - 40.0).abs() < 1e-2);
        assert!((rect.width - 6.0).abs() < 1e-2);
        assert!((rect.angle - 30.0).abs() < 1e-2);
        assert!(rect.center.distance(&source.center) < 1e-2);
    }

    #[test]
    fn test_min_area_rect_empty() {
        assert!(min_area_rect(&[]).is_none());
        assert!(min_area_rect(&[Point::new(1.0, 1.0)]).is_none());
    }
}
