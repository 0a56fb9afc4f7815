//! Canonicalisation and elongation filtering of detector rectangles

use crate::models::{ImageBounds, OrientedRect, Point, RawRect};
use log::trace;

/// Canonicalise one raw rectangle, or reject it.
///
/// Rejected when either extent is non-positive or not finite, or when the
/// long/short ratio does not exceed `elongation_threshold`. Accepted
/// rectangles have `length >= width`, an angle in `[-90, 90)` and, when
/// `bounds` is given, a footprint that fits inside the image.
pub fn normalize_rect(
    raw: &RawRect,
    elongation_threshold: f32,
    bounds: Option<ImageBounds>,
) -> Option<OrientedRect> {
    let (a, b) = raw.extent;
    if !(a.is_finite() && b.is_finite() && raw.angle.is_finite() && raw.center.is_finite()) {
        trace!("rejecting non-finite rectangle {raw:?}");
        return None;
    }
    if a <= 0.0 || b <= 0.0 {
        return None;
    }
    if a.max(b) / a.min(b) <= elongation_threshold {
        return None;
    }

    let mut rect = OrientedRect::canonical(raw);
    if let Some(bounds) = bounds {
        clip_to_bounds(&mut rect, bounds);
    }
    Some(rect)
}

/// Normalize a detector sequence, dropping rejects and exact repeats of the
/// previously accepted rectangle. Order is preserved.
pub fn normalize_all(
    raw: &[RawRect],
    elongation_threshold: f32,
    bounds: Option<ImageBounds>,
) -> Vec<OrientedRect> {
    let mut accepted: Vec<OrientedRect> = Vec::with_capacity(raw.len());
    for rect in raw
        .iter()
        .filter_map(|r| normalize_rect(r, elongation_threshold, bounds))
    {
        if accepted.last() != Some(&rect) {
            accepted.push(rect);
        }
    }
    accepted
}

/// Fit the footprint inside the image.
///
/// The centerline is confined to the image shrunk by the short-axis overhang,
/// the center is pulled onto it, and the long axis is trimmed so both ends
/// stay inside. A rectangle already inside is left untouched. When the
/// trimmed length drops below the width, the width shrinks with it.
fn clip_to_bounds(rect: &mut OrientedRect, bounds: ImageBounds) {
    let (along, across) = rect.axes();
    let half_width = rect.width / 2.0;
    let margin_x = (across.x * half_width).abs().min(bounds.width / 2.0);
    let margin_y = (across.y * half_width).abs().min(bounds.height / 2.0);
    let limits = [
        (margin_x, bounds.width - margin_x),
        (margin_y, bounds.height - margin_y),
    ];

    let center = Point::new(
        rect.center.x.clamp(limits[0].0, limits[0].1),
        rect.center.y.clamp(limits[1].0, limits[1].1),
    );

    let half = rect.length / 2.0;
    let mut t_lo = -half;
    let mut t_hi = half;
    for ((origin, step), (lo, hi)) in [(center.x, along.x), (center.y, along.y)]
        .into_iter()
        .zip(limits)
    {
        if step.abs() < f32::EPSILON {
            continue;
        }
        let to_lo = (lo - origin) / step;
        let to_hi = (hi - origin) / step;
        t_lo = t_lo.max(to_lo.min(to_hi));
        t_hi = t_hi.min(to_lo.max(to_hi));
    }

    if center == rect.center && t_lo <= -half && t_hi >= half {
        return;
    }
    let mid = (t_lo + t_hi) / 2.0;
    rect.center = center.translate(along.x * mid, along.y * mid);
    rect.length = (t_hi - t_lo).max(0.0);
    rect.width = rect.width.min(rect.length);
}
