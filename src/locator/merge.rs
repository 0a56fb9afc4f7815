//! Greedy single-pass merging of fragmented bar detections

use super::bounding::bounding_rect;
use crate::models::{ImageBounds, OrientedRect};
use log::debug;

/// Collapse runs of consecutive, nearly coincident rectangles.
///
/// Two neighbours in the sequence belong to the same run when their center
/// distance is below `(width_a + width_b) / merge_divisor`. A run of several
/// rectangles is replaced by its bounding rectangle; a run of one passes
/// through. Input order is kept and merged output is never revisited.
pub fn merge_adjacent(
    rects: Vec<OrientedRect>,
    merge_divisor: f32,
    bounds: Option<ImageBounds>,
) -> Vec<OrientedRect> {
    if rects.len() < 2 {
        return rects;
    }

    let mut merged = Vec::with_capacity(rects.len());
    let mut run: Vec<OrientedRect> = Vec::new();
    for rect in rects {
        if let Some(last) = run.last() {
            let threshold = (last.width + rect.width) / merge_divisor;
            if last.center.distance(&rect.center) < threshold {
                run.push(rect);
                continue;
            }
            close_run(&mut run, &mut merged, bounds);
        }
        run.push(rect);
    }
    close_run(&mut run, &mut merged, bounds);
    merged
}

fn close_run(
    run: &mut Vec<OrientedRect>,
    merged: &mut Vec<OrientedRect>,
    bounds: Option<ImageBounds>,
) {
    if run.len() > 1 {
        match bounding_rect(run, bounds) {
            Ok(rect) => merged.push(rect),
            Err(err) => debug!("dropping run of {} fragments: {err}", run.len()),
        }
        run.clear();
    } else {
        merged.append(run);
    }
}
