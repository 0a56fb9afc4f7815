#![allow(dead_code)]

use rust_barcode::{OrientedRect, RawRect};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// `count` bar-like rectangles 20x4, centers stepping along x
pub fn bar_row(count: usize, x0: f32, y: f32, spacing: f32, angle: f32) -> Vec<RawRect> {
    (0..count)
        .map(|i| RawRect::new(x0 + i as f32 * spacing, y, (20.0, 4.0), angle))
        .collect()
}

/// Same as [`bar_row`] with angles jittered within one degree of zero.
/// Three quarters sit in `[0, 1)` so the 0 degree bin dominates its neighbour.
pub fn jittered_row(count: usize, x0: f32, y: f32, spacing: f32) -> Vec<RawRect> {
    (0..count)
        .map(|i| {
            let angle = if i % 4 == 0 {
                -0.5
            } else {
                (i % 10) as f32 * 0.09
            };
            RawRect::new(x0 + i as f32 * spacing, y, (20.0, 4.0), angle)
        })
        .collect()
}

pub fn assert_covers(result: &OrientedRect, inputs: &[RawRect]) {
    for raw in inputs {
        for corner in OrientedRect::canonical(raw).corners() {
            assert!(
                result.contains(&corner, 0.5),
                "{corner:?} not inside {result}"
            );
        }
    }
}

/// White RGB canvas with vertical black bars `bar_width` wide, `bar_height` tall
pub fn striped_image(
    width: usize,
    height: usize,
    bars: usize,
    origin: (usize, usize),
    bar_width: usize,
    bar_height: usize,
    pitch: usize,
) -> Vec<u8> {
    let mut rgb = vec![255u8; width * height * 3];
    for bar in 0..bars {
        let x0 = origin.0 + bar * pitch;
        for y in origin.1..origin.1 + bar_height {
            for x in x0..x0 + bar_width {
                let idx = (y * width + x) * 3;
                rgb[idx..idx + 3].fill(0);
            }
        }
    }
    rgb
}

pub fn near(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}
