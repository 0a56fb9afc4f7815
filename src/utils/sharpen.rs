//! 3x3 sharpening filter applied before binarization
use rayon::prelude::*;

/// Neighbour weight of the sharpening kernel
const EDGE_WEIGHT: f32 = -0.5;
/// Centre weight of the sharpening kernel
const CENTER_WEIGHT: f32 = 4.8;

/// Convolve with the kernel `[[-0.5,-0.5,-0.5],[-0.5,4.8,-0.5],[-0.5,-0.5,-0.5]]`.
///
/// The kernel is deliberately not normalised (it sums to 0.8), which dims flat
/// regions and saturates edges. Borders replicate the nearest pixel and the
/// result is clamped to `0..=255`.
pub fn sharpen(gray: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut out = vec![0u8; width * height];
    if width == 0 || height == 0 {
        return out;
    }

    let at = |x: isize, y: isize| -> f32 {
        let cx = x.clamp(0, width as isize - 1) as usize;
        let cy = y.clamp(0, height as isize - 1) as usize;
        gray[cy * width + cx] as f32
    };

    out.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let y = y as isize;
        for (x, dst) in row.iter_mut().enumerate() {
            let x = x as isize;
            let mut neighbours = 0.0f32;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx != 0 || dy != 0 {
                        neighbours += at(x + dx, y + dy);
                    }
                }
            }
            let value = CENTER_WEIGHT * at(x, y) + EDGE_WEIGHT * neighbours;
            *dst = value.round().clamp(0.0, 255.0) as u8;
        }
    });
    out
}
