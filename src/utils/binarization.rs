//! Global Otsu binarization of a grayscale buffer
use crate::models::BitMatrix;

/// Convert grayscale image to binary using Otsu's thresholding method.
/// Returns a BitMatrix where true = dark
pub fn otsu_binarize(gray: &[u8], width: usize, height: usize) -> BitMatrix {
    let threshold = otsu_threshold(gray);
    BitMatrix::from_threshold(gray, width, height, threshold)
}

/// Threshold maximising between-class variance. Pixels strictly below it
/// form the dark class.
pub fn otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total = gray.len() as f64;
    let total_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(value, &count)| value as f64 * count as f64)
        .sum();

    let mut dark_count = 0f64;
    let mut dark_sum = 0f64;
    let mut max_variance = 0.0;
    let mut optimal = 128u8;

    // Candidate threshold t puts intensities 0..t in the dark class
    for threshold in 1..=255usize {
        dark_count += histogram[threshold - 1] as f64;
        dark_sum += (threshold - 1) as f64 * histogram[threshold - 1] as f64;
        let light_count = total - dark_count;
        if dark_count == 0.0 || light_count == 0.0 {
            continue;
        }

        let dark_mean = dark_sum / dark_count;
        let light_mean = (total_sum - dark_sum) / light_count;
        let variance =
            (dark_count / total) * (light_count / total) * (dark_mean - light_mean).powi(2);

        if variance > max_variance {
            max_variance = variance;
            optimal = threshold as u8;
        }
    }

    optimal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otsu_binarize() {
        let mut gray = vec![50u8; 50];
        gray.extend(vec![200u8; 50]);

        let binary = otsu_binarize(&gray, 10, 10);

        assert!(binary.get(0, 0));
        assert!(!binary.get(0, 7));
        assert_eq!(binary.count_dark(), 50);
    }

    #[test]
    fn test_otsu_threshold_separates_classes() {
        let mut gray = vec![0u8; 30];
        gray.extend(vec![204u8; 70]);
        let threshold = otsu_threshold(&gray);
        assert!(threshold > 0 && threshold <= 204);
    }

    #[test]
    fn test_uniform_image_has_no_dark_pixels() {
        let gray = vec![128u8; 64];
        let threshold = otsu_threshold(&gray);
        let binary = BitMatrix::from_threshold(&gray, 8, 8, threshold);
        assert_eq!(binary.count_dark(), 0);
    }
}
