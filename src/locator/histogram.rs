//! Orientation histogram and peak-window clustering

use crate::config::{ANGLE_BINS, ANGLE_BIN_WIDTH_DEGREES};
use crate::models::{OrientedRect, RectGroup};

/// Rectangle counts per 5 degree bin over `[-90, 90)`.
///
/// Bin `k` covers `[-90 + 5k, -85 + 5k)`. Indexing is circular since -90 and
/// 90 describe the same orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AngleHistogram {
    counts: [usize; ANGLE_BINS],
}

impl AngleHistogram {
    /// Count rectangles already sorted by ascending angle.
    ///
    /// Walks bins and rectangles together in one pass, which is only valid
    /// for non-decreasing angles. Anything left when the last bin is reached
    /// lands in it, so every rectangle is counted exactly once.
    pub fn from_sorted(sorted: &[OrientedRect]) -> Self {
        let mut counts = [0usize; ANGLE_BINS];
        let mut bin = 0usize;
        let mut i = 0usize;
        while i < sorted.len() {
            let upper = -90.0 + ANGLE_BIN_WIDTH_DEGREES * (bin + 1) as f32;
            if sorted[i].angle < upper || bin == ANGLE_BINS - 1 {
                counts[bin] += 1;
                i += 1;
            } else {
                bin += 1;
            }
        }
        Self { counts }
    }

    /// Histogram with explicit counts
    pub fn from_counts(counts: [usize; ANGLE_BINS]) -> Self {
        Self { counts }
    }

    /// Raw bin counts
    pub fn counts(&self) -> &[usize; ANGLE_BINS] {
        &self.counts
    }

    /// Sum over all bins
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Count of bin `index`, wrapping around both ends
    pub fn count(&self, index: isize) -> usize {
        self.counts[index.rem_euclid(ANGLE_BINS as isize) as usize]
    }

    /// Centre bins of every qualifying three-bin window, in bin order.
    ///
    /// The centre must strictly exceed both neighbours and the window total
    /// must strictly exceed `min_mass`. Ties produce no peak.
    pub fn peaks(&self, min_mass: usize) -> Vec<usize> {
        (0..ANGLE_BINS as isize)
            .filter(|&i| self.is_peak_window(i, min_mass))
            .map(|i| (i - 1).rem_euclid(ANGLE_BINS as isize) as usize)
            .collect()
    }

    /// Window ending at bin `i`: bins `i-2, i-1, i` with `i-1` as centre
    fn is_peak_window(&self, i: isize, min_mass: usize) -> bool {
        let (left, centre, right) = (self.count(i - 2), self.count(i - 1), self.count(i));
        centre > left && centre > right && left + centre + right > min_mass
    }
}

/// Split rectangles into orientation clusters.
///
/// Rectangles are stable-sorted by angle and histogrammed; every peak window
/// yields the rectangles of its three bins in sorted order. Windows are read
/// through a running offset into the sorted sequence, wrapping past the end
/// so clusters around +-90 degrees stay whole.
pub fn cluster_by_angle(mut rects: Vec<OrientedRect>, min_mass: usize) -> Vec<RectGroup> {
    let mut clusters = Vec::new();
    let n = rects.len();
    if n == 0 {
        return clusters;
    }

    rects.sort_by(|a, b| a.angle.total_cmp(&b.angle));
    let histogram = AngleHistogram::from_sorted(&rects);

    // Offset of the first rectangle in bin i-2, starting with i = 0
    let mut window_start = (n - histogram.count(-2) - histogram.count(-1)) % n;
    for i in 0..ANGLE_BINS as isize {
        let left = histogram.count(i - 2);
        if histogram.is_peak_window(i, min_mass) {
            let support = left + histogram.count(i - 1) + histogram.count(i);
            clusters.push((0..support).map(|j| rects[(window_start + j) % n]).collect());
        }
        window_start = (window_start + left) % n;
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;

    fn at_angle(angle: f32) -> OrientedRect {
        OrientedRect::new(Point::new(angle, 0.0), 20.0, 4.0, angle)
    }

    #[test]
    fn test_conservation() {
        let mut rects: Vec<OrientedRect> = (0..500)
            .map(|i| at_angle(-90.0 + (i as f32 * 7.31) % 180.0))
            .collect();
        rects.push(at_angle(-90.0));
        rects.push(at_angle(89.999));
        rects.sort_by(|a, b| a.angle.total_cmp(&b.angle));
        let histogram = AngleHistogram::from_sorted(&rects);
        assert_eq!(histogram.total(), rects.len());
        assert!(histogram.counts()[0] >= 1);
        assert!(histogram.counts()[ANGLE_BINS - 1] >= 1);
    }

    #[test]
    fn test_bin_boundaries() {
        let rects = vec![at_angle(-90.0), at_angle(-85.0), at_angle(0.0), at_angle(-0.1)];
        let mut sorted = rects.clone();
        sorted.sort_by(|a, b| a.angle.total_cmp(&b.angle));
        let counts = *AngleHistogram::from_sorted(&sorted).counts();
        assert_eq!(counts[0], 1);
        assert_eq!(counts[1], 1);
        assert_eq!(counts[17], 1);
        assert_eq!(counts[18], 1);
    }

    #[test]
    fn test_peak_strictness() {
        let mut counts = [0usize; ANGLE_BINS];
        counts[9] = 3;
        counts[10] = 7;
        counts[11] = 3;
        let histogram = AngleHistogram::from_counts(counts);
        assert_eq!(histogram.peaks(8), vec![10]);
        // 13 does not exceed 13
        assert!(histogram.peaks(13).is_empty());

        let mut counts = [0usize; ANGLE_BINS];
        counts[9] = 5;
        counts[10] = 5;
        counts[11] = 5;
        assert!(AngleHistogram::from_counts(counts).peaks(8).is_empty());
    }

    #[test]
    fn test_peak_wraps_circularly() {
        let mut counts = [0usize; ANGLE_BINS];
        counts[35] = 4;
        counts[0] = 9;
        counts[1] = 2;
        assert_eq!(AngleHistogram::from_counts(counts).peaks(8), vec![0]);
    }

    #[test]
    fn test_cluster_extracts_window_members() {
        let mut rects = Vec::new();
        // 10 rects in bin 18, 2 in bin 19, 1 far away in bin 2
        for i in 0..10 {
            rects.push(at_angle(1.0 + i as f32 * 0.1));
        }
        rects.push(at_angle(6.0));
        rects.push(at_angle(7.0));
        rects.push(at_angle(-78.0));

        let clusters = cluster_by_angle(rects, 8);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 12);
        assert!(clusters[0].windows(2).all(|w| w[0].angle <= w[1].angle));
        assert!(clusters[0].iter().all(|r| r.angle > 0.0));
    }

    #[test]
    fn test_cluster_across_wraparound() {
        let mut rects = Vec::new();
        for i in 0..6 {
            rects.push(at_angle(-89.0 + i as f32 * 0.1));
        }
        for i in 0..4 {
            rects.push(at_angle(88.0 + i as f32 * 0.1));
        }
        rects.push(at_angle(10.0));

        let clusters = cluster_by_angle(rects, 8);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 10);
        assert!(clusters[0].iter().all(|r| r.angle.abs() > 80.0));
    }

    #[test]
    fn test_uniform_spread_has_no_cluster() {
        let rects: Vec<OrientedRect> = (0..72)
            .map(|i| at_angle(-90.0 + 2.5 * i as f32 + 0.5))
            .collect();
        assert!(cluster_by_angle(rects, 8).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(cluster_by_angle(Vec::new(), 8).is_empty());
    }
}
