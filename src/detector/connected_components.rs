//! Connected components over dark pixels
//! Labels 8-connected regions in two passes and returns each region's pixels
use crate::models::BitMatrix;
use crate::utils::union_find::UnionFind;
use std::collections::HashMap;

/// Label 8-connected dark regions.
///
/// Regions are returned in raster order of their first pixel; each region
/// lists its pixels in raster order.
pub fn find_dark_regions(matrix: &BitMatrix) -> Vec<Vec<(usize, usize)>> {
    let width = matrix.width();
    let height = matrix.height();

    // label 0 is background; region labels are uf index + 1
    let mut labels = vec![0usize; width * height];
    let mut uf = UnionFind::default();

    // First pass: provisional labels with equivalences
    for y in 0..height {
        for x in 0..width {
            if !matrix.get(x, y) {
                continue;
            }

            let mut neighbour_labels = [0usize; 4];
            // left, upper-left, above, upper-right
            if x > 0 {
                neighbour_labels[0] = labels[y * width + x - 1];
            }
            if y > 0 {
                let above = (y - 1) * width;
                if x > 0 {
                    neighbour_labels[1] = labels[above + x - 1];
                }
                neighbour_labels[2] = labels[above + x];
                if x + 1 < width {
                    neighbour_labels[3] = labels[above + x + 1];
                }
            }

            let min_label = neighbour_labels
                .iter()
                .copied()
                .filter(|&l| l != 0)
                .min();
            labels[y * width + x] = match min_label {
                None => uf.make_set() + 1,
                Some(min_label) => {
                    for &l in neighbour_labels.iter().filter(|&&l| l != 0 && l != min_label) {
                        uf.union(min_label - 1, l - 1);
                    }
                    min_label
                }
            };
        }
    }

    // Second pass: gather pixels per root
    let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
    let mut regions: Vec<Vec<(usize, usize)>> = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let label = labels[y * width + x];
            if label == 0 {
                continue;
            }
            let root = uf.find(label - 1);
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                regions.push(Vec::new());
                regions.len() - 1
            });
            regions[slot].push((x, y));
        }
    }

    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_dark_regions() {
        let mut matrix = BitMatrix::new(10, 10);
        matrix.set(2, 2, true);
        matrix.set(3, 2, true);
        matrix.set(2, 3, true);
        matrix.set(3, 3, true);
        matrix.set(8, 8, true);

        let regions = find_dark_regions(&matrix);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0], vec![(2, 2), (3, 2), (2, 3), (3, 3)]);
        assert_eq!(regions[1], vec![(8, 8)]);
    }

    #[test]
    fn test_diagonal_and_u_shapes_join() {
        // A "U": two columns joined only at the bottom row
        let mut matrix = BitMatrix::new(6, 6);
        for y in 0..5 {
            matrix.set(1, y, true);
            matrix.set(4, y, true);
        }
        for x in 1..=4 {
            matrix.set(x, 5, true);
        }
        // Diagonal neighbour of the right column
        matrix.set(5, 0, true);
        let regions = find_dark_regions(&matrix);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].len(), 15);
    }
}
