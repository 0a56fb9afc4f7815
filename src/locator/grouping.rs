//! Spatial grouping of an orientation cluster into barcode candidates

use crate::error::{LocateError, Result};
use crate::models::{OrientedRect, RectGroup};
use crate::utils::union_find::UnionFind;
use log::debug;
use std::collections::HashMap;

/// Connected components of the proximity graph over rectangle centers.
///
/// Two rectangles are linked when their centers are at most
/// `max_link_distance` apart; linking is transitive. Components are ordered by
/// their lowest member index and list members in ascending index order.
pub fn connected_components(rects: &[OrientedRect], max_link_distance: f32) -> Vec<Vec<usize>> {
    let n = rects.len();
    let mut uf = UnionFind::new(n);
    let max_sq = max_link_distance * max_link_distance;
    for i in 0..n {
        for j in (i + 1)..n {
            if rects[i].center.distance_squared(&rects[j].center) <= max_sq {
                uf.union(i, j);
            }
        }
    }

    let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
    let mut components: Vec<Vec<usize>> = Vec::new();
    for i in 0..n {
        let root = uf.find(i);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(i);
    }
    components
}

/// Mean long-axis length, the characteristic bar size of a cluster
pub fn average_scale(rects: &[OrientedRect]) -> f32 {
    if rects.is_empty() {
        return 0.0;
    }
    rects.iter().map(|r| r.length).sum::<f32>() / rects.len() as f32
}

/// Candidates of one orientation cluster.
///
/// The linking radius is `proximity_multiplier` times the cluster's mean bar
/// length. Components with no more than `min_mass` members are discarded as
/// texture. Fails with [`LocateError::NoQualifyingCandidate`] when nothing
/// remains.
pub fn group_candidates(
    cluster: &[OrientedRect],
    proximity_multiplier: f32,
    min_mass: usize,
) -> Result<Vec<RectGroup>> {
    let max_link_distance = average_scale(cluster) * proximity_multiplier;
    let mut candidates = Vec::new();
    for component in connected_components(cluster, max_link_distance) {
        if component.len() > min_mass {
            candidates.push(component.into_iter().map(|i| cluster[i]).collect());
        } else {
            debug!(
                "discarding component of {} rects (link distance {:.2})",
                component.len(),
                max_link_distance
            );
        }
    }

    if candidates.is_empty() {
        return Err(LocateError::NoQualifyingCandidate);
    }
    Ok(candidates)
}
