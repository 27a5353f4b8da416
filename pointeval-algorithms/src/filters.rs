use log::{debug, warn};
use pointeval_core::{
    containers::PointCloud,
    masks::{GroundTruthPlane, ObservationMask},
};
use rayon::prelude::*;

/// Builds the validity filter for the reconstructed (source) cloud. A point is valid if it falls into an observed
/// cell of `mask`. Grid indices are computed as `round_half_up((position - min_bound) / resolution)`, and points whose
/// index lies outside of the mask grid on any axis are always invalid. The returned filter has one entry per point of
/// `cloud`, in the same order
pub fn build_src_points_filter(cloud: &PointCloud, mask: &ObservationMask) -> Vec<bool> {
    let filter = cloud
        .positions()
        .par_iter()
        .map(|position| mask.is_observed(position))
        .collect::<Vec<_>>();

    let valid_count = count_valid(&filter);
    debug!(
        "{} of {} source points lie in observed cells",
        valid_count,
        filter.len()
    );
    if valid_count == 0 && !cloud.is_empty() {
        warn!("No source point lies within an observed cell of the observation mask");
    }
    filter
}

/// Builds the validity filter for the ground truth (target) cloud. A point is valid if it lies strictly on the
/// positive side of `plane`; points exactly on the plane are invalid. The returned filter has one entry per point of
/// `cloud`, in the same order
pub fn build_tgt_points_filter(cloud: &PointCloud, plane: &GroundTruthPlane) -> Vec<bool> {
    let filter = cloud
        .positions()
        .par_iter()
        .map(|position| plane.is_above(position))
        .collect::<Vec<_>>();

    let valid_count = count_valid(&filter);
    debug!(
        "{} of {} target points lie above the ground truth plane",
        valid_count,
        filter.len()
    );
    if valid_count == 0 && !cloud.is_empty() {
        warn!("No target point lies above the ground truth plane");
    }
    filter
}

/// Filter that accepts every point of `cloud`. Used for data sets without masks
pub fn accept_all_filter(cloud: &PointCloud) -> Vec<bool> {
    vec![true; cloud.len()]
}

pub fn count_valid(filter: &[bool]) -> usize {
    filter.iter().filter(|valid| **valid).count()
}
