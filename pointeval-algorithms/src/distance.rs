use kd_tree::KdTree;
use log::debug;
use pointeval_core::containers::PointCloud;
use rayon::prelude::*;

/// Computes, for every point of `source`, the Euclidean distance to its nearest neighbour in `target`. The result has
/// one entry per source point, in source order. If `target` is empty, every distance is `f64::INFINITY`.
///
/// The nearest neighbour queries run in parallel, which does not affect the result.
///
/// # Examples
/// ```
/// # use pointeval_algorithms::distance::compute_point_cloud_distance;
/// # use pointeval_core::{containers::PointCloud, nalgebra::Point3};
/// let source = PointCloud::from_positions(vec![Point3::new(0.0, 0.0, 3.0)]);
/// let target = PointCloud::from_positions(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 4.0, 3.0)]);
/// assert_eq!(vec![3.0], compute_point_cloud_distance(&source, &target));
/// ```
pub fn compute_point_cloud_distance(source: &PointCloud, target: &PointCloud) -> Vec<f64> {
    let target_points = target
        .positions()
        .iter()
        .map(|position| [position.x, position.y, position.z])
        .collect::<Vec<[f64; 3]>>();
    let target_tree = KdTree::build_by_ordered_float(target_points);

    let distances = source
        .positions()
        .par_iter()
        .map(|position| {
            let query = [position.x, position.y, position.z];
            target_tree
                .nearest(&query)
                .map(|nearest| nearest.squared_distance.sqrt())
                .unwrap_or(f64::INFINITY)
        })
        .collect::<Vec<_>>();

    debug!(
        "Computed {} nearest neighbour distances against {} points",
        distances.len(),
        target.len()
    );
    distances
}
