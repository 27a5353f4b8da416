use log::{debug, info};
use pointeval_core::{
    color::{distance_color, invalid_point_color},
    containers::PointCloud,
    math::linspace,
    CloudSide, EvalError, EvalResult,
};

use crate::distance::compute_point_cloud_distance;

/// Points farther away than this from the other cloud are treated as outliers, regardless of their filter value
pub const OUTLIER_DISTANCE: f64 = 20.0;
/// Number of thresholds in the precision/recall curves
pub const CURVE_THRESHOLD_COUNT: usize = 50;
/// The precision/recall curves cover thresholds from zero up to this multiple of the distance threshold
pub const CURVE_THRESHOLD_RANGE: f64 = 3.0;

/// Scalar metrics of a point cloud comparison. Distances are in the unit of the point clouds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Mean distance of all valid source points to the target cloud
    pub accuracy: f64,
    /// Mean distance of all valid target points to the source cloud
    pub completeness: f64,
    /// Fraction of valid source points within the distance threshold of the target cloud
    pub precision: f64,
    /// Fraction of valid target points within the distance threshold of the source cloud
    pub recall: f64,
}

/// Precision and recall for a sweep of distance thresholds. All three vectors have the same length
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionRecallCurve {
    pub thresholds: Vec<f64>,
    pub precision: Vec<f64>,
    pub recall: Vec<f64>,
}

/// Result of [compare_point_clouds]
#[derive(Debug, Clone)]
pub struct Comparison {
    /// The source cloud colored by distance to the target. Valid points come first, followed by all filtered or
    /// outlier points in a fixed color
    pub precision_cloud: PointCloud,
    /// The target cloud colored by distance to the source, laid out like `precision_cloud`
    pub recall_cloud: PointCloud,
    pub metrics: Metrics,
    pub curve: PrecisionRecallCurve,
    pub valid_source_count: usize,
    pub valid_target_count: usize,
}

/// Distances of the valid points of one cloud, together with the combined validity of every point
struct ValidDistances {
    valid: Vec<bool>,
    distances: Vec<f64>,
}

impl ValidDistances {
    /// A point is valid if its filter value is set and its distance does not exceed `OUTLIER_DISTANCE`
    fn new(
        distances: &[f64],
        filter: &[bool],
        side: CloudSide,
    ) -> EvalResult<ValidDistances> {
        if distances.len() != filter.len() {
            return Err(EvalError::InvalidParameter(format!(
                "The {} filter has {} entries but the {} cloud has {} points",
                side,
                filter.len(),
                side,
                distances.len()
            )));
        }
        let valid = distances
            .iter()
            .zip(filter.iter())
            .map(|(distance, keep)| *keep && *distance <= OUTLIER_DISTANCE)
            .collect::<Vec<_>>();
        let valid_distances = distances
            .iter()
            .zip(valid.iter())
            .filter(|(_, valid)| **valid)
            .map(|(distance, _)| *distance)
            .collect::<Vec<_>>();
        if valid_distances.is_empty() {
            return Err(EvalError::EmptyValidSet(side));
        }
        Ok(ValidDistances {
            valid,
            distances: valid_distances,
        })
    }

    fn mean(&self) -> f64 {
        self.distances.iter().sum::<f64>() / self.distances.len() as f64
    }

    /// Fraction of valid distances that are `<= threshold`
    fn fraction_within(&self, threshold: f64) -> f64 {
        let within = self
            .distances
            .iter()
            .filter(|distance| **distance <= threshold)
            .count();
        within as f64 / self.distances.len() as f64
    }

    /// Recolors `cloud`: valid points by distance, followed by the invalid points in a fixed color
    fn diagnostic_cloud(&self, cloud: &PointCloud, max_dist: f64) -> EvalResult<PointCloud> {
        let mut valid_cloud = cloud.select_by_mask(&self.valid, false);
        valid_cloud.set_colors(
            self.distances
                .iter()
                .map(|distance| distance_color(*distance, max_dist))
                .collect(),
        )?;

        let mut invalid_cloud = cloud.select_by_mask(&self.valid, true);
        invalid_cloud.paint_uniform_color(invalid_point_color());

        Ok(valid_cloud + invalid_cloud)
    }
}

/// Compares the reconstructed `source` cloud against the ground truth `target` cloud.
///
/// Nearest neighbour distances are computed in both directions. Only points whose filter value is `true` and whose
/// distance does not exceed [OUTLIER_DISTANCE] take part in the metrics. Accuracy and completeness are the mean
/// distances of the valid source and target points, precision and recall are the fractions of valid source and target
/// points within `max_dist`. The precision/recall curves sweep [CURVE_THRESHOLD_COUNT] thresholds evenly spaced over
/// `[0, CURVE_THRESHOLD_RANGE * max_dist]`.
///
/// # Errors
///
/// - [EvalError::EmptyValidSet] if no point of one of the clouds is valid, since none of the metrics would be defined
/// - [EvalError::InvalidParameter] if `max_dist` is negative or not finite, or if a filter does not have one entry per
///   point of its cloud
pub fn compare_point_clouds(
    source: &PointCloud,
    target: &PointCloud,
    max_dist: f64,
    source_filter: &[bool],
    target_filter: &[bool],
) -> EvalResult<Comparison> {
    if !(max_dist >= 0.0 && max_dist.is_finite()) {
        return Err(EvalError::InvalidParameter(format!(
            "Distance threshold must be non-negative but is {}",
            max_dist
        )));
    }

    let source_distances = compute_point_cloud_distance(source, target);
    let target_distances = compute_point_cloud_distance(target, source);

    let comparison = compare_distances(
        source,
        target,
        max_dist,
        &source_distances,
        &target_distances,
        source_filter,
        target_filter,
    )?;

    info!(
        "Accuracy {:.3}, completeness {:.3}, precision {:.3}, recall {:.3}",
        comparison.metrics.accuracy,
        comparison.metrics.completeness,
        comparison.metrics.precision,
        comparison.metrics.recall
    );
    Ok(comparison)
}

/// Same as [compare_point_clouds], but with precomputed nearest neighbour distances: `source_distances` from each
/// source point to `target` and `target_distances` from each target point to `source`
pub fn compare_distances(
    source: &PointCloud,
    target: &PointCloud,
    max_dist: f64,
    source_distances: &[f64],
    target_distances: &[f64],
    source_filter: &[bool],
    target_filter: &[bool],
) -> EvalResult<Comparison> {
    if source_distances.len() != source.len() || target_distances.len() != target.len() {
        return Err(EvalError::InvalidParameter(
            "Need exactly one distance per point".into(),
        ));
    }

    let source_valid = ValidDistances::new(source_distances, source_filter, CloudSide::Source)?;
    let target_valid = ValidDistances::new(target_distances, target_filter, CloudSide::Target)?;
    debug!(
        "{} valid source points, {} valid target points",
        source_valid.distances.len(),
        target_valid.distances.len()
    );

    let metrics = Metrics {
        accuracy: source_valid.mean(),
        completeness: target_valid.mean(),
        precision: source_valid.fraction_within(max_dist),
        recall: target_valid.fraction_within(max_dist),
    };

    let thresholds = linspace(0.0, CURVE_THRESHOLD_RANGE * max_dist, CURVE_THRESHOLD_COUNT);
    let curve = PrecisionRecallCurve {
        precision: thresholds
            .iter()
            .map(|threshold| source_valid.fraction_within(*threshold))
            .collect(),
        recall: thresholds
            .iter()
            .map(|threshold| target_valid.fraction_within(*threshold))
            .collect(),
        thresholds,
    };

    Ok(Comparison {
        precision_cloud: source_valid.diagnostic_cloud(source, max_dist)?,
        recall_cloud: target_valid.diagnostic_cloud(target, max_dist)?,
        metrics,
        curve,
        valid_source_count: source_valid.distances.len(),
        valid_target_count: target_valid.distances.len(),
    })
}
