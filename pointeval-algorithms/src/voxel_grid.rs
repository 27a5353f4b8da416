use std::collections::HashMap;

use log::debug;
use pointeval_core::{
    containers::PointCloud,
    nalgebra::{Point3, Vector3},
    EvalError, EvalResult,
};

/// Running sums of all points that fall into one voxel
#[derive(Default)]
struct Voxel {
    position_sum: Vector3<f64>,
    color_sum: Vector3<f64>,
    count: usize,
}

/// Downsamples `cloud` by applying a voxel grid filter with cubic voxels of edge length `voxel_size`.
///
/// The grid is anchored half a voxel below the minimum of the cloud's bounding box. All points within one voxel are
/// replaced by their centroid; if the cloud is colored, the voxel color is the mean color of its points. The output
/// is ordered by voxel index (x first, then y, then z), so the same input always yields the same output.
///
/// # Examples
/// ```
/// # use pointeval_algorithms::voxel_grid::voxel_down_sample;
/// # use pointeval_core::{containers::PointCloud, nalgebra::Point3};
/// let mut points = vec![];
/// for i in 0..100 {
///     for j in 0..100 {
///         points.push(Point3::new(0.0, f64::from(i), f64::from(j)));
///     }
/// }
/// let cloud = PointCloud::from_positions(points);
/// let downsampled = voxel_down_sample(&cloud, 1.5).unwrap();
/// assert!(downsampled.len() < cloud.len() / 2);
/// ```
///
/// # Errors
///
/// If `voxel_size` is not a positive finite number
pub fn voxel_down_sample(cloud: &PointCloud, voxel_size: f64) -> EvalResult<PointCloud> {
    if !(voxel_size > 0.0 && voxel_size.is_finite()) {
        return Err(EvalError::InvalidParameter(format!(
            "Voxel size must be positive but is {}",
            voxel_size
        )));
    }

    let bounds = match cloud.bounds() {
        Some(bounds) => bounds,
        None => return Ok(PointCloud::new()),
    };
    let half_voxel = Vector3::repeat(voxel_size * 0.5);
    let grid_origin = *bounds.min() - half_voxel;

    let colors = cloud.colors();
    let mut voxels: HashMap<[i64; 3], Voxel> = HashMap::new();
    for (idx, position) in cloud.positions().iter().enumerate() {
        let cell = (*position - grid_origin) / voxel_size;
        let key = [
            cell.x.floor() as i64,
            cell.y.floor() as i64,
            cell.z.floor() as i64,
        ];
        let voxel = voxels.entry(key).or_default();
        voxel.position_sum += position.coords;
        if let Some(colors) = colors {
            voxel.color_sum += colors[idx];
        }
        voxel.count += 1;
    }

    let mut voxels = voxels.into_iter().collect::<Vec<_>>();
    voxels.sort_unstable_by_key(|(key, _)| *key);

    let positions = voxels
        .iter()
        .map(|(_, voxel)| Point3::from(voxel.position_sum / voxel.count as f64))
        .collect::<Vec<_>>();
    let downsampled = if colors.is_some() {
        let voxel_colors = voxels
            .iter()
            .map(|(_, voxel)| voxel.color_sum / voxel.count as f64)
            .collect();
        PointCloud::from_positions_and_colors(positions, voxel_colors)?
    } else {
        PointCloud::from_positions(positions)
    };

    debug!(
        "Voxel grid with size {} reduced {} points to {}",
        voxel_size,
        cloud.len(),
        downsampled.len()
    );
    Ok(downsampled)
}
