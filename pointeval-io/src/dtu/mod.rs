//! Evaluation masks of the DTU multi-view stereo benchmark.
//!
//! For every scan, the benchmark ships two MATLAB files in its `ObsMask` directory:
//!
//! - `ObsMask<scan>_10.mat` with the bounding box `BB` (2x3, minimum in the first row, maximum in the second), the
//!   3D logical observation mask `ObsMask` and its cell size `Res`
//! - `Plane<scan>.mat` with the homogeneous ground truth plane `P` (4 values)
//!
//! MATLAB stores matrices in column-major order; [ObservationMask] stores its cells row-major, so the mask is
//! reordered while loading.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Result;
use log::{debug, info};
use matfile::{Array, MatFile, NumericData};
use pointeval_core::{
    masks::{GroundTruthPlane, ObservationMask},
    math::AABB,
    nalgebra::{Point3, Vector4},
    EvalError,
};

/// The masks that restrict the evaluation of one scan
#[derive(Debug, Clone)]
pub struct SceneMasks {
    /// Observed cells, used to filter the reconstructed cloud
    pub observation_mask: ObservationMask,
    /// Ground truth plane, used to filter the ground truth cloud
    pub plane: GroundTruthPlane,
    /// Bounding box of the observed volume as stored in the mask file
    pub bounding_box: AABB<f64>,
}

/// Path of the observation mask file for `scene` within the DTU data directory
pub fn observation_mask_path<P: AsRef<Path>>(data_path: P, scene: &str) -> PathBuf {
    data_path
        .as_ref()
        .join("ObsMask")
        .join(format!("ObsMask{}_10.mat", scene))
}

/// Path of the ground truth plane file for `scene` within the DTU data directory
pub fn plane_path<P: AsRef<Path>>(data_path: P, scene: &str) -> PathBuf {
    data_path
        .as_ref()
        .join("ObsMask")
        .join(format!("Plane{}.mat", scene))
}

/// Loads observation mask, bounding box and ground truth plane of `scene` from the DTU data directory `data_path`
pub fn load_scene_masks<P: AsRef<Path>>(data_path: P, scene: &str) -> Result<SceneMasks> {
    let (observation_mask, bounding_box) =
        load_observation_mask(observation_mask_path(data_path.as_ref(), scene))?;
    let plane = load_plane(plane_path(data_path.as_ref(), scene))?;

    debug!(
        "Observed volume of scene {} spans {:?} to {:?}",
        scene,
        bounding_box.min(),
        bounding_box.max()
    );
    let [nx, ny, nz] = observation_mask.dims();
    info!(
        "Loaded observation mask for scene {} ({}x{}x{} cells of size {}, {} observed)",
        scene,
        nx,
        ny,
        nz,
        observation_mask.resolution(),
        observation_mask.observed_cell_count()
    );
    Ok(SceneMasks {
        observation_mask,
        plane,
        bounding_box,
    })
}

/// Loads the observation mask and its bounding box from an `ObsMask<scan>_10.mat` file
///
/// DTU stores an integral cell size in `Res`. The value is used as it is stored, so a fractional `Res` is kept rather
/// than truncated to an integer
pub fn load_observation_mask<P: AsRef<Path>>(path: P) -> Result<(ObservationMask, AABB<f64>)> {
    let path = path.as_ref();
    let mat_file = open_mat_file(path)?;

    let bounds = numeric_values(find_array(&mat_file, "BB", path)?);
    if bounds.len() != 6 {
        return Err(missing(path, format!("'BB' has {} values, expected 6", bounds.len())).into());
    }
    // 2x3 in column-major order: [min_x, max_x, min_y, max_y, min_z, max_z]
    let min = Point3::new(bounds[0], bounds[2], bounds[4]);
    let max = Point3::new(bounds[1], bounds[3], bounds[5]);
    let bounding_box = AABB::from_min_max(min, max)
        .ok_or_else(|| missing(path, "'BB' minimum exceeds its maximum".into()))?;

    let resolution = numeric_values(find_array(&mat_file, "Res", path)?)
        .first()
        .copied()
        .ok_or_else(|| missing(path, "'Res' is empty".into()))?;
    if resolution.fract() != 0.0 {
        debug!(
            "'Res' of {} is not integral ({}), using it without truncation",
            path.display(),
            resolution
        );
    }

    let mask_array = find_array(&mat_file, "ObsMask", path)?;
    let dims = match mask_array.size().as_slice() {
        [nx, ny] => [*nx, *ny, 1],
        [nx, ny, nz] => [*nx, *ny, *nz],
        other => {
            return Err(missing(
                path,
                format!("'ObsMask' must be three-dimensional but has size {:?}", other),
            )
            .into())
        }
    };
    let cells = numeric_values(mask_array)
        .into_iter()
        .map(|value| value != 0.0)
        .collect::<Vec<_>>();

    let mask = ObservationMask::from_column_major(dims, &cells, min, resolution)?;
    Ok((mask, bounding_box))
}

/// Loads the ground truth plane from a `Plane<scan>.mat` file
pub fn load_plane<P: AsRef<Path>>(path: P) -> Result<GroundTruthPlane> {
    let path = path.as_ref();
    let mat_file = open_mat_file(path)?;
    let coefficients = numeric_values(find_array(&mat_file, "P", path)?);
    if coefficients.len() != 4 {
        return Err(missing(
            path,
            format!("'P' has {} values, expected 4", coefficients.len()),
        )
        .into());
    }
    Ok(GroundTruthPlane::new(Vector4::from_column_slice(
        &coefficients,
    )))
}

fn missing(path: &Path, details: String) -> EvalError {
    EvalError::MissingMaskData {
        path: path.to_path_buf(),
        details,
    }
}

fn open_mat_file(path: &Path) -> Result<MatFile> {
    let file = File::open(path).map_err(|e| missing(path, e.to_string()))?;
    let mat_file = MatFile::parse(BufReader::new(file))
        .map_err(|e| missing(path, format!("Not a valid MAT file: {:?}", e)))?;
    Ok(mat_file)
}

fn find_array<'a>(mat_file: &'a MatFile, name: &str, path: &Path) -> Result<&'a Array> {
    mat_file
        .find_by_name(name)
        .ok_or_else(|| missing(path, format!("Variable '{}' not found", name)).into())
}

/// Real part of a numeric MATLAB array, converted to `f64`. MATLAB may store values in a smaller type than the
/// class of the array, so every storage type is accepted
fn numeric_values(array: &Array) -> Vec<f64> {
    macro_rules! to_f64 {
        ($real:expr) => {
            $real.iter().map(|value| *value as f64).collect()
        };
    }

    match array.data() {
        NumericData::Int8 { real, .. } => to_f64!(real),
        NumericData::UInt8 { real, .. } => to_f64!(real),
        NumericData::Int16 { real, .. } => to_f64!(real),
        NumericData::UInt16 { real, .. } => to_f64!(real),
        NumericData::Int32 { real, .. } => to_f64!(real),
        NumericData::UInt32 { real, .. } => to_f64!(real),
        NumericData::Int64 { real, .. } => to_f64!(real),
        NumericData::UInt64 { real, .. } => to_f64!(real),
        NumericData::Single { real, .. } => to_f64!(real),
        NumericData::Double { real, .. } => real.clone(),
    }
}
