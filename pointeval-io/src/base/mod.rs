use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::info;
use pointeval_algorithms::voxel_grid::voxel_down_sample;
use pointeval_core::{containers::PointCloud, EvalError};

use crate::ply::{read_ply_file, write_ply_file};

#[derive(Debug)]
enum SupportedFileExtensions {
    Ply,
}

/// Returns a lookup value for the file extension of the given file path
fn get_extension_lookup(path: &Path) -> Result<Option<SupportedFileExtensions>> {
    let extension = match path.extension() {
        Some(ex) => ex,
        None => return Ok(None),
    };
    let extension_str = extension.to_str().ok_or_else(|| {
        anyhow!(
            "File extension of path {} is no valid Unicode string",
            path.display()
        )
    })?;
    match extension_str.to_lowercase().as_str() {
        "ply" => Ok(Some(SupportedFileExtensions::Ply)),
        _ => Ok(None),
    }
}

/// Checks whether the given `path` has the extension of a supported point cloud format
pub fn is_supported_file<P: AsRef<Path>>(path: P) -> Result<bool> {
    Ok(get_extension_lookup(path.as_ref())?.is_some())
}

/// Reads the point cloud at `path`. The format is determined from the file extension; for unsupported extensions an
/// [EvalError::InvalidFormat] is returned before the file is touched
pub fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointCloud> {
    let path = path.as_ref();
    match get_extension_lookup(path)? {
        Some(SupportedFileExtensions::Ply) => read_ply_file(path),
        None => Err(EvalError::InvalidFormat(path.to_path_buf()).into()),
    }
}

/// Writes `cloud` to `path`, choosing the format from the file extension
pub fn write_point_cloud<P: AsRef<Path>>(path: P, cloud: &PointCloud) -> Result<()> {
    let path = path.as_ref();
    match get_extension_lookup(path)? {
        Some(SupportedFileExtensions::Ply) => write_ply_file(path, cloud),
        None => Err(EvalError::InvalidFormat(path.to_path_buf()).into()),
    }
}

/// Reads the point cloud at `path` and downsamples it with a voxel grid of edge length `voxel_size`
pub fn read_and_downsample<P: AsRef<Path>>(path: P, voxel_size: f64) -> Result<PointCloud> {
    let path = path.as_ref();
    let cloud = read_point_cloud(path)?;
    let downsampled = voxel_down_sample(&cloud, voxel_size)
        .with_context(|| format!("Could not downsample point cloud {}", path.display()))?;
    info!(
        "Loaded {} ({} points, {} after downsampling)",
        path.display(),
        cloud.len(),
        downsampled.len()
    );
    Ok(downsampled)
}
