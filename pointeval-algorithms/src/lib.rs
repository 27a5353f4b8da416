#![warn(clippy::all)]
//! Algorithms for comparing a reconstructed point cloud against a ground truth point cloud.
//!
//! A typical evaluation downsamples both clouds with [voxel_grid], builds one validity filter per cloud with
//! [filters], and then hands everything to [comparison::compare_point_clouds], which computes accuracy,
//! completeness, precision and recall together with colored diagnostic clouds.

// Compare two point clouds using bidirectional nearest-neighbour distances.
pub mod comparison;
// Nearest-neighbour distances from every point of one cloud to another cloud.
pub mod distance;
// Validity filters derived from observation masks and ground truth planes.
pub mod filters;
// Downsample a point cloud by merging all points within a voxel into their centroid.
pub mod voxel_grid;
