#![warn(clippy::all)]

//! Core data structures for evaluating a reconstructed point cloud against a ground truth scan
//!
//! A [PointCloud](crate::containers::PointCloud) holds positions and optional colors. The [masks](crate::masks)
//! module holds the spatial masks that decide which points take part in the evaluation, and [color](crate::color)
//! maps point distances to diagnostic colors. The algorithms working on these types live in `pointeval-algorithms`.

pub extern crate nalgebra;

/// Diagnostic color ramps for visualizing point distances
pub mod color;
pub mod containers;
mod error;
pub use self::error::*;
/// Observation masks and ground truth planes that restrict which points are evaluated
pub mod masks;
/// Useful mathematical tools when working with point cloud data
pub mod math;
