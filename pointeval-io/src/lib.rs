#![warn(clippy::all)]
//! I/O for point cloud evaluation
//!
//! - [base] picks the right reader or writer for a point cloud file based on its extension
//! - [ply] reads and writes PLY files
//! - [dtu] loads the observation masks and ground truth planes that ship with the DTU multi-view stereo benchmark

pub mod base;
pub mod dtu;
pub mod ply;
