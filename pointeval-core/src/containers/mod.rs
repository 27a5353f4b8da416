//! In-memory point cloud containers
//!
//! Unlike a general purpose point buffer with arbitrary attributes, evaluation only ever needs positions and
//! (optionally) RGB colors, so [PointCloud](PointCloud) stores exactly these two attributes in separate columns.

mod point_cloud;
pub use self::point_cloud::*;
