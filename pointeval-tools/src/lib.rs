#![warn(clippy::all)]
//! The evaluation pipeline behind the `compare_clouds` binary, plus helpers for presenting its results
//!
//! [evaluation::run] loads both point clouds, downsamples them, builds the validity filters from the data set masks,
//! compares the clouds and hands the result to the [report] module.

pub mod config;
pub mod evaluation;
pub mod latex;
pub mod report;
