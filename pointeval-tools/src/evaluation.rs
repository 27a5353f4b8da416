use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use pointeval_algorithms::{
    comparison::{compare_point_clouds, Comparison},
    filters::{accept_all_filter, build_src_points_filter, build_tgt_points_filter},
};
use pointeval_core::containers::PointCloud;
use pointeval_io::{base::read_and_downsample, dtu::load_scene_masks};

use crate::{
    config::{DataSet, EvaluationConfig},
    report::{write_report, ReportFiles},
};

/// Outcome of a complete evaluation run
#[derive(Debug)]
pub struct Evaluation {
    pub output_dir: PathBuf,
    pub comparison: Comparison,
    pub files: ReportFiles,
}

/// Validity filters for the downsampled source and target clouds
fn build_filters(
    config: &EvaluationConfig,
    source: &PointCloud,
    target: &PointCloud,
) -> Result<(Vec<bool>, Vec<bool>)> {
    match config.data_set {
        DataSet::Dtu => {
            let masks = load_scene_masks(&config.data_path, &config.scene)?;
            Ok((
                build_src_points_filter(source, &masks.observation_mask),
                build_tgt_points_filter(target, &masks.plane),
            ))
        }
        DataSet::None => Ok((accept_all_filter(source), accept_all_filter(target))),
    }
}

/// Runs the whole evaluation described by `config`: loads and downsamples both clouds, filters them with the masks of
/// the configured data set, compares them and writes the report into [EvaluationConfig::output_dir]
pub fn run(config: &EvaluationConfig) -> Result<Evaluation> {
    config.validate()?;

    let output_dir = config.output_dir();
    std::fs::create_dir_all(&output_dir).with_context(|| {
        format!(
            "Could not create output directory {}",
            output_dir.display()
        )
    })?;

    info!("Loading point clouds...");
    let source = read_and_downsample(&config.src_ply, config.voxel_size)?;
    let target = read_and_downsample(&config.tgt_ply, config.voxel_size)?;

    info!("Building point filters ({} data set)...", config.data_set);
    let (source_filter, target_filter) = build_filters(config, &source, &target)?;

    info!("Computing metrics between point clouds...");
    let comparison = compare_point_clouds(
        &source,
        &target,
        config.max_dist,
        &source_filter,
        &target_filter,
    )
    .with_context(|| {
        format!(
            "Could not compare {} against {}",
            config.src_ply.display(),
            config.tgt_ply.display()
        )
    })?;

    info!("Saving evaluation statistics...");
    let files = write_report(&output_dir, config, &comparison)?;

    Ok(Evaluation {
        output_dir,
        comparison,
        files,
    })
}
