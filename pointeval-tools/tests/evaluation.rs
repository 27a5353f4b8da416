// The DTU mask fixtures are shared with the io crate
#[path = "../../pointeval-io/tests/common/mod.rs"]
mod common;

use std::path::Path;

use assert_approx_eq::assert_approx_eq;
use common::write_dtu_fixture;
use pointeval_core::{
    color::invalid_point_color, containers::PointCloud, nalgebra::Point3, CloudSide, EvalError,
};
use pointeval_io::base::{read_point_cloud, write_point_cloud};
use pointeval_tools::{
    config::{DataSet, EvaluationConfig},
    evaluation::run,
};

fn write_cloud(path: &Path, positions: &[[f64; 3]]) {
    let cloud = positions
        .iter()
        .map(|p| Point3::new(p[0], p[1], p[2]))
        .collect::<PointCloud>();
    write_point_cloud(path, &cloud).unwrap();
}

fn test_config(dir: &Path) -> EvaluationConfig {
    let src_ply = dir.join("src.ply");
    let tgt_ply = dir.join("tgt.ply");
    write_cloud(&src_ply, &[[0.0, 0.0, 0.1], [1.0, 0.0, 0.5]]);
    write_cloud(&tgt_ply, &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);

    EvaluationConfig {
        method: "test".into(),
        src_ply,
        tgt_ply,
        data_path: dir.join("no_masks"),
        output_path: dir.join("evaluation"),
        scene: "7".into(),
        voxel_size: 0.01,
        max_dist: 0.4,
        data_set: DataSet::None,
        plot: false,
        ..Default::default()
    }
}

fn eval_error(err: &anyhow::Error) -> Option<&EvalError> {
    err.downcast_ref::<EvalError>()
}

#[test]
fn test_evaluation_without_masks() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = test_config(dir.path());

    let evaluation = run(&config)?;

    assert_eq!(
        dir.path().join("evaluation").join("test_007_l3_Points"),
        evaluation.output_dir
    );
    let metrics = evaluation.comparison.metrics;
    assert_approx_eq!(0.3, metrics.accuracy);
    assert_approx_eq!(0.3, metrics.completeness);
    assert_approx_eq!(0.5, metrics.precision);
    assert_approx_eq!(0.5, metrics.recall);

    let report = std::fs::read_to_string(&evaluation.files.metrics)?;
    let expected = "Method: test\n\
                    Voxel_size: 0.010mm | Distance threshold: 0.400mm\n\
                    Source point cloud size: 2\n\
                    Target point cloud size: 2\n\
                    Accuracy: 0.300mm\n\
                    Completeness: 0.300mm\n\
                    Precision: 0.500\n\
                    Recall: 0.500\n";
    assert_eq!(expected, report);

    assert!(evaluation.files.plot.is_none());
    let precision_cloud = read_point_cloud(&evaluation.files.precision_cloud)?;
    assert_eq!(2, precision_cloud.len());
    assert!(precision_cloud.has_colors());
    let recall_cloud = read_point_cloud(&evaluation.files.recall_cloud)?;
    assert_eq!(2, recall_cloud.len());

    Ok(())
}

/// Asserts that the first `valid_count` points of `cloud` are exactly `valid` (in any order) and that all following
/// points are `invalid`, painted in the invalid point color
fn assert_valid_points_first(
    cloud: &PointCloud,
    valid_count: usize,
    valid: &[Point3<f64>],
    invalid: &[Point3<f64>],
) {
    assert_eq!(valid.len() + invalid.len(), cloud.len());
    assert_eq!(valid.len(), valid_count);
    let (valid_part, invalid_part) = cloud.positions().split_at(valid_count);
    for point in valid {
        assert!(valid_part.contains(point), "{} is not among the valid points", point);
    }
    for point in invalid {
        assert!(invalid_part.contains(point), "{} is not among the masked points", point);
    }

    let colors = cloud.colors().expect("Diagnostic clouds are colored");
    assert!(colors[..valid_count]
        .iter()
        .all(|color| *color != invalid_point_color()));
    assert!(colors[valid_count..]
        .iter()
        .all(|color| *color == invalid_point_color()));
}

#[test]
fn test_evaluation_with_dtu_masks() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    // Mask from (-1, -1, -1) with 0.5 cells, observed among others where the cell x index is 1. Ground truth plane
    // is z = 0
    write_dtu_fixture(dir.path(), "5")?;

    let observed_source = [Point3::new(-0.5, -1.0, -1.0), Point3::new(-0.5, -0.5, -0.5)];
    let masked_source = [Point3::new(-1.0, -1.0, -1.0), Point3::new(5.0, 5.0, 5.0)];
    let above_plane_target = [Point3::new(-0.5, -1.0, 0.5), Point3::new(-0.5, -0.5, 0.25)];
    let below_plane_target = [Point3::new(0.0, 0.0, -2.0), Point3::new(3.0, 3.0, 0.0)];

    let mut config = test_config(dir.path());
    write_point_cloud(
        &config.src_ply,
        &PointCloud::from_positions(vec![
            masked_source[0],
            observed_source[0],
            masked_source[1],
            observed_source[1],
        ]),
    )?;
    write_point_cloud(
        &config.tgt_ply,
        &PointCloud::from_positions(vec![
            below_plane_target[0],
            above_plane_target[0],
            below_plane_target[1],
            above_plane_target[1],
        ]),
    )?;
    config.data_path = dir.path().to_path_buf();
    config.scene = "5".into();
    config.data_set = DataSet::Dtu;
    config.plot = true;

    let evaluation = run(&config)?;
    let comparison = &evaluation.comparison;

    assert_eq!(2, comparison.valid_source_count);
    assert_eq!(2, comparison.valid_target_count);
    assert_valid_points_first(
        &comparison.precision_cloud,
        comparison.valid_source_count,
        &observed_source,
        &masked_source,
    );
    assert_valid_points_first(
        &comparison.recall_cloud,
        comparison.valid_target_count,
        &above_plane_target,
        &below_plane_target,
    );

    let report = std::fs::read_to_string(&evaluation.files.metrics)?;
    assert!(report.contains("Source point cloud size: 2\n"));
    assert!(report.contains("Target point cloud size: 2\n"));

    let plot = evaluation.files.plot.expect("Plotting was enabled");
    assert_eq!(
        evaluation.output_dir.join("metrics_test.png"),
        plot
    );
    assert!(std::fs::metadata(&plot)?.len() > 0);
    assert_eq!(4, read_point_cloud(&evaluation.files.precision_cloud)?.len());

    Ok(())
}

#[test]
fn test_far_away_target_has_no_valid_points() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = test_config(dir.path());
    write_cloud(&config.tgt_ply, &[[100.0, 100.0, 100.0]]);

    let err = run(&config).unwrap_err();
    assert!(matches!(
        eval_error(&err),
        Some(EvalError::EmptyValidSet(CloudSide::Source))
    ));
    Ok(())
}

#[test]
fn test_unsupported_cloud_format() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut config = test_config(dir.path());
    config.src_ply = dir.path().join("src.obj");

    let err = run(&config).unwrap_err();
    assert!(matches!(eval_error(&err), Some(EvalError::InvalidFormat(_))));
    Ok(())
}

#[test]
fn test_missing_dtu_masks() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut config = test_config(dir.path());
    config.data_set = DataSet::Dtu;

    let err = run(&config).unwrap_err();
    assert!(matches!(
        eval_error(&err),
        Some(EvalError::MissingMaskData { .. })
    ));
    Ok(())
}

#[test]
fn test_invalid_voxel_size() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut config = test_config(dir.path());
    config.voxel_size = 0.0;

    let err = run(&config).unwrap_err();
    assert!(matches!(
        eval_error(&err),
        Some(EvalError::InvalidParameter(_))
    ));
    Ok(())
}
