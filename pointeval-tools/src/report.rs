use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use plotters::prelude::*;
use pointeval_algorithms::comparison::{Comparison, PrecisionRecallCurve};
use pointeval_io::base::write_point_cloud;

use crate::config::EvaluationConfig;

const PLOT_SIZE: (u32, u32) = (640, 480);

/// Paths of all files written by [write_report]
#[derive(Debug, Clone)]
pub struct ReportFiles {
    pub precision_cloud: PathBuf,
    pub recall_cloud: PathBuf,
    /// `None` if plotting was disabled
    pub plot: Option<PathBuf>,
    pub metrics: PathBuf,
}

/// Writes the diagnostic clouds, the precision/recall plot and the metrics summary of `comparison` into `output_dir`
pub fn write_report(
    output_dir: &Path,
    config: &EvaluationConfig,
    comparison: &Comparison,
) -> Result<ReportFiles> {
    let method = &config.method;

    let precision_cloud = output_dir.join(format!("precision_{}.ply", method));
    write_point_cloud(&precision_cloud, &comparison.precision_cloud)?;
    let recall_cloud = output_dir.join(format!("recall_{}.ply", method));
    write_point_cloud(&recall_cloud, &comparison.recall_cloud)?;

    let plot = if config.plot {
        let plot_path = output_dir.join(format!("metrics_{}.png", method));
        plot_precision_recall(&plot_path, &comparison.curve, config.max_dist)?;
        Some(plot_path)
    } else {
        None
    };

    let metrics = output_dir.join(format!("evaluation_metrics_{}.txt", method));
    std::fs::write(
        &metrics,
        format_metrics(method, config.voxel_size, config.max_dist, comparison),
    )
    .with_context(|| format!("Could not write metrics to {}", metrics.display()))?;

    info!("Wrote evaluation results to {}", output_dir.display());
    Ok(ReportFiles {
        precision_cloud,
        recall_cloud,
        plot,
        metrics,
    })
}

/// The plain text metrics summary
pub fn format_metrics(
    method: &str,
    voxel_size: f64,
    max_dist: f64,
    comparison: &Comparison,
) -> String {
    let metrics = &comparison.metrics;
    format!(
        "Method: {}\n\
         Voxel_size: {:.3}mm | Distance threshold: {:.3}mm\n\
         Source point cloud size: {}\n\
         Target point cloud size: {}\n\
         Accuracy: {:.3}mm\n\
         Completeness: {:.3}mm\n\
         Precision: {:.3}\n\
         Recall: {:.3}\n",
        method,
        voxel_size,
        max_dist,
        comparison.valid_source_count,
        comparison.valid_target_count,
        metrics.accuracy,
        metrics.completeness,
        metrics.precision,
        metrics.recall
    )
}

const MARKER_DASH_COUNT: usize = 20;

/// Segments of a dashed vertical line at `x` from `0` to `1`. Dashes and gaps have the same length
fn threshold_marker_dashes(x: f64) -> Vec<Vec<(f64, f64)>> {
    let step = 1.0 / (2 * MARKER_DASH_COUNT - 1) as f64;
    (0..MARKER_DASH_COUNT)
        .map(|idx| {
            let start = (2 * idx) as f64 * step;
            vec![(x, start), (x, start + step)]
        })
        .collect()
}

/// Plots the precision and recall curves over the distance threshold, with a vertical marker at `max_dist`
pub fn plot_precision_recall(path: &Path, curve: &PrecisionRecallCurve, max_dist: f64) -> Result<()> {
    let x_max = match curve.thresholds.last() {
        Some(last) if *last > 0.0 => *last,
        _ => 1.0,
    };

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Precision and Recall (t={}mm)", max_dist),
            ("sans-serif", 20.0).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..x_max, 0.0..1.05)?;

    chart.configure_mesh().x_desc("threshold").draw()?;

    let precision = curve
        .thresholds
        .iter()
        .copied()
        .zip(curve.precision.iter().copied());
    chart
        .draw_series(LineSeries::new(precision, &BLUE))?
        .label("precision")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    let recall = curve
        .thresholds
        .iter()
        .copied()
        .zip(curve.recall.iter().copied());
    chart
        .draw_series(LineSeries::new(recall, &RED))?
        .label("recall")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

    // Unlabeled, so the legend only lists precision and recall
    chart.draw_series(
        threshold_marker_dashes(max_dist)
            .into_iter()
            .map(|dash| PathElement::new(dash, &BLACK)),
    )?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()
        .with_context(|| format!("Could not write plot to {}", path.display()))?;
    Ok(())
}
