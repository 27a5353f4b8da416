#![warn(clippy::all)]

use anyhow::Result;
use log::{info, LevelFilter};
use pointeval_tools::{
    config::{command_line_app, EvaluationConfig},
    evaluation::run,
};

fn init_logging() {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.filter_level(LevelFilter::Info),
    };
    builder.init();
}

fn main() -> Result<()> {
    init_logging();

    let matches = command_line_app().get_matches();
    let config = EvaluationConfig::from_matches(&matches)?;

    let evaluation = run(&config)?;
    let metrics = &evaluation.comparison.metrics;
    info!(
        "{}: accuracy {:.3}mm, completeness {:.3}mm, precision {:.3}, recall {:.3}",
        config.method, metrics.accuracy, metrics.completeness, metrics.precision, metrics.recall
    );
    info!("Metrics written to {}", evaluation.files.metrics.display());

    Ok(())
}
