// src/main.rs

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use filter_comparison::comparison::run_comparison;
use filter_comparison::config::ComparisonConfig;

/// Compares the proposed and spatial real-time filters against the offline
/// kinematics reference and writes an RMSE report.
#[derive(Parser, Debug)]
#[command(name = "filter_comparison", version, about)]
struct Args {
    /// Subject directory holding `residual_reduction_algorithm/` and `real_time/filtering/`.
    #[arg(default_value = "..")]
    subject_dir: PathBuf,

    /// Where the report, metrics.txt and rmse_per_channel.csv are written
    /// (default: <SUBJECT_DIR>/real_time/filtering).
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.output_dir {
        Some(output_dir) => ComparisonConfig::with_output_dir(&args.subject_dir, output_dir),
        None => ComparisonConfig::from_subject_dir(&args.subject_dir),
    };

    info!(
        "filter_comparison {} - subject '{}', output '{}'",
        filter_comparison::crate_version(),
        config.subject_dir.display(),
        config.output_dir.display()
    );

    run_comparison(&config)?;
    Ok(())
}
