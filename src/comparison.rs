// src/comparison.rs

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use log::{info, warn};

use crate::config::ComparisonConfig;
use crate::data_analysis::channel_metrics::{
    evaluate_channels, write_channel_metrics, ChannelMetrics, FilterMethod,
};
use crate::data_analysis::summary::{format_value, RmseSummary};
use crate::data_input::signal_set::SignalSet;
use crate::error::ComparisonError;
use crate::plot_functions::plot_filter_comparison::plot_filter_comparison;
use crate::report::ReportDocument;
use crate::signal_names::SIGNAL_KINDS;

/// Everything one comparison run produced.
#[derive(Debug)]
pub struct ComparisonOutcome {
    pub channel_metrics: Vec<ChannelMetrics>,
    pub summary: RmseSummary,
    pub spatial_summary: RmseSummary,
    pub report_index: PathBuf,
}

/// Runs the full pass: load, evaluate, plot, aggregate, write.
///
/// Any missing file, unknown channel or shape mismatch aborts the run.
pub fn run_comparison(config: &ComparisonConfig) -> Result<ComparisonOutcome, Box<dyn Error>> {
    // --- Data Reading ---
    let reference = SignalSet::load_reference(&config.reference)?;
    let proposed = SignalSet::load_filtered(&config.proposed_filter)?;
    let spatial = SignalSet::load_filtered(&config.spatial_filter)?;

    if reference.q.in_degrees() == Some(false) {
        warn!(
            "'{}' declares inDegrees=no; rotational channels are still compared in degrees",
            reference.q.source_path().display()
        );
    }

    fs::create_dir_all(&config.output_dir).map_err(|source| ComparisonError::Io {
        path: config.output_dir.clone(),
        source,
    })?;

    // --- Metrics ---
    let channel_metrics = evaluate_channels(&reference, &proposed, &spatial)?;
    for m in &channel_metrics {
        info!(
            "{}: {} d_q/d_u/d_a = {}/{}/{}, {} = {}/{}/{}",
            m.channel,
            FilterMethod::Proposed.label(),
            format_value(m.proposed[0]),
            format_value(m.proposed[1]),
            format_value(m.proposed[2]),
            FilterMethod::Spatial.label(),
            format_value(m.spatial[0]),
            format_value(m.spatial[1]),
            format_value(m.spatial[2]),
        );
    }
    write_channel_metrics(&config.channel_rmse_file(), &channel_metrics)?;

    // --- Report ---
    let mut document = ReportDocument::create(&config.report_dir())?;
    plot_filter_comparison(&mut document, &channel_metrics, &reference, &proposed, &spatial)?;
    let report_index = document.finish()?;

    // --- Aggregate ---
    let summary = RmseSummary::from_metrics(&channel_metrics, FilterMethod::Proposed);
    if !summary.excluded_channels.is_empty() {
        info!(
            "Excluded from summary (position RMSE is NaN): {}",
            summary.excluded_channels.join(", ")
        );
    }
    for line in summary.lines() {
        println!("{line}");
    }
    summary.write(&config.metrics_file())?;

    let spatial_summary = RmseSummary::from_metrics(&channel_metrics, FilterMethod::Spatial);
    for (kind, line) in SIGNAL_KINDS.iter().zip(spatial_summary.lines()) {
        info!(
            "{} over {} channels: {line}",
            FilterMethod::Spatial.label(),
            spatial_summary.stats(*kind).count
        );
    }

    Ok(ComparisonOutcome {
        channel_metrics,
        summary,
        spatial_summary,
        report_index,
    })
}
