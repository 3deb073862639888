// src/plot_functions/plot_filter_comparison.rs

use std::error::Error;

use ndarray::ArrayView1;
use ndarray_stats::QuantileExt; // min_skipnan / max_skipnan for the plot ranges

use crate::constants::{
    COLOR_PROPOSED_FILTER, COLOR_REFERENCE, COLOR_SPATIAL_FILTER, LABEL_REFERENCE,
    LINE_WIDTH_PLOT,
};
use crate::data_analysis::channel_metrics::{ChannelMetrics, FilterMethod};
use crate::data_analysis::summary::format_value;
use crate::data_input::signal_set::SignalSet;
use crate::plot_framework::{
    calculate_range, calculate_time_range, draw_side_by_side_page, Annotation, Corner, PlotConfig,
    PlotSeries,
};
use crate::report::ReportDocument;
use crate::signal_names::{SignalKind, SIGNAL_KINDS};

/// Time/value pairs with non-finite points dropped; values multiplied by `scale`.
fn series_points(time: ArrayView1<f64>, values: ArrayView1<f64>, scale: f64) -> Vec<(f64, f64)> {
    time.iter()
        .zip(values.iter())
        .map(|(&t, &v)| (t, scale * v))
        .filter(|(t, v)| t.is_finite() && v.is_finite())
        .collect()
}

/// Builds the sub-plot of one signal kind: reference, proposed and spatial
/// filter curves with both RMSE values in the upper corners.
pub fn build_signal_plot(
    kind: SignalKind,
    metrics: &ChannelMetrics,
    reference: &SignalSet,
    proposed: &SignalSet,
    spatial: &SignalSet,
) -> Result<PlotConfig, Box<dyn Error>> {
    let channel = metrics.channel.as_str();
    let sources = [
        (reference, 1.0, LABEL_REFERENCE, *COLOR_REFERENCE),
        (proposed, metrics.scale, FilterMethod::Proposed.label(), *COLOR_PROPOSED_FILTER),
        (spatial, metrics.scale, FilterMethod::Spatial.label(), *COLOR_SPATIAL_FILTER),
    ];

    let mut series = Vec::with_capacity(sources.len());
    let mut time_min = f64::INFINITY;
    let mut time_max = f64::NEG_INFINITY;
    let mut val_min = f64::INFINITY;
    let mut val_max = f64::NEG_INFINITY;

    for (set, scale, label, color) in sources {
        let table = set.table(kind);
        let time = table.time();
        let values = table.column_by_name(channel)?;

        if !time.is_empty() {
            time_min = time_min.min(*time.min_skipnan());
            time_max = time_max.max(*time.max_skipnan());
        }
        if !values.is_empty() {
            // Scaling may flip the order for negative scales; calculate_range sorts.
            let a = scale * *values.min_skipnan();
            let b = scale * *values.max_skipnan();
            val_min = val_min.min(a.min(b));
            val_max = val_max.max(a.max(b));
        }

        series.push(PlotSeries {
            data: series_points(time, values, scale),
            label: label.to_string(),
            color,
            stroke_width: LINE_WIDTH_PLOT,
        });
    }

    let (y_min, y_max) = calculate_range(val_min, val_max);

    Ok(PlotConfig {
        title: channel.to_string(),
        x_range: calculate_time_range(time_min, time_max),
        y_range: y_min..y_max,
        series,
        x_label: "time (s)".to_string(),
        y_label: kind.axis_label().to_string(),
        annotations: vec![
            Annotation {
                text: format!("RMSE = {}", format_value(metrics.rmse(FilterMethod::Proposed, kind))),
                corner: Corner::UpperLeft,
            },
            Annotation {
                text: format!("RMSE = {}", format_value(metrics.rmse(FilterMethod::Spatial, kind))),
                corner: Corner::UpperRight,
            },
        ],
        show_legend: kind == SignalKind::Position,
    })
}

/// Appends one page per channel to the report, in channel order.
pub fn plot_filter_comparison(
    document: &mut ReportDocument,
    channel_metrics: &[ChannelMetrics],
    reference: &SignalSet,
    proposed: &SignalSet,
    spatial: &SignalSet,
) -> Result<(), Box<dyn Error>> {
    let page_total = channel_metrics.len();
    for (page_index, metrics) in channel_metrics.iter().enumerate() {
        let mut plots = [None, None, None];
        for kind in SIGNAL_KINDS {
            plots[kind.index()] = Some(build_signal_plot(kind, metrics, reference, proposed, spatial)?);
        }
        let page_title = format!(
            "{} (scale {}) - page {}/{}",
            metrics.channel,
            metrics.scale,
            page_index + 1,
            page_total
        );
        document.append_page(&metrics.channel, |path| {
            draw_side_by_side_page(path, &page_title, &plots)
        })?;
    }
    Ok(())
}
