// src/data_analysis/summary.rs

use std::fs;
use std::path::Path;

use log::info;
use ndarray::Array1;

use crate::constants::SUMMARY_DECIMALS;
use crate::data_analysis::channel_metrics::{ChannelMetrics, FilterMethod};
use crate::error::{ComparisonError, Result};
use crate::signal_names::{SignalKind, SIGNAL_COUNT, SIGNAL_KINDS};

/// Mean and sample standard deviation, rounded for reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub mean: f64,
    pub std: f64,
    pub count: usize,
}

/// Rounds to `decimals` places, ties to even (`0.0125` -> `0.012`). NaN stays NaN.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Mean and Bessel-corrected standard deviation (N - 1).
///
/// An empty list has NaN mean and std; a single value has NaN std.
pub fn summarize(values: &[f64]) -> SummaryStats {
    let values = Array1::from(values.to_vec());
    let mean = values.mean().unwrap_or(f64::NAN);
    let std = if values.len() > 1 {
        values.std(1.0)
    } else {
        f64::NAN
    };
    SummaryStats {
        mean: round_to(mean, SUMMARY_DECIMALS),
        std: round_to(std, SUMMARY_DECIMALS),
        count: values.len(),
    }
}

/// Formats a float the way the summary has always been printed:
/// integral values keep one decimal (`0.0`), NaN prints as `nan`.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Aggregate RMSE statistics of one filter over all valid channels.
#[derive(Debug, Clone, PartialEq)]
pub struct RmseSummary {
    pub method: FilterMethod,
    pub stats: [SummaryStats; SIGNAL_COUNT],
    pub excluded_channels: Vec<String>,
}

impl RmseSummary {
    /// Collects the RMSE of valid channels; channels with a degenerate
    /// reference are excluded from every signal kind.
    pub fn from_metrics(metrics: &[ChannelMetrics], method: FilterMethod) -> Self {
        let (valid, excluded): (Vec<&ChannelMetrics>, Vec<&ChannelMetrics>) =
            metrics.iter().partition(|m| m.is_valid());

        let stats = SIGNAL_KINDS.map(|kind| {
            let values: Vec<f64> = valid.iter().map(|m| m.rmse(method, kind)).collect();
            summarize(&values)
        });

        Self {
            method,
            stats,
            excluded_channels: excluded.iter().map(|m| m.channel.clone()).collect(),
        }
    }

    pub fn stats(&self, kind: SignalKind) -> SummaryStats {
        self.stats[kind.index()]
    }

    /// `d_q: μ = 0.123 σ = 0.045` for each signal kind.
    pub fn lines(&self) -> Vec<String> {
        SIGNAL_KINDS
            .iter()
            .map(|&kind| {
                let stats = self.stats(kind);
                format!(
                    "{}: μ = {} σ = {}",
                    kind.summary_key(),
                    format_value(stats.mean),
                    format_value(stats.std)
                )
            })
            .collect()
    }

    /// Contents of the summary file: a title line then one tab-indented line per signal.
    pub fn file_contents(&self) -> String {
        let body = self
            .lines()
            .iter()
            .map(|line| format!("\t{line}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!("RMSE\n{body}")
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.file_contents()).map_err(|source| ComparisonError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Summary saved as '{}'.", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(channel: &str, proposed: [f64; 3]) -> ChannelMetrics {
        ChannelMetrics {
            channel: channel.to_string(),
            scale: 1.0,
            proposed,
            spatial: [1.0, 1.0, 1.0],
        }
    }

    #[test]
    fn test_summarize_uses_bessel_correction() {
        // Deviations from the mean (2.5): -1.5, -0.5, 0.5, 1.5 -> sum of squares 5.
        let stats = summarize(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.std, round_to((5.0f64 / 3.0).sqrt(), 3));
        assert_eq!(stats.std, 1.291);
        assert_eq!(stats.count, 4);
    }

    #[test]
    fn test_single_value_std_is_nan() {
        let stats = summarize(&[0.7]);
        assert_eq!(stats.mean, 0.7);
        assert!(stats.std.is_nan());
    }

    #[test]
    fn test_empty_summary_is_nan() {
        let stats = summarize(&[]);
        assert!(stats.mean.is_nan());
        assert!(stats.std.is_nan());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.12345, 3), 0.123);
        assert_eq!(round_to(2.0004, 3), 2.0);
        assert!(round_to(f64::NAN, 3).is_nan());
    }

    #[test]
    fn test_round_to_ties_go_to_even() {
        assert_eq!(round_to(0.0125, 3), 0.012);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
        let stats = summarize(&[0.0125, 0.0125]);
        assert_eq!(format_value(stats.mean), "0.012");
        assert_eq!(stats.std, 0.0);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.0), "0.0");
        assert_eq!(format_value(3.0), "3.0");
        assert_eq!(format_value(0.123), "0.123");
        assert_eq!(format_value(12.5), "12.5");
        assert_eq!(format_value(f64::NAN), "nan");
    }

    #[test]
    fn test_degenerate_channels_excluded() {
        let all = vec![
            metrics("hip_flexion_r", [1.0, 2.0, 3.0]),
            metrics("mtp_angle_r", [f64::NAN, 50.0, 50.0]),
            metrics("knee_angle_r", [3.0, 4.0, 5.0]),
        ];
        let summary = RmseSummary::from_metrics(&all, FilterMethod::Proposed);
        assert_eq!(summary.excluded_channels, vec!["mtp_angle_r".to_string()]);
        assert_eq!(summary.stats(SignalKind::Position).mean, 2.0);
        assert_eq!(summary.stats(SignalKind::Velocity).mean, 3.0);
        assert_eq!(summary.stats(SignalKind::Acceleration).count, 2);
        assert_eq!(summary.stats(SignalKind::Acceleration).std, 1.414);
    }

    #[test]
    fn test_file_contents_format() {
        let all = vec![metrics("a", [0.0, 0.0, 0.0]), metrics("b", [0.0, 0.0, 0.0])];
        let summary = RmseSummary::from_metrics(&all, FilterMethod::Proposed);
        assert_eq!(
            summary.file_contents(),
            "RMSE\n\td_q: μ = 0.0 σ = 0.0\n\td_u: μ = 0.0 σ = 0.0\n\td_a: μ = 0.0 σ = 0.0"
        );
    }

    #[test]
    fn test_spatial_summary_uses_spatial_values() {
        let all = vec![metrics("a", [5.0, 5.0, 5.0]), metrics("b", [7.0, 7.0, 7.0])];
        let summary = RmseSummary::from_metrics(&all, FilterMethod::Spatial);
        assert_eq!(summary.stats(SignalKind::Position).mean, 1.0);
        assert_eq!(summary.stats(SignalKind::Position).std, 0.0);
    }
}
