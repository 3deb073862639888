// src/data_analysis/channel_metrics.rs

use std::path::Path;

use log::{debug, info};

use crate::constants::{LABEL_PROPOSED_FILTER, LABEL_SPATIAL_FILTER};
use crate::data_analysis::rmse::{channel_rmse, channel_scale};
use crate::data_input::signal_set::SignalSet;
use crate::error::{ComparisonError, Result};
use crate::signal_names::{SignalKind, SIGNAL_COUNT, SIGNAL_KINDS};

/// Real-time filter under evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMethod {
    Proposed,
    Spatial,
}

impl FilterMethod {
    pub fn label(self) -> &'static str {
        match self {
            FilterMethod::Proposed => LABEL_PROPOSED_FILTER,
            FilterMethod::Spatial => LABEL_SPATIAL_FILTER,
        }
    }
}

/// RMSE of one channel for both filters, indexed by `SignalKind::index()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMetrics {
    pub channel: String,
    pub scale: f64,
    pub proposed: [f64; SIGNAL_COUNT],
    pub spatial: [f64; SIGNAL_COUNT],
}

impl ChannelMetrics {
    pub fn proposed_rmse(&self, kind: SignalKind) -> f64 {
        self.proposed[kind.index()]
    }

    pub fn spatial_rmse(&self, kind: SignalKind) -> f64 {
        self.spatial[kind.index()]
    }

    pub fn rmse(&self, method: FilterMethod, kind: SignalKind) -> f64 {
        match method {
            FilterMethod::Proposed => self.proposed_rmse(kind),
            FilterMethod::Spatial => self.spatial_rmse(kind),
        }
    }

    /// Channels whose position reference is degenerate are left out of the summary.
    pub fn is_valid(&self) -> bool {
        !self.proposed_rmse(SignalKind::Position).is_nan()
    }
}

/// Evaluates one channel of the reference against both filtered sets.
///
/// Columns are matched by name in every table, so the filtered files may
/// order their channels differently from the reference.
pub fn evaluate_channel(
    channel: &str,
    reference: &SignalSet,
    proposed: &SignalSet,
    spatial: &SignalSet,
) -> Result<ChannelMetrics> {
    let scale = channel_scale(channel);
    let mut proposed_rmse = [f64::NAN; SIGNAL_COUNT];
    let mut spatial_rmse = [f64::NAN; SIGNAL_COUNT];

    for kind in SIGNAL_KINDS {
        let reference_values = reference.table(kind).column_by_name(channel)?;
        let proposed_values = proposed.table(kind).column_by_name(channel)?;
        let spatial_values = spatial.table(kind).column_by_name(channel)?;

        proposed_rmse[kind.index()] = channel_rmse(reference_values, proposed_values, scale)?;
        spatial_rmse[kind.index()] = channel_rmse(reference_values, spatial_values, scale)?;
    }

    debug!("Channel '{channel}': scale {scale}, proposed {proposed_rmse:?}, spatial {spatial_rmse:?}");

    Ok(ChannelMetrics {
        channel: channel.to_string(),
        scale,
        proposed: proposed_rmse,
        spatial: spatial_rmse,
    })
}

/// Evaluates every reference channel (all columns after `time`), in reference order.
pub fn evaluate_channels(
    reference: &SignalSet,
    proposed: &SignalSet,
    spatial: &SignalSet,
) -> Result<Vec<ChannelMetrics>> {
    let channels = reference.q.channel_labels();
    info!("Evaluating {} channels", channels.len());
    channels
        .iter()
        .map(|channel| evaluate_channel(channel, reference, proposed, spatial))
        .collect()
}

/// Writes the per-channel RMSE table as CSV.
pub fn write_channel_metrics(path: &Path, metrics: &[ChannelMetrics]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "channel", "scale", "d_q", "d_u", "d_a", "d_q_sp", "d_u_sp", "d_a_sp",
    ])?;
    for m in metrics {
        let mut record = vec![m.channel.clone(), m.scale.to_string()];
        record.extend(m.proposed.iter().map(|v| v.to_string()));
        record.extend(m.spatial.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush().map_err(|source| ComparisonError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Per-channel RMSE saved as '{}'.", path.display());
    Ok(())
}
