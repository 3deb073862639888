//! Centralized signal naming utilities
//!
//! Provides consistent names for the three kinematic signals across the
//! loader, the metric evaluator, the report and the summary.

/// Number of kinematic signals compared per channel.
pub const SIGNAL_COUNT: usize = 3;

/// Kinematic signal of a generalized coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Position,
    Velocity,
    Acceleration,
}

/// All signal kinds in report order.
pub const SIGNAL_KINDS: [SignalKind; SIGNAL_COUNT] = [
    SignalKind::Position,
    SignalKind::Velocity,
    SignalKind::Acceleration,
];

impl SignalKind {
    /// Key used in the summary lines (`d_q`, `d_u`, `d_a`).
    pub fn summary_key(self) -> &'static str {
        match self {
            SignalKind::Position => "d_q",
            SignalKind::Velocity => "d_u",
            SignalKind::Acceleration => "d_a",
        }
    }

    /// Y axis label of the report sub-plot.
    pub fn axis_label(self) -> &'static str {
        match self {
            SignalKind::Position => "coordinate (deg | m)",
            SignalKind::Velocity => "speed (deg / s | m / s)",
            SignalKind::Acceleration => "acceleration (deg / s^2 | m / s^2)",
        }
    }

    pub fn index(self) -> usize {
        match self {
            SignalKind::Position => 0,
            SignalKind::Velocity => 1,
            SignalKind::Acceleration => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_keys() {
        assert_eq!(SignalKind::Position.summary_key(), "d_q");
        assert_eq!(SignalKind::Velocity.summary_key(), "d_u");
        assert_eq!(SignalKind::Acceleration.summary_key(), "d_a");
    }

    #[test]
    fn test_signal_kinds_order_matches_index() {
        for (i, kind) in SIGNAL_KINDS.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
