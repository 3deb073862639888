// src/config.rs

use std::path::{Path, PathBuf};

use crate::constants::{
    CHANNEL_RMSE_FILE, FILTERED_QDDOT_FILE, FILTERED_QDOT_FILE, FILTERED_Q_FILE, FILTERING_DIR,
    METRICS_FILE, REFERENCE_DIR, REFERENCE_QDDOT_FILE, REFERENCE_QDOT_FILE, REFERENCE_Q_FILE,
    REPORT_DIR_NAME, SPATIAL_FILTER_DIR,
};

/// Position, velocity and acceleration storage files of one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalFiles {
    pub q: PathBuf,
    pub q_dot: PathBuf,
    pub q_ddot: PathBuf,
}

impl SignalFiles {
    fn in_dir(dir: &Path, q: &str, q_dot: &str, q_ddot: &str) -> Self {
        Self {
            q: dir.join(q),
            q_dot: dir.join(q_dot),
            q_ddot: dir.join(q_ddot),
        }
    }
}

/// Resolved input and output locations of one comparison run.
///
/// Everything is derived from the subject directory, following the layout
/// produced by the offline pipeline and the real-time filters:
///
/// ```text
/// <subject>/residual_reduction_algorithm/task_Kinematics_{q,u,dudt}.sto
/// <subject>/real_time/filtering/{q,qDot,qDDot}_filtered.sto
/// <subject>/real_time/filtering/spatial_filter/{q,qDot,qDDot}_filtered.sto
/// ```
#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    pub subject_dir: PathBuf,
    pub output_dir: PathBuf,
    pub reference: SignalFiles,
    pub proposed_filter: SignalFiles,
    pub spatial_filter: SignalFiles,
}

impl ComparisonConfig {
    /// Default layout; outputs go next to the proposed filter's files.
    pub fn from_subject_dir(subject_dir: &Path) -> Self {
        let filtering_dir = subject_dir.join(FILTERING_DIR);
        Self::with_output_dir(subject_dir, &filtering_dir)
    }

    pub fn with_output_dir(subject_dir: &Path, output_dir: &Path) -> Self {
        let reference_dir = subject_dir.join(REFERENCE_DIR);
        let filtering_dir = subject_dir.join(FILTERING_DIR);
        let spatial_dir = filtering_dir.join(SPATIAL_FILTER_DIR);
        Self {
            subject_dir: subject_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            reference: SignalFiles::in_dir(
                &reference_dir,
                REFERENCE_Q_FILE,
                REFERENCE_QDOT_FILE,
                REFERENCE_QDDOT_FILE,
            ),
            proposed_filter: SignalFiles::in_dir(
                &filtering_dir,
                FILTERED_Q_FILE,
                FILTERED_QDOT_FILE,
                FILTERED_QDDOT_FILE,
            ),
            spatial_filter: SignalFiles::in_dir(
                &spatial_dir,
                FILTERED_Q_FILE,
                FILTERED_QDOT_FILE,
                FILTERED_QDDOT_FILE,
            ),
        }
    }

    pub fn report_dir(&self) -> PathBuf {
        self.output_dir.join(REPORT_DIR_NAME)
    }

    pub fn metrics_file(&self) -> PathBuf {
        self.output_dir.join(METRICS_FILE)
    }

    pub fn channel_rmse_file(&self) -> PathBuf {
        self.output_dir.join(CHANNEL_RMSE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = ComparisonConfig::from_subject_dir(Path::new("subject01"));
        assert_eq!(
            config.reference.q_dot,
            PathBuf::from("subject01/residual_reduction_algorithm/task_Kinematics_u.sto")
        );
        assert_eq!(
            config.proposed_filter.q_ddot,
            PathBuf::from("subject01/real_time/filtering/qDDot_filtered.sto")
        );
        assert_eq!(
            config.spatial_filter.q,
            PathBuf::from("subject01/real_time/filtering/spatial_filter/q_filtered.sto")
        );
        assert_eq!(
            config.metrics_file(),
            PathBuf::from("subject01/real_time/filtering/metrics.txt")
        );
    }

    #[test]
    fn test_output_dir_override() {
        let config = ComparisonConfig::with_output_dir(Path::new("s"), Path::new("out"));
        assert_eq!(config.report_dir(), PathBuf::from("out/filter_comparison"));
        assert_eq!(config.channel_rmse_file(), PathBuf::from("out/rmse_per_channel.csv"));
    }
}
