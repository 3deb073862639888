// src/data_input/storage_table.rs

use std::path::{Path, PathBuf};

use ndarray::{Array2, ArrayView1};

use crate::error::{ComparisonError, Result};

/// Which loader variant produced a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Offline pipeline output (degrees / meters, full header block).
    Reference,
    /// Real-time filter output (radians / meters, header block optional).
    Filtered,
}

/// In-memory storage table: a `time` column followed by named channels.
///
/// Values are kept row-major in an `Array2<f64>`; column `0` is always time.
#[derive(Debug, Clone)]
pub struct StorageTable {
    pub name: String,
    pub kind: StorageKind,
    pub source: PathBuf,
    pub metadata: Vec<(String, String)>, // Header `key=value` pairs, in file order.
    labels: Vec<String>,
    data: Array2<f64>,
}

impl StorageTable {
    /// Builds a table from labels and a `(rows, labels.len())` value matrix.
    pub fn new(
        name: String,
        kind: StorageKind,
        source: PathBuf,
        metadata: Vec<(String, String)>,
        labels: Vec<String>,
        data: Array2<f64>,
    ) -> Self {
        debug_assert_eq!(labels.len(), data.ncols());
        Self {
            name,
            kind,
            source,
            metadata,
            labels,
            data,
        }
    }

    /// Column labels including the leading `time` label.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Channel labels, i.e. every label after `time`.
    pub fn channel_labels(&self) -> &[String] {
        self.labels.get(1..).unwrap_or(&[])
    }

    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_columns(&self) -> usize {
        self.data.ncols()
    }

    pub fn time(&self) -> ArrayView1<'_, f64> {
        self.data.column(0)
    }

    pub fn column(&self, index: usize) -> ArrayView1<'_, f64> {
        self.data.column(index)
    }

    /// Position of a column by label.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.labels
            .iter()
            .position(|label| label == name)
            .ok_or_else(|| ComparisonError::ColumnNotFound {
                name: name.to_string(),
                path: self.source.clone(),
            })
    }

    pub fn column_by_name(&self, name: &str) -> Result<ArrayView1<'_, f64>> {
        Ok(self.column(self.column_index(name)?))
    }

    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// `inDegrees` header flag; `None` when the header does not declare it.
    pub fn in_degrees(&self) -> Option<bool> {
        self.metadata_value("inDegrees")
            .map(|v| v.trim().eq_ignore_ascii_case("yes"))
    }

    /// Average sample rate from the time column, ignoring non-increasing steps.
    pub fn sample_rate(&self) -> Option<f64> {
        let time = self.time();
        let mut total_delta = 0.0;
        let mut count = 0;
        for pair in time.windows(2) {
            let delta = pair[1] - pair[0];
            if delta > 1e-9 {
                total_delta += delta;
                count += 1;
            }
        }
        if count > 0 {
            Some(count as f64 / total_delta)
        } else {
            None
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample_table() -> StorageTable {
        StorageTable::new(
            "test".to_string(),
            StorageKind::Reference,
            PathBuf::from("test.sto"),
            vec![("inDegrees".to_string(), "yes".to_string())],
            vec!["time".into(), "hip_flexion_r".into(), "pelvis_tx".into()],
            array![[0.0, 1.0, 0.1], [0.01, 2.0, 0.2], [0.02, 3.0, 0.3]],
        )
    }

    #[test]
    fn test_column_lookup_by_name() {
        let table = sample_table();
        assert_eq!(table.column_index("pelvis_tx").unwrap(), 2);
        assert_eq!(table.column_by_name("hip_flexion_r").unwrap()[2], 3.0);
        assert!(matches!(
            table.column_index("knee_angle_r"),
            Err(ComparisonError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_channel_labels_skip_time() {
        let table = sample_table();
        assert_eq!(table.channel_labels(), &["hip_flexion_r", "pelvis_tx"]);
        assert_eq!(table.time().to_vec(), vec![0.0, 0.01, 0.02]);
    }

    #[test]
    fn test_header_flags() {
        let table = sample_table();
        assert_eq!(table.in_degrees(), Some(true));
        assert_eq!(table.metadata_value("nRows"), None);
    }

    #[test]
    fn test_sample_rate() {
        let rate = sample_table().sample_rate().unwrap();
        assert!((rate - 100.0).abs() < 1e-6);
    }
}
