// src/data_input/storage_parser.rs

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::ReaderBuilder;
use log::{debug, info, warn};
use ndarray::Array2;

use crate::data_input::storage_table::{StorageKind, StorageTable};
use crate::error::{ComparisonError, Result};

const HEADER_END: &str = "endheader";

/// Reads a reference storage file (offline pipeline output).
///
/// The header block terminated by `endheader` is mandatory.
pub fn read_reference_storage(path: &Path) -> Result<StorageTable> {
    read_storage(path, StorageKind::Reference)
}

/// Reads a storage file written by one of the real-time filters.
///
/// The header block is optional; without `endheader` the first non-empty
/// line is taken as the column labels.
pub fn read_filtered_storage(path: &Path) -> Result<StorageTable> {
    read_storage(path, StorageKind::Filtered)
}

/// Parses an OpenSim storage file into a `StorageTable`.
pub fn read_storage(path: &Path, kind: StorageKind) -> Result<StorageTable> {
    let io_err = |source: std::io::Error| ComparisonError::Io {
        path: path.to_path_buf(),
        source,
    };

    // Pass 1: split the file into header, label row and data lines.
    let mut lines: Vec<(usize, String)> = Vec::new();
    {
        let file = File::open(path).map_err(io_err)?;
        for (index, line_result) in BufReader::new(file).lines().enumerate() {
            let line = line_result.map_err(io_err)?;
            lines.push((index + 1, line));
        }
    }

    let header_end = lines
        .iter()
        .position(|(_, line)| line.trim().eq_ignore_ascii_case(HEADER_END));

    let (header_lines, body) = match header_end {
        Some(end) => (&lines[..end], &lines[end + 1..]),
        None if kind == StorageKind::Filtered => (&lines[..0], &lines[..]),
        None => {
            return Err(ComparisonError::MissingHeaderEnd {
                path: path.to_path_buf(),
            })
        }
    };

    let mut name = String::new();
    let mut metadata: Vec<(String, String)> = Vec::new();
    for (_, line) in header_lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match trimmed.split_once('=') {
            Some((key, value)) => metadata.push((key.trim().to_string(), value.trim().to_string())),
            None if name.is_empty() => name = trimmed.to_string(),
            None => debug!("Ignoring header line '{trimmed}' in {}", path.display()),
        }
    }
    if name.is_empty() {
        name = path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();
    }

    let mut body_iter = body.iter().filter(|(_, line)| !line.trim().is_empty());
    let labels: Vec<String> = match body_iter.next() {
        Some((_, label_line)) => label_line
            .split('\t')
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .collect(),
        None => {
            return Err(ComparisonError::MissingLabels {
                path: path.to_path_buf(),
            })
        }
    };

    match labels.first() {
        Some(first) if first.eq_ignore_ascii_case("time") => {}
        Some(first) => {
            return Err(ComparisonError::InvalidTimeColumn {
                path: path.to_path_buf(),
                found: first.clone(),
            })
        }
        None => {
            return Err(ComparisonError::MissingLabels {
                path: path.to_path_buf(),
            })
        }
    }

    let mut seen = HashSet::new();
    for label in &labels {
        if !seen.insert(label.as_str()) {
            return Err(ComparisonError::DuplicateColumn {
                path: path.to_path_buf(),
                name: label.clone(),
            });
        }
    }

    // Data rows are tab separated, but some writers pad with extra blanks:
    // collapse any whitespace run into one tab before handing rows to csv.
    let data_lines: Vec<(usize, String)> = body_iter
        .map(|(line_number, line)| {
            let normalized = line.split_whitespace().collect::<Vec<_>>().join("\t");
            (*line_number, normalized)
        })
        .collect();
    let csv_content = data_lines
        .iter()
        .map(|(_, line)| line.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    // Pass 2: numeric rows.
    let n_columns = labels.len();
    let mut values: Vec<f64> = Vec::with_capacity(data_lines.len() * n_columns);
    {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b'\t')
            .flexible(true)
            .from_reader(csv_content.as_bytes());

        for (record_result, (line_number, _)) in reader.records().zip(data_lines.iter()) {
            let record = record_result?;
            if record.len() != n_columns {
                return Err(ComparisonError::RowWidth {
                    path: path.to_path_buf(),
                    line: *line_number,
                    expected: n_columns,
                    found: record.len(),
                });
            }
            for field in record.iter() {
                let value = parse_value(field).ok_or_else(|| ComparisonError::InvalidNumber {
                    path: path.to_path_buf(),
                    line: *line_number,
                    value: field.to_string(),
                })?;
                values.push(value);
            }
        }
    }

    let n_rows = values.len() / n_columns;
    let data = Array2::from_shape_vec((n_rows, n_columns), values)?;

    let table = StorageTable::new(name, kind, path.to_path_buf(), metadata, labels, data);
    check_declared_shape(&table);

    info!(
        "Read {:?} storage '{}': {} rows, {} channels{}",
        kind,
        path.display(),
        table.n_rows(),
        table.channel_labels().len(),
        table
            .sample_rate()
            .map(|rate| format!(", {rate:.2} Hz"))
            .unwrap_or_default()
    );
    Ok(table)
}

/// Parses one numeric field. Accepts the `nan`/`inf` spellings writers emit.
fn parse_value(field: &str) -> Option<f64> {
    let field = field.trim();
    field.parse::<f64>().ok().or_else(|| match field.to_ascii_lowercase().as_str() {
        "nan" | "-nan" | "-nan(ind)" | "nan(ind)" => Some(f64::NAN),
        "inf" | "infinity" => Some(f64::INFINITY),
        "-inf" | "-infinity" => Some(f64::NEG_INFINITY),
        _ => None,
    })
}

/// Warns when `nRows`/`nColumns` disagree with the parsed shape.
fn check_declared_shape(table: &StorageTable) {
    let declared = [("nRows", table.n_rows()), ("nColumns", table.n_columns())];
    for (key, actual) in declared {
        if let Some(value) = table.metadata_value(key) {
            match value.trim().parse::<usize>() {
                Ok(expected) if expected != actual => warn!(
                    "'{}' declares {key}={expected} but contains {actual}",
                    table.source_path().display()
                ),
                Ok(_) => {}
                Err(_) => warn!(
                    "'{}' has a non-numeric {key} value '{value}'",
                    table.source_path().display()
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const REFERENCE_STO: &str = "Coordinates\n\
        version=1\n\
        nRows=3\n\
        nColumns=3\n\
        inDegrees=yes\n\
        endheader\n\
        time\tknee_angle_r\tpelvis_tx\n\
        0.00\t10.0\t0.5\n\
        0.01\t11.0\t0.6\n\
        0.02\t12.0\t0.7\n";

    #[test]
    fn test_reads_reference_header_and_rows() {
        let file = write_temp(REFERENCE_STO);
        let table = read_reference_storage(file.path()).unwrap();
        assert_eq!(table.name, "Coordinates");
        assert_eq!(table.kind, StorageKind::Reference);
        assert_eq!(table.in_degrees(), Some(true));
        assert_eq!(table.labels(), &["time", "knee_angle_r", "pelvis_tx"]);
        assert_eq!(table.n_rows(), 3);
        assert_eq!(table.column_by_name("knee_angle_r").unwrap().to_vec(), vec![10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_reference_requires_header_end() {
        let file = write_temp("time\tknee_angle_r\n0.0\t1.0\n");
        assert!(matches!(
            read_reference_storage(file.path()),
            Err(ComparisonError::MissingHeaderEnd { .. })
        ));
    }

    #[test]
    fn test_filtered_without_header() {
        let file = write_temp("time\tknee_angle_r\n0.0\t0.1\n0.01  \t 0.2\n\n");
        let table = read_filtered_storage(file.path()).unwrap();
        assert_eq!(table.kind, StorageKind::Filtered);
        assert!(table.metadata.is_empty());
        assert_eq!(table.column(1).to_vec(), vec![0.1, 0.2]);
    }

    #[test]
    fn test_row_width_error_reports_line() {
        let file = write_temp("endheader\ntime\ta\tb\n0.0\t1.0\t2.0\n0.1\t1.0\n");
        match read_filtered_storage(file.path()) {
            Err(ComparisonError::RowWidth { line, expected, found, .. }) => {
                assert_eq!(line, 4);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_number_and_nan_spelling() {
        let file = write_temp("endheader\ntime\ta\n0.0\tnan\n0.1\tabc\n");
        assert!(matches!(
            read_filtered_storage(file.path()),
            Err(ComparisonError::InvalidNumber { line: 4, .. })
        ));
        assert!(parse_value("-nan(ind)").unwrap().is_nan());
    }

    #[test]
    fn test_first_column_must_be_time() {
        let file = write_temp("endheader\nframe\ta\n0\t1\n");
        assert!(matches!(
            read_filtered_storage(file.path()),
            Err(ComparisonError::InvalidTimeColumn { .. })
        ));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let file = write_temp("endheader\ntime\ta\ta\n0\t1\t2\n");
        assert!(matches!(
            read_filtered_storage(file.path()),
            Err(ComparisonError::DuplicateColumn { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = read_reference_storage(Path::new("/nonexistent/task_Kinematics_q.sto"));
        assert!(matches!(result, Err(ComparisonError::Io { .. })));
    }
}
