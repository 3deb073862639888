// src/report.rs

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::constants::REPORT_INDEX_FILE;
use crate::error::{ComparisonError, Result};

const PAGE_PREFIX: &str = "page_";
const PAGE_EXTENSION: &str = "png";

/// Multi-page report: a directory of numbered page images plus an index.
///
/// Opened once, pages are appended in order, and `finish` closes the
/// document by writing the index of its pages.
#[derive(Debug)]
pub struct ReportDocument {
    dir: PathBuf,
    pages: Vec<PathBuf>,
}

impl ReportDocument {
    /// Creates the report directory, dropping pages left by a previous run.
    pub fn create(dir: &Path) -> Result<Self> {
        let io_err = |source: std::io::Error| ComparisonError::Io {
            path: dir.to_path_buf(),
            source,
        };
        fs::create_dir_all(dir).map_err(io_err)?;
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if is_page_file(&path) {
                debug!("Removing stale page '{}'", path.display());
                fs::remove_file(&path).map_err(io_err)?;
            }
        }
        info!("Writing report pages to '{}'", dir.display());
        Ok(Self {
            dir: dir.to_path_buf(),
            pages: Vec::new(),
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Renders the next page through `draw` and records it.
    pub fn append_page<F>(&mut self, name: &str, draw: F) -> std::result::Result<PathBuf, Box<dyn Error>>
    where
        F: FnOnce(&Path) -> std::result::Result<(), Box<dyn Error>>,
    {
        let path = self.dir.join(page_file_name(self.pages.len() + 1, name));
        draw(&path)?;
        self.pages.push(path.clone());
        Ok(path)
    }

    /// Closes the document; returns the index file path.
    pub fn finish(self) -> Result<PathBuf> {
        let index_path = self.dir.join(REPORT_INDEX_FILE);
        let mut index = String::new();
        for page in &self.pages {
            if let Some(file_name) = page.file_name() {
                index.push_str(&file_name.to_string_lossy());
                index.push('\n');
            }
        }
        fs::write(&index_path, index).map_err(|source| ComparisonError::Io {
            path: index_path.clone(),
            source,
        })?;
        info!(
            "Report with {} pages saved in '{}'.",
            self.pages.len(),
            self.dir.display()
        );
        Ok(index_path)
    }
}

/// `page_007_knee_angle_r.png`; characters unsafe in file names become `_`.
pub fn page_file_name(number: usize, name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{PAGE_PREFIX}{number:03}_{safe}.{PAGE_EXTENSION}")
}

fn is_page_file(path: &Path) -> bool {
    let is_page_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(PAGE_PREFIX));
    let is_page_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == PAGE_EXTENSION);
    path.is_file() && is_page_name && is_page_ext
}
