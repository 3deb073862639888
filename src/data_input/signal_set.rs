// src/data_input/signal_set.rs

use crate::config::SignalFiles;
use crate::data_input::storage_parser::{read_filtered_storage, read_reference_storage};
use crate::data_input::storage_table::StorageTable;
use crate::error::Result;
use crate::signal_names::SignalKind;

/// Position, velocity and acceleration tables of one source.
#[derive(Debug, Clone)]
pub struct SignalSet {
    pub q: StorageTable,
    pub q_dot: StorageTable,
    pub q_ddot: StorageTable,
}

impl SignalSet {
    pub fn load_reference(files: &SignalFiles) -> Result<Self> {
        Ok(Self {
            q: read_reference_storage(&files.q)?,
            q_dot: read_reference_storage(&files.q_dot)?,
            q_ddot: read_reference_storage(&files.q_ddot)?,
        })
    }

    pub fn load_filtered(files: &SignalFiles) -> Result<Self> {
        Ok(Self {
            q: read_filtered_storage(&files.q)?,
            q_dot: read_filtered_storage(&files.q_dot)?,
            q_ddot: read_filtered_storage(&files.q_ddot)?,
        })
    }

    pub fn table(&self, kind: SignalKind) -> &StorageTable {
        match kind {
            SignalKind::Position => &self.q,
            SignalKind::Velocity => &self.q_dot,
            SignalKind::Acceleration => &self.q_ddot,
        }
    }
}
