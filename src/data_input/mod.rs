// src/data_input/mod.rs

pub mod signal_set;
pub mod storage_parser;
pub mod storage_table;

// src/data_input/mod.rs
