// src/data_analysis/mod.rs

pub mod channel_metrics;
pub mod rmse;
pub mod summary;

// src/data_analysis/mod.rs
