// src/plot_functions/mod.rs

pub mod plot_filter_comparison;

// src/plot_functions/mod.rs
