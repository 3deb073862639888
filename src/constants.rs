// src/constants.rs

use plotters::style::colors::full_palette::{BLUE, GREEN, ORANGE};
use plotters::style::RGBColor;

// Page dimensions. One page holds the three side-by-side signal plots of a channel.
pub const PAGE_WIDTH: u32 = 1800;
pub const PAGE_HEIGHT: u32 = 600;

// Radians to degrees, as used by the offline reference pipeline.
pub const RAD_TO_DEG: f64 = 57.29578;

// Channel name suffixes of translational coordinates (meters, no scaling).
pub const TRANSLATIONAL_SUFFIXES: [&str; 3] = ["tx", "ty", "tz"];

// Decimal places of the aggregate summary.
pub const SUMMARY_DECIMALS: i32 = 3;

// --- Input layout, relative to the subject directory ---
pub const REFERENCE_DIR: &str = "residual_reduction_algorithm";
pub const REFERENCE_Q_FILE: &str = "task_Kinematics_q.sto";
pub const REFERENCE_QDOT_FILE: &str = "task_Kinematics_u.sto";
pub const REFERENCE_QDDOT_FILE: &str = "task_Kinematics_dudt.sto";

pub const FILTERING_DIR: &str = "real_time/filtering";
pub const SPATIAL_FILTER_DIR: &str = "spatial_filter";
pub const FILTERED_Q_FILE: &str = "q_filtered.sto";
pub const FILTERED_QDOT_FILE: &str = "qDot_filtered.sto";
pub const FILTERED_QDDOT_FILE: &str = "qDDot_filtered.sto";

// --- Outputs, relative to the output directory ---
pub const REPORT_DIR_NAME: &str = "filter_comparison";
pub const REPORT_INDEX_FILE: &str = "index.txt";
pub const METRICS_FILE: &str = "metrics.txt";
pub const CHANNEL_RMSE_FILE: &str = "rmse_per_channel.csv";

// --- Series labels ---
pub const LABEL_REFERENCE: &str = "OpenSim";
pub const LABEL_PROPOSED_FILTER: &str = "Proposed filter";
pub const LABEL_SPATIAL_FILTER: &str = "Spatial filter";

// --- Plot Color Assignments ---
pub const COLOR_REFERENCE: &RGBColor = &BLUE;
pub const COLOR_PROPOSED_FILTER: &RGBColor = &ORANGE;
pub const COLOR_SPATIAL_FILTER: &RGBColor = &GREEN;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_LEGEND: u32 = 2;

// Font sizes
pub const FONT_SIZE_CHART_TITLE: i32 = 18;
pub const FONT_SIZE_AXIS_LABEL: i32 = 14;
pub const FONT_SIZE_LEGEND: i32 = 13;
pub const FONT_SIZE_ANNOTATION: i32 = 14;
pub const FONT_SIZE_MESSAGE: i32 = 20;

// Pixel inset of the RMSE annotations from the plotting area corners.
pub const ANNOTATION_INSET_PX: i32 = 8;

// src/constants.rs
