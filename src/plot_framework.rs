// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::PathElement;
use plotters::element::Text;
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use log::info;

use crate::constants::{
    ANNOTATION_INSET_PX, FONT_SIZE_ANNOTATION, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE,
    FONT_SIZE_LEGEND, FONT_SIZE_MESSAGE, LINE_WIDTH_LEGEND, PAGE_HEIGHT, PAGE_WIDTH,
};
use crate::signal_names::SIGNAL_COUNT;

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Time axis range: exact bounds, widened by 0.5 s on each side when flat
/// (a single-row table) so the chart still has an extent.
pub fn calculate_time_range(min_val: f64, max_val: f64) -> Range<f64> {
    if (max_val - min_val).abs() < 1e-6 {
        (min_val - 0.5)..(max_val + 0.5)
    } else {
        min_val..max_val
    }
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, Shift>,
    title: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    const CHAR_WIDTH_RATIO: f32 = 0.6; // Approximate character width relative to font size
    const LINE_HEIGHT_SPACING: i32 = 4;

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (x_range.end - x_range.start, y_range.end - y_range.start);
    let message = format!("{title} Data Unavailable:\n{reason}");

    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_line_height = FONT_SIZE_MESSAGE + LINE_HEIGHT_SPACING;

    let lines: Vec<&str> = message.split('\n').collect();
    let max_line_length = lines.iter().map(|line| line.len()).max().unwrap_or(0) as i32;
    let estimated_text_width = max_line_length.saturating_mul(estimated_char_width);
    let estimated_text_height = (lines.len() as i32).saturating_mul(estimated_line_height);

    let center_x = width / 2 - estimated_text_width / 2;
    let center_y = height / 2 - estimated_text_height / 2;

    let text_style = ("sans-serif", FONT_SIZE_MESSAGE).into_font().color(&RED);
    for (i, line) in lines.iter().enumerate() {
        area.draw(&Text::new(
            line.to_string(),
            (center_x, center_y + i as i32 * estimated_line_height),
            text_style.clone(),
        ))?;
    }
    Ok(())
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

/// Corner of the plotting area a text annotation is pinned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    UpperLeft,
    UpperRight,
}

#[derive(Clone)]
pub struct Annotation {
    pub text: String,
    pub corner: Corner,
}

#[derive(Clone)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
    pub annotations: Vec<Annotation>,
    pub show_legend: bool, // Drawn in the lower-left corner.
}

impl PlotConfig {
    fn has_data(&self) -> bool {
        self.series.iter().any(|s| !s.data.is_empty())
    }

    fn has_valid_ranges(&self) -> bool {
        let finite = [
            self.x_range.start,
            self.x_range.end,
            self.y_range.start,
            self.y_range.end,
        ]
        .iter()
        .all(|v| v.is_finite());
        finite && self.x_range.end > self.x_range.start && self.y_range.end > self.y_range.start
    }
}

/// Draws a single line chart, its annotations and (optionally) its legend.
fn draw_single_chart_with_config(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    let mut chart = ChartBuilder::on(area)
        .caption(&plot_config.title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(8)
        .y_labels(8)
        .y_label_formatter(&|y| format_axis_value(*y))
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    let mut legend_series_count = 0;
    for s in &plot_config.series {
        if s.data.is_empty() {
            continue;
        }
        let series = chart.draw_series(LineSeries::new(
            s.data.iter().cloned(),
            s.color.stroke_width(s.stroke_width),
        ))?;
        if !s.label.is_empty() {
            series.label(&s.label).legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 20, y)],
                    s.color.stroke_width(LINE_WIDTH_LEGEND),
                )
            });
            legend_series_count += 1;
        }
    }

    if plot_config.show_legend && legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", FONT_SIZE_LEGEND))
            .draw()?;
    }

    // Annotations are placed in pixels relative to the plotting area corners.
    let (plot_x, plot_y) = chart.plotting_area().get_pixel_range();
    let (base_x, base_y) = area.get_base_pixel();
    for annotation in &plot_config.annotations {
        let (x, h_pos) = match annotation.corner {
            Corner::UpperLeft => (plot_x.start - base_x + ANNOTATION_INSET_PX, HPos::Left),
            Corner::UpperRight => (plot_x.end - base_x - ANNOTATION_INSET_PX, HPos::Right),
        };
        let y = plot_y.start - base_y + ANNOTATION_INSET_PX;
        let style = ("sans-serif", FONT_SIZE_ANNOTATION)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(h_pos, VPos::Top));
        area.draw(&Text::new(annotation.text.clone(), (x, y), style))?;
    }

    Ok(())
}

/// Compact tick labels: integers stay integral, fractions keep two decimals.
pub fn format_axis_value(y: f64) -> String {
    if y.abs() >= 1_000_000.0 {
        format!("{:.1}M", y / 1_000_000.0)
    } else if y.abs() >= 1000.0 {
        format!("{:.1}k", y / 1000.0)
    } else if y.fract() != 0.0 && y.abs() < 10.0 {
        format!("{:.2}", y)
    } else if y.fract() != 0.0 {
        format!("{:.1}", y)
    } else {
        format!("{:.0}", y)
    }
}

/// Creates one page image with side-by-side subplots, one per signal kind.
///
/// The bitmap backend lives only for the duration of this call, so every
/// page releases its drawing buffer once it has been written.
pub fn draw_side_by_side_page(
    output_path: &Path,
    page_title: &str,
    plots: &[Option<PlotConfig>; SIGNAL_COUNT],
) -> Result<(), Box<dyn Error>> {
    let root_area = BitMapBackend::new(output_path, (PAGE_WIDTH, PAGE_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        page_title.to_string(),
        (10, 10),
        ("sans-serif", FONT_SIZE_AXIS_LABEL)
            .into_font()
            .color(&BLACK),
    ))?;
    let margined_root_area = root_area.margin(30, 5, 5, 5);
    let sub_plot_areas = margined_root_area.split_evenly((1, SIGNAL_COUNT));
    let mut any_plot_drawn = false;

    for (area, plot) in sub_plot_areas.iter().zip(plots.iter()) {
        match plot {
            Some(plot_config) if plot_config.has_data() && plot_config.has_valid_ranges() => {
                draw_single_chart_with_config(area, plot_config)?;
                any_plot_drawn = true;
            }
            Some(plot_config) => {
                let reason = if !plot_config.has_data() {
                    "No data points"
                } else {
                    "Invalid ranges"
                };
                draw_unavailable_message(area, &plot_config.title, reason)?;
            }
            None => {
                draw_unavailable_message(area, page_title, "Data Not Available")?;
            }
        }
    }

    root_area.present()?;
    if any_plot_drawn {
        info!("  Page saved as '{}'.", output_path.display());
    } else {
        info!(
            "  Page '{}' saved with placeholder messages only: no data available to plot.",
            output_path.display()
        );
    }
    Ok(())
}
