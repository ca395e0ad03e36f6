//! Time-series figure rendering.
//!
//! Line plot of one or more channels against elapsed seconds, written as a
//! PNG or SVG depending on the output extension. The series handed in is
//! whichever derived view the caller wants drawn (raw, normalized, or
//! smoothed); this module does no transformation of its own.

use std::path::Path;

use breakthrough_parser::{Sample, SampleSeries};
use plotters::prelude::*;

use crate::error::{AnalysisError, Result};

/// A plottable channel of the sample series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Nh3Ppm,
    Temperature,
    Nh3Flow,
}

impl Channel {
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Nh3Ppm => "NH3 ppm",
            Channel::Temperature => "Temperature",
            Channel::Nh3Flow => "NH3 flow",
        }
    }

    fn value(&self, sample: &Sample) -> f64 {
        match self {
            Channel::Nh3Ppm => sample.nh3_ppm,
            Channel::Temperature => sample.temperature,
            Channel::Nh3Flow => sample.nh3_flow_sccm,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
    pub width: u32,
    pub height: u32,
}

impl PlotConfig {
    pub fn new(title: impl Into<String>, ylabel: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            xlabel: "Time (s)".to_string(),
            ylabel: ylabel.into(),
            width: 1024,
            height: 768,
        }
    }

    /// Title taken from the sample prefix of the input file name (the part
    /// of the stem before the first underscore).
    pub fn for_input(path: &Path, ylabel: impl Into<String>) -> Self {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("series");
        let title = stem.split('_').next().unwrap_or(stem);
        Self::new(title, ylabel)
    }
}

/// Render `channels` of `series` from `t_start` onward to `output_path`.
///
/// The backend is chosen by extension: `.svg` gets a vector backend,
/// anything else a bitmap one.
pub fn render_series(
    series: &SampleSeries,
    channels: &[Channel],
    t_start: f64,
    output_path: &Path,
    config: &PlotConfig,
) -> Result<()> {
    if series.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }
    if channels.is_empty() {
        return Err(AnalysisError::Plot("no channels selected".to_string()));
    }

    let ext = output_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            render_impl(backend, series, channels, t_start, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            render_impl(backend, series, channels, t_start, config)
        }
    }
}

fn render_impl<DB: DrawingBackend>(
    backend: DB,
    series: &SampleSeries,
    channels: &[Channel],
    t_start: f64,
    config: &PlotConfig,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let visible: Vec<&Sample> = series.iter().filter(|s| s.time_s >= t_start).collect();
    if visible.is_empty() {
        return Err(AnalysisError::Plot(format!(
            "no samples at or after plot start {t_start} s"
        )));
    }

    let x_end = visible
        .last()
        .map(|s| s.time_s)
        .filter(|end| *end > t_start)
        .unwrap_or(t_start + 1.0);
    let y_max = channels
        .iter()
        .flat_map(|ch| visible.iter().map(move |&s| ch.value(s)))
        .fold(f64::NEG_INFINITY, f64::max)
        .max(1e-10);

    let root = backend.into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 30).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(t_start..x_end, 0.0..(y_max * 1.1))
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(config.xlabel.as_str())
        .y_desc(config.ylabel.as_str())
        .draw()
        .map_err(plot_err)?;

    for (idx, channel) in channels.iter().enumerate() {
        let color = channel_color(idx);
        chart
            .draw_series(LineSeries::new(
                visible.iter().map(|&s| (s.time_s, channel.value(s))),
                ShapeStyle::from(&color).stroke_width(2),
            ))
            .map_err(plot_err)?
            .label(channel.label())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], ShapeStyle::from(&color))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

fn channel_color(idx: usize) -> RGBColor {
    const PALETTE: [RGBColor; 3] = [
        RGBColor(31, 119, 180),
        RGBColor(255, 127, 14),
        RGBColor(44, 160, 44),
    ];
    PALETTE[idx % PALETTE.len()]
}

fn plot_err<E: std::fmt::Display>(err: E) -> AnalysisError {
    AnalysisError::Plot(err.to_string())
}
