use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use breakthrough_core::events::flow_on_time;
use breakthrough_core::export;
use breakthrough_core::integrator::{breakthrough_capacity, total_absorbed};
use breakthrough_core::plot::{render_series, Channel, PlotConfig};
use breakthrough_core::transform::{normalize, smooth};
use breakthrough_core::{parse_log_file, AnalysisParameters, SampleSeries};

/// Seconds of lead-in shown before the detected flow-on time on absorption plots.
const PLOT_LEAD_S: f64 = 12.0;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Ammonia absorption/desorption log analysis",
    long_about = None
)]
struct Cli {
    /// Analyzer log file to process
    input: PathBuf,

    /// Whether the run measured uptake or release
    #[arg(long, value_enum)]
    mode: Mode,

    /// Mass of loaded absorbent in grams
    #[arg(long)]
    absorbent_mass_g: f64,

    /// Moving-average window in samples
    #[arg(long, default_value_t = 20)]
    window: usize,

    /// TOML file overriding the built-in instrument constants
    #[arg(long)]
    constants: Option<PathBuf>,

    /// Figure to render; defaults to the normalized view
    #[arg(long, value_enum)]
    plot: Option<PlotKind>,

    /// Where to write the figure; defaults to the input name with a .png extension
    #[arg(long)]
    plot_out: Option<PathBuf>,

    /// Skip rendering a figure
    #[arg(long)]
    no_plot: bool,

    /// Also write the parsed series to this CSV file
    #[arg(long)]
    export_csv: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Absorption,
    Desorption,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PlotKind {
    Raw,
    Normalized,
    Smoothed,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if cli.absorbent_mass_g <= 0.0 {
        bail!("absorbent mass must be positive, got {} g", cli.absorbent_mass_g);
    }

    let params = match &cli.constants {
        Some(path) => AnalysisParameters::load(path)
            .with_context(|| format!("failed to load constants from {}", path.display()))?,
        None => AnalysisParameters::default(),
    };

    let series = parse_log_file(&cli.input)
        .with_context(|| format!("failed to parse {}", cli.input.display()))?;
    info!(samples = series.len(), "parsed analyzer log");

    if let Some(path) = &cli.export_csv {
        export::write_csv(&series, path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        info!(path = %path.display(), "wrote series CSV");
    }

    match cli.mode {
        Mode::Absorption => {
            let mass_g = breakthrough_capacity(&series, &params)?;
            if mass_g <= 0.0 {
                warn!(
                    mass_g,
                    "breakthrough window does not exceed the blank time; not a valid capacity"
                );
            }
            let percent = mass_g / cli.absorbent_mass_g * 100.0;
            println!("Breakthrough capacity is {percent:.2}%");
        }
        Mode::Desorption => {
            let mass_g = total_absorbed(&series, &params)?;
            if mass_g <= 0.0 {
                warn!(
                    mass_g,
                    "uptake window does not exceed the blank time; not a valid mass"
                );
            }
            let percent = mass_g / cli.absorbent_mass_g * 100.0;
            println!("Total desorbed mass is {mass_g:.4} g ({percent:.2}% of absorbent)");
        }
    }

    if !cli.no_plot {
        render_plot(&cli, &series, &params)?;
    }

    Ok(())
}

fn render_plot(cli: &Cli, series: &SampleSeries, params: &AnalysisParameters) -> Result<()> {
    let kind = cli.plot.unwrap_or(PlotKind::Normalized);
    let output = cli
        .plot_out
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("png"));

    let t_start = match cli.mode {
        Mode::Absorption => (flow_on_time(series, params)? - PLOT_LEAD_S).max(0.0),
        Mode::Desorption => 0.0,
    };

    let (view, channels, ylabel) = match kind {
        PlotKind::Raw => (series.clone(), vec![Channel::Nh3Ppm], "NH3 ppm"),
        PlotKind::Normalized => {
            // Desorption runs have no meaningful feed-flow trace.
            let channels = match cli.mode {
                Mode::Absorption => vec![Channel::Nh3Ppm, Channel::Temperature, Channel::Nh3Flow],
                Mode::Desorption => vec![Channel::Nh3Ppm, Channel::Temperature],
            };
            (
                normalize(series)?,
                channels,
                "Normalized NH3 ppm / temperature / flow",
            )
        }
        PlotKind::Smoothed => (
            smooth(series, cli.window)?,
            vec![Channel::Nh3Ppm],
            "NH3 ppm (moving average)",
        ),
    };

    let config = PlotConfig::for_input(&cli.input, ylabel);
    render_series(&view, &channels, t_start, &output, &config)
        .with_context(|| format!("failed to render figure to {}", output.display()))?;
    info!(path = %output.display(), "wrote figure");
    Ok(())
}
