//! Pure, per-channel views of a sample series.
//!
//! Both operations return a fresh series; the source is never mutated, so a
//! caller can hold raw, normalized, and smoothed views of the same run at
//! the same time.

use breakthrough_parser::{Sample, SampleSeries};

use crate::error::{AnalysisError, Result};

/// Scale `nh3_ppm`, `temperature`, and `nh3_flow_sccm` by their maxima so
/// each channel lies in `[0, 1]`. Carrier flow and times are untouched.
pub fn normalize(series: &SampleSeries) -> Result<SampleSeries> {
    if series.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }

    let max_ppm = channel_max(series, |s| s.nh3_ppm, "nh3_ppm")?;
    let max_temperature = channel_max(series, |s| s.temperature, "temperature")?;
    let max_flow = channel_max(series, |s| s.nh3_flow_sccm, "nh3_flow_sccm")?;

    let samples = series
        .iter()
        .map(|s| Sample {
            nh3_ppm: s.nh3_ppm / max_ppm,
            temperature: s.temperature / max_temperature,
            nh3_flow_sccm: s.nh3_flow_sccm / max_flow,
            ..*s
        })
        .collect();

    Ok(SampleSeries::from_samples(samples))
}

/// Replace `nh3_ppm` with its trailing moving average over `window` samples.
///
/// The average is positional; irregular sampling intervals are not
/// compensated for. The leading `window - 1` slots, which have no full
/// window behind them, are back-filled with the first complete average.
pub fn smooth(series: &SampleSeries, window: usize) -> Result<SampleSeries> {
    if window == 0 {
        return Err(AnalysisError::InvalidWindow(
            "window must be at least 1 sample".to_string(),
        ));
    }
    if series.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }
    if window > series.len() {
        return Err(AnalysisError::InvalidWindow(format!(
            "window of {window} samples exceeds series length {}",
            series.len()
        )));
    }

    let samples = series.as_slice();
    let mut means = vec![0.0f64; samples.len()];
    for (idx, slot) in means.iter_mut().enumerate().skip(window - 1) {
        let sum: f64 = samples[idx + 1 - window..=idx]
            .iter()
            .map(|s| s.nh3_ppm)
            .sum();
        *slot = sum / window as f64;
    }
    let backfill = means[window - 1];
    for slot in means.iter_mut().take(window - 1) {
        *slot = backfill;
    }

    let smoothed = samples
        .iter()
        .zip(means)
        .map(|(s, mean)| Sample {
            nh3_ppm: mean,
            ..*s
        })
        .collect();

    Ok(SampleSeries::from_samples(smoothed))
}

fn channel_max<F>(series: &SampleSeries, channel_fn: F, channel: &'static str) -> Result<f64>
where
    F: Fn(&Sample) -> f64,
{
    let max = series
        .iter()
        .map(&channel_fn)
        .fold(f64::NEG_INFINITY, f64::max);
    if max == 0.0 {
        return Err(AnalysisError::DivisionByZero { channel });
    }
    Ok(max)
}
