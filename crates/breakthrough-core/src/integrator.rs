//! Integrated mass quantities derived from the detected event window.

use breakthrough_parser::SampleSeries;
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::events::{breakthrough_time, concentration_rise_time, flow_on_time};
use crate::params::AnalysisParameters;

/// Mass of ammonia captured before downstream breakthrough, in grams.
///
/// Treats the feed emission rate as constant at the reference concentration
/// over the whole window; the window runs from flow-on to the compound
/// breakthrough event, less the blank-time lag.
pub fn breakthrough_capacity(series: &SampleSeries, params: &AnalysisParameters) -> Result<f64> {
    let t_start = flow_on_time(series, params)?;
    let t_end = breakthrough_time(series, params)?;
    let window_s = effective_window(t_start, t_end, params)?;
    debug!(t_start, t_end, window_s, "breakthrough window");

    Ok(params.reference_molar_rate() * window_s * params.molar_mass_nh3)
}

/// Total ammonia absorbed (or desorbed) over the uptake window, in grams.
///
/// The end event here is the concentration rise alone, ignoring feed flow.
/// Each sample strictly inside the window contributes a depletion-rate term
/// proportional to how far its concentration sits below the reference; the
/// rate sum is then scaled by the full blank-corrected window duration, not
/// by per-sample time steps. Reported masses are calibrated against that
/// form, so it must not be swapped for a per-step integration.
pub fn total_absorbed(series: &SampleSeries, params: &AnalysisParameters) -> Result<f64> {
    let t_start = flow_on_time(series, params)?;
    let t_end = concentration_rise_time(series, params)?;
    let window_s = effective_window(t_start, t_end, params)?;
    debug!(t_start, t_end, window_s, "total uptake window");

    let rate_sum: f64 = series
        .iter()
        .filter(|s| s.time_s > t_start && s.time_s < t_end)
        .map(|s| {
            params.std_flow * params.flow_constant * (params.reference_ppm - s.nh3_ppm)
                * params.unit_scale
        })
        .sum();

    Ok(rate_sum * window_s * params.molar_mass_nh3)
}

/// Blank-corrected window duration. The detected end must lie after the
/// start; the blank correction may still push the result to zero or below,
/// which callers flag rather than report as a valid mass.
fn effective_window(t_start: f64, t_end: f64, params: &AnalysisParameters) -> Result<f64> {
    if t_start >= t_end {
        return Err(AnalysisError::InvalidWindow(format!(
            "event window end ({t_end} s) does not lie after start ({t_start} s)"
        )));
    }
    Ok(t_end - t_start - params.blank_time_s)
}
