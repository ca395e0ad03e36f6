//! Threshold-crossing event detection over a sample series.

use breakthrough_parser::{Sample, SampleSeries};

use crate::error::{AnalysisError, Result};
use crate::params::AnalysisParameters;

/// Time of the first sample satisfying `predicate`, scanning in time order.
///
/// `event` names the predicate in the `NoMatch` error when nothing matches;
/// a missing event never degrades to a sentinel value.
pub fn first_time_where<F>(
    series: &SampleSeries,
    predicate: F,
    event: &'static str,
) -> Result<f64>
where
    F: Fn(&Sample) -> bool,
{
    series
        .iter()
        .find(|sample| predicate(sample))
        .map(|sample| sample.time_s)
        .ok_or(AnalysisError::NoMatch(event))
}

/// Flow-on: the ammonia feed first rises above the flow threshold.
pub fn flow_on_time(series: &SampleSeries, params: &AnalysisParameters) -> Result<f64> {
    first_time_where(
        series,
        |s| s.nh3_flow_sccm > params.flow_threshold_sccm,
        "nh3 flow above threshold",
    )
}

/// Breakthrough: downstream concentration rises above the threshold while
/// the feed is flowing.
pub fn breakthrough_time(series: &SampleSeries, params: &AnalysisParameters) -> Result<f64> {
    first_time_where(
        series,
        |s| s.nh3_ppm > params.ppm_threshold && s.nh3_flow_sccm > params.flow_threshold_sccm,
        "nh3 ppm and flow above thresholds",
    )
}

/// Concentration rise regardless of feed flow; bounds the total-mass window.
///
/// This is looser than [`breakthrough_time`] on purpose: breakthrough
/// capacity and total absorbed mass are physically distinct quantities and
/// use different end conditions.
pub fn concentration_rise_time(
    series: &SampleSeries,
    params: &AnalysisParameters,
) -> Result<f64> {
    first_time_where(
        series,
        |s| s.nh3_ppm > params.ppm_threshold,
        "nh3 ppm above threshold",
    )
}
