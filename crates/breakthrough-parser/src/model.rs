use serde::{Deserialize, Serialize};

/// One time-stamped analyzer observation, re-based so the first sample of a
/// series sits at `time_s == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Elapsed seconds since the first sample of the series.
    pub time_s: f64,
    /// Downstream ammonia concentration in ppm.
    pub nh3_ppm: f64,
    /// Bed temperature as reported by the logger.
    pub temperature: f64,
    /// Carrier gas flow in sccm (converted from slpm at parse time).
    pub carrier_flow_sccm: f64,
    /// Ammonia feed flow in sccm.
    pub nh3_flow_sccm: f64,
}

/// An ordered sequence of samples keyed by elapsed time.
///
/// Times are non-decreasing; the parser guarantees uniqueness by letting a
/// later row with the same timestamp replace the earlier one. Transformations
/// downstream return fresh series rather than mutating this one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSeries {
    samples: Vec<Sample>,
}

impl SampleSeries {
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }
}

impl<'a> IntoIterator for &'a SampleSeries {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
