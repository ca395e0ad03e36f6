use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Instrument and flow constants for the ammonia mass calculations.
///
/// These are per-installation calibration values, not per-experiment data.
/// Defaults match the VCR analyzer bench; any subset can be overridden from
/// a TOML constants file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisParameters {
    /// Reference standard flow used by the molar-rate model.
    pub std_flow: f64,
    /// Flow-to-molar-rate conversion constant.
    pub flow_constant: f64,
    /// Ammonia concentration of the feed gas in ppm.
    pub reference_ppm: f64,
    /// ppm-to-fraction unit scale.
    pub unit_scale: f64,
    /// Molar mass of ammonia in g/mol.
    pub molar_mass_nh3: f64,
    /// Ammonia feed flow marking flow-on, in sccm.
    pub flow_threshold_sccm: f64,
    /// Downstream concentration marking breakthrough, in ppm.
    pub ppm_threshold: f64,
    /// Transport lag through tubing and instrument, in seconds.
    pub blank_time_s: f64,
}

impl Default for AnalysisParameters {
    fn default() -> Self {
        Self {
            std_flow: 500.0,
            flow_constant: 0.000_000_745,
            reference_ppm: 10_800.0,
            unit_scale: 1e-6,
            molar_mass_nh3: 17.0,
            flow_threshold_sccm: 4.0,
            ppm_threshold: 20.0,
            blank_time_s: 6.0,
        }
    }
}

impl AnalysisParameters {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Molar emission rate of the feed at the reference concentration, in mol/s.
    pub fn reference_molar_rate(&self) -> f64 {
        self.std_flow * self.flow_constant * self.reference_ppm * self.unit_scale
    }
}
