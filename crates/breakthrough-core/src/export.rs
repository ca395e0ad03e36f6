//! CSV export of parsed and derived series.

use std::path::Path;

use breakthrough_parser::SampleSeries;

use crate::error::Result;

/// Write a series as CSV, one row per sample, with a header row derived
/// from the sample field names.
pub fn write_csv(series: &SampleSeries, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for sample in series {
        writer.serialize(sample)?;
    }
    writer.flush()?;
    Ok(())
}
