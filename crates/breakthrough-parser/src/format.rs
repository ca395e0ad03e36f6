use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::warn;

use crate::errors::ParserError;
use crate::model::{Sample, SampleSeries};

/// Fixed analyzer preamble length; skipped without validation.
pub const HEADER_LINES: usize = 5;

/// Fields per data row: timestamp, nh3 ppm, temperature, carrier flow, nh3 flow.
const ROW_FIELDS: usize = 5;

/// Timestamp components: day, hour, minute, second.
const TIMESTAMP_PARTS: usize = 4;

const SLPM_TO_SCCM: f64 = 1000.0;

/// Parse a raw analyzer log into a time-indexed [`SampleSeries`].
///
/// The log carries a 5-line header followed by rows whose single field holds
/// five whitespace-separated tokens. Carrier flow is converted from slpm to
/// sccm and the whole series is re-based so the first sample is at time zero.
///
/// Any malformed row aborts the parse; a bad sample invalidates the run, so
/// there is no skip-and-continue recovery. A duplicate re-based timestamp is
/// replaced by the later row and reported through `tracing::warn!`.
pub fn parse_log(content: &str) -> Result<SampleSeries, ParserError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut samples: Vec<Sample> = Vec::new();
    let mut origin_s: Option<f64> = None;

    for (row_idx, record) in reader.records().enumerate() {
        let record = record?;
        if row_idx < HEADER_LINES {
            continue;
        }
        let line_index = row_idx + 1;

        let raw = record.get(0).unwrap_or("");
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.len() != ROW_FIELDS {
            return Err(ParserError::MalformedRow {
                line_index,
                message: format!(
                    "expected {ROW_FIELDS} whitespace-separated fields, found {}",
                    tokens.len()
                ),
            });
        }

        let absolute_s = parse_elapsed_seconds(tokens[0], line_index)?;
        let nh3_ppm = parse_f64(tokens[1], "nh3_ppm", line_index)?;
        let temperature = parse_f64(tokens[2], "temperature", line_index)?;
        let carrier_flow_sccm =
            parse_f64(tokens[3], "carrier_flow_slpm", line_index)? * SLPM_TO_SCCM;
        let nh3_flow_sccm = parse_f64(tokens[4], "nh3_flow_sccm", line_index)?;

        let origin = *origin_s.get_or_insert(absolute_s);
        let sample = Sample {
            time_s: absolute_s - origin,
            nh3_ppm,
            temperature,
            carrier_flow_sccm,
            nh3_flow_sccm,
        };

        let previous_s = samples.last().map(|s| s.time_s);
        match previous_s {
            Some(prev) if sample.time_s < prev => {
                return Err(ParserError::TimeReversal {
                    line_index,
                    previous_s: prev,
                    current_s: sample.time_s,
                });
            }
            Some(prev) if sample.time_s == prev => {
                warn!(
                    time_s = sample.time_s,
                    line_index, "duplicate timestamp, keeping the later row"
                );
                let last = samples.last_mut().expect("non-empty samples");
                *last = sample;
            }
            _ => samples.push(sample),
        }
    }

    if samples.is_empty() {
        return Err(ParserError::EmptyData);
    }

    Ok(SampleSeries::from_samples(samples))
}

/// Read and parse an analyzer log from disk.
pub fn parse_log_file(path: impl AsRef<Path>) -> Result<SampleSeries, ParserError> {
    let content = fs::read_to_string(path)?;
    parse_log(&content)
}

fn parse_elapsed_seconds(token: &str, line_index: usize) -> Result<f64, ParserError> {
    let parts: Vec<&str> = token.split(':').collect();
    if parts.len() != TIMESTAMP_PARTS {
        return Err(ParserError::MalformedRow {
            line_index,
            message: format!(
                "timestamp '{token}' must have {TIMESTAMP_PARTS} colon-delimited components"
            ),
        });
    }

    let mut values = [0.0f64; TIMESTAMP_PARTS];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part.trim().parse::<f64>().map_err(|err| {
            ParserError::MalformedRow {
                line_index,
                message: format!("timestamp component '{part}' is not numeric: {err}"),
            }
        })?;
    }

    let [days, hours, minutes, seconds] = values;
    Ok(days * 86_400.0 + hours * 3_600.0 + minutes * 60.0 + seconds)
}

fn parse_f64(value: &str, column: &str, line_index: usize) -> Result<f64, ParserError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|err| ParserError::MalformedRow {
            line_index,
            message: format!("failed to parse column '{column}' as float: {err}"),
        })
}
