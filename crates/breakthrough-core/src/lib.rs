pub mod error;
pub mod events;
pub mod export;
pub mod integrator;
pub mod params;
pub mod plot;
pub mod transform;

pub use breakthrough_parser::{parse_log, parse_log_file, ParserError, Sample, SampleSeries};
pub use error::{AnalysisError, Result};
pub use params::AnalysisParameters;
