pub mod errors;
pub mod format;
pub mod model;

pub use errors::ParserError;
pub use format::{parse_log, parse_log_file, HEADER_LINES};
pub use model::{Sample, SampleSeries};
