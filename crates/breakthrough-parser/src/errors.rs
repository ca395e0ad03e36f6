use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("data row {line_index} malformed: {message}")]
    MalformedRow { line_index: usize, message: String },

    #[error(
        "data row {line_index}: timestamp went backwards ({current_s} s after {previous_s} s)"
    )]
    TimeReversal {
        line_index: usize,
        previous_s: f64,
        current_s: f64,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file did not contain any data rows")]
    EmptyData,
}
