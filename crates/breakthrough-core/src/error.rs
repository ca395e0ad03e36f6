// crates/breakthrough-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("series is empty")]
    EmptySeries,

    #[error("cannot normalize channel '{channel}': maximum is zero")]
    DivisionByZero { channel: &'static str },

    #[error("invalid window: {0}")]
    InvalidWindow(String),

    #[error("no sample satisfied predicate: {0}")]
    NoMatch(&'static str),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("constants file error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("plot rendering failed: {0}")]
    Plot(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
