// src/error.rs
use thiserror::Error;

use crate::validate::Violation;

/// Everything that can stop a run. None of these are recovered from locally;
/// the runner propagates them straight to the caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A source did not have the expected shape (table count, headers, sequence lengths).
    #[error("source format: {0}")]
    SourceFormat(String),

    #[error("cannot parse birth date {value:?} (row {row})")]
    DateParse { value: String, row: usize },

    #[error("validation failed: {0}")]
    Validation(Violation),

    #[error("bad selector: {0}")]
    Selector(String),

    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("pdf: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn source_format(msg: impl Into<String>) -> Self {
        PipelineError::SourceFormat(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
