//! Errors raised by the report engine.
//!
//! Both kinds are raised before any aggregation takes place.  Gaps in
//! the data itself (unknown sellers or SKUs, NaN arithmetic) are not
//! errors; see [`crate::engine`].

use thiserror::Error;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("missing calculation strategy: {0}")]
    MissingStrategy(&'static str),
}

impl AnalysisError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::MissingStrategy(_) => "missing_strategy",
        }
    }
}
