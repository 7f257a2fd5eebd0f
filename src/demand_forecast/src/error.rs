//! Error types for the forecasting pipeline.
//!
//! Only two kinds abort a run: a bad configuration and an unreachable store.
//! An item with too little history is a normal outcome
//! ([`crate::forecast::Forecast::InsufficientData`]), never an error.

use thiserror::Error;

/// Failures raised by a [`crate::source::RecordSource`].
#[derive(Debug, Error)]
pub enum SourceError {
    /// The store could not be reached or the query could not execute.
    ///
    /// No partial record set accompanies this error.
    #[error("record source unavailable: {0:#}")]
    Unavailable(#[source] anyhow::Error),
}

impl SourceError {
    /// Wrap any failure as [`SourceError::Unavailable`].
    pub fn unavailable(err: impl Into<anyhow::Error>) -> Self {
        SourceError::Unavailable(err.into())
    }
}

/// Fatal errors that abort a forecasting run.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Required configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The record source failed.
    #[error(transparent)]
    SourceUnavailable(#[from] SourceError),
}

/// Result type with [`ForecastError`].
pub type Result<T> = std::result::Result<T, ForecastError>;
