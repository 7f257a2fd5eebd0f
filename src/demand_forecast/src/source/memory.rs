//! In-memory record source.

use anyhow::anyhow;

use super::{RawRecord, RecordSource};
use crate::error::SourceError;

/// Serves a fixed record set, or always fails when built with [`MemorySource::failing`].
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<RawRecord>,
    failure: Option<String>,
}

impl MemorySource {
    /// Source returning `records` on every fetch.
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self {
            records,
            failure: None,
        }
    }

    /// Source whose every fetch fails as unavailable with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

impl RecordSource for MemorySource {
    fn fetch(&mut self) -> Result<Vec<RawRecord>, SourceError> {
        match &self.failure {
            Some(msg) => Err(SourceError::unavailable(anyhow!(msg.clone()))),
            None => Ok(self.records.clone()),
        }
    }
}
