//! Record sources: where raw purchase events come from.
//!
//! A [`RecordSource`] returns the complete set of [`RawRecord`]s with a present,
//! non-empty item name, or a [`SourceError`]. It never returns a partial set.
//!
//! Implementations:
//! - [`sqlite::SqliteSource`]: the `purchase_history` table of a SQLite store
//! - [`memory::MemorySource`]: a fixed in-memory record set

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SourceError;

pub mod memory;
pub mod sqlite;

pub use memory::MemorySource;
pub use sqlite::SqliteSource;

/// One purchase event as supplied by a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    /// Catalog item identifier.
    pub item_name: String,
    /// Purchase instant (UTC).
    pub purchase_date: DateTime<Utc>,
    /// Units purchased.
    pub quantity: f64,
}

impl RawRecord {
    /// Convenience constructor.
    pub fn new(item_name: impl Into<String>, purchase_date: DateTime<Utc>, quantity: f64) -> Self {
        Self {
            item_name: item_name.into(),
            purchase_date,
            quantity,
        }
    }
}

/// Portable surface over the backing store.
pub trait RecordSource {
    /// Fetch every record whose item name is present and non-empty.
    fn fetch(&mut self) -> Result<Vec<RawRecord>, SourceError>;
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    fn fetch(&mut self) -> Result<Vec<RawRecord>, SourceError> {
        (**self).fetch()
    }
}
