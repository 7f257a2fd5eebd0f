//! Per-item demand forecasting over purchase history.
//!
//! Raw purchase events are grouped into one row per item and UTC day, a linear
//! trend is fitted to each item's daily series, and the trend's projection over a
//! fixed horizon is summed into a single predicted demand. Items are ranked by that
//! prediction.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use demand_forecast::{ForecastSettings, MemorySource, RawRecord, pipeline};
//!
//! let day = |d| Utc.with_ymd_and_hms(2025, 1, d, 9, 0, 0).unwrap();
//! let mut source = MemorySource::new(vec![
//!     RawRecord::new("Bandages", day(1), 10.0),
//!     RawRecord::new("Bandages", day(2), 12.0),
//!     RawRecord::new("Bandages", day(3), 14.0),
//!     RawRecord::new("Bandages", day(4), 16.0),
//!     RawRecord::new("RareKit", day(2), 1.0),
//! ]);
//!
//! let report = pipeline::run(&mut source, ForecastSettings::default()).unwrap();
//! assert_eq!(report.len(), 1);
//! assert_eq!(report.entries()[0].predicted_demand, 1410);
//! ```

#![deny(missing_docs)]

pub mod aggregate;
pub mod config;
pub mod db;
pub mod error;
pub mod forecast;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod sales;
#[allow(missing_docs)]
pub mod schema;
pub mod sink;
pub mod source;
pub mod tz;

pub use crate::aggregate::{DailyAggregate, ItemSeries, aggregate_daily};
pub use crate::config::{Config, ForecastSettings};
pub use crate::error::{ForecastError, SourceError};
pub use crate::forecast::{Forecast, TrendForecaster};
pub use crate::report::{PredictionResult, Report, ReportBuilder};
pub use crate::sink::{JsonSink, ResultSink};
pub use crate::source::{MemorySource, RawRecord, RecordSource, SqliteSource};
