//! Daily aggregation of raw purchase records.
//!
//! [`aggregate_daily`] groups records by `(item_name, UTC calendar day)` and sums
//! quantities, yielding at most one [`DailyAggregate`] per pair. Output rows are
//! ordered by `(item_name, date)` ascending regardless of input order; this is the
//! "first-seen" item order used for tie-breaking in the report.
//!
//! [`series_by_item`] splits aggregates into one [`ItemSeries`] per item.
//!
//! Invalid rows are skipped without signal:
//! - empty item name
//! - non-finite quantity
//!
//! A whitespace-only name is not empty and is kept as its own item.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use crate::{source::RawRecord, tz::utc_day};

/// Summed quantity for one item on one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAggregate {
    /// Catalog item identifier.
    pub item_name: String,
    /// UTC calendar day.
    pub date: NaiveDate,
    /// Sum of the quantities purchased that day.
    pub quantity: f64,
}

/// Whether a record can take part in aggregation.
pub fn is_countable(record: &RawRecord) -> bool {
    !record.item_name.is_empty() && record.quantity.is_finite()
}

/// Group records by item and UTC day, summing quantity.
pub fn aggregate_daily<'a, I>(records: I) -> Vec<DailyAggregate>
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    let mut groups = BTreeMap::<(&'a str, NaiveDate), f64>::new();
    for r in records {
        if !is_countable(r) {
            continue;
        }
        *groups
            .entry((r.item_name.as_str(), utc_day(r.purchase_date)))
            .or_insert(0.0) += r.quantity;
    }

    groups
        .into_iter()
        .map(|((item_name, date), quantity)| DailyAggregate {
            item_name: item_name.to_string(),
            date,
            quantity,
        })
        .collect()
}

/// One item's observations, strictly ascending by date.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSeries<'a> {
    item_name: &'a str,
    points: Vec<(NaiveDate, f64)>,
}

impl<'a> ItemSeries<'a> {
    /// Build a series, sorting by date and merging duplicate dates by summing.
    pub fn new(item_name: &'a str, mut points: Vec<(NaiveDate, f64)>) -> Self {
        points.sort_by_key(|(d, _)| *d);
        points.dedup_by(|later, kept| {
            if later.0 == kept.0 {
                kept.1 += later.1;
                true
            } else {
                false
            }
        });
        Self { item_name, points }
    }

    /// Item identifier.
    pub fn item_name(&self) -> &'a str {
        self.item_name
    }

    /// Number of distinct observed days.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no day was observed.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(date, quantity)` pairs in ascending date order.
    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }

    /// Quantities in ascending date order.
    pub fn quantities(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, q)| *q)
    }
}

/// Split aggregates into per-item series, items in first-seen order.
pub fn series_by_item(aggregates: &[DailyAggregate]) -> Vec<ItemSeries<'_>> {
    let mut by_item = IndexMap::<&str, Vec<(NaiveDate, f64)>>::new();
    for a in aggregates {
        by_item
            .entry(a.item_name.as_str())
            .or_default()
            .push((a.date, a.quantity));
    }
    by_item
        .into_iter()
        .map(|(name, points)| ItemSeries::new(name, points))
        .collect()
}
