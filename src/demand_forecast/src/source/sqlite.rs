//! SQLite-backed record source and purchase import.
use anyhow::Context;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::{RawRecord, RecordSource};
use crate::{
    db::connection::connect_existing_sqlite,
    error::SourceError,
    models::{NewPurchase, PurchaseRow},
    sales::SaleRecord,
    schema::purchase_history,
    tz,
};

use crate::schema::purchase_history::dsl as ph;

/// Reads `purchase_history` from the SQLite database at `database_url`.
///
/// A fresh connection is opened on every fetch. A missing database file is
/// reported as unavailable and is not created.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    database_url: String,
}

impl SqliteSource {
    /// Source for the given URL or path (see [`crate::db::connection::sqlite_target`]).
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Every purchase with its line total, for the revenue reports in [`crate::sales`].
    pub fn fetch_sales(&mut self) -> Result<Vec<SaleRecord>, SourceError> {
        let mut conn =
            connect_existing_sqlite(&self.database_url).map_err(SourceError::unavailable)?;
        load_sales(&mut conn).map_err(SourceError::unavailable)
    }
}

impl RecordSource for SqliteSource {
    fn fetch(&mut self) -> Result<Vec<RawRecord>, SourceError> {
        let mut conn =
            connect_existing_sqlite(&self.database_url).map_err(SourceError::unavailable)?;
        load_records(&mut conn).map_err(SourceError::unavailable)
    }
}

/// Load every purchase with a present, non-empty item name.
///
/// Rows whose `purchase_date` does not parse are skipped.
pub fn load_records(conn: &mut SqliteConnection) -> anyhow::Result<Vec<RawRecord>> {
    let rows: Vec<PurchaseRow> = ph::purchase_history
        .filter(ph::item_name.is_not_null().and(ph::item_name.ne("")))
        .order((ph::purchase_date.asc(), ph::id.asc()))
        .select(PurchaseRow::as_select())
        .load(conn)
        .context("query purchase_history")?;

    let total = rows.len();
    let records: Vec<RawRecord> = rows.into_iter().filter_map(to_record).collect();
    if records.len() < total {
        tracing::debug!(
            skipped = total - records.len(),
            "skipped purchase rows with unreadable purchase_date"
        );
    }
    Ok(records)
}

fn to_record(row: PurchaseRow) -> Option<RawRecord> {
    let item_name = row.item_name.filter(|n| !n.is_empty())?;
    let purchase_date = tz::parse_stored_ts(&row.purchase_date).ok()?;
    Some(RawRecord {
        item_name,
        purchase_date,
        quantity: row.quantity,
    })
}

/// Load every purchase, named or not, with `total_amount` (NULL read as 0).
///
/// Rows whose `purchase_date` does not parse are skipped.
pub fn load_sales(conn: &mut SqliteConnection) -> anyhow::Result<Vec<SaleRecord>> {
    let rows: Vec<PurchaseRow> = ph::purchase_history
        .order((ph::purchase_date.asc(), ph::id.asc()))
        .select(PurchaseRow::as_select())
        .load(conn)
        .context("query purchase_history")?;

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            let purchase_date = tz::parse_stored_ts(&row.purchase_date).ok()?;
            Some(SaleRecord {
                item_name: row.item_name,
                purchase_date,
                total_amount: row.total_amount.unwrap_or(0.0),
            })
        })
        .collect())
}

/// A purchase as accepted by [`insert_purchases`] (and the `import` command).
///
/// JSON field names are camelCase: `itemName`, `purchaseDate`, `quantity`, ...
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseEvent {
    /// Item identifier; may be absent.
    pub item_name: Option<String>,
    /// Purchase instant.
    pub purchase_date: DateTime<Utc>,
    /// Units purchased.
    pub quantity: f64,
    /// Unit price.
    pub price: Option<f64>,
    /// Line total before discount.
    pub total_amount: Option<f64>,
    /// Buyer display name.
    pub buyer_name: Option<String>,
    /// One of "cash" | "card" | "upi".
    pub payment_mode: Option<String>,
}

/// Insert purchases in one immediate transaction. Returns the number of rows written.
pub fn insert_purchases(
    conn: &mut SqliteConnection,
    events: &[PurchaseEvent],
) -> anyhow::Result<usize> {
    let dates: Vec<String> = events
        .iter()
        .map(|e| tz::to_rfc3339_millis(e.purchase_date))
        .collect();

    let rows: Vec<NewPurchase<'_>> = events
        .iter()
        .zip(&dates)
        .map(|(e, date)| NewPurchase {
            item_name: e.item_name.as_deref(),
            purchase_date: date,
            quantity: e.quantity,
            price: e.price,
            total_amount: e.total_amount,
            buyer_name: e.buyer_name.as_deref(),
            payment_mode: e.payment_mode.as_deref(),
        })
        .collect();

    conn.immediate_transaction::<_, anyhow::Error, _>(|conn| {
        let mut written = 0;
        for row in &rows {
            written += diesel::insert_into(purchase_history::table)
                .values(row)
                .execute(conn)
                .with_context(|| format!("insert purchase of {:?}", row.item_name))?;
        }
        Ok(written)
    })
}
