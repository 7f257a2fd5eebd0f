//! Diesel models mapping to the database schema.
//!
//! These types mirror [`crate::schema::purchase_history`] (see the embedded migrations)
//! for use with Diesel's Queryable/Insertable APIs. Timestamps are stored as
//! RFC-3339 UTC text.

use diesel::prelude::*;

use crate::schema::purchase_history;

/// The columns of one [`crate::schema::purchase_history`] row that forecasting and
/// sales reports read.
///
/// Used for SELECT (Queryable, Selectable).
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = purchase_history, check_for_backend(diesel::sqlite::Sqlite))]
pub struct PurchaseRow {
    /// Item identifier; NULL or empty on malformed rows.
    pub item_name: Option<String>,
    /// Purchase instant as stored (RFC-3339 UTC).
    pub purchase_date: String,
    /// Units purchased.
    pub quantity: f64,
    /// Line total; NULL when the purchase recorded no amount.
    pub total_amount: Option<f64>,
}

/// Insertable form of a purchase event.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = purchase_history)]
pub struct NewPurchase<'a> {
    /// Item identifier.
    pub item_name: Option<&'a str>,
    /// Purchase instant in RFC-3339 UTC.
    pub purchase_date: &'a str,
    /// Units purchased.
    pub quantity: f64,
    /// Unit price.
    pub price: Option<f64>,
    /// Line total before discount.
    pub total_amount: Option<f64>,
    /// Buyer display name.
    pub buyer_name: Option<&'a str>,
    /// One of "cash" | "card" | "upi".
    pub payment_mode: Option<&'a str>,
}
