//! Sales reports over stored purchases.
//!
//! - [`rank_items`]: best and worst sellers by total quantity
//! - [`top_revenue`]: best sellers by summed line total
//! - [`daily_trend`]: revenue per UTC day over a trailing window, empty days as 0
//! - [`monthly_trend`]: revenue per UTC year/month, oldest first
//!
//! The rankings consider named items only. The trends count every purchase.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{aggregate::is_countable, source::RawRecord, tz::utc_day};

/// Default number of items in a ranking.
pub const DEFAULT_LIMIT: usize = 10;
/// Default length of the daily trend window, in days.
pub const TREND_DAYS: u32 = 7;

/// One purchase as seen by the revenue reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    /// Item identifier; absent on malformed purchases.
    pub item_name: Option<String>,
    /// Purchase instant (UTC).
    pub purchase_date: DateTime<Utc>,
    /// Line total, 0 when none was recorded.
    pub total_amount: f64,
}

impl SaleRecord {
    /// Convenience constructor for a named purchase.
    pub fn new(
        item_name: impl Into<String>,
        purchase_date: DateTime<Utc>,
        total_amount: f64,
    ) -> Self {
        Self {
            item_name: Some(item_name.into()),
            purchase_date,
            total_amount,
        }
    }

    fn named(&self) -> Option<&str> {
        self.item_name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Total units sold for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTotal {
    /// Catalog item identifier.
    pub item_name: String,
    /// Sum of all purchased quantities.
    pub total_sold: f64,
}

/// Ranking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    /// Highest totals first.
    MostSold,
    /// Lowest totals first.
    LeastSold,
}

/// Sum quantity per item and keep the top `limit` in the requested direction.
///
/// Equal totals keep the order in which items first appear in `records`.
pub fn rank_items(records: &[RawRecord], rank: Rank, limit: usize) -> Vec<ItemTotal> {
    let mut totals = IndexMap::<&str, f64>::new();
    for r in records.iter().filter(|r| is_countable(r)) {
        *totals.entry(r.item_name.as_str()).or_insert(0.0) += r.quantity;
    }

    let mut ranked: Vec<ItemTotal> = totals
        .into_iter()
        .map(|(name, total_sold)| ItemTotal {
            item_name: name.to_string(),
            total_sold,
        })
        .collect();

    match rank {
        Rank::MostSold => ranked.sort_by(|a, b| b.total_sold.total_cmp(&a.total_sold)),
        Rank::LeastSold => ranked.sort_by(|a, b| a.total_sold.total_cmp(&b.total_sold)),
    }
    ranked.truncate(limit);
    ranked
}

/// Total revenue for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRevenue {
    /// Catalog item identifier.
    pub item_name: String,
    /// Sum of all line totals.
    pub total_revenue: f64,
}

/// Sum line totals per named item and keep the `limit` highest.
///
/// Equal totals keep first-seen order.
pub fn top_revenue(sales: &[SaleRecord], limit: usize) -> Vec<ItemRevenue> {
    let mut totals = IndexMap::<&str, f64>::new();
    for s in sales.iter().filter(|s| s.total_amount.is_finite()) {
        if let Some(name) = s.named() {
            *totals.entry(name).or_insert(0.0) += s.total_amount;
        }
    }

    let mut ranked: Vec<ItemRevenue> = totals
        .into_iter()
        .map(|(name, total_revenue)| ItemRevenue {
            item_name: name.to_string(),
            total_revenue,
        })
        .collect();
    ranked.sort_by(|a, b| b.total_revenue.total_cmp(&a.total_revenue));
    ranked.truncate(limit);
    ranked
}

/// Revenue on one UTC day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    /// UTC calendar day.
    pub date: NaiveDate,
    /// Sum of line totals that day.
    pub total_sales: f64,
}

/// Revenue per UTC day for the `days` days ending on the day of `now`.
///
/// Every day of the window is present, ascending; days without purchases are 0.
/// Purchases after `now` are ignored.
pub fn daily_trend(sales: &[SaleRecord], now: DateTime<Utc>, days: u32) -> Vec<DailySales> {
    if days == 0 {
        return Vec::new();
    }
    let last = utc_day(now);
    let first = last
        .checked_sub_days(Days::new(u64::from(days - 1)))
        .unwrap_or(NaiveDate::MIN);

    let mut by_day: BTreeMap<NaiveDate, f64> = first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|d| (d, 0.0))
        .collect();

    for s in sales {
        if s.purchase_date > now || !s.total_amount.is_finite() {
            continue;
        }
        if let Some(total) = by_day.get_mut(&utc_day(s.purchase_date)) {
            *total += s.total_amount;
        }
    }

    by_day
        .into_iter()
        .map(|(date, total_sales)| DailySales { date, total_sales })
        .collect()
}

/// Revenue for one UTC calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    /// Calendar year.
    pub year: i32,
    /// Month, 1 to 12.
    pub month: u32,
    /// Sum of line totals that month.
    pub total_sales: f64,
}

/// Revenue per UTC year/month, oldest month first. Months without purchases are absent.
pub fn monthly_trend(sales: &[SaleRecord]) -> Vec<MonthlySales> {
    let mut by_month = BTreeMap::<(i32, u32), f64>::new();
    for s in sales.iter().filter(|s| s.total_amount.is_finite()) {
        let ts = s.purchase_date;
        *by_month.entry((ts.year(), ts.month())).or_insert(0.0) += s.total_amount;
    }
    by_month
        .into_iter()
        .map(|((year, month), total_sales)| MonthlySales {
            year,
            month,
            total_sales,
        })
        .collect()
}
