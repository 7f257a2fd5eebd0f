//! Ranked demand report.
//!
//! [`ReportBuilder::build`] forecasts every item of an aggregation, drops items
//! with insufficient history, and stable-sorts the rest by predicted demand,
//! highest first. Equal predictions keep the item order of the aggregation.

use serde::{Deserialize, Serialize};

use crate::{
    aggregate::{DailyAggregate, series_by_item},
    forecast::{Forecast, TrendForecaster},
};

/// Prediction for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// Catalog item identifier.
    pub item_name: String,
    /// Units expected over the horizon.
    pub predicted_demand: u64,
}

/// Predictions ordered by descending demand. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    entries: Vec<PredictionResult>,
}

impl Report {
    /// Entries in rank order.
    pub fn entries(&self) -> &[PredictionResult] {
        &self.entries
    }

    /// Number of ranked items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no item had enough history.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume into the ranked entries.
    pub fn into_entries(self) -> Vec<PredictionResult> {
        self.entries
    }
}

/// Builds a [`Report`] from daily aggregates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportBuilder {
    forecaster: TrendForecaster,
}

impl ReportBuilder {
    /// Builder using `forecaster` for every item.
    pub fn new(forecaster: TrendForecaster) -> Self {
        Self { forecaster }
    }

    /// Forecast each item and rank the results.
    pub fn build(&self, aggregates: &[DailyAggregate]) -> Report {
        let mut entries = Vec::new();
        let mut skipped = 0usize;

        for series in series_by_item(aggregates) {
            match self.forecaster.forecast(&series) {
                Forecast::Demand(predicted_demand) => entries.push(PredictionResult {
                    item_name: series.item_name().to_string(),
                    predicted_demand,
                }),
                Forecast::InsufficientData => {
                    skipped += 1;
                    tracing::debug!(
                        item = series.item_name(),
                        days = series.len(),
                        min_days = self.forecaster.min_days(),
                        "insufficient history; item left out of report"
                    );
                }
            }
        }

        // sort_by is stable: ties keep aggregation order
        entries.sort_by(|a, b| b.predicted_demand.cmp(&a.predicted_demand));

        tracing::info!(ranked = entries.len(), skipped, "built demand report");
        Report { entries }
    }
}
