//! Linear-trend demand forecasting for a single item.
//!
//! The model is one feature (day-number) to one response (quantity), fitted by
//! ordinary least squares in closed form. Day-numbers are the positions `0..n-1`
//! of the observed days, not elapsed calendar days: an item bought on Jan 1,
//! Jan 2 and Feb 15 is modelled as three consecutive samples. Switching to
//! calendar spacing would change forecasts for sparse items.

use crate::{
    aggregate::ItemSeries,
    config::{ForecastSettings, MAX_HORIZON},
};

/// Fitted line `quantity = slope * day + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    /// Change in quantity per day-number.
    pub slope: f64,
    /// Fitted quantity at day-number 0.
    pub intercept: f64,
}

impl LinearTrend {
    /// OLS fit of `values[i]` against `i`. `None` for an empty slice.
    ///
    /// A single value has zero x-variance; the fit is then flat at that value.
    pub fn fit(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let x_mean = (n - 1.0) / 2.0;
        let y_mean = values.iter().sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (i, &y) in values.iter().enumerate() {
            let dx = i as f64 - x_mean;
            numerator += dx * (y - y_mean);
            denominator += dx * dx;
        }

        let slope = if denominator > 0.0 {
            numerator / denominator
        } else {
            0.0
        };
        Some(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    /// Fitted value at day-number `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Outcome of forecasting one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forecast {
    /// Projected units over the horizon, clamped and rounded.
    Demand(u64),
    /// Fewer than `min_days` observed days.
    InsufficientData,
}

impl Forecast {
    /// The predicted demand, if any.
    pub fn demand(self) -> Option<u64> {
        match self {
            Forecast::Demand(d) => Some(d),
            Forecast::InsufficientData => None,
        }
    }
}

/// Fits a trend per series and sums its projection over the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendForecaster {
    min_days: usize,
    horizon: usize,
}

impl Default for TrendForecaster {
    fn default() -> Self {
        Self::new(ForecastSettings::default())
    }
}

impl From<ForecastSettings> for TrendForecaster {
    fn from(settings: ForecastSettings) -> Self {
        Self::new(settings)
    }
}

impl TrendForecaster {
    /// Forecaster with the given thresholds.
    ///
    /// Horizons above [`MAX_HORIZON`] are capped; [`ForecastSettings::validate`]
    /// rejects them before a run.
    pub fn new(settings: ForecastSettings) -> Self {
        Self {
            min_days: settings.min_days,
            horizon: settings.horizon.min(MAX_HORIZON),
        }
    }

    /// Minimum distinct days required.
    pub fn min_days(&self) -> usize {
        self.min_days
    }

    /// Number of projected periods.
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Forecast one item's series.
    pub fn forecast(&self, series: &ItemSeries<'_>) -> Forecast {
        let values: Vec<f64> = series.quantities().collect();
        self.forecast_values(&values)
    }

    /// Forecast from quantities already in ascending date order.
    ///
    /// Projects day-numbers `n..n+horizon`, clamps each to `>= 0`, sums, and
    /// rounds half-to-even.
    pub fn forecast_values(&self, values: &[f64]) -> Forecast {
        if values.len() < self.min_days {
            return Forecast::InsufficientData;
        }
        let Some(trend) = LinearTrend::fit(values) else {
            return Forecast::InsufficientData;
        };

        let first = values.len();
        let total: f64 = (first..first.saturating_add(self.horizon))
            .map(|x| trend.predict(x as f64).max(0.0))
            .sum();

        // clamped, so total >= 0; `as` saturates on overflow
        Forecast::Demand(total.round_ties_even() as u64)
    }
}
