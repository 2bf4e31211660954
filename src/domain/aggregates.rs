use crate::error::DashboardError;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

/// Inclusive calendar-date window applied to the approval timestamp.
///
/// A record matches when its approval timestamp is present and its
/// calendar date falls inside the window; records without an approval
/// timestamp never match any window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DashboardError> {
        if start <= end {
            Ok(Self { start, end })
        } else {
            Err(DashboardError::ValidationError(format!(
                "date range starts after it ends: {start} > {end}"
            )))
        }
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        let date = timestamp.date();
        self.start <= date && date <= self.end
    }

    /// Intersects with `bounds`; `None` when the windows do not overlap.
    pub fn clamp_to(&self, bounds: &DateRange) -> Option<DateRange> {
        let start = self.start.max(bounds.start);
        let end = self.end.min(bounds.end);
        (start <= end).then_some(DateRange { start, end })
    }
}

/// One day of order activity. Days with zero rows are omitted upstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    /// Distinct `order_id` values approved that day.
    pub order_count: u64,
    pub revenue: Decimal,
}

/// One day of customer spend, kept separate from [`DailyAggregate`] so the
/// two time series chart independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySpend {
    pub date: NaiveDate,
    pub total_spend: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    /// Item rows in the category, not distinct products.
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreCount {
    pub score: u8,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateCustomerCount {
    pub state: String,
    /// Distinct `customer_id` values, not `customer_unique_id`.
    pub customer_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

/// A 95% two-sided Student-t interval, or the explicit marker that the
/// sample was too small to estimate one (fewer than two observations).
///
/// The marker is a first-class value so the rendering surface never has to
/// sniff for NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IntervalEstimate {
    Estimated { low: f64, high: f64 },
    InsufficientSample,
}

impl IntervalEstimate {
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match *self {
            IntervalEstimate::Estimated { low, high } => Some((low, high)),
            IntervalEstimate::InsufficientSample => None,
        }
    }
}

/// Per-state payment statistics with the interval around the mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateAggregate {
    pub state: String,
    pub mean_payment: f64,
    /// Sample standard deviation (n-1 denominator); `None` below two
    /// payment observations.
    pub std_payment: Option<f64>,
    /// Rows carrying a `customer_unique_id` in the state.
    pub sample_count: u64,
    pub interval: IntervalEstimate,
}

/// Global per-customer spend statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendSummary {
    pub customer_count: u64,
    pub mean_spend: Option<f64>,
    pub std_spend: Option<f64>,
    pub interval: IntervalEstimate,
}

/// Fixed plotting extent of the customer map (Brazil).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapBounds {
    pub lng_min: f64,
    pub lng_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl MapBounds {
    pub const BRAZIL: Self = Self {
        lng_min: -73.98283055,
        lng_max: -33.8,
        lat_min: -33.75116944,
        lat_max: 5.4,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_validation() {
        assert!(DateRange::new(date(2018, 1, 1), date(2018, 1, 31)).is_ok());
        assert!(matches!(
            DateRange::new(date(2018, 2, 1), date(2018, 1, 1)),
            Err(DashboardError::ValidationError(_))
        ));
    }

    #[test]
    fn test_date_range_contains_is_inclusive() {
        let range = DateRange::new(date(2018, 1, 1), date(2018, 1, 2)).unwrap();

        let first = date(2018, 1, 1).and_hms_opt(0, 0, 0).unwrap();
        let last = date(2018, 1, 2).and_hms_opt(23, 59, 59).unwrap();
        let after = date(2018, 1, 3).and_hms_opt(0, 0, 0).unwrap();

        assert!(range.contains(first));
        assert!(range.contains(last));
        assert!(!range.contains(after));
    }

    #[test]
    fn test_date_range_clamp() {
        let bounds = DateRange::new(date(2018, 1, 5), date(2018, 1, 20)).unwrap();
        let wide = DateRange::new(date(2018, 1, 1), date(2018, 1, 31)).unwrap();
        let disjoint = DateRange::new(date(2018, 2, 1), date(2018, 2, 5)).unwrap();

        assert_eq!(wide.clamp_to(&bounds), Some(bounds));
        assert_eq!(disjoint.clamp_to(&bounds), None);
    }

    #[test]
    fn test_interval_bounds() {
        let estimated = IntervalEstimate::Estimated { low: 1.0, high: 2.0 };
        assert_eq!(estimated.bounds(), Some((1.0, 2.0)));
        assert_eq!(IntervalEstimate::InsufficientSample.bounds(), None);
    }
}
