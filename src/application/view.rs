//! The dashboard view model.
//!
//! One serializable document per run, consumed by the external rendering
//! surface: the date-picker bounds, one section per chart widget with its
//! summary numbers, the region statistics table, and the map overlay.

use crate::domain::aggregates::{
    CategoryCount, DailyAggregate, DailySpend, DateRange, MapBounds, ScoreCount, SpendSummary,
    StateAggregate, StateCustomerCount, StatusCount,
};
use crate::domain::record::GeoPoint;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub date_window: DateWindow,
    pub daily_orders: DailyOrdersSection,
    pub daily_spend: DailySpendSection,
    pub order_items: OrderItemsSection,
    pub review_scores: ReviewScoreSection,
    pub customers_by_state: CustomersByStateSection,
    pub order_status: OrderStatusSection,
    pub region_stats: RegionStatsSection,
    pub map: MapOverlay,
}

/// Picker bounds (min/max approval date in the data) and the window the
/// view was computed over. All `None` when no record carries an approval
/// timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DateWindow {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
    pub selected: Option<DateRange>,
}

/// Line chart of orders per day plus the order/revenue totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyOrdersSection {
    pub total_orders: u64,
    pub total_revenue: Decimal,
    pub series: Vec<DailyAggregate>,
}

/// Line chart of customer spend per day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySpendSection {
    pub total_spend: Decimal,
    pub mean_daily_spend: Option<Decimal>,
    pub series: Vec<DailySpend>,
}

/// The two bar charts over the category ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItemsSection {
    pub total_items: u64,
    pub mean_per_category: Option<f64>,
    pub most_sold: Vec<CategoryCount>,
    pub fewest_sold: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewScoreSection {
    pub mean_score: Option<f64>,
    pub most_common_score: Option<u8>,
    pub counts: Vec<ScoreCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomersByStateSection {
    pub most_common_state: Option<String>,
    pub counts: Vec<StateCustomerCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderStatusSection {
    pub most_common_status: Option<String>,
    pub counts: Vec<StatusCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionStatsSection {
    pub spend: SpendSummary,
    pub states: Vec<StateAggregate>,
}

/// Scatter overlay of customer locations over the fixed Brazil extent.
/// `background` is the backdrop image reference, absent when its fetch
/// failed (the overlay degrades to points only).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOverlay {
    pub bounds: MapBounds,
    pub background: Option<String>,
    pub points: Vec<GeoPoint>,
}
