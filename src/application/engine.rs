use crate::application::aggregator;
use crate::application::region_stats;
use crate::application::view::{
    CustomersByStateSection, DailyOrdersSection, DailySpendSection, DashboardView, DateWindow,
    MapOverlay, OrderItemsSection, OrderStatusSection, RegionStatsSection, ReviewScoreSection,
};
use crate::domain::aggregates::{DateRange, MapBounds};
use crate::domain::record::{GeoPoint, TransactionRecord};
use chrono::NaiveDate;

/// The main entry point of the pipeline.
///
/// `DashboardEngine` owns the two materialized tables and recomputes every
/// derived aggregate from scratch per [`view`](Self::view) call. There is
/// no caching and no state carried between calls; a rerun with new filter
/// parameters restarts the whole computation.
pub struct DashboardEngine {
    transactions: Vec<TransactionRecord>,
    geolocation: Vec<GeoPoint>,
}

impl DashboardEngine {
    pub fn new(transactions: Vec<TransactionRecord>, geolocation: Vec<GeoPoint>) -> Self {
        Self {
            transactions,
            geolocation,
        }
    }

    /// Min/max approval date across the table; bounds for the external
    /// date-range picker. `None` when no record was ever approved.
    pub fn bounds(&self) -> Option<DateRange> {
        let dates = self
            .transactions
            .iter()
            .filter_map(TransactionRecord::approved_date);

        let (min, max) = dates.fold(None, |acc: Option<(NaiveDate, NaiveDate)>, date| {
            Some(match acc {
                Some((min, max)) => (min.min(date), max.max(date)),
                None => (date, date),
            })
        })?;
        Some(DateRange { start: min, end: max })
    }

    /// Resolves the requested window against the data bounds: missing
    /// endpoints default to the corresponding bound and the result is
    /// clamped into it. `None` when the table has no approval timestamps
    /// or the clamped window is empty.
    pub fn resolve_range(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<DateRange> {
        let bounds = self.bounds()?;
        let requested = DateRange {
            start: from.unwrap_or(bounds.start),
            end: to.unwrap_or(bounds.end),
        };
        if requested.start > requested.end {
            log::warn!(
                "requested date window is empty: {} > {}",
                requested.start,
                requested.end
            );
            return None;
        }
        requested.clamp_to(&bounds)
    }

    /// Computes the full dashboard over the given window.
    ///
    /// A `None` window selects nothing: every section degrades to empty
    /// series and undefined summaries rather than failing.
    pub fn view(&self, range: Option<DateRange>, map_background: Option<String>) -> DashboardView {
        let filtered = match &range {
            Some(range) => aggregator::filter_by_approval(&self.transactions, range),
            None => Vec::new(),
        };

        let daily = aggregator::daily_orders(&filtered);
        let spend = aggregator::daily_spend(&filtered);
        let ranking = aggregator::items_by_category(&filtered);
        let scores = aggregator::review_scores(&filtered);
        let states = aggregator::customers_by_state(&filtered);
        let statuses = aggregator::order_statuses(&filtered);

        let bounds = self.bounds();

        DashboardView {
            date_window: DateWindow {
                min: bounds.map(|b| b.start),
                max: bounds.map(|b| b.end),
                selected: range,
            },
            daily_orders: DailyOrdersSection {
                total_orders: aggregator::total_orders(&daily),
                total_revenue: aggregator::total_revenue(&daily),
                series: daily,
            },
            daily_spend: DailySpendSection {
                total_spend: aggregator::total_spend(&spend),
                mean_daily_spend: aggregator::mean_daily_spend(&spend),
                series: spend,
            },
            order_items: OrderItemsSection {
                total_items: aggregator::total_items(&ranking),
                mean_per_category: aggregator::mean_items_per_category(&ranking),
                most_sold: aggregator::most_sold(&ranking),
                fewest_sold: aggregator::fewest_sold(&ranking),
            },
            review_scores: ReviewScoreSection {
                mean_score: aggregator::mean_review_score(&scores),
                most_common_score: scores.first().map(|entry| entry.score),
                counts: scores,
            },
            customers_by_state: CustomersByStateSection {
                most_common_state: states.first().map(|entry| entry.state.clone()),
                counts: states,
            },
            order_status: OrderStatusSection {
                most_common_status: statuses.first().map(|entry| entry.status.clone()),
                counts: statuses,
            },
            region_stats: RegionStatsSection {
                spend: region_stats::spend_summary(&filtered),
                states: region_stats::state_aggregates(&filtered),
            },
            map: MapOverlay {
                bounds: MapBounds::BRAZIL,
                background: map_background,
                points: self.geolocation.clone(),
            },
        }
    }
}
