//! Descriptive aggregates over the transactions table.
//!
//! Every function is pure over its input slice: callers pre-filter with
//! [`filter_by_approval`] and pass the result along. Empty input yields
//! empty collections and `None` summaries, never an error.

use crate::domain::aggregates::{
    CategoryCount, DailyAggregate, DailySpend, DateRange, ScoreCount, StateCustomerCount,
    StatusCount,
};
use crate::domain::record::TransactionRecord;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};

/// How many categories the "most sold" / "fewest sold" views take.
const RANKED_SLICE_LEN: usize = 5;

/// Keeps records whose approval timestamp falls inside `range`.
///
/// Records without an approval timestamp are dropped regardless of the
/// range, so filtering by the full data bounds reproduces the unfiltered
/// aggregates exactly.
pub fn filter_by_approval(records: &[TransactionRecord], range: &DateRange) -> Vec<TransactionRecord> {
    records
        .iter()
        .filter(|record| record.approved_at.is_some_and(|ts| range.contains(ts)))
        .cloned()
        .collect()
}

/// Distinct order count and revenue per approval day, ascending by day.
pub fn daily_orders(records: &[TransactionRecord]) -> Vec<DailyAggregate> {
    let mut days: BTreeMap<NaiveDate, (HashSet<&str>, Decimal)> = BTreeMap::new();
    for record in records {
        let Some(date) = record.approved_date() else {
            continue;
        };
        let (orders, revenue) = days.entry(date).or_default();
        orders.insert(record.order_id.as_str());
        if let Some(value) = record.payment_value {
            *revenue += value;
        }
    }

    days.into_iter()
        .map(|(date, (orders, revenue))| DailyAggregate {
            date,
            order_count: orders.len() as u64,
            revenue,
        })
        .collect()
}

/// Spend sum per approval day, ascending by day.
pub fn daily_spend(records: &[TransactionRecord]) -> Vec<DailySpend> {
    let mut days: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for record in records {
        let Some(date) = record.approved_date() else {
            continue;
        };
        if let Some(value) = record.payment_value {
            *days.entry(date).or_default() += value;
        }
    }

    days.into_iter()
        .map(|(date, total_spend)| DailySpend { date, total_spend })
        .collect()
}

/// Item-row count per product category, the full ranking.
///
/// Ordered by count descending, ties by category name ascending. The
/// "most sold" view is the head of this ranking and the "fewest sold"
/// view is its tail, so the two slices are disjoint whenever more than
/// twice [`RANKED_SLICE_LEN`] categories exist.
pub fn items_by_category(records: &[TransactionRecord]) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for record in records {
        if let Some(category) = record.product_category.as_deref() {
            *counts.entry(category).or_default() += 1;
        }
    }

    let mut ranking: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    ranking.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    ranking
}

/// Head of the category ranking, at most five entries.
pub fn most_sold(ranking: &[CategoryCount]) -> Vec<CategoryCount> {
    ranking[..ranking.len().min(RANKED_SLICE_LEN)].to_vec()
}

/// Tail of the category ranking re-sorted ascending, at most five entries.
pub fn fewest_sold(ranking: &[CategoryCount]) -> Vec<CategoryCount> {
    let tail_start = ranking.len().saturating_sub(RANKED_SLICE_LEN);
    let mut tail = ranking[tail_start..].to_vec();
    tail.reverse();
    tail
}

/// Review-score frequency table, count descending with ties broken by the
/// lower score.
pub fn review_scores(records: &[TransactionRecord]) -> Vec<ScoreCount> {
    let mut counts: HashMap<u8, u64> = HashMap::new();
    for record in records {
        if let Some(score) = record.review_score {
            *counts.entry(score).or_default() += 1;
        }
    }

    let mut table: Vec<ScoreCount> = counts
        .into_iter()
        .map(|(score, count)| ScoreCount { score, count })
        .collect();
    table.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.score.cmp(&b.score)));
    table
}

/// Distinct `customer_id` count per state, count descending with ties
/// broken by state name.
pub fn customers_by_state(records: &[TransactionRecord]) -> Vec<StateCustomerCount> {
    let mut customers: HashMap<&str, HashSet<&str>> = HashMap::new();
    for record in records {
        if let (Some(state), Some(customer)) =
            (record.customer_state.as_deref(), record.customer_id.as_deref())
        {
            customers.entry(state).or_default().insert(customer);
        }
    }

    let mut table: Vec<StateCustomerCount> = customers
        .into_iter()
        .map(|(state, ids)| StateCustomerCount {
            state: state.to_string(),
            customer_count: ids.len() as u64,
        })
        .collect();
    table.sort_by(|a, b| {
        b.customer_count
            .cmp(&a.customer_count)
            .then_with(|| a.state.cmp(&b.state))
    });
    table
}

/// Order-status frequency table, count descending with ties broken by
/// status name.
pub fn order_statuses(records: &[TransactionRecord]) -> Vec<StatusCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for record in records {
        if let Some(status) = record.order_status.as_deref() {
            *counts.entry(status).or_default() += 1;
        }
    }

    let mut table: Vec<StatusCount> = counts
        .into_iter()
        .map(|(status, count)| StatusCount {
            status: status.to_string(),
            count,
        })
        .collect();
    table.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.status.cmp(&b.status)));
    table
}

pub fn total_orders(daily: &[DailyAggregate]) -> u64 {
    daily.iter().map(|day| day.order_count).sum()
}

pub fn total_revenue(daily: &[DailyAggregate]) -> Decimal {
    daily.iter().map(|day| day.revenue).sum()
}

pub fn total_spend(spend: &[DailySpend]) -> Decimal {
    spend.iter().map(|day| day.total_spend).sum()
}

/// Mean spend per active day; `None` over an empty series.
pub fn mean_daily_spend(spend: &[DailySpend]) -> Option<Decimal> {
    if spend.is_empty() {
        return None;
    }
    Some(total_spend(spend) / Decimal::from(spend.len() as u64))
}

pub fn total_items(ranking: &[CategoryCount]) -> u64 {
    ranking.iter().map(|entry| entry.count).sum()
}

/// Mean item count per category; `None` over an empty ranking.
pub fn mean_items_per_category(ranking: &[CategoryCount]) -> Option<f64> {
    if ranking.is_empty() {
        return None;
    }
    Some(total_items(ranking) as f64 / ranking.len() as f64)
}

/// Frequency-weighted mean review score; `None` over an empty table.
pub fn mean_review_score(counts: &[ScoreCount]) -> Option<f64> {
    let total: u64 = counts.iter().map(|entry| entry.count).sum();
    if total == 0 {
        return None;
    }
    let weighted: f64 = counts
        .iter()
        .map(|entry| entry.score as f64 * entry.count as f64)
        .sum();
    Some(weighted / total as f64)
}
