//! Per-state payment statistics and per-customer spend estimation.
//!
//! Confidence intervals are two-sided 95% Student-t intervals,
//! `mean ± t(0.975, df) * se`, with the critical value taken from
//! `statrs`. Samples below two observations report
//! [`IntervalEstimate::InsufficientSample`] instead of a degenerate or
//! NaN interval.

use crate::domain::aggregates::{IntervalEstimate, SpendSummary, StateAggregate};
use crate::domain::record::TransactionRecord;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::collections::{BTreeMap, HashMap};

const CONFIDENCE: f64 = 0.95;

/// Total spend per `customer_unique_id`. Rows missing the customer key or
/// the payment value are skipped; sums stay exact decimals.
pub fn per_customer_spend(records: &[TransactionRecord]) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for record in records {
        if let (Some(customer), Some(value)) =
            (record.customer_unique_id.as_deref(), record.payment_value)
        {
            *totals.entry(customer.to_string()).or_default() += value;
        }
    }
    totals
}

/// Mean per-customer spend with its confidence interval, n = number of
/// customers.
pub fn spend_summary(records: &[TransactionRecord]) -> SpendSummary {
    let totals = per_customer_spend(records);
    let spends: Vec<f64> = totals.values().map(|total| to_f64(*total)).collect();

    let customer_count = spends.len() as u64;
    let mean_spend = mean(&spends);
    let std_spend = mean_spend.and_then(|m| sample_std(&spends, m));

    let interval = match (mean_spend, std_spend) {
        (Some(m), Some(std)) => t_interval(m, std, customer_count),
        _ => IntervalEstimate::InsufficientSample,
    };

    SpendSummary {
        customer_count,
        mean_spend,
        std_spend,
        interval,
    }
}

/// Per-state mean payment with its confidence interval, ascending by mean.
///
/// `sample_count` counts rows carrying a `customer_unique_id` while the
/// mean and deviation run over present payment values, matching the
/// upstream join semantics. States with no payment observations have an
/// undefined mean and are omitted.
pub fn state_aggregates(records: &[TransactionRecord]) -> Vec<StateAggregate> {
    #[derive(Default)]
    struct StateAcc {
        payments: Vec<f64>,
        customer_rows: u64,
    }

    let mut states: HashMap<&str, StateAcc> = HashMap::new();
    for record in records {
        let Some(state) = record.customer_state.as_deref() else {
            continue;
        };
        let acc = states.entry(state).or_default();
        if let Some(value) = record.payment_value {
            acc.payments.push(to_f64(value));
        }
        if record.customer_unique_id.is_some() {
            acc.customer_rows += 1;
        }
    }

    let mut table: Vec<StateAggregate> = states
        .into_iter()
        .filter_map(|(state, acc)| {
            let mean_payment = mean(&acc.payments)?;
            let std_payment = sample_std(&acc.payments, mean_payment);
            let interval = match std_payment {
                Some(std) => t_interval(mean_payment, std, acc.customer_rows),
                None => IntervalEstimate::InsufficientSample,
            };
            Some(StateAggregate {
                state: state.to_string(),
                mean_payment,
                std_payment,
                sample_count: acc.customer_rows,
                interval,
            })
        })
        .collect();

    table.sort_by(|a, b| {
        a.mean_payment
            .partial_cmp(&b.mean_payment)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.state.cmp(&b.state))
    });
    table
}

/// Two-sided Student-t interval around `mean` with `count - 1` degrees of
/// freedom and standard error `std / sqrt(count)`.
pub fn t_interval(mean: f64, std: f64, count: u64) -> IntervalEstimate {
    if count < 2 {
        return IntervalEstimate::InsufficientSample;
    }

    let df = (count - 1) as f64;
    let se = std / (count as f64).sqrt();

    match StudentsT::new(0.0, 1.0, df) {
        Ok(t_dist) => {
            let t = t_dist.inverse_cdf(0.5 + CONFIDENCE / 2.0);
            if !t.is_finite() {
                return IntervalEstimate::InsufficientSample;
            }
            IntervalEstimate::Estimated {
                low: mean - t * se,
                high: mean + t * se,
            }
        }
        Err(_) => IntervalEstimate::InsufficientSample,
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n-1 denominator); `None` below two values.
fn sample_std(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() as f64 - 1.0);
    variance.is_finite().then(|| variance.sqrt())
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
