use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::analytics::period::Period;
use crate::analytics::types::Transaction;

/// Monthly active customers, revenue, and average revenue per active
/// customer for one calendar month present in the data.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyActivityRow {
    pub period: String,
    pub active_customers: i64,
    pub revenue: f64,
    pub arpu: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub earliest: Option<String>,
    pub latest: Option<String>,
    pub total_customers: i64,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Default)]
struct PeriodAggregate {
    customers: BTreeSet<i64>,
    revenue: f64,
}

/// One row per month with any activity, chronological. Months with no
/// transactions are simply absent; they carry no customers to average over.
pub fn compute_monthly_activity(transactions: &[Transaction]) -> Vec<MonthlyActivityRow> {
    let mut by_period: BTreeMap<Period, PeriodAggregate> = BTreeMap::new();
    for transaction in transactions {
        let entry = by_period
            .entry(Period::from_datetime(transaction.occurred_at))
            .or_default();
        entry.customers.insert(transaction.customer_id);
        entry.revenue += transaction.line_total();
    }

    by_period
        .iter()
        .map(|(period, aggregate)| {
            let active_customers = aggregate.customers.len() as i64;
            let arpu = if active_customers > 0 {
                aggregate.revenue / (active_customers as f64)
            } else {
                0.0
            };
            MonthlyActivityRow {
                period: period.label(),
                active_customers,
                revenue: round_to(aggregate.revenue, 2),
                arpu: round_to(arpu, 2),
            }
        })
        .collect()
}

pub fn summarize(transactions: &[Transaction]) -> DatasetSummary {
    let mut customers: BTreeSet<i64> = BTreeSet::new();
    let mut total_revenue = 0.0;
    let mut earliest = None;
    let mut latest = None;

    for transaction in transactions {
        customers.insert(transaction.customer_id);
        total_revenue += transaction.line_total();
        let date = transaction.occurred_at.date();
        if earliest.is_none_or(|seen| date < seen) {
            earliest = Some(date);
        }
        if latest.is_none_or(|seen| date > seen) {
            latest = Some(date);
        }
    }

    DatasetSummary {
        earliest: earliest.map(|date| date.format("%Y-%m-%d").to_string()),
        latest: latest.map(|date| date.format("%Y-%m-%d").to_string()),
        total_customers: customers.len() as i64,
        total_revenue: round_to(total_revenue, 2),
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let exponent = i32::try_from(decimals).unwrap_or(2);
    let factor = 10_f64.powi(exponent);
    (value * factor).round() / factor
}
