use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::analytics::policy::SCORING_POLICY_V1;
use crate::analytics::quantile::{ScoreDirection, score, score_ranked};
use crate::analytics::segment::{Segment, classify};
use crate::analytics::types::Transaction;
use crate::{EngineError, EngineResult};

#[derive(Debug, Clone, Serialize)]
pub struct RfmRecord {
    pub customer_id: i64,
    pub recency_days: i64,
    pub frequency: i64,
    pub monetary: f64,
    pub r_score: u8,
    pub f_score: u8,
    pub m_score: u8,
    pub segment: Segment,
}

#[derive(Debug, Clone)]
struct CustomerAggregate {
    last_seen: NaiveDate,
    orders: BTreeSet<String>,
    monetary: f64,
}

/// Conventional snapshot: one day after the latest transaction in the
/// dataset. `None` on empty input.
pub fn snapshot_from_transactions(transactions: &[Transaction]) -> Option<NaiveDate> {
    transactions
        .iter()
        .map(|transaction| transaction.occurred_at.date())
        .max()
        .map(|latest| latest + Duration::days(SCORING_POLICY_V1.snapshot_offset_days))
}

/// Per-customer recency/frequency/monetary aggregation scored into
/// quartiles and classified, one record per customer, ordered by
/// customer id. The snapshot date is an explicit parameter, never ambient
/// "now": a transaction after the snapshot would mean negative recency, so
/// that is rejected up front.
pub fn compute_rfm(
    transactions: &[Transaction],
    snapshot_date: NaiveDate,
) -> EngineResult<Vec<RfmRecord>> {
    let mut aggregates: BTreeMap<i64, CustomerAggregate> = BTreeMap::new();
    for transaction in transactions {
        let date = transaction.occurred_at.date();
        let entry = aggregates
            .entry(transaction.customer_id)
            .or_insert_with(|| CustomerAggregate {
                last_seen: date,
                orders: BTreeSet::new(),
                monetary: 0.0,
            });
        if date > entry.last_seen {
            entry.last_seen = date;
        }
        entry.orders.insert(transaction.order_id.clone());
        entry.monetary += transaction.line_total();
    }

    if aggregates.is_empty() {
        return Ok(Vec::new());
    }

    for (customer_id, aggregate) in &aggregates {
        if aggregate.last_seen > snapshot_date {
            return Err(EngineError::snapshot_precedes_activity(
                *customer_id,
                &aggregate.last_seen.format("%Y-%m-%d").to_string(),
                &snapshot_date.format("%Y-%m-%d").to_string(),
            ));
        }
    }

    let recency: Vec<f64> = aggregates
        .values()
        .map(|aggregate| (snapshot_date - aggregate.last_seen).num_days() as f64)
        .collect();
    let frequency: Vec<f64> = aggregates
        .values()
        .map(|aggregate| aggregate.orders.len() as f64)
        .collect();
    let monetary: Vec<f64> = aggregates
        .values()
        .map(|aggregate| aggregate.monetary)
        .collect();

    let bins = SCORING_POLICY_V1.score_bins;
    let r_scores = score(&recency, bins, ScoreDirection::Descending);
    let f_scores = score_ranked(&frequency, bins, ScoreDirection::Ascending);
    let m_scores = score(&monetary, bins, ScoreDirection::Ascending);

    let mut records = Vec::with_capacity(aggregates.len());
    for (position, (customer_id, aggregate)) in aggregates.iter().enumerate() {
        let r_score = r_scores.scores[position];
        let f_score = f_scores.scores[position];
        let m_score = m_scores.scores[position];
        records.push(RfmRecord {
            customer_id: *customer_id,
            recency_days: (snapshot_date - aggregate.last_seen).num_days(),
            frequency: aggregate.orders.len() as i64,
            monetary: round_to(aggregate.monetary, 2),
            r_score,
            f_score,
            m_score,
            segment: classify(r_score, f_score, m_score),
        });
    }

    Ok(records)
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let exponent = i32::try_from(decimals).unwrap_or(2);
    let factor = 10_f64.powi(exponent);
    (value * factor).round() / factor
}
