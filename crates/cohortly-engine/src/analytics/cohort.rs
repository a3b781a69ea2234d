use std::collections::BTreeMap;

use crate::analytics::period::Period;
use crate::analytics::types::Transaction;

#[derive(Debug, Clone, Copy)]
pub struct CohortAssignment {
    pub customer_id: i64,
    pub period: Period,
    pub acquisition: Period,
    /// Whole months since the customer's acquisition period. Zero exactly
    /// for transactions in the acquisition month; never negative, because
    /// acquisition is the minimum period over the customer's history.
    pub offset: i64,
}

/// First observed activity period per customer.
pub fn acquisition_periods(transactions: &[Transaction]) -> BTreeMap<i64, Period> {
    let mut acquisitions: BTreeMap<i64, Period> = BTreeMap::new();
    for transaction in transactions {
        let period = Period::from_datetime(transaction.occurred_at);
        acquisitions
            .entry(transaction.customer_id)
            .and_modify(|earliest| {
                if period < *earliest {
                    *earliest = period;
                }
            })
            .or_insert(period);
    }
    acquisitions
}

/// Pure function of the input table: one assignment per transaction, in
/// input order.
pub fn assign_cohorts(transactions: &[Transaction]) -> Vec<CohortAssignment> {
    let acquisitions = acquisition_periods(transactions);
    let mut assignments = Vec::with_capacity(transactions.len());
    for transaction in transactions {
        let Some(acquisition) = acquisitions.get(&transaction.customer_id).copied() else {
            continue;
        };
        let period = Period::from_datetime(transaction.occurred_at);
        assignments.push(CohortAssignment {
            customer_id: transaction.customer_id,
            period,
            acquisition,
            offset: period.months_since(acquisition),
        });
    }
    assignments
}
