use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::analytics::cohort::assign_cohorts;
use crate::analytics::period::Period;
use crate::analytics::types::Transaction;

pub const ACQUISITION_COLUMN_LABEL: &str = "Acquisition";

/// A cohort-row cell. `NotYetObserved` marks offsets past the dataset's
/// last observed month for that cohort (right-censoring); a true zero at an
/// observable offset is `Observed(0.0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RetentionCell {
    Observed(f64),
    NotYetObserved,
}

impl RetentionCell {
    pub fn percentage(self) -> Option<f64> {
        match self {
            Self::Observed(value) => Some(value),
            Self::NotYetObserved => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RetentionRow {
    pub cohort: String,
    pub cohort_size: i64,
    pub cells: Vec<RetentionCell>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RetentionMatrix {
    /// `["Acquisition", "1", "2", ...]`; index-aligned with every row's cells.
    pub columns: Vec<String>,
    /// Chronological by acquisition period.
    pub rows: Vec<RetentionRow>,
}

impl RetentionMatrix {
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}

/// Counts distinct customers per (acquisition period, month offset), then
/// pivots into a dense matrix normalized by each cohort's size. Offset 0 is
/// 100 by construction and relabeled `Acquisition`.
pub fn build_retention_matrix(transactions: &[Transaction]) -> RetentionMatrix {
    let assignments = assign_cohorts(transactions);
    if assignments.is_empty() {
        return RetentionMatrix::empty();
    }

    let mut active: BTreeMap<Period, BTreeMap<i64, BTreeSet<i64>>> = BTreeMap::new();
    let mut latest = assignments[0].period;
    for assignment in &assignments {
        if assignment.period > latest {
            latest = assignment.period;
        }
        active
            .entry(assignment.acquisition)
            .or_default()
            .entry(assignment.offset)
            .or_default()
            .insert(assignment.customer_id);
    }

    let Some(earliest) = active.keys().next().copied() else {
        return RetentionMatrix::empty();
    };
    let max_offset = latest.months_since(earliest).max(0);

    let mut columns = Vec::with_capacity(max_offset as usize + 1);
    columns.push(ACQUISITION_COLUMN_LABEL.to_string());
    for offset in 1..=max_offset {
        columns.push(offset.to_string());
    }

    let mut rows = Vec::with_capacity(active.len());
    for (acquisition, offsets) in &active {
        let cohort_size = offsets
            .get(&0)
            .map(|customers| customers.len() as i64)
            .unwrap_or(0);
        let horizon = latest.months_since(*acquisition);

        let mut cells = Vec::with_capacity(max_offset as usize + 1);
        for offset in 0..=max_offset {
            if offset > horizon {
                cells.push(RetentionCell::NotYetObserved);
                continue;
            }
            let returning = offsets
                .get(&offset)
                .map(|customers| customers.len() as i64)
                .unwrap_or(0);
            // cohort_size >= 1 whenever this row exists; guarded anyway
            let percentage = if cohort_size > 0 {
                round_to((returning as f64) / (cohort_size as f64) * 100.0, 2)
            } else {
                0.0
            };
            cells.push(RetentionCell::Observed(percentage));
        }

        rows.push(RetentionRow {
            cohort: acquisition.label(),
            cohort_size,
            cells,
        });
    }

    RetentionMatrix { columns, rows }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let exponent = i32::try_from(decimals).unwrap_or(2);
    let factor = 10_f64.powi(exponent);
    (value * factor).round() / factor
}
