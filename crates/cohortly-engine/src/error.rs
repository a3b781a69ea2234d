use serde_json::{Value, json};
use thiserror::Error;

use crate::analytics::validate::TransactionIssue;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct EngineError {
    pub code: String,
    pub message: String,
    pub data: Option<Value>,
}

impl EngineError {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn input_contract_violation(issues: Vec<TransactionIssue>) -> Self {
        let row_count = issues
            .iter()
            .map(|issue| issue.row)
            .collect::<std::collections::HashSet<i64>>()
            .len();
        Self::new(
            "input_contract_violation",
            &format!(
                "Transaction table violates the input contract: {row_count} rows need fixes upstream. Nothing was computed."
            ),
        )
        .with_data(json!({
            "rows_invalid": row_count,
            "issues": issues,
        }))
    }

    pub fn snapshot_precedes_activity(
        customer_id: i64,
        last_seen: &str,
        snapshot_date: &str,
    ) -> Self {
        Self::new(
            "snapshot_precedes_activity",
            &format!(
                "Snapshot date {snapshot_date} precedes customer {customer_id}'s latest activity on {last_seen}."
            ),
        )
        .with_data(json!({
            "customer_id": customer_id,
            "last_seen": last_seen,
            "snapshot_date": snapshot_date,
        }))
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
