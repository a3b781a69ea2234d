use serde::Serialize;

use crate::analytics::types::Transaction;
use crate::{EngineError, EngineResult};

#[derive(Debug, Clone, Serialize)]
pub struct TransactionIssue {
    pub row: i64,
    pub customer_id: i64,
    pub field: String,
    pub code: String,
    pub description: String,
}

/// Re-checks the ingestion contract at the engine boundary. Rows violating
/// it should never reach this crate; if any do, the whole run fails fast
/// rather than letting bad rows corrupt cohort or quantile math.
pub fn check_contract(transactions: &[Transaction]) -> EngineResult<()> {
    let mut issues = Vec::new();

    for (index, transaction) in transactions.iter().enumerate() {
        let row = index as i64;
        if transaction.customer_id <= 0 {
            issues.push(TransactionIssue {
                row,
                customer_id: transaction.customer_id,
                field: "customer_id".to_string(),
                code: "missing_customer_id".to_string(),
                description: "customer_id must be a positive identifier.".to_string(),
            });
        }
        if transaction.order_id.trim().is_empty() {
            issues.push(TransactionIssue {
                row,
                customer_id: transaction.customer_id,
                field: "order_id".to_string(),
                code: "missing_order_id".to_string(),
                description: "order_id must be present and non-empty.".to_string(),
            });
        }
        if !positive_finite(transaction.quantity) {
            issues.push(TransactionIssue {
                row,
                customer_id: transaction.customer_id,
                field: "quantity".to_string(),
                code: "nonpositive_quantity".to_string(),
                description: format!(
                    "quantity must be a finite number > 0; got {}.",
                    transaction.quantity
                ),
            });
        }
        if !positive_finite(transaction.unit_price) {
            issues.push(TransactionIssue {
                row,
                customer_id: transaction.customer_id,
                field: "unit_price".to_string(),
                code: "nonpositive_unit_price".to_string(),
                description: format!(
                    "unit_price must be a finite number > 0; got {}.",
                    transaction.unit_price
                ),
            });
        }
    }

    if issues.is_empty() {
        return Ok(());
    }
    Err(EngineError::input_contract_violation(issues))
}

fn positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
