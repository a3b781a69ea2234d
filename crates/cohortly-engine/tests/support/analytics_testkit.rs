use chrono::{NaiveDate, NaiveDateTime};
use cohortly_engine::analytics::types::Transaction;

pub fn transaction(
    customer_id: i64,
    order_id: &str,
    timestamp: &str,
    quantity: f64,
    unit_price: f64,
) -> Transaction {
    let padded = if timestamp.len() == 10 {
        format!("{timestamp} 10:00")
    } else {
        timestamp.to_string()
    };
    let occurred_at = NaiveDateTime::parse_from_str(&padded, "%Y-%m-%d %H:%M");
    assert!(occurred_at.is_ok());
    Transaction {
        customer_id,
        order_id: order_id.to_string(),
        occurred_at: occurred_at.unwrap_or(NaiveDateTime::MIN),
        quantity,
        unit_price,
    }
}

/// One-unit purchase at ten currency units; enough for cohort scenarios
/// where only dates and identities matter.
pub fn purchase(customer_id: i64, order_id: &str, date: &str) -> Transaction {
    transaction(customer_id, order_id, date, 1.0, 10.0)
}

pub fn date(value: &str) -> NaiveDate {
    let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d");
    assert!(parsed.is_ok());
    parsed.unwrap_or(NaiveDate::MIN)
}
