use chrono::{NaiveDate, NaiveDateTime};

/// One cleaned line item, already customer-attributed and single-currency.
///
/// Upstream ingestion is expected to have dropped rows with missing customer
/// ids, unparseable timestamps, or non-positive quantity/price;
/// `validate::check_contract` re-checks before anything is computed.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub customer_id: i64,
    pub order_id: String,
    pub occurred_at: NaiveDateTime,
    pub quantity: f64,
    pub unit_price: f64,
}

impl Transaction {
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisOptions {
    /// Reference date for recency. When absent, the engine uses one day
    /// after the latest transaction so the most recent customer has
    /// recency 1, never 0.
    pub snapshot_date: Option<NaiveDate>,
}
