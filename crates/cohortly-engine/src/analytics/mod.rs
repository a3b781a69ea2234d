pub mod activity;
pub mod cohort;
pub mod period;
pub mod policy;
pub mod quantile;
pub mod retention;
pub mod rfm;
pub mod segment;
pub mod types;
pub mod validate;

use serde::Serialize;

use crate::EngineResult;
use crate::analytics::activity::{DatasetSummary, MonthlyActivityRow};
use crate::analytics::policy::SCORING_POLICY_VERSION;
use crate::analytics::retention::RetentionMatrix;
use crate::analytics::rfm::RfmRecord;
use crate::analytics::types::{AnalysisOptions, Transaction};

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub scoring_policy: String,
    pub snapshot_date: Option<String>,
    pub summary: DatasetSummary,
    pub monthly_activity: Vec<MonthlyActivityRow>,
    pub retention: RetentionMatrix,
    pub rfm: Vec<RfmRecord>,
}

/// Full batch run over one snapshot of the transaction table: contract
/// re-check, then the retention and RFM pipelines side by side. The two
/// pipelines share only the input table. Empty input is a valid run and
/// yields empty tables.
pub fn run_analysis(
    transactions: &[Transaction],
    options: &AnalysisOptions,
) -> EngineResult<AnalysisReport> {
    validate::check_contract(transactions)?;

    let snapshot_date = options
        .snapshot_date
        .or_else(|| rfm::snapshot_from_transactions(transactions));
    let rfm_records = match snapshot_date {
        Some(date) => rfm::compute_rfm(transactions, date)?,
        None => Vec::new(),
    };

    Ok(AnalysisReport {
        scoring_policy: SCORING_POLICY_VERSION.to_string(),
        snapshot_date: snapshot_date.map(|date| date.format("%Y-%m-%d").to_string()),
        summary: activity::summarize(transactions),
        monthly_activity: activity::compute_monthly_activity(transactions),
        retention: retention::build_retention_matrix(transactions),
        rfm: rfm_records,
    })
}
