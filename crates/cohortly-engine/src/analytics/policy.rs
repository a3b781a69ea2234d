/// Deterministic scoring policy identifier, emitted with every report so
/// threshold changes stay auditable in diffs.
pub const SCORING_POLICY_VERSION: &str = "scoring/v1";

/// v1 scoring policy.
///
/// `score_bins` is quartile binning, matching the reference analysis;
/// `snapshot_offset_days` places the default snapshot one day past the
/// latest transaction so the most recent customer has recency 1.
#[derive(Debug, Clone, Copy)]
pub struct ScoringPolicy {
    pub score_bins: u8,
    pub snapshot_offset_days: i64,
}

impl ScoringPolicy {
    pub const fn min_score(self) -> u8 {
        1
    }

    pub const fn max_score(self) -> u8 {
        self.score_bins
    }
}

pub const SCORING_POLICY_V1: ScoringPolicy = ScoringPolicy {
    score_bins: 4,
    snapshot_offset_days: 1,
};

#[cfg(test)]
mod tests {
    use super::SCORING_POLICY_V1;

    #[test]
    fn v1_scores_quartiles() {
        assert_eq!(SCORING_POLICY_V1.score_bins, 4);
        assert_eq!(SCORING_POLICY_V1.min_score(), 1);
        assert_eq!(SCORING_POLICY_V1.max_score(), 4);
    }

    #[test]
    fn default_snapshot_guarantees_nonzero_recency() {
        assert!(SCORING_POLICY_V1.snapshot_offset_days >= 1);
    }
}
