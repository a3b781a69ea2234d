use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Segment {
    #[serde(rename = "Champion")]
    Champion,
    #[serde(rename = "Loyal")]
    Loyal,
    #[serde(rename = "Potential Loyalist")]
    PotentialLoyalist,
    #[serde(rename = "At-Risk / Can't-Lose")]
    AtRisk,
    #[serde(rename = "Big Spender")]
    BigSpender,
    #[serde(rename = "Churned")]
    Churned,
    #[serde(rename = "Regular")]
    Regular,
}

impl Segment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Champion => "Champion",
            Self::Loyal => "Loyal",
            Self::PotentialLoyalist => "Potential Loyalist",
            Self::AtRisk => "At-Risk / Can't-Lose",
            Self::BigSpender => "Big Spender",
            Self::Churned => "Churned",
            Self::Regular => "Regular",
        }
    }
}

type RulePredicate = fn(u8, u8, u8) -> bool;

/// Ordered decision list over (r, f, m) scores. Rules overlap as boolean
/// predicates, so position is load-bearing: the first match wins and no
/// later rule is evaluated. The trailing catch-all makes the list
/// exhaustive.
pub const SEGMENT_RULES: &[(RulePredicate, Segment)] = &[
    (|r, f, m| r == 4 && f >= 3 && m >= 3, Segment::Champion),
    (|r, f, m| r >= 3 && f >= 3 && m >= 3, Segment::Loyal),
    (|r, f, _| r >= 3 && f < 3, Segment::PotentialLoyalist),
    (|r, f, _| r < 3 && f >= 3, Segment::AtRisk),
    (|r, f, m| r < 3 && f < 3 && m >= 3, Segment::BigSpender),
    (|r, _, _| r < 2, Segment::Churned),
    (|_, _, _| true, Segment::Regular),
];

pub fn classify(r_score: u8, f_score: u8, m_score: u8) -> Segment {
    for (applies, segment) in SEGMENT_RULES {
        if applies(r_score, f_score, m_score) {
            return *segment;
        }
    }
    Segment::Regular
}
