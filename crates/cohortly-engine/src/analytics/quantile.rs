use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreDirection {
    /// Bin 1 holds the lowest values, bin k the highest.
    Ascending,
    /// Reversed labels; used for recency, where fewer days since the last
    /// purchase must map to the highest score.
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreMethod {
    #[serde(rename = "direct")]
    Direct,
    #[serde(rename = "rank_fallback")]
    RankFallback,
}

#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    /// One score in `[1, bins]` per input value, in input order.
    pub scores: Vec<u8>,
    pub method: ScoreMethod,
}

/// Equal-population quantile binning with a deterministic fallback.
///
/// The direct path computes interpolated quantile edges over the raw values.
/// Metrics with heavy duplication (frequency is a small-cardinality integer)
/// collapse those edges; when that happens the values are ranked first
/// (stable, ties broken by input order) and the ranks are binned instead.
/// The outcome is tagged so callers can observe which path ran, but both
/// paths always succeed on non-empty input.
pub fn score(values: &[f64], bins: u8, direction: ScoreDirection) -> ScoreOutcome {
    score_with_strategy(values, bins, direction, false)
}

/// Rank-fallback binning unconditionally. Frequency scoring always goes
/// through here: low cardinality is expected there, not exceptional.
pub fn score_ranked(values: &[f64], bins: u8, direction: ScoreDirection) -> ScoreOutcome {
    score_with_strategy(values, bins, direction, true)
}

fn score_with_strategy(
    values: &[f64],
    bins: u8,
    direction: ScoreDirection,
    force_rank: bool,
) -> ScoreOutcome {
    if values.is_empty() || bins == 0 {
        return ScoreOutcome {
            scores: Vec::new(),
            method: ScoreMethod::Direct,
        };
    }

    if !force_rank
        && let Some(edges) = distinct_quantile_edges(values, bins)
    {
        let scores = values
            .iter()
            .map(|value| oriented(assign_bin(*value, &edges), bins, direction))
            .collect();
        return ScoreOutcome {
            scores,
            method: ScoreMethod::Direct,
        };
    }

    let ranks: Vec<f64> = first_seen_ranks(values)
        .into_iter()
        .map(|rank| rank as f64)
        .collect();
    let scores = if let Some(edges) = distinct_quantile_edges(&ranks, bins) {
        ranks
            .iter()
            .map(|rank| oriented(assign_bin(*rank, &edges), bins, direction))
            .collect()
    } else {
        // single-row input: ranks cannot spread across edges either
        equal_population_bins(&ranks, bins)
            .into_iter()
            .map(|bin| oriented(bin, bins, direction))
            .collect()
    };

    ScoreOutcome {
        scores,
        method: ScoreMethod::RankFallback,
    }
}

/// `[min, q_1, ..., q_{bins-1}, max]` when strictly increasing, else `None`.
fn distinct_quantile_edges(values: &[f64], bins: u8) -> Option<Vec<f64>> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|left, right| left.total_cmp(right));

    let mut edges = Vec::with_capacity(bins as usize + 1);
    for step in 0..=bins {
        let probability = f64::from(step) / f64::from(bins);
        edges.push(interpolated_quantile(&sorted, probability));
    }

    let strictly_increasing = edges.windows(2).all(|pair| pair[1] > pair[0]);
    if strictly_increasing { Some(edges) } else { None }
}

fn interpolated_quantile(sorted: &[f64], probability: f64) -> f64 {
    let position = probability * ((sorted.len() - 1) as f64);
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let fraction = position - (lower as f64);
    if fraction <= 0.0 || lower == upper {
        return sorted[lower];
    }
    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}

/// Right-closed bins: bin j covers `(edge_{j-1}, edge_j]`; the minimum lands
/// in bin 1.
fn assign_bin(value: f64, edges: &[f64]) -> u8 {
    let interior = &edges[1..edges.len() - 1];
    let mut bin = 1u8;
    for edge in interior {
        if value > *edge {
            bin += 1;
        }
    }
    bin
}

/// Stable first-seen ranks in `1..=n`: ties keep their input order.
fn first_seen_ranks(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&left, &right| {
        values[left]
            .total_cmp(&values[right])
            .then_with(|| left.cmp(&right))
    });

    let mut ranks = vec![0usize; values.len()];
    for (position, index) in order.iter().enumerate() {
        ranks[*index] = position + 1;
    }
    ranks
}

fn equal_population_bins(ranks: &[f64], bins: u8) -> Vec<u8> {
    let population = ranks.len();
    ranks
        .iter()
        .map(|rank| {
            let bucket = ((*rank as usize) * (bins as usize)).div_ceil(population);
            bucket.clamp(1, bins as usize) as u8
        })
        .collect()
}

fn oriented(bin: u8, bins: u8, direction: ScoreDirection) -> u8 {
    match direction {
        ScoreDirection::Ascending => bin,
        ScoreDirection::Descending => bins + 1 - bin,
    }
}
