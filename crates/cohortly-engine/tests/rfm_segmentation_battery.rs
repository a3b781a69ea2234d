mod support;

use cohortly_engine::analytics::quantile::{ScoreDirection, ScoreMethod, score};
use cohortly_engine::analytics::rfm::compute_rfm;
use cohortly_engine::analytics::segment::Segment;
use cohortly_engine::analytics::types::Transaction;
use support::analytics_testkit::{date, transaction};

/// Eight customers spread across the score space so all seven segments
/// appear in one run. Frequencies, spend totals, and last-purchase dates
/// are chosen so quartile edges are unambiguous under a 2021-12-31
/// snapshot.
fn battery_customers() -> Vec<Transaction> {
    // (customer, orders, unit_price, last purchase)
    let shapes: [(i64, usize, f64, &str); 8] = [
        (1, 8, 100.0, "2021-12-30"),
        (2, 1, 50.0, "2021-12-29"),
        (3, 6, 100.0, "2021-12-26"),
        (4, 5, 100.0, "2021-12-21"),
        (5, 4, 100.0, "2021-12-01"),
        (6, 3, 220.0, "2021-11-01"),
        (7, 2, 100.0, "2021-09-02"),
        (8, 1, 100.0, "2021-05-05"),
    ];

    let mut rows = Vec::new();
    for (customer, orders, unit_price, last_seen) in shapes {
        for order in 0..orders - 1 {
            let early = format!("2021-01-{:02}", 2 + order);
            rows.push(transaction(
                customer,
                &format!("ord_{customer}_{order}"),
                &early,
                1.0,
                unit_price,
            ));
        }
        rows.push(transaction(
            customer,
            &format!("ord_{customer}_last"),
            last_seen,
            1.0,
            unit_price,
        ));
    }
    rows
}

#[test]
fn the_battery_produces_every_segment() {
    let records = compute_rfm(&battery_customers(), date("2021-12-31"));
    assert!(records.is_ok());
    if let Ok(records) = records {
        assert_eq!(records.len(), 8);
        let segments: Vec<Segment> = records.iter().map(|record| record.segment).collect();
        assert_eq!(
            segments,
            vec![
                Segment::Champion,
                Segment::PotentialLoyalist,
                Segment::Loyal,
                Segment::Loyal,
                Segment::AtRisk,
                Segment::BigSpender,
                Segment::Churned,
                Segment::Churned,
            ]
        );
    }
}

#[test]
fn battery_scores_follow_the_quartile_contract() {
    let records = compute_rfm(&battery_customers(), date("2021-12-31"));
    assert!(records.is_ok());
    if let Ok(records) = records {
        for record in &records {
            assert!((1..=4).contains(&record.r_score));
            assert!((1..=4).contains(&record.f_score));
            assert!((1..=4).contains(&record.m_score));
        }
        // most recent customer scores highest recency; stalest lowest
        assert_eq!(records[0].r_score, 4);
        assert_eq!(records[7].r_score, 1);
        // eight orders vs one order
        assert_eq!(records[0].f_score, 4);
        assert_eq!(records[1].f_score, 1);
    }
}

#[test]
fn recency_tie_battery_engages_the_rank_fallback() {
    let outcome = score(
        &[1.0, 1.0, 1.0, 1.0, 5.0, 10.0, 20.0],
        4,
        ScoreDirection::Descending,
    );
    assert_eq!(outcome.method, ScoreMethod::RankFallback);
    // ties split by input order only; later (larger) values never outscore
    assert_eq!(outcome.scores, vec![4, 4, 3, 3, 2, 1, 1]);
}

#[test]
fn identical_frequencies_spread_across_all_buckets() {
    // every customer ordered exactly once; only ranking can separate them
    let mut rows = Vec::new();
    for customer in 1..=8i64 {
        rows.push(transaction(
            customer,
            &format!("ord_{customer}"),
            &format!("2021-06-{:02}", customer),
            1.0,
            5.0 * customer as f64,
        ));
    }
    let records = compute_rfm(&rows, date("2021-07-01"));
    assert!(records.is_ok());
    if let Ok(records) = records {
        let mut seen = [false; 4];
        for record in &records {
            assert_eq!(record.frequency, 1);
            seen[usize::from(record.f_score - 1)] = true;
        }
        assert_eq!(seen, [true; 4]);
    }
}
