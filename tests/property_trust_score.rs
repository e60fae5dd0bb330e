//! Property-based tests for the trust score engine.

use chrono::{Duration, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use trustgate::domain::models::{FactorWeights, Interaction, TrustConfig};
use trustgate::services::TrustScoreCalculator;

#[derive(Debug, Clone)]
struct RecordParams {
    days_ago: i64,
    risk: f64,
    flags: u32,
    detections: u32,
}

fn record_params() -> impl Strategy<Value = RecordParams> {
    (0i64..365, 0.0f64..=1.0, 0u32..10, 0u32..5).prop_map(|(days_ago, risk, flags, detections)| {
        RecordParams {
            days_ago,
            risk,
            flags,
            detections,
        }
    })
}

fn build_history(params: &[RecordParams]) -> Vec<Interaction> {
    let agent_id = Uuid::new_v4();
    let now = Utc::now();
    let mut records: Vec<Interaction> = params
        .iter()
        .map(|p| {
            Interaction::new(agent_id, 1)
                .with_timestamp(now - Duration::days(p.days_ago))
                .with_risk_score(p.risk)
                .with_behavior_flags(p.flags)
                .with_detection_count(p.detections)
        })
        .collect();
    records.sort_by_key(|record| record.timestamp);
    records
}

fn weights_strategy() -> impl Strategy<Value = FactorWeights> {
    (0.0f64..=2.0, 0.0f64..=2.0, 0.0f64..=2.0, 0.0f64..=2.0).prop_map(
        |(risk, consistency, behavior, detection)| FactorWeights {
            risk,
            consistency,
            behavior,
            detection,
        },
    )
}

proptest! {
    /// Overall score and confidence stay in [0, 1] for any history and
    /// any non-negative weights, including weights summing above one.
    #[test]
    fn score_and_confidence_bounded(
        params in prop::collection::vec(record_params(), 0..40),
        weights in weights_strategy(),
    ) {
        let config = TrustConfig { weights, ..TrustConfig::default() };
        let calculator = TrustScoreCalculator::with_config(config);
        let score = calculator.calculate(&build_history(&params), Utc::now());

        prop_assert!((0.0..=1.0).contains(&score.overall_score));
        prop_assert!((0.0..=1.0).contains(&score.confidence));
        for value in score.breakdown.values() {
            prop_assert!((0.0..=1.0).contains(value));
        }
    }

    /// With the consistency weight zeroed, raising the risk of a
    /// single record never raises the overall score. Consistency is
    /// excluded because reduced volatility can legitimately offset a
    /// higher risk mean.
    #[test]
    fn raising_risk_never_raises_score(
        params in prop::collection::vec(record_params(), 1..20),
        index in 0usize..20,
        bump in 0.0f64..=1.0,
    ) {
        let index = index % params.len();
        let now = Utc::now();
        let config = TrustConfig {
            weights: FactorWeights {
                consistency: 0.0,
                ..FactorWeights::default()
            },
            ..TrustConfig::default()
        };
        let calculator = TrustScoreCalculator::with_config(config);

        let baseline = calculator.calculate(&build_history(&params), now);

        let mut bumped = params.clone();
        bumped[index].risk = (bumped[index].risk + bump).min(1.0);
        let raised = calculator.calculate(&build_history(&bumped), now);

        prop_assert!(raised.overall_score <= baseline.overall_score + 1e-9);
    }

    /// Anomaly count equals a brute-force count of adjacent risk jumps
    /// above the configured threshold.
    #[test]
    fn anomaly_count_matches_adjacent_pairs(
        params in prop::collection::vec(record_params(), 0..30),
    ) {
        let history = build_history(&params);
        let config = TrustConfig::default();
        let threshold = config.anomaly_threshold;

        let expected = history
            .windows(2)
            .filter(|pair| (pair[1].risk_score - pair[0].risk_score).abs() > threshold)
            .count();

        let score = TrustScoreCalculator::with_config(config)
            .calculate(&history, Utc::now());

        prop_assert_eq!(score.anomalies.len(), expected);
    }

    /// Sampling the same history at a later point in time never raises
    /// confidence.
    #[test]
    fn confidence_never_grows_with_staleness(
        params in prop::collection::vec(record_params(), 1..20),
        extra_days in 0i64..120,
    ) {
        let history = build_history(&params);
        let now = Utc::now();
        let calculator = TrustScoreCalculator::new();

        let fresh = calculator.calculate(&history, now);
        let stale = calculator.calculate(&history, now + Duration::days(extra_days));

        prop_assert!(stale.confidence <= fresh.confidence + 1e-9);
    }
}
