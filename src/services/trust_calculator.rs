//! Trust score engine.
//!
//! A pure function of an interaction slice plus configuration: no
//! I/O, no shared state, safe to call concurrently for different
//! agents. Callers sample "now" once and thread it through so every
//! decay and confidence term inside one evaluation sees the same
//! instant.
//!
//! The overall score is a weighted *sum* of factor scores clamped to
//! [0,1], not a weighted average. Weights are a scale parameter and
//! are never normalized.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::models::{Anomaly, Interaction, TrustConfig, TrustScoreResult};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Computes composite trust scores from interaction telemetry.
#[derive(Debug, Clone, Default)]
pub struct TrustScoreCalculator {
    config: TrustConfig,
}

impl TrustScoreCalculator {
    /// Create a calculator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator with the given configuration.
    pub fn with_config(config: TrustConfig) -> Self {
        Self { config }
    }

    /// Evaluate the trust score over the given records.
    ///
    /// Records must be in ascending timestamp order for anomaly
    /// detection over adjacent pairs to be meaningful.
    ///
    /// An empty slice yields unconfident full trust (score 1.0,
    /// confidence 0.0): absence of evidence is not distrust, and
    /// callers gate on confidence.
    pub fn calculate(
        &self,
        interactions: &[Interaction],
        now: DateTime<Utc>,
    ) -> TrustScoreResult {
        if interactions.is_empty() {
            return TrustScoreResult::no_evidence();
        }

        let risk = self.risk_factor(interactions, now);
        let consistency = Self::consistency_factor(interactions);
        let behavior = self.behavior_factor(interactions, now);
        let detection = self.detection_factor(interactions, now);

        let weights = self.config.weights;
        let overall_score = (weights.risk * risk
            + weights.consistency * consistency
            + weights.behavior * behavior
            + weights.detection * detection)
            .clamp(0.0, 1.0);

        let mut breakdown = BTreeMap::new();
        breakdown.insert("risk".to_string(), risk);
        breakdown.insert("consistency".to_string(), consistency);
        breakdown.insert("behavior".to_string(), behavior);
        breakdown.insert("detection".to_string(), detection);

        TrustScoreResult {
            overall_score,
            confidence: Self::confidence(interactions, now),
            breakdown,
            factors: Self::identify_factors(interactions),
            anomalies: self.detect_anomalies(interactions),
            interactions_analyzed: interactions.len(),
        }
    }

    /// Exponential recency weight for a record aged `days_ago` days.
    fn decay(&self, days_ago: f64) -> f64 {
        0.5_f64.powf(days_ago / self.config.time_decay_half_life_days)
    }

    /// Fractional days between `now` and the record's timestamp.
    fn days_ago(interaction: &Interaction, now: DateTime<Utc>) -> f64 {
        (now - interaction.timestamp).num_milliseconds() as f64 / MILLIS_PER_DAY
    }

    /// Lower risk yields a higher score, recency-weighted.
    fn risk_factor(&self, interactions: &[Interaction], now: DateTime<Utc>) -> f64 {
        self.decayed_mean(interactions, now, |i| 1.0 - i.risk_score)
    }

    /// Low volatility in risk scores yields a higher score.
    ///
    /// Undecayed: measures overall volatility across the window, not
    /// recency-weighted volatility.
    fn consistency_factor(interactions: &[Interaction]) -> f64 {
        if interactions.is_empty() {
            return 1.0;
        }
        let n = interactions.len() as f64;
        let mean = interactions.iter().map(|i| i.risk_score).sum::<f64>() / n;
        let variance = interactions
            .iter()
            .map(|i| (i.risk_score - mean).powi(2))
            .sum::<f64>()
            / n;
        (1.0 - variance).clamp(0.0, 1.0)
    }

    /// Penalize flagged behaviors at 0.2 per flag, recency-weighted.
    fn behavior_factor(&self, interactions: &[Interaction], now: DateTime<Utc>) -> f64 {
        self.decayed_mean(interactions, now, |i| {
            1.0 - (f64::from(i.behavior_flags) * 0.2).min(1.0)
        })
    }

    /// Penalize security detections at 0.25 per detection, recency-weighted.
    fn detection_factor(&self, interactions: &[Interaction], now: DateTime<Utc>) -> f64 {
        self.decayed_mean(interactions, now, |i| {
            1.0 - (f64::from(i.detection_count) * 0.25).min(1.0)
        })
    }

    /// Mean of `per_record × decay(days_ago)` over the slice, clamped.
    /// An empty slice yields 1.0.
    fn decayed_mean<F>(&self, interactions: &[Interaction], now: DateTime<Utc>, per_record: F) -> f64
    where
        F: Fn(&Interaction) -> f64,
    {
        if interactions.is_empty() {
            return 1.0;
        }
        let sum: f64 = interactions
            .iter()
            .map(|i| per_record(i) * self.decay(Self::days_ago(i, now)))
            .sum();
        (sum / interactions.len() as f64).clamp(0.0, 1.0)
    }

    /// Evidence measure: record count saturating at 10, decayed by
    /// the staleness of the single most recent record.
    ///
    /// This is a second, coarser staleness signal, independent of the
    /// per-record decay inside the factor scores.
    fn confidence(interactions: &[Interaction], now: DateTime<Utc>) -> f64 {
        let count_term = (interactions.len() as f64 / 10.0).min(1.0);
        let most_recent = interactions
            .iter()
            .map(|i| i.timestamp)
            .max()
            .expect("non-empty by construction");
        let days_since = (now - most_recent).num_milliseconds() as f64 / MILLIS_PER_DAY;
        (count_term * (-days_since / 30.0).exp()).clamp(0.0, 1.0)
    }

    /// Flag adjacent risk jumps exceeding the configured threshold,
    /// walking the records in the order given.
    fn detect_anomalies(&self, interactions: &[Interaction]) -> Vec<Anomaly> {
        let mut anomalies = Vec::new();
        let mut prev: Option<f64> = None;
        for interaction in interactions {
            let risk = interaction.risk_score;
            if let Some(previous) = prev {
                if (risk - previous).abs() > self.config.anomaly_threshold {
                    anomalies.push(Anomaly {
                        timestamp: interaction.timestamp,
                        risk_score: risk,
                        previous_risk_score: previous,
                        delta: risk - previous,
                    });
                }
            }
            prev = Some(risk);
        }
        anomalies
    }

    /// Per-record explanation notes, undecayed and additive.
    ///
    /// One record can contribute up to three notes; nothing is
    /// deduplicated.
    fn identify_factors(interactions: &[Interaction]) -> Vec<String> {
        let mut factors = Vec::new();
        for interaction in interactions {
            if interaction.risk_score > 0.7 {
                factors.push(format!("High risk at {}", interaction.timestamp.to_rfc3339()));
            }
            if interaction.detection_count > 0 {
                factors.push(format!(
                    "Security detections at {}",
                    interaction.timestamp.to_rfc3339()
                ));
            }
            if interaction.behavior_flags > 0 {
                factors.push(format!(
                    "Behavior flags at {}",
                    interaction.timestamp.to_rfc3339()
                ));
            }
        }
        factors
    }
}
