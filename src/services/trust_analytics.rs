//! Trust score analytics over rolling windows.
//!
//! Read-only reporting built on the same engine as the workflow:
//! daily score history, per-interaction score statistics, and
//! tenant-wide aggregates. Windowing is done by the repository
//! `since` filter plus in-memory bucketing.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::{AgentRepository, InteractionRepository};
use crate::services::trust_calculator::TrustScoreCalculator;

/// Score jump between consecutive per-interaction scores counted as
/// an anomaly in [`TrustAnalytics::anomaly_count`].
const SCORE_JUMP_THRESHOLD: f64 = 0.5;

/// One day in a trust score history series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustHistoryPoint {
    /// Bucket date (UTC)
    pub date: NaiveDate,
    /// Score over that day's interactions, `None` when the day is empty
    pub score: Option<f64>,
    /// Confidence over that day's interactions, 0.0 when empty
    pub confidence: f64,
    /// Interactions in the bucket
    pub interactions: usize,
}

/// Statistics over per-interaction trust scores in a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustAnalytics {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub stddev: f64,
    pub count: usize,
    /// Consecutive score jumps larger than 0.5
    pub anomaly_count: usize,
}

/// Aggregated trust statistics for all agents in a tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantTrustSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub stddev: f64,
    /// Number of agents with interactions in the window
    pub count: usize,
}

/// Read-only analytics over an agent's or tenant's trust history.
pub struct TrustAnalyticsService {
    agents: Arc<dyn AgentRepository>,
    interactions: Arc<dyn InteractionRepository>,
    calculator: TrustScoreCalculator,
    tenant_id: i64,
}

impl TrustAnalyticsService {
    pub fn new(
        agents: Arc<dyn AgentRepository>,
        interactions: Arc<dyn InteractionRepository>,
        calculator: TrustScoreCalculator,
        tenant_id: i64,
    ) -> Self {
        Self {
            agents,
            interactions,
            calculator,
            tenant_id,
        }
    }

    async fn resolve_agent(&self, agent_id: &str) -> DomainResult<crate::domain::models::Agent> {
        self.agents
            .get_by_agent_id(agent_id, self.tenant_id)
            .await?
            .ok_or_else(|| DomainError::AgentNotFound(agent_id.to_string()))
    }

    /// Daily trust score series over the trailing `days` window.
    ///
    /// Each interaction lands in exactly one bucket; empty days carry
    /// a `None` score so chart consumers can render gaps.
    pub async fn history(&self, agent_id: &str, days: u32) -> DomainResult<Vec<TrustHistoryPoint>> {
        let agent = self.resolve_agent(agent_id).await?;
        let now = Utc::now();
        let since = now - Duration::days(i64::from(days));
        let interactions = self
            .interactions
            .list_for_agent(agent.id, self.tenant_id, Some(since))
            .await?;

        let mut history = Vec::with_capacity(days as usize);
        for day in 0..i64::from(days) {
            let window_start = since + Duration::days(day);
            let window_end = window_start + Duration::days(1);
            let bucket: Vec<_> = interactions
                .iter()
                .filter(|i| i.timestamp >= window_start && i.timestamp < window_end)
                .cloned()
                .collect();

            if bucket.is_empty() {
                history.push(TrustHistoryPoint {
                    date: window_start.date_naive(),
                    score: None,
                    confidence: 0.0,
                    interactions: 0,
                });
            } else {
                let result = self.calculator.calculate(&bucket, now);
                history.push(TrustHistoryPoint {
                    date: window_start.date_naive(),
                    score: Some(result.overall_score),
                    confidence: result.confidence,
                    interactions: bucket.len(),
                });
            }
        }

        Ok(history)
    }

    /// Statistics over per-interaction scores in the trailing window.
    ///
    /// Each interaction is scored in isolation; `None` when the
    /// window holds no interactions.
    pub async fn analytics(
        &self,
        agent_id: &str,
        days: u32,
    ) -> DomainResult<Option<TrustAnalytics>> {
        let agent = self.resolve_agent(agent_id).await?;
        let now = Utc::now();
        let since = now - Duration::days(i64::from(days));
        let interactions = self
            .interactions
            .list_for_agent(agent.id, self.tenant_id, Some(since))
            .await?;

        if interactions.is_empty() {
            return Ok(None);
        }

        let scores: Vec<f64> = interactions
            .iter()
            .map(|i| {
                self.calculator
                    .calculate(std::slice::from_ref(i), now)
                    .overall_score
            })
            .collect();

        let anomaly_count = scores
            .windows(2)
            .filter(|pair| (pair[1] - pair[0]).abs() > SCORE_JUMP_THRESHOLD)
            .count();

        let stats = score_stats(&scores);
        Ok(Some(TrustAnalytics {
            mean: stats.mean,
            min: stats.min,
            max: stats.max,
            stddev: stats.stddev,
            count: scores.len(),
            anomaly_count,
        }))
    }

    /// Aggregate full-window scores across every agent in the tenant.
    ///
    /// Agents with no interactions in the window are skipped; `None`
    /// when no agent has any.
    pub async fn tenant_summary(&self, days: u32) -> DomainResult<Option<TenantTrustSummary>> {
        let now = Utc::now();
        let since = now - Duration::days(i64::from(days));
        let agents = self.agents.list(self.tenant_id).await?;

        let mut scores = Vec::with_capacity(agents.len());
        for agent in agents {
            let interactions = self
                .interactions
                .list_for_agent(agent.id, self.tenant_id, Some(since))
                .await?;
            if interactions.is_empty() {
                continue;
            }
            scores.push(self.calculator.calculate(&interactions, now).overall_score);
        }

        if scores.is_empty() {
            return Ok(None);
        }

        let stats = score_stats(&scores);
        Ok(Some(TenantTrustSummary {
            mean: stats.mean,
            min: stats.min,
            max: stats.max,
            stddev: stats.stddev,
            count: scores.len(),
        }))
    }
}

struct ScoreStats {
    mean: f64,
    min: f64,
    max: f64,
    stddev: f64,
}

/// Mean, extrema, and population standard deviation of a non-empty
/// score slice.
fn score_stats(scores: &[f64]) -> ScoreStats {
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let stddev = if scores.len() > 1 {
        (scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n).sqrt()
    } else {
        0.0
    };
    ScoreStats {
        mean,
        min,
        max,
        stddev,
    }
}
