use crate::domain::models::{Agent, Interaction, TrustScoreResult};
use async_trait::async_trait;

/// Outbound notification port.
///
/// Both methods are non-throwing to the caller: delivery failures are
/// handled inside the implementation and reported as `false`. The
/// workflow treats dispatch as fire-and-forget and must never block
/// state transitions on delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Alert a human that an agent's action requires approval,
    /// carrying the score breakdown, contributing factors, and a
    /// preview of the triggering interaction when present.
    async fn send_score_alert(
        &self,
        agent: &Agent,
        score: &TrustScoreResult,
        interaction: Option<&Interaction>,
    ) -> bool;

    /// Announce the resolution of an approval, whether or not a
    /// specific interaction was supplied.
    async fn send_resolution(
        &self,
        agent: &Agent,
        interaction: Option<&Interaction>,
        approved: bool,
        approver: &str,
    ) -> bool;
}
