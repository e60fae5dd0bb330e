//! Integration tests for the validation/approval workflow against
//! in-memory ports.

mod common;

use std::sync::Arc;

use chrono::Utc;
use trustgate::InteractionRepository;
use uuid::Uuid;

use common::{
    interaction_days_ago, CountingNotifier, InMemoryAgentRepository,
    InMemoryInteractionRepository,
};
use trustgate::domain::models::{
    Agent, ApprovalStatus, DecisionStatus, Interaction, WorkflowConfig,
};
use trustgate::services::{TrustScoreCalculator, ValidationWorkflow};
use trustgate::DomainError;

const TENANT: i64 = 1;

struct Fixture {
    agent: Agent,
    interactions: Arc<InMemoryInteractionRepository>,
    notifier: Arc<CountingNotifier>,
    workflow: ValidationWorkflow,
}

fn fixture(history: Vec<Interaction>, notifier: CountingNotifier) -> Fixture {
    let agent = Agent::new("agent-1", "Test Agent", TENANT);
    let history: Vec<_> = history
        .into_iter()
        .map(|mut i| {
            i.agent_id = agent.id;
            i
        })
        .collect();

    let agents = Arc::new(InMemoryAgentRepository::with_agents(vec![agent.clone()]));
    let interactions = Arc::new(InMemoryInteractionRepository::with_interactions(history));
    let notifier = Arc::new(notifier);
    let workflow = ValidationWorkflow::new(
        agents.clone(),
        interactions.clone(),
        notifier.clone(),
        TrustScoreCalculator::new(),
        WorkflowConfig::default(),
        TENANT,
    );

    Fixture {
        agent,
        interactions,
        notifier,
        workflow,
    }
}

fn clean_history(agent_id: Uuid) -> Vec<Interaction> {
    (0..10)
        .map(|_| interaction_days_ago(agent_id, TENANT, 0, 0.0))
        .collect()
}

fn risky_history(agent_id: Uuid) -> Vec<Interaction> {
    (0..10)
        .map(|_| {
            interaction_days_ago(agent_id, TENANT, 0, 0.95)
                .with_behavior_flags(5)
                .with_detection_count(4)
        })
        .collect()
}

#[tokio::test]
async fn test_high_trust_auto_approves_without_notification() {
    let f = fixture(clean_history(Uuid::nil()), CountingNotifier::new());

    let decision = f
        .workflow
        .validate_interaction(&f.agent, None, false)
        .await
        .unwrap();

    assert_eq!(decision.status, DecisionStatus::Approved);
    assert!(!decision.requires_approval);
    assert!(decision.trust_score.overall_score >= 0.7);
    assert_eq!(f.notifier.alert_count(), 0);
}

#[tokio::test]
async fn test_low_trust_requires_approval_and_alerts_once() {
    let f = fixture(risky_history(Uuid::nil()), CountingNotifier::new());

    let decision = f
        .workflow
        .validate_interaction(&f.agent, None, false)
        .await
        .unwrap();

    assert_eq!(decision.status, DecisionStatus::PendingApproval);
    assert!(decision.requires_approval);
    assert!(decision.trust_score.overall_score < 0.7);
    assert_eq!(f.notifier.alert_count(), 1);
}

#[tokio::test]
async fn test_force_approval_gates_regardless_of_score() {
    let f = fixture(clean_history(Uuid::nil()), CountingNotifier::new());

    let decision = f
        .workflow
        .validate_interaction(&f.agent, None, true)
        .await
        .unwrap();

    assert_eq!(decision.status, DecisionStatus::PendingApproval);
    assert!(decision.requires_approval);
    // The score itself is still high; only the decision is forced.
    assert!(decision.trust_score.overall_score >= 0.7);
    assert_eq!(f.notifier.alert_count(), 1);
}

#[tokio::test]
async fn test_notification_failure_does_not_fail_validation() {
    let f = fixture(risky_history(Uuid::nil()), CountingNotifier::failing());

    let decision = f
        .workflow
        .validate_interaction(&f.agent, None, false)
        .await
        .unwrap();

    assert_eq!(decision.status, DecisionStatus::PendingApproval);
    assert_eq!(f.notifier.alert_count(), 1);
}

#[tokio::test]
async fn test_empty_history_is_unconfident_full_trust() {
    let f = fixture(Vec::new(), CountingNotifier::new());

    let decision = f
        .workflow
        .validate_interaction(&f.agent, None, false)
        .await
        .unwrap();

    // Score 1.0 clears the threshold; confidence tells the caller
    // how little that means.
    assert_eq!(decision.status, DecisionStatus::Approved);
    assert_eq!(decision.trust_score.overall_score, 1.0);
    assert_eq!(decision.trust_score.confidence, 0.0);
    assert_eq!(decision.trust_score.interactions_analyzed, 0);
}

#[tokio::test]
async fn test_handle_approval_unknown_agent_is_not_found() {
    let f = fixture(Vec::new(), CountingNotifier::new());

    let result = f
        .workflow
        .handle_approval("no-such-agent", None, true, "alice")
        .await;

    assert!(matches!(result, Err(DomainError::AgentNotFound(_))));
    assert_eq!(f.notifier.resolution_count(), 0);
}

#[tokio::test]
async fn test_handle_approval_without_interaction_still_notifies() {
    let f = fixture(Vec::new(), CountingNotifier::new());

    let resolution = f
        .workflow
        .handle_approval("agent-1", None, true, "alice")
        .await
        .unwrap();

    assert_eq!(resolution.status, ApprovalStatus::Approved);
    assert_eq!(resolution.interaction_id, None);
    assert_eq!(resolution.approver, "alice");
    assert_eq!(f.notifier.resolution_count(), 1);
}

#[tokio::test]
async fn test_resolution_updates_interaction_and_clears_pending() {
    let agent_stub = Uuid::nil();
    let mut history = risky_history(agent_stub);
    history[0].approval_status = ApprovalStatus::Pending;
    let pending_id = history[0].id;

    let f = fixture(history, CountingNotifier::new());

    let before = f.workflow.list_pending_approvals().await.unwrap();
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].interaction_id, pending_id);

    let resolution = f
        .workflow
        .handle_approval("agent-1", Some(pending_id), true, "alice")
        .await
        .unwrap();
    assert_eq!(resolution.status, ApprovalStatus::Approved);
    assert_eq!(resolution.interaction_id, Some(pending_id));

    assert_eq!(
        f.interactions.get_status(pending_id),
        Some(ApprovalStatus::Approved)
    );
    assert_eq!(f.interactions.get_approver(pending_id).as_deref(), Some("alice"));

    let after = f.workflow.list_pending_approvals().await.unwrap();
    assert!(after.is_empty());
    assert_eq!(f.notifier.resolution_count(), 1);
}

#[tokio::test]
async fn test_rejection_marks_interaction_rejected() {
    let mut history = risky_history(Uuid::nil());
    history[0].approval_status = ApprovalStatus::Pending;
    let pending_id = history[0].id;

    let f = fixture(history, CountingNotifier::new());

    let resolution = f
        .workflow
        .handle_approval("agent-1", Some(pending_id), false, "bob")
        .await
        .unwrap();

    assert_eq!(resolution.status, ApprovalStatus::Rejected);
    assert_eq!(
        f.interactions.get_status(pending_id),
        Some(ApprovalStatus::Rejected)
    );
}

#[tokio::test]
async fn test_re_resolution_overwrites_prior_decision() {
    // Last write wins: a second resolution with a different outcome
    // replaces the first.
    let mut history = risky_history(Uuid::nil());
    history[0].approval_status = ApprovalStatus::Pending;
    let pending_id = history[0].id;

    let f = fixture(history, CountingNotifier::new());

    f.workflow
        .handle_approval("agent-1", Some(pending_id), true, "alice")
        .await
        .unwrap();
    f.workflow
        .handle_approval("agent-1", Some(pending_id), false, "bob")
        .await
        .unwrap();

    assert_eq!(
        f.interactions.get_status(pending_id),
        Some(ApprovalStatus::Rejected)
    );
    assert_eq!(f.interactions.get_approver(pending_id).as_deref(), Some("bob"));
}

#[tokio::test]
async fn test_pending_list_skips_orphaned_interactions() {
    let f = fixture(Vec::new(), CountingNotifier::new());

    // An interaction whose agent was never registered.
    let mut orphan = interaction_days_ago(Uuid::new_v4(), TENANT, 0, 0.9);
    orphan.approval_status = ApprovalStatus::Pending;
    f.interactions.insert(&orphan).await.unwrap();

    let pending = f.workflow.list_pending_approvals().await.unwrap();
    assert!(pending.is_empty());
}

#[tokio::test]
async fn test_pending_list_score_is_recomputed_from_current_history() {
    let mut history = risky_history(Uuid::nil());
    history[0].approval_status = ApprovalStatus::Pending;
    let pending_id = history[0].id;

    let f = fixture(history, CountingNotifier::new());

    let before = f.workflow.list_pending_approvals().await.unwrap();
    let score_before = before[0].trust_score.overall_score;

    // New clean interactions accrue after the gate; the listed score
    // reflects them.
    for _ in 0..30 {
        let clean = interaction_days_ago(f.agent.id, TENANT, 0, 0.0);
        f.interactions.insert(&clean).await.unwrap();
    }

    let after = f.workflow.list_pending_approvals().await.unwrap();
    assert_eq!(after[0].interaction_id, pending_id);
    assert!(after[0].trust_score.overall_score > score_before);
}

#[tokio::test]
async fn test_mark_pending_exposes_interaction_in_listing() {
    let f = fixture(risky_history(Uuid::nil()), CountingNotifier::new());

    let interaction = interaction_days_ago(f.agent.id, TENANT, 0, 0.9)
        .with_input("delete all production data")
        .with_response("on it");
    f.interactions.insert(&interaction).await.unwrap();

    let decision = f
        .workflow
        .validate_interaction(&f.agent, Some(&interaction), false)
        .await
        .unwrap();
    assert_eq!(decision.status, DecisionStatus::PendingApproval);

    f.workflow.mark_pending(interaction.id).await.unwrap();

    let pending = f.workflow.list_pending_approvals().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].interaction_id, interaction.id);
    assert_eq!(
        pending[0].input.as_deref(),
        Some("delete all production data")
    );
}
