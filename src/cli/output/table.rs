//! Table formatters for human-readable command output.

use std::collections::BTreeMap;

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::domain::models::{Agent, PendingApproval};
use crate::services::TrustHistoryPoint;

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn format_agent_table(agents: &[Agent]) -> String {
    let mut table = base_table();
    table.set_header(vec!["Agent ID", "Name", "Registered"]);
    for agent in agents {
        table.add_row(vec![
            Cell::new(&agent.agent_id),
            Cell::new(&agent.name),
            Cell::new(agent.created_at.format("%Y-%m-%d %H:%M UTC")),
        ]);
    }
    table.to_string()
}

pub fn format_breakdown_table(breakdown: &BTreeMap<String, f64>) -> String {
    let mut table = base_table();
    table.set_header(vec!["Factor", "Score"]);
    for (factor, score) in breakdown {
        table.add_row(vec![Cell::new(factor), Cell::new(format!("{score:.3}"))]);
    }
    table.to_string()
}

pub fn format_history_table(history: &[TrustHistoryPoint]) -> String {
    let mut table = base_table();
    table.set_header(vec!["Date", "Score", "Confidence", "Interactions"]);
    for point in history {
        let score = point
            .score
            .map_or_else(|| "-".to_string(), |s| format!("{s:.3}"));
        table.add_row(vec![
            Cell::new(point.date),
            Cell::new(score),
            Cell::new(format!("{:.3}", point.confidence)),
            Cell::new(point.interactions),
        ]);
    }
    table.to_string()
}

pub fn format_pending_table(pending: &[PendingApproval]) -> String {
    let mut table = base_table();
    table.set_header(vec![
        "Interaction",
        "Agent",
        "When",
        "Current Score",
        "Confidence",
    ]);
    for item in pending {
        table.add_row(vec![
            Cell::new(item.interaction_id),
            Cell::new(format!("{} ({})", item.agent_name, item.agent_id)),
            Cell::new(item.timestamp.format("%Y-%m-%d %H:%M UTC")),
            Cell::new(format!("{:.3}", item.trust_score.overall_score)),
            Cell::new(format!("{:.3}", item.trust_score.confidence)),
        ]);
    }
    table.to_string()
}
