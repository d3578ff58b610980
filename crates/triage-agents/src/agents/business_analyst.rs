//! Business analyst — requirements, reporting, process questions.

use async_trait::async_trait;

use super::{
    build_analysis, contains_any, first_handoff, AgentRole, Capability, HandoffRule, KeywordGroup,
    SpecialistAgent,
};
use crate::analysis::{AgentAnalysis, Complexity};
use crate::ticket::Ticket;

const GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        keywords: &["requirement", "user story", "scope"],
        analysis: "Request needs requirements clarification before any implementation work.",
        actions: &[
            "Draft acceptance criteria with the requester",
            "Confirm scope boundaries against the current contract",
        ],
        complexity: Some(Complexity::Simple),
        estimated_time: Some("2-3 hours"),
        priority: None,
    },
    KeywordGroup {
        keywords: &["report", "dashboard", "analytics", "export"],
        analysis: "Requester is asking for data or reporting output.",
        actions: &[
            "Identify which data source backs the requested numbers",
            "Check whether an existing report already covers the need",
        ],
        complexity: Some(Complexity::Simple),
        estimated_time: Some("1-2 hours"),
        priority: None,
    },
    KeywordGroup {
        keywords: &["workflow", "process", "approval"],
        analysis: "Ticket describes a process change rather than a defect.",
        actions: &["Map the current process and the requested change side by side"],
        complexity: Some(Complexity::Medium),
        estimated_time: None,
        priority: None,
    },
];

const CAPABILITIES: &[Capability] = &[
    Capability {
        name: "requirements",
        keywords: &["requirement", "user story", "scope", "acceptance criteria"],
    },
    Capability {
        name: "reporting",
        keywords: &["report", "dashboard", "analytics", "export"],
    },
    Capability {
        name: "process",
        keywords: &["workflow", "process", "approval"],
    },
];

const HANDLE_KEYWORDS: &[&str] = &[
    "requirement",
    "user story",
    "scope",
    "report",
    "dashboard",
    "analytics",
    "workflow",
    "process",
];

const HANDOFF_RULES: &[HandoffRule] = &[
    // Delivery-date questions belong with the project manager.
    HandoffRule {
        keywords: &["deadline", "timeline", "milestone"],
        target: AgentRole::ProjectManager,
    },
];

const FALLBACK: &str = "No analysis or reporting signals matched.";

pub struct BusinessAnalystAgent;

#[async_trait]
impl SpecialistAgent for BusinessAnalystAgent {
    fn role(&self) -> AgentRole {
        AgentRole::BusinessAnalyst
    }

    async fn analyze(&self, ticket: &Ticket) -> AgentAnalysis {
        build_analysis(
            self.role(),
            ticket,
            GROUPS,
            CAPABILITIES,
            FALLBACK,
            self.should_handoff(ticket),
        )
    }

    fn should_handoff(&self, ticket: &Ticket) -> Option<AgentRole> {
        first_handoff(&ticket.search_text(), HANDOFF_RULES)
    }

    fn can_handle(&self, ticket: &Ticket) -> bool {
        contains_any(&ticket.search_text(), HANDLE_KEYWORDS)
    }
}
