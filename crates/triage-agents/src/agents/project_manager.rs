//! Project manager — the workflow's starting role.
//!
//! The PM triages everything first: its handoff rules are the broadest and
//! route tickets toward the specialist whose signal appears first. Rule order
//! matters — infrastructure signals are checked before generic bug words so
//! that "deployment failed" lands with DevOps, not engineering.

use async_trait::async_trait;

use super::{
    build_analysis, contains_any, first_handoff, AgentRole, Capability, HandoffRule, KeywordGroup,
    SpecialistAgent,
};
use crate::analysis::{AgentAnalysis, Complexity};
use crate::ticket::{Ticket, TicketPriority};

const GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        keywords: &["urgent", "asap", "immediately", "escalat"],
        analysis: "Ticket carries escalation language and needs a fast-tracked owner.",
        actions: &[
            "Notify the on-call owner for this client",
            "Set an explicit response-time expectation with the requester",
        ],
        complexity: None,
        estimated_time: Some("1 hour"),
        priority: Some(TicketPriority::Urgent),
    },
    KeywordGroup {
        keywords: &["deadline", "timeline", "milestone", "schedule"],
        analysis: "Ticket is tied to a delivery date and should be tracked against the plan.",
        actions: &[
            "Cross-check the request against the current sprint plan",
            "Flag any milestone at risk to stakeholders",
        ],
        complexity: Some(Complexity::Medium),
        estimated_time: None,
        priority: None,
    },
    KeywordGroup {
        keywords: &["stakeholder", "client meeting", "status update"],
        analysis: "Requester is asking for coordination rather than a technical change.",
        actions: &["Prepare a short status summary for the requester"],
        complexity: Some(Complexity::Simple),
        estimated_time: Some("30 minutes"),
        priority: None,
    },
];

const CAPABILITIES: &[Capability] = &[
    Capability {
        name: "planning",
        keywords: &["deadline", "timeline", "milestone", "schedule", "planning"],
    },
    Capability {
        name: "coordination",
        keywords: &["stakeholder", "coordination", "status update", "escalat"],
    },
    Capability {
        name: "prioritization",
        keywords: &["priority", "urgent", "asap"],
    },
];

const HANDLE_KEYWORDS: &[&str] = &[
    "deadline",
    "timeline",
    "milestone",
    "schedule",
    "stakeholder",
    "priority",
    "urgent",
    "escalat",
];

// First match wins; infrastructure before generic bug words.
const HANDOFF_RULES: &[HandoffRule] = &[
    HandoffRule {
        keywords: &[
            "deploy",
            "server",
            "docker",
            "kubernetes",
            "aws",
            "infrastructure",
            "outage",
        ],
        target: AgentRole::Devops,
    },
    HandoffRule {
        keywords: &["wordpress", "wp-", "plugin", "theme", "woocommerce"],
        target: AgentRole::WordpressDeveloper,
    },
    HandoffRule {
        keywords: &["bug", "crash", "exception", "stack trace", "broken"],
        target: AgentRole::SoftwareEngineer,
    },
    HandoffRule {
        keywords: &["test", "regression", "coverage", "qa"],
        target: AgentRole::QaEngineer,
    },
    HandoffRule {
        keywords: &["requirement", "scope", "user story", "report"],
        target: AgentRole::BusinessAnalyst,
    },
];

const FALLBACK: &str =
    "No specialist signal detected; ticket stays with project management for manual triage.";

pub struct ProjectManagerAgent;

#[async_trait]
impl SpecialistAgent for ProjectManagerAgent {
    fn role(&self) -> AgentRole {
        AgentRole::ProjectManager
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
