//! Software engineer — application bugs, API failures, performance issues.

use async_trait::async_trait;

use super::{
    build_analysis, contains_any, first_handoff, AgentRole, Capability, HandoffRule, KeywordGroup,
    SpecialistAgent,
};
use crate::analysis::{AgentAnalysis, Complexity};
use crate::ticket::{Ticket, TicketPriority};

const GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        keywords: &["crash", "exception", "stack trace", "fatal"],
        analysis: "Application is crashing; a code-level defect is the most likely cause.",
        actions: &[
            "Reproduce the crash with the reported steps",
            "Bisect recent commits touching the failing module",
        ],
        complexity: Some(Complexity::Complex),
        estimated_time: Some("4-8 hours"),
        priority: Some(TicketPriority::High),
    },
    KeywordGroup {
        keywords: &["api", "integration", "endpoint", "webhook"],
        analysis: "An external integration surface is misbehaving.",
        actions: &[
            "Replay the failing request against a staging endpoint",
            "Verify authentication and payload schema on both sides",
        ],
        complexity: Some(Complexity::Medium),
        estimated_time: Some("2-4 hours"),
        priority: None,
    },
    KeywordGroup {
        keywords: &["slow", "performance", "memory leak", "timeout"],
        analysis: "Symptoms point to a performance or resource problem rather than a hard fault.",
        actions: &[
            "Profile the hot path under a realistic load",
            "Review recent changes for unbounded growth or N+1 queries",
        ],
        complexity: Some(Complexity::Medium),
        estimated_time: Some("3-6 hours"),
        priority: None,
    },
    KeywordGroup {
        keywords: &["bug", "defect", "incorrect", "wrong result"],
        analysis: "Behavior diverges from what the requester expects; needs a code review.",
        actions: &["Write a failing test that captures the expected behavior"],
        complexity: None,
        estimated_time: None,
        priority: None,
    },
];

const CAPABILITIES: &[Capability] = &[
    Capability {
        name: "debugging",
        keywords: &["bug", "crash", "exception", "stack trace", "defect"],
    },
    Capability {
        name: "integration",
        keywords: &["api", "endpoint", "webhook", "integration"],
    },
    Capability {
        name: "performance",
        keywords: &["slow", "performance", "memory leak", "timeout"],
    },
];

const HANDLE_KEYWORDS: &[&str] = &[
    "bug",
    "crash",
    "exception",
    "stack trace",
    "defect",
    "api",
    "endpoint",
    "webhook",
    "performance",
    "memory leak",
];

const HANDOFF_RULES: &[HandoffRule] = &[
    // Environment-shaped failures go to DevOps even when reported as bugs.
    HandoffRule {
        keywords: &["deploy", "pipeline", "docker", "kubernetes"],
        target: AgentRole::Devops,
    },
    HandoffRule {
        keywords: &["regression", "flaky test"],
        target: AgentRole::QaEngineer,
    },
];

const FALLBACK: &str = "No engineering-specific symptoms matched; code involvement is unclear.";

pub struct SoftwareEngineerAgent;

#[async_trait]
impl SpecialistAgent for SoftwareEngineerAgent {
    fn role(&self) -> AgentRole {
        AgentRole::SoftwareEngineer
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
