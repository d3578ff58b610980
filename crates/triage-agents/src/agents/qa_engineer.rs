//! QA engineer — test failures, regressions, coverage.

use async_trait::async_trait;

use super::{
    build_analysis, contains_any, first_handoff, AgentRole, Capability, HandoffRule, KeywordGroup,
    SpecialistAgent,
};
use crate::analysis::{AgentAnalysis, Complexity};
use crate::ticket::Ticket;

const GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        keywords: &["regression", "worked before", "used to work"],
        analysis: "Previously working behavior has regressed; needs a bisect and a guard test.",
        actions: &[
            "Identify the last release where the behavior worked",
            "Add a regression test pinning the expected behavior",
        ],
        complexity: Some(Complexity::Medium),
        estimated_time: Some("2-4 hours"),
        priority: None,
    },
    KeywordGroup {
        keywords: &["test fail", "failing test", "flaky"],
        analysis: "Test suite instability reported; distinguish product defects from flaky tests.",
        actions: &[
            "Re-run the failing tests in isolation to check for flakiness",
            "Quarantine confirmed flaky tests and file follow-ups",
        ],
        complexity: Some(Complexity::Simple),
        estimated_time: Some("1-2 hours"),
        priority: None,
    },
    KeywordGroup {
        keywords: &["coverage", "test plan", "acceptance criteria"],
        analysis: "Request concerns verification scope rather than a concrete failure.",
        actions: &["Map acceptance criteria to concrete test cases"],
        complexity: Some(Complexity::Simple),
        estimated_time: None,
        priority: None,
    },
];

const CAPABILITIES: &[Capability] = &[
    Capability {
        name: "regression_analysis",
        keywords: &["regression", "worked before", "used to work"],
    },
    Capability {
        name: "test_engineering",
        keywords: &["test fail", "failing test", "flaky", "coverage", "test plan"],
    },
];

const HANDLE_KEYWORDS: &[&str] = &[
    "regression",
    "test fail",
    "failing test",
    "flaky",
    "coverage",
    "test plan",
    "qa",
];

const HANDOFF_RULES: &[HandoffRule] = &[
    // A reproduced defect goes to engineering for the fix.
    HandoffRule {
        keywords: &["crash", "exception", "stack trace"],
        target: AgentRole::SoftwareEngineer,
    },
];

const FALLBACK: &str = "No verification-specific signals matched.";

pub struct QaEngineerAgent;

#[async_trait]
impl SpecialistAgent for QaEngineerAgent {
    fn role(&self) -> AgentRole {
        AgentRole::QaEngineer
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
