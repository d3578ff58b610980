//! DevOps — deployments, containers, infrastructure, CI/CD, monitoring.

use async_trait::async_trait;

use super::{
    build_analysis, contains_any, first_handoff, AgentRole, Capability, HandoffRule, KeywordGroup,
    SpecialistAgent,
};
use crate::analysis::{AgentAnalysis, Complexity};
use crate::ticket::{Ticket, TicketPriority};

const GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        keywords: &["deploy", "docker", "container", "kubernetes"],
        analysis: "A deployment or container runtime failure is blocking the service.",
        actions: &[
            "Check container status and restart policy",
            "Inspect the deploy log for the first failing step",
            "Roll back to the last known-good release if the outage persists",
        ],
        complexity: Some(Complexity::Complex),
        estimated_time: Some("2-4 hours"),
        priority: Some(TicketPriority::High),
    },
    KeywordGroup {
        keywords: &["server", "aws", "outage", "infrastructure", "load balancer"],
        analysis: "Infrastructure-level symptoms; the host environment needs inspection.",
        actions: &[
            "Verify instance health and security-group rules",
            "Check cloud provider status for the affected region",
        ],
        complexity: Some(Complexity::Medium),
        estimated_time: Some("1-3 hours"),
        priority: None,
    },
    KeywordGroup {
        keywords: &["pipeline", "ci/cd", "build failed", "github actions"],
        analysis: "The delivery pipeline itself is failing, not the application.",
        actions: &[
            "Re-run the failed pipeline stage with verbose logging",
            "Diff the pipeline config against the last green run",
        ],
        complexity: Some(Complexity::Medium),
        estimated_time: Some("1-2 hours"),
        priority: None,
    },
    KeywordGroup {
        keywords: &["monitoring", "alert", "disk space", "cpu spike"],
        analysis: "Monitoring raised a resource or availability alert.",
        actions: &["Correlate the alert window with deploys and traffic spikes"],
        complexity: Some(Complexity::Simple),
        estimated_time: Some("1 hour"),
        priority: None,
    },
];

const CAPABILITIES: &[Capability] = &[
    Capability {
        name: "deployment",
        keywords: &["deploy", "docker", "container", "kubernetes", "rollback"],
    },
    Capability {
        name: "infrastructure",
        keywords: &["server", "aws", "infrastructure", "load balancer", "outage"],
    },
    Capability {
        name: "delivery",
        keywords: &["pipeline", "ci/cd", "build failed"],
    },
    Capability {
        name: "monitoring",
        keywords: &["monitoring", "alert", "disk space"],
    },
];

const HANDLE_KEYWORDS: &[&str] = &[
    "deploy",
    "docker",
    "container",
    "kubernetes",
    "server",
    "aws",
    "infrastructure",
    "pipeline",
    "ci/cd",
    "monitoring",
    "outage",
];

const HANDOFF_RULES: &[HandoffRule] = &[
    // Application-level faults surfaced by an infra ticket go back to engineering.
    HandoffRule {
        keywords: &["exception", "stack trace", "null pointer"],
        target: AgentRole::SoftwareEngineer,
    },
    HandoffRule {
        keywords: &["regression"],
        target: AgentRole::QaEngineer,
    },
];

const FALLBACK: &str = "No infrastructure signals matched.";

pub struct DevopsAgent;

#[async_trait]
impl SpecialistAgent for DevopsAgent {
    fn role(&self) -> AgentRole {
        AgentRole::Devops
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
