//! Agent tooling — a finite set of canned diagnostics.
//!
//! Tool selection is an explicit classification into `ToolKind` rather than
//! scattered substring checks at the call sites: one keyword rule list picks
//! the kind, one handler per kind formats the result.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::ExecutionResult;
use crate::ticket::Ticket;

/// The finite set of tools an agent can run against a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Inspect application code paths implicated by the ticket.
    CodeInspection,
    /// Pull and summarize service logs around the incident.
    LogReview,
    /// Audit installed plugins/themes for conflicts.
    PluginAudit,
    /// Verify deployment and infrastructure state.
    DeploymentCheck,
    /// Draft a verification test plan.
    TestPlan,
    /// Review requirements and scope statements.
    RequirementsReview,
    /// Fallback: summarize ticket state for stakeholders.
    StatusReport,
}

impl ToolKind {
    /// Pick the tool for a piece of ticket text. First matching rule wins;
    /// text with no signal falls through to `StatusReport`.
    pub fn classify(text: &str) -> Self {
        const RULES: &[(ToolKind, &[&str])] = &[
            (
                ToolKind::PluginAudit,
                &["plugin", "theme", "wordpress", "wp-", "woocommerce"],
            ),
            (
                ToolKind::DeploymentCheck,
                &[
                    "deploy",
                    "docker",
                    "kubernetes",
                    "container",
                    "server",
                    "infrastructure",
                    "aws",
                ],
            ),
            (
                ToolKind::CodeInspection,
                &["bug", "crash", "exception", "stack trace", "error"],
            ),
            (
                ToolKind::TestPlan,
                &["test", "regression", "coverage", "qa"],
            ),
            (
                ToolKind::RequirementsReview,
                &["requirement", "scope", "user story", "acceptance criteria"],
            ),
            (ToolKind::LogReview, &["logs", "timeout", "monitoring", "5xx"]),
        ];

        for (kind, keywords) in RULES {
            if keywords.iter().any(|kw| text.contains(kw)) {
                return *kind;
            }
        }
        ToolKind::StatusReport
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CodeInspection => "code_inspection",
            Self::LogReview => "log_review",
            Self::PluginAudit => "plugin_audit",
            Self::DeploymentCheck => "deployment_check",
            Self::TestPlan => "test_plan",
            Self::RequirementsReview => "requirements_review",
            Self::StatusReport => "status_report",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run the given tool against a ticket.
///
/// Never propagates an error: a tool that cannot run reports a `Failed`
/// result and the workflow moves on.
pub fn run(kind: ToolKind, ticket: &Ticket) -> ExecutionResult {
    let text = ticket.search_text();
    if text.trim().is_empty() {
        return ExecutionResult::failed(format!(
            "no ticket text to run {} against",
            kind.name()
        ));
    }

    match kind {
        ToolKind::CodeInspection => ExecutionResult::completed_with(
            format!(
                "Inspected code paths implicated by ticket #{}: \"{}\"",
                ticket.id, ticket.subject
            ),
            vec![
                "Reproduce the failure locally with the reported input".to_string(),
                "Capture the full stack trace and attach it to the ticket".to_string(),
            ],
        ),
        ToolKind::LogReview => ExecutionResult::completed_with(
            format!(
                "Reviewed service logs around the window reported in ticket #{}",
                ticket.id
            ),
            vec!["Correlate log timestamps with the incident report".to_string()],
        ),
        ToolKind::PluginAudit => ExecutionResult::completed_with(
            format!(
                "Audited installed plugins and themes for ticket #{}",
                ticket.id
            ),
            vec![
                "Deactivate plugins one by one to isolate the conflict".to_string(),
                "Switch to a default theme to rule out theme code".to_string(),
            ],
        ),
        ToolKind::DeploymentCheck => ExecutionResult::completed_with(
            format!(
                "Verified deployment and infrastructure state for ticket #{}",
                ticket.id
            ),
            vec![
                "Check container status and restart policy".to_string(),
                "Compare the failing environment against the last known-good release".to_string(),
            ],
        ),
        ToolKind::TestPlan => ExecutionResult::completed_with(
            format!("Drafted a verification test plan for ticket #{}", ticket.id),
            vec!["Add a regression test covering the reported behavior".to_string()],
        ),
        ToolKind::RequirementsReview => ExecutionResult::completed(format!(
            "Reviewed requirements and scope statements referenced by ticket #{}",
            ticket.id
        )),
        ToolKind::StatusReport => ExecutionResult::completed(format!(
            "Summarized ticket #{} ({}, priority {}) for stakeholders",
            ticket.id, ticket.status, ticket.priority
        )),
    }
}
