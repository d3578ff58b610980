//! Classifier output types.
//!
//! `AgentAnalysis` is the per-agent verdict on a ticket; `ExecutionResult`
//! is the outcome of running an agent's tool against it. Both are created
//! fresh per invocation and immutable once returned.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::agents::AgentRole;
use crate::ticket::TicketPriority;

/// Estimated implementation complexity attached to an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Medium => write!(f, "medium"),
            Self::Complex => write!(f, "complex"),
        }
    }
}

/// The verdict a specialist agent returns for a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentAnalysis {
    /// The role that produced this analysis.
    pub role: AgentRole,
    /// Sentence-joined freeform analysis text.
    pub analysis: String,
    /// Combined keyword-match confidence, clamped to [0, 1].
    pub confidence: f64,
    /// Ordered recommended-action strings.
    pub recommended_actions: Vec<String>,
    /// Role this agent would hand the ticket to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handoff_to: Option<AgentRole>,
    /// Priority this agent would set on the ticket, if different.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_override: Option<TicketPriority>,
    /// Freeform effort estimate, e.g. "4-8 hours".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Complexity>,
}

/// Outcome status of an agent tool execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Completed,
    Failed,
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Result of running an agent's tool against a ticket.
///
/// Execution failures are downgraded to a `Failed` result here rather than
/// propagated; a single misbehaving tool never aborts the workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    /// Human-readable summary of what the tool did (or why it failed).
    pub details: String,
    /// Recommendations to fold into the workflow, possibly empty.
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    /// A completed execution with only a summary.
    pub fn completed(details: impl Into<String>) -> Self {
        Self {
            status: ExecutionStatus::Completed,
            details: details.into(),
            recommendations: Vec::new(),
            error: None,
        }
    }

    /// A completed execution carrying explicit recommendations.
    pub fn completed_with(details: impl Into<String>, recommendations: Vec<String>) -> Self {
        Self {
            status: ExecutionStatus::Completed,
            details: details.into(),
            recommendations,
            error: None,
        }
    }

    /// A failed execution; the workflow continues past it.
    pub fn failed(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            status: ExecutionStatus::Failed,
            details: format!("execution failed: {error}"),
            recommendations: Vec::new(),
            error: Some(error),
        }
    }
}
