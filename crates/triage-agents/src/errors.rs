//! Pipeline error types.

use thiserror::Error;

use crate::agents::AgentRole;

/// Errors surfaced by the orchestrator's entry points.
///
/// `process_ticket` is all-or-nothing: any internal failure reaches callers
/// wrapped as `ProcessingFailed`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrchestratorError {
    #[error("multi-agent processing failed: {0}")]
    ProcessingFailed(String),

    #[error("ticket {0} has an empty subject and description")]
    EmptyTicket(u64),

    #[error("agent {role} cannot handle ticket {ticket_id}")]
    CannotHandle { role: AgentRole, ticket_id: u64 },
}
