//! Multi-agent ticket triage pipeline.
//!
//! Routes a helpdesk ticket through a sequence of keyword-matching specialist
//! agents (project manager, software engineer, WordPress developer, DevOps,
//! QA, business analyst). Each agent analyzes the ticket, runs a canned
//! diagnostic tool, and may hand the ticket to another role; the orchestrator
//! accumulates recommendations and a combined confidence score and stops on
//! no-handoff, a revisited role, or the iteration cap.
//!
//! The surrounding worker (webhook handlers, Slack/ClickUp glue) feeds
//! tickets in via [`Orchestrator::process_ticket`] or
//! [`Orchestrator::route_to_agent`] and turns the returned recommendations
//! into tasks and notifications.

pub mod agents;
pub mod analysis;
pub mod errors;
pub mod memory;
pub mod metrics;
pub mod orchestrator;
pub mod registry;
pub mod ticket;
pub mod tools;

pub use agents::{AgentRole, SpecialistAgent};
pub use analysis::{AgentAnalysis, Complexity, ExecutionResult, ExecutionStatus};
pub use errors::OrchestratorError;
pub use memory::{InteractionAction, InteractionEntry, InteractionLog};
pub use metrics::{MetricsStore, RoleMetrics, RoleRun, WorkflowMetrics, WorkflowOutcome};
pub use orchestrator::{
    MultiAgentResponse, Orchestrator, WorkflowPhase, WorkflowState, MAX_ITERATIONS, STARTING_ROLE,
};
pub use registry::AgentRegistry;
pub use ticket::{Ticket, TicketPriority, TicketStatus};
pub use tools::ToolKind;
