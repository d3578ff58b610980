//! Workflow orchestrator — drives a ticket through the agent registry.
//!
//! Each iteration analyzes with the current role, executes its tool, folds
//! recommendations and confidence into the workflow state, and follows the
//! role's handoff decision. Termination is a correctness property: a handoff
//! to an already-visited role stops the workflow immediately, and a hard
//! iteration cap remains as a secondary safety net.

use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::agents::AgentRole;
use crate::analysis::{AgentAnalysis, ExecutionStatus};
use crate::errors::OrchestratorError;
use crate::memory::{InteractionAction, InteractionEntry, InteractionLog, DEFAULT_TICKET_CAPACITY};
use crate::metrics::{MetricsStore, RoleRun, WorkflowMetrics, WorkflowOutcome};
use crate::registry::AgentRegistry;
use crate::ticket::Ticket;

/// Hard bound on loop iterations, kept as a safety net behind cycle detection.
pub const MAX_ITERATIONS: u32 = 10;

/// Every workflow starts with the project manager.
pub const STARTING_ROLE: AgentRole = AgentRole::ProjectManager;

/// Lifecycle phase of a single workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    Initial,
    Running,
    Complete,
}

impl fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => write!(f, "initial"),
            Self::Running => write!(f, "running"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Mutable state of one workflow run. Destroyed when the call returns.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowState {
    pub ticket_id: u64,
    pub current_role: AgentRole,
    /// Roles visited before the current one, in handoff order.
    pub previous_agents: Vec<AgentRole>,
    /// Every analysis produced so far, in iteration order.
    pub insights: Vec<AgentAnalysis>,
    /// Accumulated recommendation strings.
    pub recommendations: Vec<String>,
    /// Unweighted mean confidence over all insights so far.
    pub confidence: f64,
    pub phase: WorkflowPhase,
    /// Why the last handoff (or termination) happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handoff_reason: Option<String>,
}

impl WorkflowState {
    fn new(ticket_id: u64) -> Self {
        Self {
            ticket_id,
            current_role: STARTING_ROLE,
            previous_agents: Vec::new(),
            insights: Vec::new(),
            recommendations: Vec::new(),
            confidence: 0.0,
            phase: WorkflowPhase::Initial,
            handoff_reason: None,
        }
    }

    /// The final role first, then the visited roles in handoff order.
    pub fn agents_involved(&self) -> Vec<AgentRole> {
        let mut agents = Vec::with_capacity(self.previous_agents.len() + 1);
        agents.push(self.current_role);
        agents.extend(self.previous_agents.iter().copied());
        agents
    }

    pub fn is_complete(&self) -> bool {
        self.phase == WorkflowPhase::Complete
    }

    fn recompute_confidence(&mut self) {
        if self.insights.is_empty() {
            self.confidence = 0.0;
        } else {
            let sum: f64 = self.insights.iter().map(|i| i.confidence).sum();
            self.confidence = sum / self.insights.len() as f64;
        }
    }

    /// Group insights by role, averaging each role's own confidences.
    fn role_runs(&self) -> Vec<RoleRun> {
        let mut order: Vec<AgentRole> = Vec::new();
        let mut sums: HashMap<AgentRole, (f64, u32)> = HashMap::new();
        for insight in &self.insights {
            let slot = sums.entry(insight.role).or_insert_with(|| {
                order.push(insight.role);
                (0.0, 0)
            });
            slot.0 += insight.confidence;
            slot.1 += 1;
        }
        order
            .into_iter()
            .map(|role| {
                let (sum, count) = sums[&role];
                RoleRun {
                    role,
                    average_confidence: sum / count as f64,
                }
            })
            .collect()
    }
}

/// Final result of `process_ticket`.
#[derive(Debug, Clone, Serialize)]
pub struct MultiAgentResponse {
    pub ticket_id: u64,
    pub workflow: WorkflowState,
    pub final_recommendations: Vec<String>,
    pub confidence: f64,
    pub processing_time_ms: u64,
    pub agents_involved: Vec<AgentRole>,
    pub handoff_count: usize,
}

/// Drives tickets through the agent registry and records metrics.
pub struct Orchestrator {
    registry: AgentRegistry,
    metrics: MetricsStore,
    interactions: InteractionLog,
    max_iterations: u32,
}

impl Orchestrator {
    /// Build an orchestrator around an injected metrics store.
    pub fn new(metrics: MetricsStore) -> Self {
        Self {
            registry: AgentRegistry::new(),
            metrics,
            interactions: InteractionLog::new(DEFAULT_TICKET_CAPACITY),
            max_iterations: MAX_ITERATIONS,
        }
    }

    /// Override the iteration cap (mainly for tests).
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn metrics(&self) -> &WorkflowMetrics {
        self.metrics.snapshot()
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Diagnostic interaction log for a ticket.
    pub fn interactions(&self, ticket_id: u64) -> &[InteractionEntry] {
        self.interactions.interactions(ticket_id)
    }

    /// Run the full multi-agent workflow for a ticket.
    ///
    /// All-or-nothing: internal failures are recorded as a failed run and
    /// surface wrapped as `ProcessingFailed`.
    pub async fn process_ticket(
        &mut self,
        ticket: &Ticket,
    ) -> Result<MultiAgentResponse, OrchestratorError> {
        let started = Instant::now();

        let state = match self.run_workflow(ticket).await {
            Ok(state) => state,
            Err(cause) => {
                let elapsed_ms = started.elapsed().as_millis() as f64;
                self.metrics
                    .record_workflow(&WorkflowOutcome::failure(elapsed_ms));
                warn!(ticket_id = ticket.id, error = %cause, "workflow failed");
                return Err(OrchestratorError::ProcessingFailed(cause.to_string()));
            }
        };

        let processing_time_ms = started.elapsed().as_millis() as u64;
        let agents_involved = state.agents_involved();
        let handoff_count = state.previous_agents.len();

        self.metrics.record_workflow(&WorkflowOutcome {
            success: true,
            processing_time_ms: processing_time_ms as f64,
            handoffs: handoff_count as u64,
            role_runs: state.role_runs(),
        });

        info!(
            ticket_id = ticket.id,
            agents = agents_involved.len(),
            handoffs = handoff_count,
            confidence = state.confidence,
            "workflow complete"
        );

        Ok(MultiAgentResponse {
            ticket_id: ticket.id,
            final_recommendations: state.recommendations.clone(),
            confidence: state.confidence,
            processing_time_ms,
            agents_involved,
            handoff_count,
            workflow: state,
        })
    }

    /// Manually route a ticket to one agent, bypassing the workflow loop.
    ///
    /// Validates `can_handle` first; the target's analysis is returned as-is.
    pub async fn route_to_agent(
        &mut self,
        ticket: &Ticket,
        target: AgentRole,
    ) -> Result<AgentAnalysis, OrchestratorError> {
        let agent = self.registry.get(target);
        if !agent.can_handle(ticket) {
            return Err(OrchestratorError::CannotHandle {
                role: target,
                ticket_id: ticket.id,
            });
        }

        let analysis = agent.analyze(ticket).await;
        self.interactions.record(
            ticket.id,
            InteractionEntry::new(
                target,
                InteractionAction::Route,
                format!("direct route, confidence {:.2}", analysis.confidence),
            ),
        );
        info!(ticket_id = ticket.id, role = %target, "ticket routed directly");
        Ok(analysis)
    }

    async fn run_workflow(&mut self, ticket: &Ticket) -> Result<WorkflowState, OrchestratorError> {
        if !ticket.has_text() {
            return Err(OrchestratorError::EmptyTicket(ticket.id));
        }

        let mut state = WorkflowState::new(ticket.id);
        state.phase = WorkflowPhase::Running;

        for iteration in 1..=self.max_iterations {
            let agent = self.registry.get(state.current_role);

            let analysis = agent.analyze(ticket).await;
            self.interactions.record(
                ticket.id,
                InteractionEntry::new(
                    state.current_role,
                    InteractionAction::Analyze,
                    format!("confidence {:.2}", analysis.confidence),
                ),
            );
            state.insights.push(analysis);

            let result = agent.execute(ticket).await;
            self.interactions.record(
                ticket.id,
                InteractionEntry::new(
                    state.current_role,
                    InteractionAction::Execute,
                    result.details.clone(),
                ),
            );
            if !result.recommendations.is_empty() {
                state.recommendations.extend(result.recommendations);
            } else if result.status == ExecutionStatus::Completed {
                state.recommendations.push(result.details);
            } else {
                debug!(
                    ticket_id = ticket.id,
                    role = %state.current_role,
                    error = result.error.as_deref().unwrap_or("unknown"),
                    "agent execution failed; workflow continues"
                );
            }

            state.recompute_confidence();

            match agent.should_handoff(ticket) {
                Some(next) => {
                    if next == state.current_role || state.previous_agents.contains(&next) {
                        state.handoff_reason = Some(format!(
                            "handoff to {next} skipped: role already consulted"
                        ));
                        info!(
                            ticket_id = ticket.id,
                            from = %state.current_role,
                            to = %next,
                            "handoff cycle detected, completing workflow"
                        );
                        state.phase = WorkflowPhase::Complete;
                        break;
                    }
                    debug!(
                        ticket_id = ticket.id,
                        from = %state.current_role,
                        to = %next,
                        iteration,
                        "handoff"
                    );
                    state.handoff_reason =
                        Some(format!("{} handed off to {next}", state.current_role));
                    state.previous_agents.push(state.current_role);
                    state.current_role = next;
                }
                None => {
                    state.phase = WorkflowPhase::Complete;
                    break;
                }
            }
        }

        if !state.is_complete() {
            warn!(
                ticket_id = ticket.id,
                max_iterations = self.max_iterations,
                "iteration cap reached, forcing workflow completion"
            );
            state.handoff_reason = Some("iteration cap reached".to_string());
            state.phase = WorkflowPhase::Complete;
        }

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_state_initial_shape() {
        let state = WorkflowState::new(5);
        assert_eq!(state.current_role, STARTING_ROLE);
        assert_eq!(state.phase, WorkflowPhase::Initial);
        assert!(state.previous_agents.is_empty());
        assert_eq!(state.confidence, 0.0);
        assert_eq!(state.agents_involved(), vec![AgentRole::ProjectManager]);
    }

    #[test]
    fn test_recompute_confidence_is_unweighted_mean() {
        let mut state = WorkflowState::new(1);
        for confidence in [0.2, 0.4, 0.9] {
            state.insights.push(AgentAnalysis {
                role: AgentRole::ProjectManager,
                analysis: String::new(),
                confidence,
                recommended_actions: Vec::new(),
                handoff_to: None,
                priority_override: None,
                estimated_time: None,
                complexity: None,
            });
        }
        state.recompute_confidence();
        assert!((state.confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_role_runs_group_by_role() {
        let mut state = WorkflowState::new(1);
        for (role, confidence) in [
            (AgentRole::ProjectManager, 0.2),
            (AgentRole::Devops, 0.8),
            (AgentRole::Devops, 0.4),
        ] {
            state.insights.push(AgentAnalysis {
                role,
                analysis: String::new(),
                confidence,
                recommended_actions: Vec::new(),
                handoff_to: None,
                priority_override: None,
                estimated_time: None,
                complexity: None,
            });
        }
        let runs = state.role_runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].role, AgentRole::ProjectManager);
        assert_eq!(runs[1].role, AgentRole::Devops);
        assert!((runs[1].average_confidence - 0.6).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_empty_ticket_is_a_wrapped_failure() {
        let mut orchestrator = Orchestrator::new(MetricsStore::new());
        let ticket = Ticket::new(9, "", "  ");

        let err = orchestrator.process_ticket(&ticket).await.unwrap_err();
        match err {
            OrchestratorError::ProcessingFailed(msg) => {
                assert!(msg.contains("empty subject and description"));
            }
            other => panic!("expected ProcessingFailed, got {other:?}"),
        }

        let metrics = orchestrator.metrics();
        assert_eq!(metrics.total_workflows, 1);
        assert_eq!(metrics.failed_workflows, 1);
        assert_eq!(metrics.successful_workflows, 0);
    }

    #[tokio::test]
    async fn test_route_to_agent_rejects_unhandleable_ticket() {
        let mut orchestrator = Orchestrator::new(MetricsStore::new());
        let ticket = Ticket::new(10, "hello", "just wanted to say thanks");

        let err = orchestrator
            .route_to_agent(&ticket, AgentRole::Devops)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            OrchestratorError::CannotHandle {
                role: AgentRole::Devops,
                ticket_id: 10,
            }
        );
    }

    #[tokio::test]
    async fn test_route_to_agent_records_interaction() {
        let mut orchestrator = Orchestrator::new(MetricsStore::new());
        let ticket = Ticket::new(11, "WordPress plugin conflict", "wp-admin is down");

        let analysis = orchestrator
            .route_to_agent(&ticket, AgentRole::WordpressDeveloper)
            .await
            .unwrap();
        assert_eq!(analysis.role, AgentRole::WordpressDeveloper);

        let entries = orchestrator.interactions(11);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, InteractionAction::Route);
    }
}
