//! Workflow metrics — explicit store injected into the orchestrator.
//!
//! All aggregates are running means: the global processing-time mean folds
//! each sample in after incrementing the workflow count, and per-role
//! aggregates fold in per-run values the same way. Per-role updates take an
//! explicit success indicator so success rates reflect failed runs too.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::agents::AgentRole;

/// Per-role aggregates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleMetrics {
    pub tasks_handled: u64,
    /// Running mean of each run's per-role insight confidence.
    pub average_confidence: f64,
    /// Running mean of a 0/1 success indicator.
    pub success_rate: f64,
    pub average_processing_time_ms: f64,
}

/// Process-wide workflow counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowMetrics {
    pub total_workflows: u64,
    pub successful_workflows: u64,
    pub failed_workflows: u64,
    pub average_processing_time_ms: f64,
    pub handoff_count: u64,
    pub per_role: HashMap<AgentRole, RoleMetrics>,
}

impl WorkflowMetrics {
    fn seeded() -> Self {
        let per_role = AgentRole::ALL
            .into_iter()
            .map(|role| (role, RoleMetrics::default()))
            .collect();
        Self {
            total_workflows: 0,
            successful_workflows: 0,
            failed_workflows: 0,
            average_processing_time_ms: 0.0,
            handoff_count: 0,
            per_role,
        }
    }
}

/// One role's contribution to a single workflow run.
#[derive(Debug, Clone)]
pub struct RoleRun {
    pub role: AgentRole,
    /// Mean confidence of this role's own insights in this run.
    pub average_confidence: f64,
}

/// Everything the store needs to fold one finished run into the aggregates.
#[derive(Debug, Clone)]
pub struct WorkflowOutcome {
    pub success: bool,
    pub processing_time_ms: f64,
    pub handoffs: u64,
    pub role_runs: Vec<RoleRun>,
}

impl WorkflowOutcome {
    /// A failed run with no completed role work.
    pub fn failure(processing_time_ms: f64) -> Self {
        Self {
            success: false,
            processing_time_ms,
            handoffs: 0,
            role_runs: Vec::new(),
        }
    }
}

/// The metrics store. Owned by whoever drives the orchestrator; tests
/// inject a fresh one.
#[derive(Debug, Clone)]
pub struct MetricsStore {
    metrics: WorkflowMetrics,
}

impl MetricsStore {
    pub fn new() -> Self {
        Self {
            metrics: WorkflowMetrics::seeded(),
        }
    }

    /// Fold one finished run (successful or failed) into the aggregates.
    pub fn record_workflow(&mut self, outcome: &WorkflowOutcome) {
        let m = &mut self.metrics;
        m.total_workflows += 1;
        let n = m.total_workflows as f64;
        m.average_processing_time_ms =
            (m.average_processing_time_ms * (n - 1.0) + outcome.processing_time_ms) / n;

        if outcome.success {
            m.successful_workflows += 1;
        } else {
            m.failed_workflows += 1;
        }
        m.handoff_count += outcome.handoffs;

        let indicator = if outcome.success { 1.0 } else { 0.0 };
        for run in &outcome.role_runs {
            let role = m.per_role.entry(run.role).or_default();
            role.tasks_handled += 1;
            let k = role.tasks_handled as f64;
            role.average_confidence =
                (role.average_confidence * (k - 1.0) + run.average_confidence) / k;
            role.success_rate = (role.success_rate * (k - 1.0) + indicator) / k;
            role.average_processing_time_ms =
                (role.average_processing_time_ms * (k - 1.0) + outcome.processing_time_ms) / k;
        }
    }

    /// Zero all counters and re-seed the per-role map.
    pub fn reset(&mut self) {
        self.metrics = WorkflowMetrics::seeded();
    }

    pub fn snapshot(&self) -> &WorkflowMetrics {
        &self.metrics
    }
}

impl Default for MetricsStore {
    fn default() -> Self {
        Self::new()
    }
}
