//! Per-ticket interaction log — bounded diagnostic memory.
//!
//! Every analyze/execute/route call appends an entry keyed by ticket id.
//! The log is capacity-bounded: once more than `capacity` tickets are
//! tracked, the least-recently-touched ticket's entries are evicted, so a
//! long-lived worker cannot grow without bound.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agents::AgentRole;

/// Default number of tickets retained before eviction kicks in.
pub const DEFAULT_TICKET_CAPACITY: usize = 256;

/// What kind of call produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionAction {
    Analyze,
    Execute,
    Route,
}

/// One diagnostic record of an agent touching a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEntry {
    pub role: AgentRole,
    pub action: InteractionAction,
    /// Freeform result summary.
    pub result: String,
    pub recorded_at: DateTime<Utc>,
}

impl InteractionEntry {
    pub fn new(role: AgentRole, action: InteractionAction, result: impl Into<String>) -> Self {
        Self {
            role,
            action,
            result: result.into(),
            recorded_at: Utc::now(),
        }
    }
}

/// Capacity-bounded interaction log keyed by ticket id.
pub struct InteractionLog {
    capacity: usize,
    entries: HashMap<u64, Vec<InteractionEntry>>,
    // Ticket ids from least- to most-recently touched.
    order: VecDeque<u64>,
}

impl InteractionLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// Append an entry for a ticket, evicting the least-recently-touched
    /// ticket if the capacity bound would be exceeded.
    pub fn record(&mut self, ticket_id: u64, entry: InteractionEntry) {
        self.touch(ticket_id);
        self.entries.entry(ticket_id).or_default().push(entry);

        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.entries.remove(&evicted);
            } else {
                break;
            }
        }
    }

    /// All entries recorded for a ticket, oldest first.
    pub fn interactions(&self, ticket_id: u64) -> &[InteractionEntry] {
        self.entries
            .get(&ticket_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of tickets currently tracked.
    pub fn ticket_count(&self) -> usize {
        self.entries.len()
    }

    fn touch(&mut self, ticket_id: u64) {
        if let Some(pos) = self.order.iter().position(|id| *id == ticket_id) {
            self.order.remove(pos);
        }
        self.order.push_back(ticket_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(role: AgentRole) -> InteractionEntry {
        InteractionEntry::new(role, InteractionAction::Analyze, "ok")
    }

    #[test]
    fn test_entries_accumulate_in_order() {
        let mut log = InteractionLog::new(8);
        log.record(1, entry(AgentRole::ProjectManager));
        log.record(1, entry(AgentRole::Devops));

        let entries = log.interactions(1);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, AgentRole::ProjectManager);
        assert_eq!(entries[1].role, AgentRole::Devops);
        assert!(log.interactions(99).is_empty());
    }

    #[test]
    fn test_eviction_drops_least_recently_touched() {
        let mut log = InteractionLog::new(2);
        log.record(1, entry(AgentRole::ProjectManager));
        log.record(2, entry(AgentRole::Devops));
        // Touch 1 again so 2 becomes the eviction candidate.
        log.record(1, entry(AgentRole::QaEngineer));
        log.record(3, entry(AgentRole::BusinessAnalyst));

        assert_eq!(log.ticket_count(), 2);
        assert!(!log.interactions(1).is_empty());
        assert!(log.interactions(2).is_empty());
        assert!(!log.interactions(3).is_empty());
    }

    #[test]
    fn test_capacity_floor_of_one() {
        let mut log = InteractionLog::new(0);
        log.record(1, entry(AgentRole::ProjectManager));
        log.record(2, entry(AgentRole::Devops));
        assert_eq!(log.ticket_count(), 1);
        assert!(!log.interactions(2).is_empty());
    }
}
