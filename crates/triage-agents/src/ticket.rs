//! Ticket model consumed by the triage pipeline.
//!
//! Tickets arrive from the webhook layer (Zendesk/ClickUp) already parsed;
//! the pipeline reads `subject` and `description` for all matching and never
//! mutates the ticket it was given.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ticket priority as reported by the helpdesk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    Normal,
    High,
    Urgent,
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Normal => write!(f, "normal"),
            Self::High => write!(f, "high"),
            Self::Urgent => write!(f, "urgent"),
        }
    }
}

/// Lifecycle status of a ticket in the helpdesk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    New,
    Open,
    Pending,
    Solved,
    Closed,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Open => write!(f, "open"),
            Self::Pending => write!(f, "pending"),
            Self::Solved => write!(f, "solved"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// A helpdesk ticket.
///
/// Only `id`, `subject`, `description` and `priority` are consumed by the
/// triage pipeline; the remaining fields pass through for callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,
    pub subject: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Create a new ticket with default status/priority and current timestamps.
    pub fn new(id: u64, subject: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            subject: subject.into(),
            description: description.into(),
            status: TicketStatus::New,
            priority: TicketPriority::Normal,
            tags: Vec::new(),
            requester_id: None,
            assignee_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The lower-cased `subject + " " + description` text every matcher scans.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.subject, self.description).to_lowercase()
    }

    /// Whether the ticket carries any text to classify at all.
    pub fn has_text(&self) -> bool {
        !self.subject.trim().is_empty() || !self.description.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_text_is_lowercased_concat() {
        let ticket = Ticket::new(1, "WordPress Plugin Conflict", "Our WP-Admin is DOWN");
        assert_eq!(
            ticket.search_text(),
            "wordpress plugin conflict our wp-admin is down"
        );
    }

    #[test]
    fn test_has_text_empty_ticket() {
        let ticket = Ticket::new(2, "", "   ");
        assert!(!ticket.has_text());

        let ticket = Ticket::new(3, "", "something");
        assert!(ticket.has_text());
    }

    #[test]
    fn test_ticket_serde_roundtrip() {
        let ticket = Ticket::new(7, "Server down", "503 from the load balancer");
        let json = serde_json::to_string(&ticket).unwrap();
        let restored: Ticket = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, 7);
        assert_eq!(restored.subject, "Server down");
        assert_eq!(restored.status, TicketStatus::New);
        assert_eq!(restored.priority, TicketPriority::Normal);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(TicketPriority::Urgent > TicketPriority::High);
        assert!(TicketPriority::High > TicketPriority::Normal);
        assert!(TicketPriority::Normal > TicketPriority::Low);
    }
}
