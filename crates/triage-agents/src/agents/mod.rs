//! Specialist agents for the triage pipeline.
//!
//! Each agent is a pure keyword matcher over the ticket's search text: a set
//! of `KeywordGroup`s contributes analysis sentences and recommended actions,
//! a set of `Capability` keyword lists drives the confidence score, and a
//! small first-match-wins rule list decides handoffs. The six roles share the
//! matcher machinery here and differ only in their tables.

pub mod business_analyst;
pub mod devops;
pub mod project_manager;
pub mod qa_engineer;
pub mod software_engineer;
pub mod wordpress_developer;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analysis::{AgentAnalysis, Complexity, ExecutionResult};
use crate::ticket::{Ticket, TicketPriority};
use crate::tools::{self, ToolKind};

pub use business_analyst::BusinessAnalystAgent;
pub use devops::DevopsAgent;
pub use project_manager::ProjectManagerAgent;
pub use qa_engineer::QaEngineerAgent;
pub use software_engineer::SoftwareEngineerAgent;
pub use wordpress_developer::WordpressDeveloperAgent;

/// The six specialist roles. Exhaustive by construction: every handoff
/// target is a variant of this enum, so there is no "unknown role" failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    ProjectManager,
    SoftwareEngineer,
    WordpressDeveloper,
    Devops,
    QaEngineer,
    BusinessAnalyst,
}

impl AgentRole {
    /// All roles, in registry seeding order.
    pub const ALL: [AgentRole; 6] = [
        AgentRole::ProjectManager,
        AgentRole::SoftwareEngineer,
        AgentRole::WordpressDeveloper,
        AgentRole::Devops,
        AgentRole::QaEngineer,
        AgentRole::BusinessAnalyst,
    ];
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProjectManager => write!(f, "project_manager"),
            Self::SoftwareEngineer => write!(f, "software_engineer"),
            Self::WordpressDeveloper => write!(f, "wordpress_developer"),
            Self::Devops => write!(f, "devops"),
            Self::QaEngineer => write!(f, "qa_engineer"),
            Self::BusinessAnalyst => write!(f, "business_analyst"),
        }
    }
}

/// Confidence added per matched capability keyword, before clamping.
pub const CONFIDENCE_INCREMENT: f64 = 0.2;

/// A keyword group owned by a role: when any keyword matches, the group's
/// analysis sentence and actions are appended to the output, and the group
/// may override complexity, effort estimate, or priority.
pub struct KeywordGroup {
    pub keywords: &'static [&'static str],
    pub analysis: &'static str,
    pub actions: &'static [&'static str],
    pub complexity: Option<Complexity>,
    pub estimated_time: Option<&'static str>,
    pub priority: Option<TicketPriority>,
}

/// A named capability with the keyword list that scores it.
pub struct Capability {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

/// A handoff rule: first rule with a matching keyword decides the target.
pub struct HandoffRule {
    pub keywords: &'static [&'static str],
    pub target: AgentRole,
}

pub(crate) fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

/// Capability-based confidence: 0.2 per matched keyword across all of the
/// role's capabilities, clamped to [0, 1]. Independent of which keyword
/// groups matched.
pub(crate) fn confidence_score(text: &str, capabilities: &[Capability]) -> f64 {
    let mut score = 0.0;
    for capability in capabilities {
        for keyword in capability.keywords {
            if text.contains(keyword) {
                score += CONFIDENCE_INCREMENT;
            }
        }
    }
    score.clamp(0.0, 1.0)
}

pub(crate) fn first_handoff(text: &str, rules: &[HandoffRule]) -> Option<AgentRole> {
    rules
        .iter()
        .find(|rule| contains_any(text, rule.keywords))
        .map(|rule| rule.target)
}

/// Build an analysis from a role's tables. Later matching groups win any
/// complexity/effort/priority override conflicts.
pub(crate) fn build_analysis(
    role: AgentRole,
    ticket: &Ticket,
    groups: &[KeywordGroup],
    capabilities: &[Capability],
    fallback: &'static str,
    handoff_to: Option<AgentRole>,
) -> AgentAnalysis {
    let text = ticket.search_text();

    let mut sentences: Vec<&str> = Vec::new();
    let mut actions: Vec<String> = Vec::new();
    let mut complexity = None;
    let mut estimated_time = None;
    let mut priority_override = None;

    for group in groups {
        if !contains_any(&text, group.keywords) {
            continue;
        }
        sentences.push(group.analysis);
        actions.extend(group.actions.iter().map(|a| a.to_string()));
        if group.complexity.is_some() {
            complexity = group.complexity;
        }
        if group.estimated_time.is_some() {
            estimated_time = group.estimated_time;
        }
        if group.priority.is_some() {
            priority_override = group.priority;
        }
    }

    if sentences.is_empty() {
        sentences.push(fallback);
    }

    AgentAnalysis {
        role,
        analysis: sentences.join(" "),
        confidence: confidence_score(&text, capabilities),
        recommended_actions: actions,
        handoff_to,
        priority_override,
        estimated_time: estimated_time.map(String::from),
        complexity,
    }
}

/// The contract every specialist fulfils.
///
/// `analyze`/`execute` are async to match the surrounding worker's call
/// pattern; the implementations themselves are pure matchers.
#[async_trait]
pub trait SpecialistAgent: Send + Sync {
    fn role(&self) -> AgentRole;

    /// Classify the ticket into an `AgentAnalysis`.
    async fn analyze(&self, ticket: &Ticket) -> AgentAnalysis;

    /// Run the tool selected for this ticket. Failures are downgraded to a
    /// `Failed` result, never propagated.
    async fn execute(&self, ticket: &Ticket) -> ExecutionResult {
        tools::run(ToolKind::classify(&ticket.search_text()), ticket)
    }

    /// Whether this agent wants to hand the ticket to another role.
    fn should_handoff(&self, ticket: &Ticket) -> Option<AgentRole>;

    /// Whether this agent is a valid manual-routing target for the ticket.
    fn can_handle(&self, ticket: &Ticket) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPS: &[Capability] = &[
        Capability {
            name: "deployment",
            keywords: &["deploy", "docker"],
        },
        Capability {
            name: "infrastructure",
            keywords: &["server", "aws", "kubernetes"],
        },
    ];

    #[test]
    fn test_confidence_zero_without_matches() {
        assert_eq!(confidence_score("hello just wanted to say thanks", CAPS), 0.0);
    }

    #[test]
    fn test_confidence_increment_per_keyword() {
        let score = confidence_score("docker deploy on aws", CAPS);
        assert!((score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_clamped_to_one() {
        let score = confidence_score("deploy docker server aws kubernetes extra", CAPS);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_first_handoff_order() {
        let rules = [
            HandoffRule {
                keywords: &["deploy"],
                target: AgentRole::Devops,
            },
            HandoffRule {
                keywords: &["bug"],
                target: AgentRole::SoftwareEngineer,
            },
        ];
        // Both match; the first rule wins.
        assert_eq!(
            first_handoff("deploy bug", &rules),
            Some(AgentRole::Devops)
        );
        assert_eq!(first_handoff("nothing here", &rules), None);
    }

    #[test]
    fn test_build_analysis_fallback_sentence() {
        let ticket = Ticket::new(1, "hello", "just wanted to say thanks");
        let analysis = build_analysis(
            AgentRole::Devops,
            &ticket,
            &[],
            CAPS,
            "No infrastructure signals matched.",
            None,
        );
        assert_eq!(analysis.analysis, "No infrastructure signals matched.");
        assert_eq!(analysis.confidence, 0.0);
        assert!(analysis.recommended_actions.is_empty());
    }

    #[test]
    fn test_role_display_and_serde_agree() {
        for role in AgentRole::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{role}\""));
        }
    }
}
