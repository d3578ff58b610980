//! WordPress developer — plugin conflicts, themes, core updates, WooCommerce.

use async_trait::async_trait;

use super::{
    build_analysis, contains_any, first_handoff, AgentRole, Capability, HandoffRule, KeywordGroup,
    SpecialistAgent,
};
use crate::analysis::{AgentAnalysis, Complexity};
use crate::ticket::{Ticket, TicketPriority};

const GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        keywords: &["plugin", "wp-admin", "white screen", "activating"],
        analysis: "Symptoms point to a plugin conflict breaking the admin or frontend.",
        actions: &[
            "Deactivate plugins one by one to isolate the conflict",
            "Check wp-content/debug.log for the fatal error",
            "Roll back the most recently activated plugin",
        ],
        complexity: Some(Complexity::Medium),
        estimated_time: Some("1-2 hours"),
        priority: Some(TicketPriority::High),
    },
    KeywordGroup {
        keywords: &["theme", "layout", "styling", "css"],
        analysis: "Presentation layer issue, likely in the active theme or a child theme override.",
        actions: &[
            "Switch to a default theme to confirm the theme is at fault",
            "Diff the child theme against the parent for stale overrides",
        ],
        complexity: Some(Complexity::Simple),
        estimated_time: Some("1-3 hours"),
        priority: None,
    },
    KeywordGroup {
        keywords: &["core update", "wordpress update", "php version"],
        analysis: "Site broke around a core or PHP upgrade; compatibility review needed.",
        actions: &[
            "Check plugin and theme compatibility with the new core/PHP version",
            "Restore from the pre-update backup if the site is down",
        ],
        complexity: Some(Complexity::Medium),
        estimated_time: Some("2-4 hours"),
        priority: None,
    },
    KeywordGroup {
        keywords: &["woocommerce", "checkout", "cart", "payment gateway"],
        analysis: "Store-critical WooCommerce flow is affected.",
        actions: &[
            "Test the checkout flow in a staging copy with payments in sandbox mode",
            "Review recent WooCommerce extension updates",
        ],
        complexity: Some(Complexity::Complex),
        estimated_time: Some("3-6 hours"),
        priority: Some(TicketPriority::Urgent),
    },
];

const CAPABILITIES: &[Capability] = &[
    Capability {
        name: "wordpress_core",
        keywords: &["wordpress", "wp-admin", "wp-content", "gutenberg"],
    },
    Capability {
        name: "plugins_themes",
        keywords: &["plugin", "theme", "elementor"],
    },
    Capability {
        name: "woocommerce",
        keywords: &["woocommerce", "checkout", "payment gateway"],
    },
];

const HANDLE_KEYWORDS: &[&str] = &[
    "wordpress",
    "wp-",
    "plugin",
    "theme",
    "woocommerce",
    "elementor",
    "gutenberg",
];

const HANDOFF_RULES: &[HandoffRule] = &[
    // Hosting-level symptoms are not a WordPress problem.
    HandoffRule {
        keywords: &["dns", "ssl certificate", "hosting migration"],
        target: AgentRole::Devops,
    },
];

const FALLBACK: &str = "No WordPress-specific symptoms matched.";

pub struct WordpressDeveloperAgent;

#[async_trait]
impl SpecialistAgent for WordpressDeveloperAgent {
    fn role(&self) -> AgentRole {
        AgentRole::WordpressDeveloper
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
