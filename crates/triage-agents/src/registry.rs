//! Agent registry — exhaustive role-to-agent mapping.
//!
//! Built once at orchestrator construction. Lookup is an exhaustive match
//! over `AgentRole`, so a missing-role failure cannot exist at runtime.

use crate::agents::{
    AgentRole, BusinessAnalystAgent, DevopsAgent, ProjectManagerAgent, QaEngineerAgent,
    SoftwareEngineerAgent, SpecialistAgent, WordpressDeveloperAgent,
};

/// The fixed set of specialist agents.
pub struct AgentRegistry {
    project_manager: ProjectManagerAgent,
    software_engineer: SoftwareEngineerAgent,
    wordpress_developer: WordpressDeveloperAgent,
    devops: DevopsAgent,
    qa_engineer: QaEngineerAgent,
    business_analyst: BusinessAnalystAgent,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self {
            project_manager: ProjectManagerAgent,
            software_engineer: SoftwareEngineerAgent,
            wordpress_developer: WordpressDeveloperAgent,
            devops: DevopsAgent,
            qa_engineer: QaEngineerAgent,
            business_analyst: BusinessAnalystAgent,
        }
    }

    /// Resolve a role to its agent. Infallible by construction.
    pub fn get(&self, role: AgentRole) -> &dyn SpecialistAgent {
        match role {
            AgentRole::ProjectManager => &self.project_manager,
            AgentRole::SoftwareEngineer => &self.software_engineer,
            AgentRole::WordpressDeveloper => &self.wordpress_developer,
            AgentRole::Devops => &self.devops,
            AgentRole::QaEngineer => &self.qa_engineer,
            AgentRole::BusinessAnalyst => &self.business_analyst,
        }
    }

    /// All registered roles.
    pub fn roles(&self) -> &'static [AgentRole] {
        &AgentRole::ALL
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_resolves_to_itself() {
        let registry = AgentRegistry::new();
        for role in AgentRole::ALL {
            assert_eq!(registry.get(role).role(), role);
        }
    }

    #[test]
    fn test_roles_lists_all_six() {
        let registry = AgentRegistry::new();
        assert_eq!(registry.roles().len(), 6);
    }
}
