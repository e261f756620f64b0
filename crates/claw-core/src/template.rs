//! Built-in orchestrator template and example descriptions.

use claw_api::AgentDraft;

/// Emoji used when generation does not supply one.
pub const DEFAULT_EMOJI: &str = "🤖";

const ORCHESTRATOR_SOUL: &str = "# Orchestrator Agent

You are the primary orchestrator and squad lead. Your role is to:

1. **Receive tasks** from the human and break them down into actionable work
2. **Delegate** to specialist agents based on their capabilities
3. **Monitor progress** and ensure tasks are completed properly
4. **Report back** with summaries and results

## Working Style

- Be proactive about clarifying requirements before delegating
- Check in on delegated tasks and follow up if needed
- Synthesize results from multiple agents into coherent responses
- Escalate blockers or decisions that need human input

## Communication

- Keep the human informed of significant progress
- Be concise but thorough in status updates
- Flag risks or concerns early

You are the central coordinator. Other agents report to you.";

const ORCHESTRATOR_TOOLS: &str = "# Tools & Integrations

## Available Tools

Document any tool configurations, API keys, or integrations here.

## Agent Team

List your specialist agents and their capabilities:

- **Agent Name**: Description of what they do

## Preferences

- Preferred communication style
- Working hours
- Any special instructions";

const ORCHESTRATOR_AGENTS_MD: &str = "# Workspace

This is the main orchestrator workspace.

## Memory

Use `memory/YYYY-MM-DD.md` files to track daily work and decisions.

## Guidelines

- Delegate complex tasks to specialists
- Keep the human informed of progress
- Document important decisions";

/// A fixed agent profile that seeds a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub model: &'static str,
    pub soul: &'static str,
    pub tools: &'static str,
    pub agents_md: &'static str,
}

impl AgentTemplate {
    /// An owned, editable copy of the template.
    pub fn to_draft(self) -> AgentDraft {
        AgentDraft {
            id: self.id.to_string(),
            name: self.name.to_string(),
            emoji: self.emoji.to_string(),
            model: self.model.to_string(),
            soul: self.soul.to_string(),
            tools: self.tools.to_string(),
            agents_md: self.agents_md.to_string(),
        }
    }
}

/// The main orchestrator every installation starts with.
pub const ORCHESTRATOR: AgentTemplate = AgentTemplate {
    id: "main",
    name: "Orchestrator",
    emoji: "🎯",
    model: "",
    soul: ORCHESTRATOR_SOUL,
    tools: ORCHESTRATOR_TOOLS,
    agents_md: ORCHESTRATOR_AGENTS_MD,
};

/// A canned description offered on the describe step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionExample {
    /// Short button label.
    pub label: &'static str,
    /// Text that replaces the description when picked.
    pub text: &'static str,
}

const EXAMPLES: &[DescriptionExample] = &[
    DescriptionExample {
        label: "Backend Dev",
        text: "A coding agent specialized in Python backend development with FastAPI and PostgreSQL",
    },
    DescriptionExample {
        label: "Sales Agent",
        text: "A sales agent that handles lead qualification, outreach emails, and CRM management",
    },
    DescriptionExample {
        label: "Researcher",
        text: "A research agent that investigates topics deeply, synthesizes findings, and creates detailed reports",
    },
];

/// Returns the example descriptions in display order.
pub fn description_examples() -> &'static [DescriptionExample] {
    EXAMPLES
}

/// Looks up an example by label, ignoring case.
pub fn find_example(label: &str) -> Option<DescriptionExample> {
    EXAMPLES
        .iter()
        .copied()
        .find(|example| example.label.eq_ignore_ascii_case(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent_id::validate_id;

    #[test]
    fn test_orchestrator_draft_values() {
        let draft = ORCHESTRATOR.to_draft();
        assert_eq!(draft.id, "main");
        assert_eq!(draft.name, "Orchestrator");
        assert_eq!(draft.emoji, "🎯");
        assert!(draft.model.is_empty());
        assert!(draft.soul.starts_with("# Orchestrator Agent"));
        assert!(draft.tools.starts_with("# Tools & Integrations"));
        assert!(draft.agents_md.contains("memory/YYYY-MM-DD.md"));
    }

    #[test]
    fn test_orchestrator_id_is_valid() {
        assert!(validate_id(ORCHESTRATOR.id).is_ok());
    }

    #[test]
    fn test_examples_in_order() {
        let labels = description_examples()
            .iter()
            .map(|example| example.label)
            .collect::<Vec<_>>();
        assert_eq!(labels, ["Backend Dev", "Sales Agent", "Researcher"]);
    }

    #[test]
    fn test_find_example_ignores_case() {
        let example = find_example("researcher").unwrap();
        assert!(example.text.starts_with("A research agent"));
        assert!(find_example("missing").is_none());
    }
}
