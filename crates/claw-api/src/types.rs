//! Wire types shared by the trait and the HTTP implementation.

use serde::{Deserialize, Serialize};

/// An agent profile as submitted to the creation endpoint.
///
/// Also the in-progress draft edited by the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDraft {
    /// Machine identifier, `^[a-z0-9-]+$` once submitted.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short glyph shown next to the name.
    pub emoji: String,
    /// Model identifier from the catalog, or empty.
    pub model: String,
    /// Role and behaviour document (SOUL.md).
    pub soul: String,
    /// Tool access and integrations document (TOOLS.md).
    pub tools: String,
    /// Workspace and memory guidance document (AGENTS.md).
    pub agents_md: String,
}

/// Body of a generation request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub description: &'a str,
}

/// Profile returned by the generation endpoint.
///
/// Every field is optional; a partially populated response is still a
/// successful one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratedProfile {
    pub id: Option<String>,
    pub name: Option<String>,
    pub emoji: Option<String>,
    pub model: Option<String>,
    pub soul: Option<String>,
    pub tools: Option<String>,
    pub agents_md: Option<String>,
}

/// A selectable model from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier (e.g., "anthropic/claude-sonnet-4").
    pub id: String,
}

impl ModelInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// The catalog endpoint answers either with a bare list or a wrapped one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ModelList {
    Bare(Vec<ModelInfo>),
    Wrapped { models: Vec<ModelInfo> },
}

impl From<ModelList> for Vec<ModelInfo> {
    fn from(list: ModelList) -> Self {
        match list {
            ModelList::Bare(models) | ModelList::Wrapped { models } => models,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_uses_camel_case_agents_md() {
        let draft = AgentDraft {
            id: "backend-1".to_string(),
            agents_md: "# Workspace".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["agentsMd"], "# Workspace");
        assert!(json.get("agents_md").is_none());
    }

    #[test]
    fn test_generated_profile_tolerates_missing_and_null_fields() {
        let parsed: GeneratedProfile =
            serde_json::from_str(r#"{"id":"backend-1","model":"gpt-x","soul":null}"#).unwrap();
        assert_eq!(parsed.id.as_deref(), Some("backend-1"));
        assert_eq!(parsed.model.as_deref(), Some("gpt-x"));
        assert!(parsed.name.is_none());
        assert!(parsed.soul.is_none());
        assert!(parsed.agents_md.is_none());
    }

    #[test]
    fn test_generated_profile_ignores_unknown_fields() {
        let parsed: GeneratedProfile =
            serde_json::from_str(r#"{"name":"Scout","reasoning":"long text"}"#).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("Scout"));
    }

    #[test]
    fn test_model_list_shapes() {
        let bare: ModelList = serde_json::from_str(r#"[{"id":"a"},{"id":"b"}]"#).unwrap();
        let wrapped: ModelList = serde_json::from_str(r#"{"models":[{"id":"a"}]}"#).unwrap();
        assert_eq!(Vec::<ModelInfo>::from(bare).len(), 2);
        assert_eq!(Vec::<ModelInfo>::from(wrapped), vec![ModelInfo::new("a")]);
    }
}
