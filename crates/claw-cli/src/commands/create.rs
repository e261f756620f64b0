//! Headless agent creation: generate, apply overrides, create.

use claw_api::{AgentDraft, ControllerApi};
use claw_core::{
    description_examples, find_example, Config, Settled, Wizard, WizardMode,
    CREATE_FAILED_MESSAGE, GENERATION_FAILED_MESSAGE,
};
use std::io::Write;
use std::sync::Arc;

/// `claw create` options.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub description: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub emoji: Option<String>,
    pub model: Option<String>,
    pub dry_run: bool,
    pub json: bool,
}

/// Pick the description text: an explicit one wins, otherwise the named
/// example's text.
pub fn resolve_description(
    description: Option<String>,
    example: Option<String>,
) -> anyhow::Result<String> {
    match (description, example) {
        (Some(description), _) => Ok(description),
        (None, Some(label)) => find_example(&label)
            .map(|example| example.text.to_string())
            .ok_or_else(|| {
                let available = description_examples()
                    .iter()
                    .map(|example| example.label)
                    .collect::<Vec<_>>()
                    .join(", ");
                anyhow::anyhow!("Unknown example: {label}. Available: {available}")
            }),
        (None, None) => Ok(String::new()),
    }
}

pub async fn run(config: &Config, options: CreateOptions) -> anyhow::Result<()> {
    let api = super::controller(config);
    let mut stdout = std::io::stdout();
    execute(api, options, &mut stdout).await?;
    Ok(())
}

/// Drive a standard-mode session to completion, writing the draft to `out`.
/// Returns the draft that was (or, for a dry run, would have been) created.
pub async fn execute(
    api: Arc<dyn ControllerApi>,
    options: CreateOptions,
    out: &mut impl Write,
) -> anyhow::Result<AgentDraft> {
    let mut wizard = Wizard::open(api, WizardMode::Standard).await;

    wizard.session_mut().set_description(options.description)?;
    if wizard.generate().await? != Settled::Applied {
        let message = wizard
            .session()
            .error()
            .unwrap_or(GENERATION_FAILED_MESSAGE)
            .to_string();
        anyhow::bail!(message);
    }

    let session = wizard.session_mut();
    if let Some(id) = options.id {
        session.set_id(&id)?;
    }
    if let Some(name) = options.name {
        session.set_name(name)?;
    }
    if let Some(emoji) = options.emoji {
        session.set_emoji(emoji)?;
    }
    if let Some(model) = options.model {
        session.set_model(model)?;
    }

    let draft = session.draft().cloned().unwrap_or_default();
    if options.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&draft)?)?;
    } else {
        print_draft(&draft, out)?;
    }

    if options.dry_run {
        if !options.json {
            writeln!(out, "Dry run: agent not created.")?;
        }
        return Ok(draft);
    }

    match wizard.create().await? {
        Settled::Finished => {
            if !options.json {
                writeln!(out, "Created agent {}", draft.id)?;
            }
            Ok(draft)
        }
        _ => {
            let message = wizard
                .session()
                .error()
                .unwrap_or(CREATE_FAILED_MESSAGE)
                .to_string();
            anyhow::bail!(message)
        }
    }
}

fn print_draft(draft: &AgentDraft, out: &mut impl Write) -> std::io::Result<()> {
    let model = if draft.model.is_empty() {
        "(default)"
    } else {
        draft.model.as_str()
    };
    writeln!(out, "{} {} ({})", draft.emoji, draft.name, draft.id)?;
    writeln!(out, "model: {model}")?;
    for (title, body) in [
        ("SOUL.md", &draft.soul),
        ("TOOLS.md", &draft.tools),
        ("AGENTS.md", &draft.agents_md),
    ] {
        writeln!(out, "\n--- {title} ---")?;
        writeln!(out, "{}", body.trim_end())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use claw_api::{ApiError, GeneratedProfile, ModelInfo};
    use std::sync::Mutex;

    struct MockApi {
        fail_models: bool,
        generated: Result<GeneratedProfile, u16>,
        create_status: Option<u16>,
        created: Mutex<Vec<AgentDraft>>,
    }

    impl MockApi {
        fn generating(profile: GeneratedProfile) -> Self {
            Self {
                fail_models: false,
                generated: Ok(profile),
                create_status: None,
                created: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ControllerApi for MockApi {
        fn endpoint(&self) -> &str {
            "mock://controller"
        }

        async fn models(&self) -> Result<Vec<ModelInfo>, ApiError> {
            if self.fail_models {
                return Err(ApiError::Rejected {
                    status: 503,
                    detail: None,
                });
            }
            Ok(vec![ModelInfo::new("gpt-x")])
        }

        async fn generate(&self, _description: &str) -> Result<GeneratedProfile, ApiError> {
            self.generated.clone().map_err(|status| ApiError::Rejected {
                status,
                detail: None,
            })
        }

        async fn create(&self, draft: &AgentDraft) -> Result<(), ApiError> {
            if let Some(status) = self.create_status {
                return Err(ApiError::Rejected {
                    status,
                    detail: Some("Agent already exists".to_string()),
                });
            }
            self.created.lock().unwrap().push(draft.clone());
            Ok(())
        }
    }

    fn profile() -> GeneratedProfile {
        GeneratedProfile {
            id: Some("researcher".to_string()),
            name: Some("Researcher".to_string()),
            soul: Some("Curious.".to_string()),
            ..Default::default()
        }
    }

    fn options(description: &str) -> CreateOptions {
        CreateOptions {
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_with_overrides() {
        let api = Arc::new(MockApi::generating(profile()));
        let mut out = Vec::new();
        let draft = execute(
            api.clone(),
            CreateOptions {
                id: Some("Deep Research".to_string()),
                model: Some("gpt-x".to_string()),
                ..options("A research agent")
            },
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(draft.id, "deep-research");
        assert_eq!(draft.emoji, "🤖");
        assert_eq!(draft.model, "gpt-x");
        assert_eq!(api.created.lock().unwrap().as_slice(), &[draft]);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("--- SOUL.md ---\nCurious."));
        assert!(text.ends_with("Created agent deep-research\n"));
    }

    #[tokio::test]
    async fn test_dry_run_does_not_create() {
        let api = Arc::new(MockApi::generating(profile()));
        let mut out = Vec::new();
        execute(
            api.clone(),
            CreateOptions {
                dry_run: true,
                json: true,
                ..options("A research agent")
            },
            &mut out,
        )
        .await
        .unwrap();

        assert!(api.created.lock().unwrap().is_empty());
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["id"], "researcher");
        assert_eq!(json["agentsMd"], "");
    }

    #[tokio::test]
    async fn test_blank_description_is_rejected() {
        let api = Arc::new(MockApi::generating(profile()));
        let err = execute(api, options("  "), &mut Vec::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "Please describe what the agent should do");
    }

    #[tokio::test]
    async fn test_generation_failure_uses_generic_message() {
        let api = Arc::new(MockApi {
            fail_models: false,
            generated: Err(500),
            create_status: None,
            created: Mutex::new(Vec::new()),
        });
        let err = execute(api, options("agent"), &mut Vec::new()).await.unwrap_err();
        assert_eq!(err.to_string(), GENERATION_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_unknown_model_is_rejected() {
        let api = Arc::new(MockApi::generating(profile()));
        let result = execute(
            api.clone(),
            CreateOptions {
                model: Some("nope".to_string()),
                ..options("agent")
            },
            &mut Vec::new(),
        )
        .await;
        assert!(result.is_err());
        assert!(api.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejection_surfaces_detail() {
        let api = Arc::new(MockApi {
            fail_models: false,
            generated: Ok(profile()),
            create_status: Some(409),
            created: Mutex::new(Vec::new()),
        });
        let err = execute(api, options("agent"), &mut Vec::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "Agent already exists");
    }

    #[tokio::test]
    async fn test_unreachable_catalog_accepts_any_model() {
        let api = Arc::new(MockApi {
            fail_models: true,
            ..MockApi::generating(profile())
        });
        let draft = execute(
            api.clone(),
            CreateOptions {
                model: Some("anything".to_string()),
                ..options("agent")
            },
            &mut Vec::new(),
        )
        .await
        .unwrap();
        assert_eq!(draft.model, "anything");
        assert_eq!(api.created.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_resolve_description_from_example() {
        let text = resolve_description(None, Some("sales agent".to_string())).unwrap();
        assert!(text.starts_with("A sales agent"));
        assert_eq!(
            resolve_description(Some("mine".to_string()), None).unwrap(),
            "mine"
        );
        let err = resolve_description(None, Some("chef".to_string())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown example: chef. Available: Backend Dev, Sales Agent, Researcher"
        );
    }
}
