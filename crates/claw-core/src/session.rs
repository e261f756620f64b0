//! Wizard session state machine.
//!
//! A session moves through three steps:
//!
//! ```text
//! Describe ──submit──▶ Loading ──ok──▶ Review ──create ok──▶ closed
//!    ▲                    │              │
//!    └──────fail──────────┘◀──refine─────┘
//! ```
//!
//! The session performs no I/O. Submitting returns a request carrying a
//! [`RequestToken`]; the caller performs the call and hands the result back
//! with the same token. Results whose token is no longer outstanding, or that
//! arrive after the session closed, are ignored.

use crate::agent_id::{normalize_id, validate_id};
use crate::error::WizardError;
use crate::mode::WizardMode;
use crate::template::{DEFAULT_EMOJI, ORCHESTRATOR};
use claw_api::{AgentDraft, ApiError, GeneratedProfile, ModelInfo};

/// Shown when generation fails, whatever the cause.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate config. Please try again.";

/// Shown when creation fails without a message of its own.
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create agent";

/// Appended to the original description when refining.
pub const REFINEMENT_MARKER: &str = "\n\n[Refinement]: ";

/// Identifies one outstanding external call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// The visible step of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Describe,
    Loading,
    Review,
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Describe => "describe",
            Self::Loading => "loading",
            Self::Review => "review",
        };
        write!(f, "{s}")
    }
}

/// Step plus the token of whatever call that step is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Describe,
    Loading { token: RequestToken },
    Review { creating: Option<RequestToken> },
}

/// An editable draft field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Name,
    Emoji,
    Model,
    Soul,
    Tools,
    AgentsMd,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 7] = [
        Field::Id,
        Field::Emoji,
        Field::Name,
        Field::Model,
        Field::Soul,
        Field::Tools,
        Field::AgentsMd,
    ];

    /// Form label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "Agent ID *",
            Self::Name => "Name",
            Self::Emoji => "Emoji",
            Self::Model => "Model",
            Self::Soul => "SOUL.md",
            Self::Tools => "TOOLS.md",
            Self::AgentsMd => "AGENTS.md",
        }
    }

    /// Whether the field holds a multi-line document.
    pub fn is_document(self) -> bool {
        matches!(self, Self::Soul | Self::Tools | Self::AgentsMd)
    }
}

/// How a call result was absorbed by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// Generation succeeded; the session is reviewing the new draft.
    Applied,
    /// The call failed; the session recorded an error and is interactive again.
    Failed,
    /// Creation succeeded; the session is closed.
    Finished,
    /// The result was stale or the session was closed; nothing changed.
    Ignored,
}

/// A generation call the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub token: RequestToken,
    /// Description exactly as typed, refinement marker included.
    pub description: String,
}

/// A creation call the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationRequest {
    pub token: RequestToken,
    pub draft: AgentDraft,
}

/// Build a draft from a generation response.
///
/// Missing fields become empty; a missing or empty emoji becomes
/// [`DEFAULT_EMOJI`].
pub fn draft_from_generated(profile: GeneratedProfile) -> AgentDraft {
    AgentDraft {
        id: profile.id.unwrap_or_default(),
        name: profile.name.unwrap_or_default(),
        emoji: profile
            .emoji
            .filter(|emoji| !emoji.is_empty())
            .unwrap_or_else(|| DEFAULT_EMOJI.to_string()),
        model: profile.model.unwrap_or_default(),
        soul: profile.soul.unwrap_or_default(),
        tools: profile.tools.unwrap_or_default(),
        agents_md: profile.agents_md.unwrap_or_default(),
    }
}

/// One open wizard.
#[derive(Debug)]
pub struct WizardSession {
    mode: WizardMode,
    phase: Phase,
    description: String,
    original_description: String,
    draft: Option<AgentDraft>,
    error: Option<String>,
    models: Vec<ModelInfo>,
    next_token: u64,
    closed: bool,
}

impl WizardSession {
    /// Open a session. Orchestrator sessions start reviewing the built-in
    /// template; standard sessions start on an empty description.
    pub fn open(mode: WizardMode, models: Vec<ModelInfo>) -> Self {
        let (phase, draft) = match mode {
            WizardMode::Standard => (Phase::Describe, None),
            WizardMode::Orchestrator => (
                Phase::Review { creating: None },
                Some(ORCHESTRATOR.to_draft()),
            ),
        };
        tracing::debug!(%mode, models = models.len(), "wizard opened");
        Self {
            mode,
            phase,
            description: String::new(),
            original_description: String::new(),
            draft,
            error: None,
            models,
            next_token: 1,
            closed: false,
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    pub fn step(&self) -> WizardStep {
        match self.phase {
            Phase::Describe => WizardStep::Describe,
            Phase::Loading { .. } => WizardStep::Loading,
            Phase::Review { .. } => WizardStep::Review,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The description as it was when generation was last requested.
    pub fn original_description(&self) -> &str {
        &self.original_description
    }

    /// The draft, if one has been populated. After a refine it is retained
    /// while the session is back on the describe step.
    pub fn draft(&self) -> Option<&AgentDraft> {
        self.draft.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn models(&self) -> &[ModelInfo] {
        &self.models
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The token of the call currently in flight, if any.
    pub fn pending(&self) -> Option<RequestToken> {
        match self.phase {
            Phase::Loading { token } => Some(token),
            Phase::Review { creating } => creating,
            Phase::Describe => None,
        }
    }

    /// Whether a creation call is in flight.
    pub fn is_creating(&self) -> bool {
        matches!(self.phase, Phase::Review { creating: Some(_) })
    }

    /// Current value of a draft field, empty when there is no draft.
    pub fn field(&self, field: Field) -> &str {
        let Some(draft) = self.draft.as_ref() else {
            return "";
        };
        match field {
            Field::Id => &draft.id,
            Field::Name => &draft.name,
            Field::Emoji => &draft.emoji,
            Field::Model => &draft.model,
            Field::Soul => &draft.soul,
            Field::Tools => &draft.tools,
            Field::AgentsMd => &draft.agents_md,
        }
    }

    /// Whether the generate affordance should be enabled.
    pub fn can_generate(&self) -> bool {
        !self.closed && self.phase == Phase::Describe && !self.description.trim().is_empty()
    }

    /// Whether the refine affordance should be offered.
    pub fn can_refine(&self) -> bool {
        !self.closed
            && self.mode.allows_refine()
            && self.phase == Phase::Review { creating: None }
    }

    /// Whether the create affordance should be enabled.
    pub fn can_create(&self) -> bool {
        !self.closed
            && self.phase == Phase::Review { creating: None }
            && !self.field(Field::Id).trim().is_empty()
    }

    // ── Describe step ──────────────────────────────────────────────────

    /// Replace the description text.
    pub fn set_description(&mut self, text: impl Into<String>) -> Result<(), WizardError> {
        self.ensure_step(Phase::Describe, "edit the description")?;
        self.description = text.into();
        self.error = None;
        Ok(())
    }

    /// Request generation from the current description.
    ///
    /// A blank description records an error and leaves the session on the
    /// describe step.
    pub fn submit_description(&mut self) -> Result<GenerationRequest, WizardError> {
        self.ensure_step(Phase::Describe, "generate")?;
        if self.description.trim().is_empty() {
            return Err(self.fail(WizardError::DescriptionRequired));
        }

        self.error = None;
        self.original_description = self.description.clone();
        let token = self.issue_token();
        self.phase = Phase::Loading { token };
        tracing::debug!(?token, "generation requested");

        Ok(GenerationRequest {
            token,
            description: self.description.clone(),
        })
    }

    /// Absorb the result of a generation call.
    pub fn finish_generation(
        &mut self,
        token: RequestToken,
        result: Result<GeneratedProfile, ApiError>,
    ) -> Settled {
        if self.closed || self.phase != (Phase::Loading { token }) {
            tracing::debug!(?token, "ignoring stale generation result");
            return Settled::Ignored;
        }

        match result {
            Ok(profile) => {
                self.draft = Some(draft_from_generated(profile));
                self.phase = Phase::Review { creating: None };
                self.error = None;
                tracing::debug!(?token, "generation applied");
                Settled::Applied
            }
            Err(err) => {
                tracing::warn!(?token, error = %err, "generation failed");
                self.phase = Phase::Describe;
                self.error = Some(GENERATION_FAILED_MESSAGE.to_string());
                Settled::Failed
            }
        }
    }

    // ── Review step ────────────────────────────────────────────────────

    /// Go back to the describe step with the original description plus a
    /// refinement marker. The draft is retained.
    pub fn refine(&mut self) -> Result<(), WizardError> {
        if self.closed {
            return Err(WizardError::Closed);
        }
        if !self.mode.allows_refine() {
            return Err(WizardError::RefineUnavailable);
        }
        self.ensure_review_idle("refine")?;

        self.description = format!("{}{REFINEMENT_MARKER}", self.original_description);
        self.phase = Phase::Describe;
        self.error = None;
        tracing::debug!("refining description");
        Ok(())
    }

    /// Replace one draft field. Identifiers are normalized on the way in and
    /// models must come from the catalog (or be empty).
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<(), WizardError> {
        self.ensure_review_idle("edit fields")?;
        let mut value = value.into();

        match field {
            Field::Id => value = normalize_id(&value),
            Field::Model => {
                let known = value.is_empty()
                    || self.models.is_empty()
                    || self.models.iter().any(|model| model.id == value);
                if !known {
                    return Err(WizardError::UnknownModel(value));
                }
            }
            _ => {}
        }

        let draft = self.draft.get_or_insert_with(AgentDraft::default);
        let slot = match field {
            Field::Id => &mut draft.id,
            Field::Name => &mut draft.name,
            Field::Emoji => &mut draft.emoji,
            Field::Model => &mut draft.model,
            Field::Soul => &mut draft.soul,
            Field::Tools => &mut draft.tools,
            Field::AgentsMd => &mut draft.agents_md,
        };
        *slot = value;
        self.error = None;
        Ok(())
    }

    pub fn set_id(&mut self, id: &str) -> Result<(), WizardError> {
        self.set_field(Field::Id, id)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), WizardError> {
        self.set_field(Field::Name, name)
    }

    pub fn set_emoji(&mut self, emoji: impl Into<String>) -> Result<(), WizardError> {
        self.set_field(Field::Emoji, emoji)
    }

    pub fn set_model(&mut self, model: impl Into<String>) -> Result<(), WizardError> {
        self.set_field(Field::Model, model)
    }

    pub fn set_soul(&mut self, soul: impl Into<String>) -> Result<(), WizardError> {
        self.set_field(Field::Soul, soul)
    }

    pub fn set_tools(&mut self, tools: impl Into<String>) -> Result<(), WizardError> {
        self.set_field(Field::Tools, tools)
    }

    pub fn set_agents_md(&mut self, agents_md: impl Into<String>) -> Result<(), WizardError> {
        self.set_field(Field::AgentsMd, agents_md)
    }

    /// Request creation of the current draft.
    ///
    /// An empty or malformed id records an error and issues no request.
    pub fn submit_creation(&mut self) -> Result<CreationRequest, WizardError> {
        self.ensure_review_idle("create")?;
        let draft = self.draft.clone().unwrap_or_default();
        if let Err(err) = validate_id(&draft.id) {
            return Err(self.fail(err));
        }

        self.error = None;
        let token = self.issue_token();
        self.phase = Phase::Review {
            creating: Some(token),
        };
        tracing::debug!(?token, id = %draft.id, "creation requested");

        Ok(CreationRequest { token, draft })
    }

    /// Absorb the result of a creation call.
    pub fn finish_creation(&mut self, token: RequestToken, result: Result<(), ApiError>) -> Settled {
        if self.closed
            || self.phase
                != (Phase::Review {
                    creating: Some(token),
                })
        {
            tracing::debug!(?token, "ignoring stale creation result");
            return Settled::Ignored;
        }

        match result {
            Ok(()) => {
                tracing::info!(?token, "agent created");
                self.close();
                Settled::Finished
            }
            Err(err) => {
                tracing::warn!(?token, error = %err, "creation failed");
                self.phase = Phase::Review { creating: None };
                self.error = Some(
                    err.message()
                        .unwrap_or_else(|| CREATE_FAILED_MESSAGE.to_string()),
                );
                Settled::Failed
            }
        }
    }

    // ── Lifecycle ──────────────────────────────────────────────────────

    /// Close the session, discarding every field. In-flight calls are not
    /// cancelled; their results are ignored when they arrive.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.draft = None;
        self.description.clear();
        self.original_description.clear();
        self.error = None;
        tracing::debug!("wizard closed");
    }

    // ── Helpers ────────────────────────────────────────────────────────

    fn issue_token(&mut self) -> RequestToken {
        let token = RequestToken(self.next_token);
        self.next_token += 1;
        token
    }

    /// Record a validation failure as the visible error and hand it back.
    fn fail(&mut self, err: WizardError) -> WizardError {
        self.error = Some(err.to_string());
        err
    }

    fn ensure_step(&self, expected: Phase, action: &'static str) -> Result<(), WizardError> {
        if self.closed {
            return Err(WizardError::Closed);
        }
        if self.phase != expected {
            return Err(self.misuse(action));
        }
        Ok(())
    }

    fn ensure_review_idle(&self, action: &'static str) -> Result<(), WizardError> {
        if self.closed {
            return Err(WizardError::Closed);
        }
        match self.phase {
            Phase::Review { creating: None } => Ok(()),
            Phase::Review { creating: Some(_) } => Err(WizardError::Busy),
            _ => Err(self.misuse(action)),
        }
    }

    fn misuse(&self, action: &'static str) -> WizardError {
        if matches!(self.phase, Phase::Loading { .. }) {
            return WizardError::Busy;
        }
        WizardError::WrongStep {
            action,
            step: self.step(),
        }
    }
}
