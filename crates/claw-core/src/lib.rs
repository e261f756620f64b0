//! claw-core: agent configuration wizard state, validation, and templates.

pub mod agent_id;
pub mod config;
mod error;
pub mod mode;
pub mod session;
pub mod template;
pub mod wizard;

pub use agent_id::{normalize_id, validate_id};
pub use claw_api::{AgentDraft, GeneratedProfile, ModelInfo};
pub use config::{Config, ConfigStore};
pub use error::{ConfigError, WizardError};
pub use mode::WizardMode;
pub use session::{
    draft_from_generated, CreationRequest, Field, GenerationRequest, RequestToken, Settled,
    WizardSession, WizardStep, CREATE_FAILED_MESSAGE, GENERATION_FAILED_MESSAGE,
};
pub use template::{description_examples, find_example, DescriptionExample, ORCHESTRATOR};
pub use wizard::Wizard;
