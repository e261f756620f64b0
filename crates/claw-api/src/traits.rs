//! Controller API trait definition.

use crate::error::ApiError;
use crate::types::{AgentDraft, GeneratedProfile, ModelInfo};
use async_trait::async_trait;

/// The three backend operations the wizard depends on.
///
/// Implementations own transport and authentication; the wizard treats every
/// call as a single opaque request/response.
#[async_trait]
pub trait ControllerApi: Send + Sync {
    /// Human-readable endpoint description for logs and status lines.
    fn endpoint(&self) -> &str;

    /// List the model identifiers an agent may be assigned.
    async fn models(&self) -> Result<Vec<ModelInfo>, ApiError>;

    /// Turn a natural-language description into a (possibly partial) profile.
    ///
    /// The description is sent exactly as typed.
    async fn generate(&self, description: &str) -> Result<GeneratedProfile, ApiError>;

    /// Persist a finished profile as a new agent.
    async fn create(&self, draft: &AgentDraft) -> Result<(), ApiError>;
}

// Compile-time check: ControllerApi must be object-safe
const _: () = {
    fn _assert_object_safe(_: &dyn ControllerApi) {}
};
