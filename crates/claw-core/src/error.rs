//! Error types for the claw-core crate.

use crate::session::WizardStep;

/// Errors raised by the wizard session.
///
/// The validation variants double as the operator-facing messages: their
/// `Display` text is what the session stores as its error message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    /// Description was empty or whitespace-only at generation time.
    #[error("Please describe what the agent should do")]
    DescriptionRequired,

    /// Identifier was empty at creation time.
    #[error("Agent ID is required")]
    IdRequired,

    /// Identifier contains characters outside `[a-z0-9-]`.
    #[error("Agent ID can only contain lowercase letters, numbers, and hyphens")]
    InvalidId,

    /// Refine was requested in orchestrator mode.
    #[error("Refine is not available for the orchestrator")]
    RefineUnavailable,

    /// Model is neither empty nor in the catalog.
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// Action does not apply to the current step.
    #[error("Cannot {action} during the {step} step")]
    WrongStep {
        action: &'static str,
        step: WizardStep,
    },

    /// A request is already in flight.
    #[error("A request is already in progress")]
    Busy,

    /// The session was closed.
    #[error("The wizard is closed")]
    Closed,
}

/// Errors reading or writing the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A value failed validation before being stored
    #[error("{0}")]
    Invalid(String),
}
