//! Wizard modes.

use serde::{Deserialize, Serialize};

/// Which variant of the wizard a session runs.
///
/// Fixed when the session opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardMode {
    /// Describe, generate, review, create.
    #[default]
    Standard,
    /// Skip generation and review the built-in orchestrator template.
    Orchestrator,
}

impl WizardMode {
    /// Whether the session starts from the built-in template.
    pub fn is_orchestrator(self) -> bool {
        self == Self::Orchestrator
    }

    /// Whether the operator may go back from review to amend the description.
    pub fn allows_refine(self) -> bool {
        self == Self::Standard
    }
}

impl std::fmt::Display for WizardMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Orchestrator => write!(f, "orchestrator"),
        }
    }
}
