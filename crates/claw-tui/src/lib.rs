//! claw-tui: terminal front end for the agent configuration wizard.

pub mod app;
pub mod event;
pub mod runner;

pub use app::{Action, WizardApp, WizardOutcome};
pub use runner::run_wizard;
