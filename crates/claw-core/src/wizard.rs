//! Async driver that runs a [`WizardSession`] against a [`ControllerApi`].
//!
//! Each call is awaited inline, so at most one request is ever outstanding.
//! Front ends that must stay responsive while a call runs (the TUI) drive the
//! session directly and deliver results with their tokens instead.

use crate::error::WizardError;
use crate::mode::WizardMode;
use crate::session::{Settled, WizardSession};
use claw_api::ControllerApi;
use std::sync::Arc;

pub struct Wizard {
    api: Arc<dyn ControllerApi>,
    session: WizardSession,
}

impl Wizard {
    /// Wrap an already opened session.
    pub fn new(api: Arc<dyn ControllerApi>, session: WizardSession) -> Self {
        Self { api, session }
    }

    /// Load the model catalog and open a session in `mode`.
    ///
    /// An unreachable catalog leaves the model list empty, which lets any
    /// model through instead of aborting the wizard.
    pub async fn open(api: Arc<dyn ControllerApi>, mode: WizardMode) -> Self {
        let models = match api.models().await {
            Ok(models) => {
                tracing::debug!(endpoint = api.endpoint(), models = models.len(), "catalog loaded");
                models
            }
            Err(err) => {
                tracing::warn!(endpoint = api.endpoint(), error = %err, "failed to load models");
                Vec::new()
            }
        };
        Self::new(api, WizardSession::open(mode, models))
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut WizardSession {
        &mut self.session
    }

    pub fn into_session(self) -> WizardSession {
        self.session
    }

    /// Submit the description and wait for the generated profile.
    pub async fn generate(&mut self) -> Result<Settled, WizardError> {
        let request = self.session.submit_description()?;
        let result = self.api.generate(&request.description).await;
        Ok(self.session.finish_generation(request.token, result))
    }

    /// Submit the draft and wait for the creation result.
    pub async fn create(&mut self) -> Result<Settled, WizardError> {
        let request = self.session.submit_creation()?;
        let result = self.api.create(&request.draft).await;
        Ok(self.session.finish_creation(request.token, result))
    }

    /// Close the session without contacting the backend.
    pub fn cancel(&mut self) {
        self.session.close();
    }
}
