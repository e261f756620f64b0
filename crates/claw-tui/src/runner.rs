//! TUI runner: sets up the terminal and runs the main loop.
//!
//! Generation and creation calls run in background tokio tasks so the
//! wizard keeps animating and stays cancellable while the backend works.
//! Each result travels back tagged with the token it was issued under.

use crate::app::{Action, WizardApp, WizardOutcome};
use crate::event::{poll_event, TermEvent};
use claw_api::{ApiError, ControllerApi, GeneratedProfile};
use claw_core::{RequestToken, WizardSession};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use tokio::sync::mpsc;

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

/// How long a closed wizard waits for a creation call it abandoned.
const CREATION_GRACE: Duration = Duration::from_secs(5);

/// Results sent from background calls back to the TUI.
enum CallEvent {
    Generated(RequestToken, Result<GeneratedProfile, ApiError>),
    Created(RequestToken, Result<(), ApiError>),
}

/// Run the wizard until the agent is created or the operator cancels.
pub async fn run_wizard(
    api: Arc<dyn ControllerApi>,
    session: WizardSession,
) -> std::io::Result<WizardOutcome> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = event_loop(&mut terminal, api, session).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    api: Arc<dyn ControllerApi>,
    session: WizardSession,
) -> std::io::Result<WizardOutcome> {
    let mut app = WizardApp::new(session);
    let (tx, mut rx) = mpsc::unbounded_channel::<CallEvent>();

    while app.running {
        terminal.draw(|frame| app.render(frame))?;

        while let Ok(event) = rx.try_recv() {
            match event {
                CallEvent::Generated(token, result) => app.on_generated(token, result),
                CallEvent::Created(token, result) => app.on_created(token, result),
            }
        }
        if !app.running {
            break;
        }

        app.advance_tick();

        match poll_event(Duration::from_millis(80))? {
            TermEvent::Key(key) => match app.handle_key(key) {
                Action::Generate(request) => {
                    let api = api.clone();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let result = api.generate(&request.description).await;
                        let _ = tx.send(CallEvent::Generated(request.token, result));
                    });
                }
                Action::Create(request) => {
                    let api = api.clone();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let result = api.create(&request.draft).await;
                        let _ = tx.send(CallEvent::Created(request.token, result));
                    });
                }
                Action::Quit => break,
                Action::None => {}
            },
            TermEvent::Resize(_, _) | TermEvent::Tick => {}
        }
    }

    if let Some(token) = app.unconfirmed_creation() {
        tracing::debug!(?token, "waiting for abandoned creation");
        match await_creation(&mut rx, token, CREATION_GRACE).await {
            Some(result) => app.on_unconfirmed_created(token, result),
            None => tracing::warn!(?token, "creation still unanswered at exit"),
        }
    }

    Ok(app.outcome.unwrap_or(WizardOutcome::Cancelled))
}

/// Wait up to `grace` for the creation result tagged `token`, skipping any
/// other late results.
async fn await_creation(
    rx: &mut mpsc::UnboundedReceiver<CallEvent>,
    token: RequestToken,
    grace: Duration,
) -> Option<Result<(), ApiError>> {
    let wait = async {
        while let Some(event) = rx.recv().await {
            if let CallEvent::Created(settled, result) = event {
                if settled == token {
                    return Some(result);
                }
            }
        }
        None
    };
    tokio::time::timeout(grace, wait).await.ok().flatten()
}
