use claw_core::{Config, Wizard, WizardMode};
use claw_tui::WizardOutcome;

/// Run the interactive wizard.
pub async fn run(config: &Config, mode: WizardMode) -> anyhow::Result<()> {
    let api = super::controller(config);
    let session = Wizard::open(api.clone(), mode).await.into_session();

    let outcome = claw_tui::run_wizard(api, session)
        .await
        .map_err(|e| anyhow::anyhow!("TUI error: {e}"))?;

    println!("{}", outcome_message(&outcome));
    Ok(())
}

fn outcome_message(outcome: &WizardOutcome) -> String {
    match outcome {
        WizardOutcome::Created(draft) => {
            format!("Created agent {} {} ({})", draft.emoji, draft.name, draft.id)
        }
        WizardOutcome::Unconfirmed(draft) => format!(
            "Closed before the controller answered; agent '{}' may or may not have been created. \
             Check the controller before retrying.",
            draft.id
        ),
        WizardOutcome::Cancelled => "Cancelled.".to_string(),
    }
}
