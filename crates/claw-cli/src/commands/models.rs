use claw_api::ControllerApi;
use claw_core::Config;

/// Print the model catalog, one ID per line.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let api = super::controller(config);
    let models = api
        .models()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load models from {}: {e}", api.endpoint()))?;

    if models.is_empty() {
        println!("No models available.");
    } else {
        for model in &models {
            println!("{}", model.id);
        }
    }
    Ok(())
}
