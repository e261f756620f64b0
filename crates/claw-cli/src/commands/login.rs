use claw_core::ConfigStore;

/// Store the API key used for later requests.
pub fn run(store: &ConfigStore, key: &str) -> anyhow::Result<()> {
    store.store_api_key(key)?;
    println!("API key saved to {}", store.path().display());
    Ok(())
}
