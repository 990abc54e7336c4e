use anyhow::Result;
use powergate_app_core::adapters::KvSession;
use powergate_app_core::persistence::FilePersistence;
use powergate_app_core::{GateSettings, SessionPort};

pub fn handle_token_set(persistence: &FilePersistence, token: &str) -> Result<()> {
    if token.trim().is_empty() {
        anyhow::bail!("Token cannot be empty");
    }
    KvSession::new(persistence.state_store()?).set_token(token.trim())?;
    println!(":: Token saved");
    Ok(())
}

pub fn handle_token_clear(persistence: &FilePersistence) -> Result<()> {
    KvSession::new(persistence.state_store()?).remove_token()?;
    println!(":: Token cleared");
    Ok(())
}

pub fn handle_config_show(settings: &GateSettings) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}

/// Persist the effective settings (saved values plus command-line overrides).
pub fn handle_config_save(persistence: &FilePersistence, settings: &GateSettings) -> Result<()> {
    persistence.save_settings(settings)?;
    println!(":: Settings saved");
    println!("   Backend:  {}", settings.backend_url);
    println!("   Interval: {} ms", settings.poll_interval_ms);
    Ok(())
}
