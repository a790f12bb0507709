//! Show or save the effective configuration.

use facecam_common::config::AppConfig;

pub fn run(config: &AppConfig, save: bool) -> anyhow::Result<()> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    println!("{}", serde_json::to_string_pretty(config)?);

    if save {
        let path = config
            .save()
            .map_err(|e| anyhow::anyhow!("Failed to save config: {e}"))?;
        tracing::info!("Configuration saved to: {}", path.display());
    }

    Ok(())
}
