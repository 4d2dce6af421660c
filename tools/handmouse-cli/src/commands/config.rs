//! Show or write the configuration.

use handmouse_common::config::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, write: bool) -> anyhow::Result<()> {
    if write {
        let path = config
            .save()
            .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    println!("# {}", config_file_path().display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
