//! Config Command
//!
//! Show, locate, and initialize configuration files.

use crate::cli::ui::Output;
use crate::config::ConfigLoader;
use crate::types::{AquaError, Result};

/// Show current effective configuration (merged from all sources)
pub fn show(format: &str) -> Result<()> {
    let config = ConfigLoader::load()?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&config)?),
        _ => println!(
            "{}",
            toml::to_string_pretty(&config).map_err(|e| AquaError::Config(e.to_string()))?
        ),
    }

    Ok(())
}

/// Show configuration file paths
pub fn path() -> Result<()> {
    println!("Configuration paths:");
    println!();

    if let Some(global) = ConfigLoader::global_config_path() {
        let exists = if global.exists() { "✓" } else { "✗" };
        println!("  Global:  {} {}", exists, global.display());
    } else {
        println!("  Global:  (not available)");
    }

    let project = ConfigLoader::project_config_path();
    let exists = if project.exists() { "✓" } else { "✗" };
    println!("  Project: {} {}", exists, project.display());

    Ok(())
}

/// Initialize a config file with defaults
pub fn init(global: bool, force: bool) -> Result<()> {
    let output = Output::new();

    let path = if global {
        ConfigLoader::global_config_path()
            .ok_or_else(|| AquaError::Config("Cannot determine global config path".to_string()))?
    } else {
        ConfigLoader::project_config_path()
    };

    ConfigLoader::write_default(&path, force)?;
    output.success(&format!("Wrote default config to {}", path.display()));

    Ok(())
}
