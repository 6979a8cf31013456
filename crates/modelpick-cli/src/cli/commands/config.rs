//! Config command handlers.

use anyhow::{Context, Result};
use modelpick_core::config::{self, Config};

pub fn path() {
    let config_path = config::paths::config_path();
    if config_path.exists() {
        println!("{}", config_path.display());
    } else {
        println!("{} (not created yet)", config_path.display());
    }
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

pub fn generate() -> Result<()> {
    print!("{}", Config::generate()?);
    Ok(())
}

/// Prints the effective configuration, command-line overrides included.
pub fn show(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
