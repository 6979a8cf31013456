//! Interactive picker command.

use anyhow::Result;
use modelpick_core::config::Config;
use modelpick_core::loader::ConfiguredSource;
use modelpick_tui::PickerOptions;

pub fn run(config: &Config, selected: Option<String>, disabled: bool) -> Result<()> {
    let source = ConfiguredSource::from_config(config)?;
    tracing::info!(url = %source.endpoint(), "Opening model picker");

    let options = PickerOptions {
        preferred_model: config.preferred_model.clone(),
        selected,
        disabled,
    };

    if let Some(id) = modelpick_tui::run_picker(source, options)? {
        println!("{id}");
    }
    Ok(())
}
