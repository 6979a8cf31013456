//! Non-interactive catalog listing.

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table};
use modelpick_core::catalog::{self, ModelDescriptor, format_context, format_pricing};
use modelpick_core::config::Config;
use modelpick_core::loader::{CatalogState, ConfiguredSource};

pub async fn run(config: &Config, query: Option<&str>, json: bool) -> Result<()> {
    let source = ConfiguredSource::from_config(config)?;

    let mut state = CatalogState::new(config.preferred_model.clone());
    let mut default_id = None;
    let outcome = state
        .load(&source, None, |id| default_id = Some(id.to_string()))
        .await;
    tracing::debug!(url = %source.endpoint(), ?outcome, "Catalog loaded");

    if let Some(error) = state.error_message() {
        eprintln!("Warning: {error}");
        eprintln!("Using fallback catalog.");
    }

    let query = query.unwrap_or_default();
    let models = catalog::filter(state.models(), query);

    if json {
        let text = serde_json::to_string_pretty(&models).context("serialize models")?;
        println!("{text}");
        return Ok(());
    }

    if models.is_empty() {
        println!("No models match \"{query}\"");
    } else {
        println!("{}", models_table(&models, default_id.as_deref()));
    }
    if let Some(id) = default_id {
        println!("Default: {id}");
    }
    Ok(())
}

fn models_table(models: &[&ModelDescriptor], default_id: Option<&str>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "ID", "Name", "Context", "Pricing"]);

    for model in models {
        let marker = if default_id == Some(model.id.as_str()) {
            "*"
        } else {
            ""
        };
        table.add_row(vec![
            marker.to_string(),
            model.id.clone(),
            model.name.clone(),
            format_context(model.context_length),
            format_pricing(model.pricing.as_ref()),
        ]);
    }

    table
}
