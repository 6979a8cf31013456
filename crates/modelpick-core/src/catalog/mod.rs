//! Model catalog data model.
//!
//! A catalog is an ordered list of [`ModelDescriptor`]s. Order comes from the
//! source and every operation in this crate preserves it. Ids are unique within
//! one catalog snapshot; [`normalize_entries`] enforces that when decoding.

pub mod filter;
pub mod format;

use std::collections::HashSet;

pub use filter::{SEARCH_THRESHOLD, SearchState, filter, search_visible};
pub use format::{format_context, format_pricing, is_free};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Model id the default-selection policy looks for first.
pub const PREFERRED_MODEL_ID: &str = "deepseek/deepseek-r1-0528:free";

/// One selectable model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Token capacity.
    #[serde(
        default,
        alias = "contextLength",
        skip_serializing_if = "Option::is_none"
    )]
    pub context_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Pricing>,
    /// Informational only; never consulted by filtering or selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<Architecture>,
}

/// Per-token rates as decimal strings. Absent or `"0"` means free.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Architecture {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_modalities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_modalities: Vec<String>,
}

impl ModelDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            context_length: None,
            pricing: None,
            architecture: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_context_length(mut self, context_length: u64) -> Self {
        self.context_length = Some(context_length);
        self
    }

    #[must_use]
    pub fn with_pricing(mut self, prompt: &str, completion: &str) -> Self {
        self.pricing = Some(Pricing {
            prompt: Some(prompt.to_string()),
            completion: Some(completion.to_string()),
        });
        self
    }
}

/// The hard-coded catalog substituted when a load fails.
///
/// Contains [`PREFERRED_MODEL_ID`] so default selection always finds it.
pub fn fallback_catalog() -> Vec<ModelDescriptor> {
    vec![
        ModelDescriptor::new(PREFERRED_MODEL_ID, "DeepSeek R1 (Free)")
            .with_description("DeepSeek R1 model with free tier access")
            .with_context_length(128_000)
            .with_pricing("0", "0"),
        ModelDescriptor::new("openai/gpt-4o-mini", "GPT-4o Mini")
            .with_description("OpenAI's efficient GPT-4o mini model")
            .with_context_length(128_000)
            .with_pricing("0.00000015", "0.0000006"),
    ]
}

/// Converts raw JSON entries into a catalog.
///
/// Entries without a non-empty string `id` and `name` are dropped, as are
/// repeats of an id already seen. Optional fields of the wrong JSON type are
/// treated as absent.
pub fn normalize_entries(entries: &[Value]) -> Vec<ModelDescriptor> {
    let mut seen = HashSet::new();
    let mut models = Vec::with_capacity(entries.len());

    for entry in entries {
        let Some(model) = descriptor_from_value(entry) else {
            tracing::debug!("Dropping catalog entry without id/name");
            continue;
        };
        if !seen.insert(model.id.clone()) {
            tracing::debug!(id = %model.id, "Dropping duplicate catalog entry");
            continue;
        }
        models.push(model);
    }

    models
}

fn descriptor_from_value(entry: &Value) -> Option<ModelDescriptor> {
    let id = entry
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.trim().is_empty())?
        .to_string();
    let name = non_empty_str(entry.get("name"))?;

    let context_length = entry
        .get("context_length")
        .or_else(|| entry.get("contextLength"))
        .and_then(Value::as_u64);

    Some(ModelDescriptor {
        id,
        name,
        description: non_empty_str(entry.get("description")),
        context_length,
        pricing: entry.get("pricing").and_then(pricing_from_value),
        architecture: entry.get("architecture").and_then(architecture_from_value),
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn rate_from_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn pricing_from_value(value: &Value) -> Option<Pricing> {
    let obj = value.as_object()?;
    Some(Pricing {
        prompt: rate_from_value(obj.get("prompt")),
        completion: rate_from_value(obj.get("completion")),
    })
}

fn architecture_from_value(value: &Value) -> Option<Architecture> {
    let obj = value.as_object()?;
    let strings = |key: &str| -> Vec<String> {
        obj.get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default()
    };
    Some(Architecture {
        input_modalities: strings("input_modalities"),
        output_modalities: strings("output_modalities"),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_fallback_catalog_has_two_entries_with_preferred_first() {
        let catalog = fallback_catalog();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].id, PREFERRED_MODEL_ID);
        assert_eq!(catalog[1].id, "openai/gpt-4o-mini");
        assert!(is_free(catalog[0].pricing.as_ref()));
        assert!(!is_free(catalog[1].pricing.as_ref()));
    }

    #[test]
    fn test_normalize_keeps_source_order_and_ignores_extra_fields() {
        let entries = vec![
            json!({"id": "b/model", "name": "B", "created": 1_700_000_000, "top_provider": {}}),
            json!({"id": "a/model", "name": "A", "context_length": 8192}),
        ];

        let models = normalize_entries(&entries);
        let ids: Vec<_> = models.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["b/model", "a/model"]);
        assert_eq!(models[1].context_length, Some(8192));
    }

    #[test]
    fn test_normalize_drops_entries_missing_id_or_name() {
        let entries = vec![
            json!({"id": "ok/model", "name": "Ok"}),
            json!({"name": "No id"}),
            json!({"id": "no-name"}),
            json!({"id": "", "name": "Empty id"}),
            json!("not an object"),
        ];

        let models = normalize_entries(&entries);
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, "ok/model");
    }

    #[test]
    fn test_normalize_drops_duplicate_ids_keeping_first() {
        let entries = vec![
            json!({"id": "x/model", "name": "First"}),
            json!({"id": "y/model", "name": "Other"}),
            json!({"id": "x/model", "name": "Second"}),
        ];

        let models = normalize_entries(&entries);
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].name, "First");
    }

    #[test]
    fn test_normalize_keeps_ids_verbatim() {
        let entries = vec![
            json!({"id": " x/model ", "name": "Padded"}),
            json!({"id": "x/model", "name": "Plain"}),
            json!({"id": "   ", "name": "Blank"}),
        ];
        let models = normalize_entries(&entries);
        let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, [" x/model ", "x/model"]);
    }

    #[test]
    fn test_normalize_tolerates_wrongly_typed_optional_fields() {
        let entries = vec![json!({
            "id": "x/model",
            "name": "X",
            "description": 42,
            "context_length": -1,
            "pricing": "free",
            "architecture": {"input_modalities": ["text", 3, "image"]}
        })];

        let models = normalize_entries(&entries);
        assert_eq!(models.len(), 1);
        let model = &models[0];
        assert_eq!(model.description, None);
        assert_eq!(model.context_length, None);
        assert_eq!(model.pricing, None);
        assert_eq!(
            model.architecture.as_ref().map(|a| a.input_modalities.clone()),
            Some(vec!["text".to_string(), "image".to_string()])
        );
    }

    #[test]
    fn test_normalize_accepts_numeric_rates_and_camel_case_context() {
        let entries = vec![json!({
            "id": "x/model",
            "name": "X",
            "contextLength": 32000,
            "pricing": {"prompt": 0, "completion": "0.000002"}
        })];

        let models = normalize_entries(&entries);
        let pricing = models[0].pricing.as_ref().unwrap();
        assert_eq!(pricing.prompt.as_deref(), Some("0"));
        assert_eq!(pricing.completion.as_deref(), Some("0.000002"));
        assert_eq!(models[0].context_length, Some(32000));
    }

    #[test]
    fn test_descriptor_serializes_snake_case() {
        let model = ModelDescriptor::new("x/model", "X").with_context_length(1000);
        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["context_length"], 1000);
        assert!(value.get("description").is_none());
    }
}
