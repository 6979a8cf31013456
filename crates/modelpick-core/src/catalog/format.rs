//! Display formatting for catalog entries.

use super::Pricing;

const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// Parses a per-token rate. Unparseable text is treated as unknown.
fn parse_rate(rate: Option<&str>) -> Option<f64> {
    rate.and_then(|r| r.trim().parse::<f64>().ok())
}

/// True when the model costs nothing: no pricing, or every present rate is zero.
pub fn is_free(pricing: Option<&Pricing>) -> bool {
    let Some(pricing) = pricing else {
        return true;
    };
    let is_zero = |rate: Option<&str>| match rate {
        None => true,
        Some(_) => parse_rate(rate) == Some(0.0),
    };
    is_zero(pricing.prompt.as_deref()) && is_zero(pricing.completion.as_deref())
}

/// Formats pricing per million tokens, e.g. `$0.15/M in · $0.6/M out`.
pub fn format_pricing(pricing: Option<&Pricing>) -> String {
    let Some(pricing) = pricing.filter(|p| !is_free(Some(p))) else {
        return "Free".to_string();
    };

    let per_million = |rate: Option<&str>| match parse_rate(rate) {
        Some(value) => format!("${}", trim_price(value * TOKENS_PER_MILLION)),
        None if rate.is_none() => "$0".to_string(),
        None => "?".to_string(),
    };

    format!(
        "{}/M in · {}/M out",
        per_million(pricing.prompt.as_deref()),
        per_million(pricing.completion.as_deref())
    )
}

/// Formats a context window as `128k` or `1M`. Unknown or zero is empty.
pub fn format_context(context_length: Option<u64>) -> String {
    let Some(context_length) = context_length.filter(|c| *c > 0) else {
        return String::new();
    };

    if context_length >= 1_000_000 {
        let millions = context_length as f64 / 1_000_000.0;
        if (millions - millions.round()).abs() < 0.05 {
            format!("{millions:.0}M")
        } else {
            format!("{millions:.1}M")
        }
    } else if context_length >= 1_000 {
        format!("{}k", context_length / 1_000)
    } else {
        context_length.to_string()
    }
}

fn trim_price(value: f64) -> String {
    let mut text = format!("{value:.3}");
    while text.contains('.') && text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}
