use fund_core::calculations::common::{round_half_up, round_to_units};
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

fn parse_normalized(
    raw: &str,
    normalized: &str,
) -> Result<Decimal, ParseDecimalError> {
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %raw, "invalid decimal: {}", e);
        ParseDecimalError {
            input: raw.to_string(),
            source: e,
        }
    })
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"22,000"`).
/// Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    parse_normalized(s, &normalized)
}

/// Parses a string into an optional [`Decimal`].
///
/// Returns `Ok(None)` for empty or whitespace-only input so callers can fall
/// back to a default.
pub fn parse_optional_decimal(s: &str) -> Result<Option<Decimal>, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(None);
    }
    parse_normalized(s, &normalized).map(Some)
}

/// Formats an amount as whole currency units with thousands separators,
/// e.g. `18330.032` becomes `"18,330"`.
pub fn format_units(value: Decimal) -> String {
    let rounded = round_to_units(value);
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < Decimal::ZERO {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a percentage with two decimal places, e.g. `"0.29%"`.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", round_half_up(value, 2))
}
