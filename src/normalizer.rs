//! Normalizes raw pipeline outputs into a stable shape.
//!
//! The pipeline is free-form about how it returns list outputs; the same
//! field may arrive as a JSON array, as a JSON-encoded string, or as one
//! delimited string. Everything downstream sees `Vec<String>` and nothing
//! else.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Itinerary-related pipeline outputs, one list per concern. Fields the
/// run never produced stay empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizedItineraryData {
    pub sights: Vec<String>,
    pub activities: Vec<String>,
    pub flights: Vec<String>,
    pub accommodations: Vec<String>,
    pub flight_links: Vec<String>,
    pub accommodation_links: Vec<String>,
}

/// Internal marker lines the pipeline interleaves with real log output,
/// e.g. `__system__` or `progress __running__ 40%`.
static MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__\w+__").unwrap());

/// Extract the known itinerary fields from a raw `outputs` object.
pub fn normalize(outputs: &Value) -> NormalizedItineraryData {
    NormalizedItineraryData {
        sights: coerce_list(outputs.get("sights")),
        activities: coerce_list(outputs.get("activities")),
        flights: coerce_list(outputs.get("flights")),
        accommodations: coerce_list(outputs.get("accommodations")),
        flight_links: coerce_list(outputs.get("flight_links")),
        accommodation_links: coerce_list(outputs.get("accommodation_links")),
    }
}

/// Coerce one output value into a list of non-empty strings.
///
/// Accepts a JSON array (scalar elements are stringified), a string
/// holding a JSON array, or a plain delimited string. Newlines win over
/// commas when both are present, so a comma inside one line survives.
pub fn coerce_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(raw)) => {
            if let Ok(parsed @ Value::Array(_)) = serde_json::from_str::<Value>(raw) {
                return coerce_list(Some(&parsed));
            }
            let delimiter = if raw.contains('\n') { '\n' } else { ',' };
            raw.split(delimiter)
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Drop pipeline-internal marker lines from a run log, keeping the rest
/// verbatim (URLs included).
pub fn filter_log_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter(|line| !MARKER_RE.is_match(line))
        .cloned()
        .collect()
}
