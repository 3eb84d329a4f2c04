//! Turns model text into the payload the gateway returns to clients.
//!
//! Text that already looks like JSON is forwarded as structured JSON;
//! anything else travels in a `{ "rawResponse": ... }` envelope so the client
//! can dig the data out itself.

use interview_coach_core::{ERROR_KEY, RAW_RESPONSE_KEY};
use serde_json::{Map, Value as JsonValue};
use tracing::warn;

/// Error message attached when JSON-looking text fails to parse.
pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse Gemini response";

/// Shapes model output into a gateway payload.
#[must_use]
pub fn shape_model_text(text: &str) -> JsonValue {
    let trimmed = text.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return envelope(text, None);
    }

    match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Model text looked like JSON but did not parse");
            envelope(text, Some(PARSE_FAILURE_MESSAGE))
        }
    }
}

fn envelope(text: &str, error: Option<&str>) -> JsonValue {
    let mut map = Map::new();
    if let Some(error) = error {
        map.insert(ERROR_KEY.to_string(), JsonValue::from(error));
    }
    map.insert(RAW_RESPONSE_KEY.to_string(), JsonValue::from(text));
    JsonValue::Object(map)
}
