//! Classification of raw gateway payloads.
//!
//! A payload is inspected once, up front, and every extraction strategy
//! works from the resulting [`RawPayload`] instead of re-sniffing JSON.

use interview_coach_core::RAW_RESPONSE_KEY;
use serde_json::{Map, Value as JsonValue};

/// The recognized forms of a gateway payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    /// A top-level JSON array.
    Array(Vec<JsonValue>),
    /// A top-level JSON object that is not a text envelope.
    Object(Map<String, JsonValue>),
    /// An object carrying a string `rawResponse`.
    TextEnvelope(String),
    /// Anything else (scalars, null, envelopes with a non-string body).
    Unrecognized(JsonValue),
}

impl RawPayload {
    /// Classifies a gateway payload.
    #[must_use]
    pub fn classify(value: JsonValue) -> Self {
        match value {
            JsonValue::Array(items) => Self::Array(items),
            JsonValue::Object(mut map) => match map.remove(RAW_RESPONSE_KEY) {
                Some(JsonValue::String(text)) => Self::TextEnvelope(text),
                Some(other) => {
                    map.insert(RAW_RESPONSE_KEY.to_string(), other);
                    Self::Unrecognized(JsonValue::Object(map))
                }
                None => Self::Object(map),
            },
            other => Self::Unrecognized(other),
        }
    }

    /// Short name of the variant, for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::TextEnvelope(_) => "text_envelope",
            Self::Unrecognized(_) => "unrecognized",
        }
    }
}

/// Returns a short name for the kind of a JSON value.
#[must_use]
pub const fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
