//! Extraction of typed values from classified gateway payloads.
//!
//! Each [`Strategy`] looks at a [`RawPayload`] and either declines (the
//! payload is not its kind), fails with a reason, or produces a value.
//! [`extract`] runs them in [`Strategy::ORDER`] and keeps the first value.
//! Validation lives on [`ExtractTarget`], so every strategy applies the same
//! rules to whatever JSON it recovers.

use crate::error::{ExtractionError, StrategyFailure};
use crate::payload::{RawPayload, json_kind};
use interview_coach_core::{
    AnalyticsResult, FeedbackResult, MAX_SCORE, MIN_SCORE, NEUTRAL_SCORE, Question,
};
use regex::Regex;
use serde_json::{Map, Value as JsonValue};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```json[ \t]*\r?\n?(.*?)```").expect("fenced json pattern is valid")
});

const FEEDBACK_KEYS: [&str; 4] = ["feedbackText", "strengths", "improvements", "score"];
const ANALYTICS_KEYS: [&str; 3] = ["summary", "metrics", "recommendations"];

/// The top-level JSON kind a target is extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Array,
    Object,
}

impl ShapeKind {
    const fn brackets(self) -> (char, char) {
        match self {
            Self::Array => ('[', ']'),
            Self::Object => ('{', '}'),
        }
    }
}

/// A type that can be validated out of loosely-shaped JSON.
pub trait ExtractTarget: Sized {
    /// The JSON kind this target is built from.
    const KIND: ShapeKind;
    /// Human-readable name, used in errors and logs.
    const NAME: &'static str;

    /// Builds the target from array elements.
    ///
    /// # Errors
    ///
    /// Returns an error if the elements do not describe a valid target.
    fn from_array(_items: &[JsonValue]) -> Result<Self, ExtractionError> {
        Err(ExtractionError::WrongShape {
            expected: Self::NAME,
            found: "array",
        })
    }

    /// Builds the target from object fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the fields do not describe a valid target.
    fn from_object(_map: &Map<String, JsonValue>) -> Result<Self, ExtractionError> {
        Err(ExtractionError::WrongShape {
            expected: Self::NAME,
            found: "object",
        })
    }

    /// Builds the target from any JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error for scalars and for values the target rejects.
    fn from_value(value: &JsonValue) -> Result<Self, ExtractionError> {
        match value {
            JsonValue::Array(items) => Self::from_array(items),
            JsonValue::Object(map) => Self::from_object(map),
            other => Err(ExtractionError::WrongShape {
                expected: Self::NAME,
                found: json_kind(other),
            }),
        }
    }
}

/// One way of recovering a value from a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The payload itself is the value.
    Direct,
    /// An envelope object holds the value in its only array property.
    NestedContainer,
    /// A ```` ```json ```` block inside the raw response text.
    FencedBlock,
    /// The first balanced bracketed span in the raw response text that parses.
    BracketScan,
}

impl Strategy {
    /// Strategies in the order they are tried.
    pub const ORDER: [Self; 4] = [
        Self::Direct,
        Self::NestedContainer,
        Self::FencedBlock,
        Self::BracketScan,
    ];

    /// Returns the log name of this strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::NestedContainer => "nested_container",
            Self::FencedBlock => "fenced_block",
            Self::BracketScan => "bracket_scan",
        }
    }

    /// Attempts this strategy.
    ///
    /// Returns `None` when the payload is not of the kind this strategy
    /// handles.
    #[must_use]
    pub fn attempt<T: ExtractTarget>(
        self,
        payload: &RawPayload,
    ) -> Option<Result<T, ExtractionError>> {
        match self {
            Self::Direct => direct(payload),
            Self::NestedContainer => nested_container(payload),
            Self::FencedBlock => fenced_block(payload),
            Self::BracketScan => bracket_scan(payload),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs every strategy in order and returns the first value produced.
///
/// # Errors
///
/// Returns [`ExtractionError::NoStrategyMatched`] with each applicable
/// strategy's reason when none produced a value.
pub fn extract<T: ExtractTarget>(payload: &RawPayload) -> Result<T, ExtractionError> {
    let mut attempts = Vec::new();

    for strategy in Strategy::ORDER {
        match strategy.attempt::<T>(payload) {
            None => {}
            Some(Ok(value)) => {
                debug!(%strategy, target = T::NAME, "Extracted value from payload");
                return Ok(value);
            }
            Some(Err(reason)) => {
                debug!(%strategy, target = T::NAME, %reason, "Extraction strategy failed");
                attempts.push(StrategyFailure { strategy, reason });
            }
        }
    }

    Err(ExtractionError::NoStrategyMatched { attempts })
}

fn direct<T: ExtractTarget>(payload: &RawPayload) -> Option<Result<T, ExtractionError>> {
    match (T::KIND, payload) {
        (ShapeKind::Array, RawPayload::Array(items)) => Some(T::from_array(items)),
        (ShapeKind::Object, RawPayload::Object(map)) => Some(T::from_object(map)),
        _ => None,
    }
}

fn nested_container<T: ExtractTarget>(payload: &RawPayload) -> Option<Result<T, ExtractionError>> {
    if T::KIND != ShapeKind::Array {
        return None;
    }
    let RawPayload::Object(map) = payload else {
        return None;
    };

    let arrays: Vec<&Vec<JsonValue>> = map.values().filter_map(JsonValue::as_array).collect();
    match arrays.as_slice() {
        [] => None,
        [items] => Some(T::from_array(items)),
        many => Some(Err(ExtractionError::AmbiguousContainer { arrays: many.len() })),
    }
}

fn fenced_block<T: ExtractTarget>(payload: &RawPayload) -> Option<Result<T, ExtractionError>> {
    let RawPayload::TextEnvelope(text) = payload else {
        return None;
    };

    let mut last_err = ExtractionError::NoFencedBlock;
    for caps in FENCED_JSON.captures_iter(text) {
        let body = caps.get(1).map_or("", |m| m.as_str()).trim();
        match parse_as::<T>(body) {
            Ok(value) => return Some(Ok(value)),
            Err(e) => last_err = e,
        }
    }
    Some(Err(last_err))
}

fn bracket_scan<T: ExtractTarget>(payload: &RawPayload) -> Option<Result<T, ExtractionError>> {
    let RawPayload::TextEnvelope(text) = payload else {
        return None;
    };

    let (open, close) = T::KIND.brackets();
    let mut last_err = ExtractionError::NoBracketedSpan;
    for span in top_level_spans(text, open, close) {
        match parse_as::<T>(span) {
            Ok(value) => return Some(Ok(value)),
            Err(e) => last_err = e,
        }
    }
    Some(Err(last_err))
}

fn parse_as<T: ExtractTarget>(text: &str) -> Result<T, ExtractionError> {
    let value: JsonValue = serde_json::from_str(text).map_err(|e| ExtractionError::Parse {
        reason: e.to_string(),
    })?;
    T::from_value(&value)
}

/// Returns the balanced top-level `open`..`close` spans of `text`, in order.
///
/// Brackets inside JSON string literals do not count. Quotes outside a span
/// are ordinary prose. An opener that never balances is skipped and the scan
/// resumes just after it.
#[must_use]
pub fn top_level_spans(text: &str, open: char, close: char) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut from = 0;

    while let Some(offset) = text[from..].find(open) {
        let start = from + offset;
        match balanced_len(&text[start..], open, close) {
            Some(len) => {
                spans.push(&text[start..start + len]);
                from = start + len;
            }
            None => from = start + open.len_utf8(),
        }
    }

    spans
}

/// Length of the balanced span at the head of `text`, which starts with `open`.
fn balanced_len(text: &str, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        if c == '"' {
            in_string = true;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(i + c.len_utf8());
            }
        }
    }

    None
}

impl ExtractTarget for Vec<Question> {
    const KIND: ShapeKind = ShapeKind::Array;
    const NAME: &'static str = "question list";

    fn from_array(items: &[JsonValue]) -> Result<Self, ExtractionError> {
        let mut used = BTreeSet::new();
        let kept: Vec<(Option<u32>, &str)> = items
            .iter()
            .filter_map(|item| {
                let obj = item.as_object()?;
                let text = obj.get("text")?.as_str()?.trim();
                if text.is_empty() {
                    return None;
                }
                let id = obj
                    .get("id")
                    .and_then(question_id)
                    .filter(|id| used.insert(*id));
                Some((id, text))
            })
            .collect();

        if kept.is_empty() {
            return Err(ExtractionError::EmptyBatch);
        }

        // Missing or clashing ids take the lowest ids not already claimed.
        let mut next = 1u32;
        Ok(kept
            .into_iter()
            .map(|(id, text)| {
                let id = id.unwrap_or_else(|| {
                    while used.contains(&next) {
                        next += 1;
                    }
                    used.insert(next);
                    next
                });
                Question::new(id, text)
            })
            .collect())
    }
}

fn question_id(value: &JsonValue) -> Option<u32> {
    match value {
        JsonValue::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .and_then(|v| u32::try_from(v).ok()),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl ExtractTarget for FeedbackResult {
    const KIND: ShapeKind = ShapeKind::Object;
    const NAME: &'static str = "feedback";

    fn from_object(map: &Map<String, JsonValue>) -> Result<Self, ExtractionError> {
        require_any(map, &FEEDBACK_KEYS, Self::NAME)?;
        Ok(Self {
            feedback_text: string_field(map, "feedbackText"),
            strengths: string_list(map.get("strengths")),
            improvements: string_list(map.get("improvements")),
            score: normalize_score(map.get("score")),
        })
    }
}

impl ExtractTarget for AnalyticsResult {
    const KIND: ShapeKind = ShapeKind::Object;
    const NAME: &'static str = "analytics";

    fn from_object(map: &Map<String, JsonValue>) -> Result<Self, ExtractionError> {
        require_any(map, &ANALYTICS_KEYS, Self::NAME)?;
        let metrics = map
            .get("metrics")
            .and_then(JsonValue::as_object)
            .map(|metrics| {
                metrics
                    .iter()
                    .filter_map(|(name, value)| number(value).map(|v| (name.clone(), v)))
                    .collect()
            })
            .unwrap_or_else(BTreeMap::new);

        Ok(Self {
            summary: string_field(map, "summary"),
            metrics,
            recommendations: string_list(map.get("recommendations")),
        })
    }
}

/// Coerces a raw score into `MIN_SCORE..=MAX_SCORE`.
///
/// Numbers and numeric strings are rounded to the nearest integer and
/// clamped; anything else yields [`NEUTRAL_SCORE`].
#[must_use]
pub fn normalize_score(value: Option<&JsonValue>) -> u8 {
    match value.and_then(number) {
        Some(raw) => raw
            .round()
            .clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u8,
        None => NEUTRAL_SCORE,
    }
}

fn number(value: &JsonValue) -> Option<f64> {
    let raw = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    raw.filter(|v| v.is_finite())
}

fn require_any(
    map: &Map<String, JsonValue>,
    keys: &[&str],
    target: &'static str,
) -> Result<(), ExtractionError> {
    if keys.iter().any(|key| map.contains_key(*key)) {
        Ok(())
    } else {
        Err(ExtractionError::NoRecognizedFields { target })
    }
}

fn string_field(map: &Map<String, JsonValue>, key: &str) -> String {
    map.get(key)
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_string()
}

fn string_list(value: Option<&JsonValue>) -> Vec<String> {
    value
        .and_then(JsonValue::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(JsonValue::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
