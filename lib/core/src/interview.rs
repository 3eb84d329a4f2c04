//! Interview domain values exchanged with the AI layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The kind of interview being practiced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewType {
    /// Past-behaviour questions ("tell me about a time...").
    Behavioral,
    /// Skills and problem-solving questions.
    Technical,
    /// Team and decision-making questions.
    Leadership,
}

impl InterviewType {
    /// All interview types, in display order.
    pub const ALL: [Self; 3] = [Self::Behavioral, Self::Technical, Self::Leadership];

    /// Returns the wire name of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Behavioral => "behavioral",
            Self::Technical => "technical",
            Self::Leadership => "leadership",
        }
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known interview type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseInterviewTypeError {
    /// The rejected input.
    pub value: String,
}

impl fmt::Display for ParseInterviewTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown interview type '{}', expected behavioral, technical or leadership",
            self.value
        )
    }
}

impl std::error::Error for ParseInterviewTypeError {}

impl FromStr for InterviewType {
    type Err = ParseInterviewTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseInterviewTypeError {
                value: s.to_string(),
            })
    }
}

/// A single interview question.
///
/// `id` is only unique among the questions of the batch it was generated in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
}

impl Question {
    /// Creates a question.
    #[must_use]
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// Lowest score a piece of feedback can carry.
pub const MIN_SCORE: u8 = 0;

/// Highest score a piece of feedback can carry.
pub const MAX_SCORE: u8 = 100;

/// Score used when the model did not provide a usable one.
pub const NEUTRAL_SCORE: u8 = 75;

/// Feedback on one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResult {
    /// Overall feedback prose.
    pub feedback_text: String,
    /// What went well.
    pub strengths: Vec<String>,
    /// What to work on.
    pub improvements: Vec<String>,
    /// Overall score, always within `MIN_SCORE..=MAX_SCORE`.
    pub score: u8,
}

/// Performance analysis over an interview history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResult {
    pub summary: String,
    /// Metric name to score. The set of names is whatever the producer sent.
    pub metrics: BTreeMap<String, f64>,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interview_type_parses_case_insensitively() {
        assert_eq!(
            "Technical".parse::<InterviewType>().expect("parse"),
            InterviewType::Technical
        );
        assert_eq!(
            " leadership ".parse::<InterviewType>().expect("parse"),
            InterviewType::Leadership
        );
    }

    #[test]
    fn interview_type_rejects_unknown() {
        let err = "situational".parse::<InterviewType>().unwrap_err();
        assert!(err.to_string().contains("situational"));
    }

    #[test]
    fn interview_type_wire_format_is_lowercase() {
        let json = serde_json::to_string(&InterviewType::Behavioral).expect("serialize");
        assert_eq!(json, "\"behavioral\"");
    }

    #[test]
    fn feedback_uses_camel_case_fields() {
        let feedback = FeedbackResult {
            feedback_text: "Solid".to_string(),
            strengths: vec!["Clear".to_string()],
            improvements: Vec::new(),
            score: 80,
        };
        let json = serde_json::to_value(&feedback).expect("serialize");
        assert_eq!(json["feedbackText"], "Solid");
        assert_eq!(json["score"], 80);
    }
}
