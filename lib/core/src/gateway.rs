//! Wire contract between the interview client and the LLM gateway.
//!
//! The client posts `{ "action": ..., "data": ... }`. The gateway answers with
//! either structured JSON, a text envelope `{ "rawResponse": "..." }`, or an
//! error object `{ "error": "..." }`.

use crate::interview::InterviewType;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Key of the free-text field in a gateway text envelope.
pub const RAW_RESPONSE_KEY: &str = "rawResponse";

/// Key of the error message in a gateway error object.
pub const ERROR_KEY: &str = "error";

/// The three AI actions the gateway understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GatewayAction {
    GenerateQuestions,
    GenerateFeedback,
    GenerateAnalytics,
}

impl GatewayAction {
    /// Returns the wire name of this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GenerateQuestions => "generateQuestions",
            Self::GenerateFeedback => "generateFeedback",
            Self::GenerateAnalytics => "generateAnalytics",
        }
    }
}

impl fmt::Display for GatewayAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for question generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionParams {
    pub role: String,
    pub interview_type: InterviewType,
}

/// Parameters for answer feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackParams {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Parameters for history analytics.
///
/// Past questions and feedback are forwarded to the model verbatim, so they
/// stay untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsParams {
    pub role: String,
    pub interview_type: InterviewType,
    #[serde(default)]
    pub past_questions: Vec<JsonValue>,
    #[serde(default)]
    pub feedback_history: Vec<JsonValue>,
}

/// A request body sent to the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum GatewayRequest {
    GenerateQuestions(QuestionParams),
    GenerateFeedback(FeedbackParams),
    GenerateAnalytics(AnalyticsParams),
}

impl GatewayRequest {
    /// Returns the action tag of this request.
    #[must_use]
    pub const fn action(&self) -> GatewayAction {
        match self {
            Self::GenerateQuestions(_) => GatewayAction::GenerateQuestions,
            Self::GenerateFeedback(_) => GatewayAction::GenerateFeedback,
            Self::GenerateAnalytics(_) => GatewayAction::GenerateAnalytics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_as_action_and_data() {
        let request = GatewayRequest::GenerateQuestions(QuestionParams {
            role: "Nurse".to_string(),
            interview_type: InterviewType::Behavioral,
        });
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            json!({
                "action": "generateQuestions",
                "data": { "role": "Nurse", "interviewType": "behavioral" }
            })
        );
    }

    #[test]
    fn feedback_request_omits_missing_role() {
        let request = GatewayRequest::GenerateFeedback(FeedbackParams {
            question: "Why us?".to_string(),
            answer: "Because.".to_string(),
            role: None,
        });
        let value = serde_json::to_value(&request).expect("serialize");
        assert!(value["data"].get("role").is_none());
        assert_eq!(request.action(), GatewayAction::GenerateFeedback);
    }

    #[test]
    fn analytics_request_defaults_history() {
        let request: GatewayRequest = serde_json::from_value(json!({
            "action": "generateAnalytics",
            "data": { "role": "Chef", "interviewType": "leadership" }
        }))
        .expect("deserialize");

        match request {
            GatewayRequest::GenerateAnalytics(params) => {
                assert!(params.past_questions.is_empty());
                assert!(params.feedback_history.is_empty());
            }
            other => panic!("expected analytics request, got {other:?}"),
        }
    }

    #[test]
    fn unknown_action_is_rejected() {
        let result: Result<GatewayRequest, _> =
            serde_json::from_value(json!({ "action": "dance", "data": {} }));
        assert!(result.is_err());
    }
}
