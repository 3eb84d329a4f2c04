//! The three interview AI operations.
//!
//! Each operation validates its input, dispatches once, extracts a typed
//! value and falls back to [`crate::fallback`] on any dispatch or extraction
//! failure. Only input errors reach the caller.

use crate::config::GatewayClientConfig;
use crate::dispatch::{Dispatcher, Gateway};
use crate::error::{DispatchError, InputError};
use crate::extract::{ExtractTarget, extract};
use crate::fallback;
use crate::http::HttpGateway;
use crate::payload::RawPayload;
use interview_coach_core::{
    AnalyticsParams, AnalyticsResult, FeedbackParams, FeedbackResult, GatewayAction,
    GatewayRequest, InterviewType, Question, QuestionParams,
};
use rootcause::prelude::Report;
use serde_json::Value as JsonValue;
use tracing::{debug, instrument, warn};

/// Entry point for AI-generated interview content.
///
/// Holds no per-request state; share it freely across concurrent tasks.
#[derive(Debug, Clone)]
pub struct InterviewCoach<G> {
    dispatcher: Dispatcher<G>,
}

impl InterviewCoach<HttpGateway> {
    /// Creates a coach talking to the HTTP gateway described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is unusable.
    pub fn from_config(
        config: &GatewayClientConfig,
    ) -> interview_coach_core::Result<Self, DispatchError> {
        let gateway = HttpGateway::new(config)?;
        Ok(Self::new(Dispatcher::new(gateway, config.timeout())))
    }
}

impl<G: Gateway> InterviewCoach<G> {
    /// Creates a coach from a dispatcher.
    #[must_use]
    pub fn new(dispatcher: Dispatcher<G>) -> Self {
        Self { dispatcher }
    }

    /// Generates interview questions for `role`.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::BlankRole`] if `role` is blank. No request is
    /// sent in that case.
    #[instrument(skip(self))]
    pub async fn generate_questions(
        &self,
        role: &str,
        interview_type: InterviewType,
    ) -> Result<Vec<Question>, Report<InputError>> {
        let role = require_role(role, GatewayAction::GenerateQuestions)?;
        let request = GatewayRequest::GenerateQuestions(QuestionParams {
            role: role.to_string(),
            interview_type,
        });

        Ok(self
            .run(&request, || fallback::default_questions(role, interview_type))
            .await)
    }

    /// Generates feedback on an answer. Never fails.
    #[instrument(skip(self, question, answer))]
    pub async fn generate_feedback(
        &self,
        question: &str,
        answer: &str,
        role: Option<&str>,
    ) -> FeedbackResult {
        let role = role.map(str::trim).filter(|r| !r.is_empty());
        let request = GatewayRequest::GenerateFeedback(FeedbackParams {
            question: question.to_string(),
            answer: answer.to_string(),
            role: role.map(str::to_string),
        });

        self.run(&request, fallback::default_feedback).await
    }

    /// Generates analytics over past questions and feedback.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::BlankRole`] if `role` is blank. No request is
    /// sent in that case.
    #[instrument(skip(self, past_questions, feedback_history))]
    pub async fn generate_analytics(
        &self,
        role: &str,
        interview_type: InterviewType,
        past_questions: Vec<JsonValue>,
        feedback_history: Vec<JsonValue>,
    ) -> Result<AnalyticsResult, Report<InputError>> {
        let role = require_role(role, GatewayAction::GenerateAnalytics)?;
        let request = GatewayRequest::GenerateAnalytics(AnalyticsParams {
            role: role.to_string(),
            interview_type,
            past_questions,
            feedback_history,
        });

        Ok(self
            .run(&request, || fallback::default_analytics(role))
            .await)
    }

    async fn run<T: ExtractTarget>(
        &self,
        request: &GatewayRequest,
        on_failure: impl FnOnce() -> T,
    ) -> T {
        let action = request.action();

        let payload = match self.dispatcher.dispatch(request).await {
            Ok(payload) => payload,
            Err(report) => {
                warn!(%action, error = %report, "Gateway dispatch failed, using fallback");
                return on_failure();
            }
        };

        let payload = RawPayload::classify(payload);
        match extract::<T>(&payload) {
            Ok(value) => {
                debug!(%action, payload = payload.kind(), "Gateway response normalized");
                value
            }
            Err(e) => {
                warn!(
                    %action,
                    payload = payload.kind(),
                    error = %e,
                    "Could not extract {} from gateway response, using fallback",
                    T::NAME
                );
                on_failure()
            }
        }
    }
}

fn require_role(role: &str, action: GatewayAction) -> Result<&str, InputError> {
    let role = role.trim();
    if role.is_empty() {
        Err(InputError::BlankRole { action })
    } else {
        Ok(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Replays one canned response and records every request.
    struct StubGateway {
        response: Result<JsonValue, DispatchError>,
        calls: AtomicUsize,
        requests: Mutex<Vec<GatewayRequest>>,
    }

    impl StubGateway {
        fn new(response: Result<JsonValue, DispatchError>) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn ok(payload: JsonValue) -> Arc<Self> {
            Self::new(Ok(payload))
        }

        fn failing() -> Arc<Self> {
            Self::new(Err(DispatchError::Transport {
                reason: "network unreachable".to_string(),
            }))
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Gateway for StubGateway {
        async fn invoke(&self, request: &GatewayRequest) -> Result<JsonValue, DispatchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            self.response.clone()
        }
    }

    fn coach(gateway: &Arc<StubGateway>) -> InterviewCoach<Arc<StubGateway>> {
        InterviewCoach::new(Dispatcher::new(gateway.clone(), Duration::from_secs(1)))
    }

    #[tokio::test]
    async fn questions_from_fenced_raw_response() {
        let gateway = StubGateway::ok(json!({
            "rawResponse": "Here is the result:\n```json\n[{\"id\":1,\"text\":\"Q1\"}]\n```"
        }));

        let questions = coach(&gateway)
            .generate_questions("Software Engineer", InterviewType::Technical)
            .await
            .expect("questions");

        assert_eq!(questions, vec![Question::new(1, "Q1")]);
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn blank_role_is_rejected_without_dispatch() {
        let gateway = StubGateway::ok(json!([]));
        let coach = coach(&gateway);

        let err = coach
            .generate_questions("", InterviewType::Behavioral)
            .await
            .unwrap_err();
        assert_eq!(
            err.current_context(),
            &InputError::BlankRole {
                action: GatewayAction::GenerateQuestions
            }
        );

        let err = coach
            .generate_analytics("   ", InterviewType::Leadership, Vec::new(), Vec::new())
            .await
            .unwrap_err();
        assert_eq!(
            err.current_context(),
            &InputError::BlankRole {
                action: GatewayAction::GenerateAnalytics
            }
        );

        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn feedback_transport_failure_uses_default() {
        let gateway = StubGateway::failing();

        let feedback = coach(&gateway)
            .generate_feedback("Tell me about yourself", "I am a...", Some("Software Engineer"))
            .await;

        assert_eq!(feedback, fallback::default_feedback());
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn unrecognized_payload_uses_default_questions() {
        let gateway = StubGateway::ok(json!({ "rawResponse": "I'd rather not." }));

        let questions = coach(&gateway)
            .generate_questions(" Nurse ", InterviewType::Leadership)
            .await
            .expect("questions");

        assert_eq!(
            questions,
            fallback::default_questions("Nurse", InterviewType::Leadership)
        );
    }

    #[tokio::test]
    async fn gateway_error_object_uses_default_analytics() {
        let gateway = StubGateway::ok(json!({ "error": "Invalid action specified" }));

        let analytics = coach(&gateway)
            .generate_analytics("Pilot", InterviewType::Technical, Vec::new(), Vec::new())
            .await
            .expect("analytics");

        assert_eq!(analytics, fallback::default_analytics("Pilot"));
    }

    #[tokio::test]
    async fn direct_feedback_is_normalized() {
        let gateway = StubGateway::ok(json!({
            "feedbackText": "Strong answer",
            "strengths": ["Specific"],
            "score": 101.4
        }));

        let feedback = coach(&gateway)
            .generate_feedback("Q", "A", None)
            .await;

        assert_eq!(feedback.feedback_text, "Strong answer");
        assert!(feedback.improvements.is_empty());
        assert_eq!(feedback.score, 100);
    }

    #[tokio::test]
    async fn nested_questions_are_unwrapped() {
        let gateway = StubGateway::ok(json!({
            "questions": [{ "id": 1, "text": "Q1" }, { "id": 2, "text": "Q2" }]
        }));

        let questions = coach(&gateway)
            .generate_questions("Chef", InterviewType::Behavioral)
            .await
            .expect("questions");

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1], Question::new(2, "Q2"));
    }

    #[tokio::test]
    async fn analytics_from_bracket_scan() {
        let gateway = StubGateway::ok(json!({
            "rawResponse": "Overall: {\"summary\": \"Great\", \"metrics\": {\"clarity\": 90}, \"recommendations\": [\"Keep going\"]}"
        }));

        let analytics = coach(&gateway)
            .generate_analytics(
                "Designer",
                InterviewType::Behavioral,
                vec![json!({ "id": 1, "text": "Q1" })],
                vec![json!({ "score": 80 })],
            )
            .await
            .expect("analytics");

        assert_eq!(analytics.summary, "Great");
        assert_eq!(analytics.metrics.get("clarity"), Some(&90.0));
        assert_eq!(analytics.recommendations, vec!["Keep going"]);
    }

    #[tokio::test]
    async fn requests_carry_trimmed_parameters() {
        let gateway = StubGateway::ok(json!([{ "id": 1, "text": "Q1" }]));
        let coach = coach(&gateway);

        coach
            .generate_questions("  Nurse  ", InterviewType::Behavioral)
            .await
            .expect("questions");
        coach.generate_feedback("Q", "A", Some("  ")).await;

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(
            requests[0],
            GatewayRequest::GenerateQuestions(QuestionParams {
                role: "Nurse".to_string(),
                interview_type: InterviewType::Behavioral,
            })
        );
        match &requests[1] {
            GatewayRequest::GenerateFeedback(params) => assert!(params.role.is_none()),
            other => panic!("expected feedback request, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn concurrent_requests_are_independent() {
        let gateway = StubGateway::ok(json!([{ "id": 1, "text": "Q1" }]));
        let coach = Arc::new(coach(&gateway));

        let tasks = (0..8).map(|i| {
            let coach = coach.clone();
            async move {
                coach
                    .generate_questions(&format!("Role {i}"), InterviewType::Technical)
                    .await
            }
        });
        let results = futures::future::join_all(tasks).await;

        assert_eq!(gateway.calls(), 8);
        for result in results {
            assert_eq!(result.expect("questions"), vec![Question::new(1, "Q1")]);
        }
    }
}
