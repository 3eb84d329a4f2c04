//! Core domain types and utilities for interview-coach.
//!
//! This crate provides the interview value types, the client/gateway wire
//! contract, and the error handling foundation shared by the other crates.

pub mod error;
pub mod gateway;
pub mod id;
pub mod interview;

pub use error::Result;
pub use gateway::{
    AnalyticsParams, ERROR_KEY, FeedbackParams, GatewayAction, GatewayRequest, QuestionParams,
    RAW_RESPONSE_KEY,
};
pub use id::{GatewayRequestId, LlmInvocationId};
pub use interview::{
    AnalyticsResult, FeedbackResult, InterviewType, MAX_SCORE, MIN_SCORE, NEUTRAL_SCORE,
    ParseInterviewTypeError, Question,
};
