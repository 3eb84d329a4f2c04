//! Interview AI client for interview-coach.
//!
//! Sends interview requests to the LLM gateway and turns whatever comes back
//! into typed values:
//!
//! - **Dispatch**: one bounded call per request through a [`Gateway`]
//! - **Extraction**: ordered strategies over a classified [`RawPayload`]
//! - **Fallback**: deterministic defaults when either step fails
//!
//! [`InterviewCoach`] ties the three together. Its operations only ever fail
//! on invalid input.

pub mod coach;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod http;
pub mod payload;

pub use coach::InterviewCoach;
pub use config::GatewayClientConfig;
pub use dispatch::{Dispatcher, Gateway};
pub use error::{DispatchError, ExtractionError, InputError, StrategyFailure};
pub use extract::{ExtractTarget, Strategy, extract, normalize_score};
pub use fallback::{default_analytics, default_feedback, default_questions};
pub use http::HttpGateway;
pub use payload::RawPayload;
