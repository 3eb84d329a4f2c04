//! LLM gateway server for interview-coach.
//!
//! Accepts `{ "action", "data" }` requests, renders the matching prompt,
//! calls the model and returns its text shaped as JSON.

pub mod config;
pub mod error;
pub mod routes;

pub use config::GatewayServerConfig;
pub use error::GatewayError;
pub use routes::{AppState, router};
