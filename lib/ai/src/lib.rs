//! Gateway-side AI primitives for interview-coach.
//!
//! - **Backend**: the [`LlmBackend`] seam and the Gemini implementation
//! - **Prompts**: one template per gateway action
//! - **Shaping**: model text to gateway payload

pub mod backend;
pub mod error;
pub mod prompt;
pub mod shaping;

pub use backend::{GeminiBackend, GeminiConfig, LlmBackend, LlmRequest, LlmResponse, TokenUsage};
pub use error::{LlmError, PromptError};
pub use prompt::{PromptRegistry, PromptTemplate, VariableDefinition};
pub use shaping::shape_model_text;
