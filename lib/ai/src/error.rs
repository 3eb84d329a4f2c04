//! Failures on the gateway side of an interview request.
//!
//! [`LlmError`] covers talking to the model provider; [`PromptError`] covers
//! turning a gateway request into prompt text. The gateway maps both to a
//! 500 response.

use std::fmt;

/// A failed model provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Request could not be sent or its body could not be read.
    RequestFailed { reason: String },
    /// Provider answered with a non-success status.
    ApiError { status: u16, body: String },
    /// The provider's body held no usable candidate text.
    ResponseParseFailed { reason: String },
    /// The provider did not answer within the configured timeout.
    Timeout,
    /// The backend cannot be built from its configuration.
    InvalidConfig { reason: String },
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestFailed { reason } => {
                write!(f, "could not reach Gemini: {reason}")
            }
            Self::ApiError { status, .. } => {
                write!(f, "Gemini API error: {status}")
            }
            Self::ResponseParseFailed { reason } => {
                write!(f, "unreadable Gemini response: {reason}")
            }
            Self::Timeout => write!(f, "Gemini request timed out"),
            Self::InvalidConfig { reason } => {
                write!(f, "invalid Gemini configuration: {reason}")
            }
        }
    }
}

impl std::error::Error for LlmError {}

/// A gateway request that could not be rendered into a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    /// No template is registered for the action.
    TemplateNotFound { name: String },
    /// Required variables were not supplied.
    MissingVariables {
        template: String,
        variables: Vec<String>,
    },
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemplateNotFound { name } => {
                write!(f, "no prompt template named '{name}'")
            }
            Self::MissingVariables {
                template,
                variables,
            } => {
                write!(
                    f,
                    "missing required variables [{}] in template '{template}'",
                    variables.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for PromptError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_names_status_only() {
        let err = LlmError::ApiError {
            status: 429,
            body: "{\"error\":\"quota\"}".to_string(),
        };
        assert_eq!(err.to_string(), "Gemini API error: 429");
    }

    #[test]
    fn missing_variables_are_listed() {
        let err = PromptError::MissingVariables {
            template: "generate_questions".to_string(),
            variables: vec!["role".to_string(), "interview_type".to_string()],
        };
        assert!(err.to_string().contains("role, interview_type"));
        assert!(err.to_string().contains("generate_questions"));
    }

    #[test]
    fn timeout_names_provider() {
        assert_eq!(LlmError::Timeout.to_string(), "Gemini request timed out");
    }
}
