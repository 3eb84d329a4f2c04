//! Error types for the client crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `InputError`: Caller mistakes, the only errors callers ever see
//! - `DispatchError`: Gateway transport failures, absorbed by fallback
//! - `ExtractionError`: Payloads that yield no usable value, absorbed by fallback

use crate::extract::Strategy;
use interview_coach_core::GatewayAction;
use std::fmt;

/// Errors caused by invalid caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The role was empty or whitespace.
    BlankRole { action: GatewayAction },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankRole { action } => {
                write!(f, "a valid profession is required for {action}")
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Errors from talking to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The request could not be sent or the connection failed.
    Transport { reason: String },
    /// No response arrived within the configured timeout.
    Timeout { timeout_ms: u64 },
    /// The gateway answered with a non-success status.
    Status { status: u16, body: String },
    /// The response body was not JSON.
    Decode { reason: String },
    /// The gateway answered successfully but reported an error.
    GatewayReported { message: String },
    /// The client configuration is unusable.
    InvalidConfig { reason: String },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { reason } => write!(f, "gateway request failed: {reason}"),
            Self::Timeout { timeout_ms } => {
                write!(f, "gateway did not respond within {timeout_ms}ms")
            }
            Self::Status { status, body } => {
                write!(f, "gateway returned status {status}: {body}")
            }
            Self::Decode { reason } => write!(f, "gateway response is not JSON: {reason}"),
            Self::GatewayReported { message } => write!(f, "gateway reported error: {message}"),
            Self::InvalidConfig { reason } => write!(f, "invalid gateway configuration: {reason}"),
        }
    }
}

impl std::error::Error for DispatchError {}

/// One strategy's reason for not producing a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyFailure {
    pub strategy: Strategy,
    pub reason: ExtractionError,
}

/// Errors from turning a payload into a typed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A JSON value had the wrong kind for the target.
    WrongShape {
        expected: &'static str,
        found: &'static str,
    },
    /// An object carried none of the target's fields.
    NoRecognizedFields { target: &'static str },
    /// Every question in a batch was dropped.
    EmptyBatch,
    /// More than one property of a container object held an array.
    AmbiguousContainer { arrays: usize },
    /// The text envelope held no ```` ```json ```` block.
    NoFencedBlock,
    /// The text envelope held no balanced bracketed span.
    NoBracketedSpan,
    /// Embedded text was not valid JSON.
    Parse { reason: String },
    /// No strategy produced a value.
    NoStrategyMatched { attempts: Vec<StrategyFailure> },
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongShape { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::NoRecognizedFields { target } => {
                write!(f, "object carries no {target} fields")
            }
            Self::EmptyBatch => write!(f, "no question with non-empty text"),
            Self::AmbiguousContainer { arrays } => {
                write!(f, "container object holds {arrays} arrays")
            }
            Self::NoFencedBlock => write!(f, "no fenced json block in raw response"),
            Self::NoBracketedSpan => write!(f, "no bracketed span in raw response"),
            Self::Parse { reason } => write!(f, "embedded JSON did not parse: {reason}"),
            Self::NoStrategyMatched { attempts } => {
                write!(f, "no extraction strategy matched")?;
                for (i, attempt) in attempts.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{sep}{} ({})", attempt.strategy, attempt.reason)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ExtractionError {}
