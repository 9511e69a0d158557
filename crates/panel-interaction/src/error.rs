//! Failures of the external reasoning service.
//!
//! None of these reach API callers; the network reasoner logs them and
//! answers with the simulator instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReasoningError {
    /// No API key was configured
    #[error("Reasoning service credential is not configured")]
    NotConfigured,

    /// Transport failure or timeout
    #[error("Reasoning service unavailable: {0}")]
    Unavailable(String),

    /// Non-success HTTP status
    #[error("Reasoning service returned {status}: {message}")]
    Service { status: u16, message: String },

    /// Success status without any text content
    #[error("Reasoning service reply contained no text")]
    EmptyReply,

    /// No usable structured fragment in the reply
    #[error("Failed to parse reasoning reply: {0}")]
    Parse(String),

    /// Prompt template could not be rendered
    #[error("Failed to render prompt: {0}")]
    Prompt(String),
}

impl ReasoningError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

impl From<minijinja::Error> for ReasoningError {
    fn from(err: minijinja::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}

impl From<reqwest::Error> for ReasoningError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Unavailable(format!("request timed out: {err}"))
        } else {
            Self::Unavailable(err.to_string())
        }
    }
}
