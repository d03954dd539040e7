//! Error types for the agent runtime.

use thiserror::Error;

/// Faults raised while interpreting a model response.
///
/// Both variants are recoverable: the control loop converts them into
/// failure envelopes that are appended to memory, so the model sees
/// what went wrong and can correct itself on the next turn.
#[derive(Error, Debug)]
pub enum LanguageError {
    /// The response text carried no usable action directive.
    #[error("{0}")]
    NoActionInResponse(String),

    /// The model produced no response text at all.
    #[error("Failed to receive response from LLM.")]
    ResponseMissing,
}

/// Fatal faults that abort an agent run.
#[derive(Error, Debug)]
pub enum AgentError {
    /// The model transport failed (network, authentication, payload).
    #[error("Model call failed: {0}")]
    Model(String),

    /// A delegation tool ran on an agent that manages no other agents.
    #[error("No agent registry found in context")]
    MissingAgentRegistry,

    /// A delegation tool named an agent that is not registered.
    #[error("Agent '{name}' not found in registry: {available:?}")]
    UnknownAgent {
        name: String,
        available: Vec<String>,
    },

    /// Settings are missing or malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A memory entry or execution envelope could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AgentError {
    /// Create a model transport error from any displayable cause.
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model(message.into())
    }
}

/// Convenience alias used throughout the crate.
pub type AgentResult<T> = Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_error_display() {
        let err = LanguageError::NoActionInResponse(
            "No tool call specified, please provide a tool call".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "No tool call specified, please provide a tool call"
        );

        assert_eq!(
            LanguageError::ResponseMissing.to_string(),
            "Failed to receive response from LLM."
        );
    }

    #[test]
    fn test_agent_error_display() {
        let err = AgentError::model("connection refused");
        assert_eq!(err.to_string(), "Model call failed: connection refused");

        let err = AgentError::UnknownAgent {
            name: "scheduler".to_string(),
            available: vec!["billing".to_string()],
        };
        assert!(err.to_string().contains("'scheduler'"));
        assert!(err.to_string().contains("billing"));
    }

    #[test]
    fn test_serialization_error_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: AgentError = parse_err.into();
        assert!(matches!(err, AgentError::Serialization(_)));
    }
}
