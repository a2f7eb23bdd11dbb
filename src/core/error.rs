use std::io;
use thiserror::Error;

/// Unified error type for the Flowdeck application
#[derive(Error, Debug)]
pub enum FlowdeckError {
    /// No provider has been selected yet
    #[error("No LLM provider selected. Use /provider <id> to choose one.")]
    MissingProvider,

    /// The selection references an id the registry does not know
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// The requested model is not offered by the provider
    #[error("Model '{model}' is not offered by provider '{provider}'")]
    InvalidModel { provider: String, model: String },

    /// The provider's network call failed or returned an error status
    #[error("Error calling {provider}: {message}")]
    Upstream { provider: String, message: String },

    /// Catalog lookups against a workflow id that does not exist
    #[error("Workflow not found: {0}")]
    WorkflowNotFound(String),

    /// Raw provider API errors, before dispatch attributes them
    #[error("API error: {0}")]
    Api(String),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input errors
    #[error("Input error: {0}")]
    Input(String),

    /// IO-related errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for FlowdeckError {
    fn from(err: serde_json::Error) -> Self {
        FlowdeckError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yml::Error> for FlowdeckError {
    fn from(err: serde_yml::Error) -> Self {
        FlowdeckError::Serialization(format!("YAML error: {}", err))
    }
}
