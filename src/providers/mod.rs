use crate::core::error::FlowdeckError;
use async_trait::async_trait;

pub mod cohere;
pub mod dispatch;
pub mod http;
pub mod huggingface;
pub mod openai;
pub mod registry;
pub mod selection;

/// Uniform capability interface each provider implements once.
///
/// Base URL and API key are bound at construction; the dispatcher depends
/// only on this trait, never on a concrete backend type.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Issues exactly one non-streaming completion request and returns the
    /// generated text as supplied by the backend, verbatim.
    async fn complete(&self, prompt: &str, model: &str) -> Result<String, FlowdeckError>;
}
