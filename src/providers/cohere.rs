use crate::core::error::FlowdeckError;
use crate::providers::CompletionBackend;
use crate::providers::http::{self, HttpClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    generations: Vec<Generation>,
}

#[derive(Deserialize)]
struct Generation {
    text: String,
}

/// Cohere generate-API backend.
pub struct CohereBackend {
    client: HttpClient,
}

impl CohereBackend {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: HttpClient::with_bearer(base_url, api_key),
        }
    }
}

#[async_trait]
impl CompletionBackend for CohereBackend {
    async fn complete(&self, prompt: &str, model: &str) -> Result<String, FlowdeckError> {
        let payload = GenerateRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
            max_tokens: 1024,
        };

        let response = self.client.post("generate", &payload).await?;
        let body = http::read_body(response).await?;
        let parsed: GenerateResponse = serde_json::from_str(&body)?;

        match parsed.generations.into_iter().next() {
            Some(generation) => Ok(generation.text),
            None => Err(FlowdeckError::Api(
                "No generations in API response".to_string(),
            )),
        }
    }
}
