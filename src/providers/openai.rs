use crate::core::error::FlowdeckError;
use crate::providers::CompletionBackend;
use crate::providers::http::{self, HttpClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatCompletionMessage>,
}

#[derive(Serialize)]
struct ChatCompletionMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

/// Chat-completions backend. Serves the `openai` provider and any other
/// OpenAI-compatible endpoint in the registry (e.g. `openrouter`).
pub struct OpenAiBackend {
    client: HttpClient,
}

impl OpenAiBackend {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: HttpClient::with_bearer(base_url, api_key),
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, prompt: &str, model: &str) -> Result<String, FlowdeckError> {
        let payload = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![ChatCompletionMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self.client.post("chat/completions", &payload).await?;
        let body = http::read_body(response).await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&body)?;

        match parsed.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content),
            None => Err(FlowdeckError::Api(
                "No choices in API response".to_string(),
            )),
        }
    }
}
