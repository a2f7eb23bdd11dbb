use crate::core::error::FlowdeckError;
use crate::providers::CompletionBackend;
use crate::providers::http::{self, HttpClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize)]
struct InferenceRequest {
    inputs: String,
}

#[derive(Deserialize)]
struct InferenceOutput {
    generated_text: String,
}

/// HuggingFace Inference API backend. The model name is part of the path,
/// not the payload.
pub struct HuggingFaceBackend {
    client: HttpClient,
}

impl HuggingFaceBackend {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: HttpClient::with_bearer(base_url, api_key),
        }
    }
}

#[async_trait]
impl CompletionBackend for HuggingFaceBackend {
    async fn complete(&self, prompt: &str, model: &str) -> Result<String, FlowdeckError> {
        let payload = InferenceRequest {
            inputs: prompt.to_string(),
        };

        let path = format!("models/{}", model);
        let response = self.client.post(&path, &payload).await?;
        let body = http::read_body(response).await?;

        // A 200 body can still carry {"error": ...} while the model loads
        if let Ok(value) = serde_json::from_str::<Value>(&body) {
            if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
                return Err(FlowdeckError::Api(message.to_string()));
            }
        }

        let parsed: Vec<InferenceOutput> = serde_json::from_str(&body)?;
        match parsed.into_iter().next() {
            Some(output) => Ok(output.generated_text),
            None => Err(FlowdeckError::Api(
                "Empty inference response".to_string(),
            )),
        }
    }
}
