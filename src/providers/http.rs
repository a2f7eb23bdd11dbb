use crate::core::error::FlowdeckError;
use reqwest::{Client, Response};
use serde::Serialize;
use std::collections::HashMap;

/// Thin JSON POST helper shared by the provider backends.
pub struct HttpClient {
    base_url: String,
    auth_header: Option<(String, String)>,
    extra_headers: HashMap<String, String>,
}

impl HttpClient {
    pub fn new(
        base_url: String,
        auth_header: Option<(String, String)>,
        extra_headers: Option<HashMap<String, String>>,
    ) -> Self {
        Self {
            base_url,
            auth_header,
            extra_headers: extra_headers.unwrap_or_default(),
        }
    }

    /// Bearer-token convenience constructor used by most backends.
    pub fn with_bearer(base_url: String, api_key: String) -> Self {
        Self::new(
            base_url,
            Some(("Authorization".to_string(), format!("Bearer {}", api_key))),
            None,
        )
    }

    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Response, FlowdeckError> {
        let client = Client::builder()
            .build()
            .map_err(|e| FlowdeckError::Config(format!("HTTP client: {}", e)))?;
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);

        let mut request = client.post(&url).header("Content-Type", "application/json");

        if let Some((name, value)) = &self.auth_header {
            request = request.header(name, value);
        }
        for (key, value) in &self.extra_headers {
            request = request.header(key, value);
        }

        let response = request
            .json(payload)
            .send()
            .await
            .map_err(|e| FlowdeckError::Network(format!("Request failed: {}", e)))?;
        Ok(response)
    }
}

/// Reads a response body, turning a non-success status into an error that
/// carries the status code and whatever the provider said.
pub async fn read_body(response: Response) -> Result<String, FlowdeckError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| FlowdeckError::Network(format!("Failed to read response body: {}", e)))?;

    if !status.is_success() {
        return Err(FlowdeckError::Api(format!(
            "request failed: {} -> {}",
            status, body
        )));
    }
    Ok(body)
}
