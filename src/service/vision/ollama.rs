//! Ollama-backed vision extractor

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::prompts::prompt_for;
use super::{VisionError, VisionExtractor};
use crate::model::{FocusArea, VisionConfig};

/// Request body for Ollama /api/chat
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
    images: Vec<&'a str>,
}

/// Response body from Ollama /api/chat
#[derive(Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Client for a local or remote Ollama server running a vision model
pub struct OllamaVisionClient {
    client: Client,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

impl OllamaVisionClient {
    /// Create a new client from configuration
    pub fn new(config: &VisionConfig) -> Result<Self, VisionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VisionError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn map_send_error(&self, e: reqwest::Error) -> VisionError {
        if e.is_connect() {
            VisionError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            VisionError::Timeout(self.timeout_secs)
        } else {
            VisionError::Http(e.to_string())
        }
    }
}

#[async_trait]
impl VisionExtractor for OllamaVisionClient {
    async fn describe(&self, image_base64: &str, focus: FocusArea) -> Result<String, VisionError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt_for(focus),
                images: vec![image_base64],
            }],
            stream: false,
        };

        tracing::debug!(
            model = %self.model,
            focus = %focus,
            image_b64_len = image_base64.len(),
            "Sending image to vision model"
        );

        let response = self
            .client
            .post(self.chat_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VisionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| VisionError::ResponseParsing(e.to_string()))?;

        Ok(parsed.message.content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
