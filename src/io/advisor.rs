use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The text-completion oracle could not produce an answer.
#[derive(Debug, thiserror::Error)]
pub enum AdvisoryUnavailable {
    #[error("could not reach the model server: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model server returned HTTP {0}")]
    Status(u16),
    #[error("unexpected reply from model server: {0}")]
    Malformed(String),
    #[error("model returned an empty reply")]
    Empty,
}

/// Free-text in, free-text out. No guarantees about the shape of the reply.
pub trait Advisor {
    fn complete(&self, prompt: &str) -> Result<String, AdvisoryUnavailable>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Ollama chat API client (`POST <endpoint>/api/chat`, non-streaming).
pub struct OllamaAdvisor {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
}

impl OllamaAdvisor {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AdvisoryUnavailable> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(OllamaAdvisor {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Advisor for OllamaAdvisor {
    fn complete(&self, prompt: &str) -> Result<String, AdvisoryUnavailable> {
        let url = format!("{}/api/chat", self.endpoint.trim_end_matches('/'));
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };
        tracing::debug!(model = %self.model, "asking advisor");
        let resp = self.client.post(&url).json(&request).send()?;
        if !resp.status().is_success() {
            return Err(AdvisoryUnavailable::Status(resp.status().as_u16()));
        }
        let body = resp.text()?;
        let chat: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| AdvisoryUnavailable::Malformed(e.to_string()))?;
        let content = chat.message.content.trim();
        if content.is_empty() {
            return Err(AdvisoryUnavailable::Empty);
        }
        Ok(content.to_string())
    }
}
