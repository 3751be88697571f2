use crate::services::{CompletionService, ServiceError};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use ureq::Agent;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Gemini `generateContent` client.
pub struct GeminiClient {
    agent: Agent,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: config.into(),
            base_url: GEMINI_BASE_URL.to_string(),
            model,
            api_key,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl CompletionService for GeminiClient {
    fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
        let mut response = self
            .agent
            .post(&self.endpoint())
            .query("key", &self.api_key)
            .send_json(&body)?;
        let parsed: GenerateResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| ServiceError::Malformed(e.to_string()))?;
        first_text(parsed)
    }
}

fn first_text(response: GenerateResponse) -> Result<String, ServiceError> {
    response
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .find_map(|part| part.text)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ServiceError::Malformed("no text in completion".to_string()))
}
