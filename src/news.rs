use crate::services::{Headline, HeadlineProvider, ServiceError};
use serde::Deserialize;
use std::time::Duration;
use ureq::Agent;

const NEWSAPI_URL: &str = "https://newsapi.org/v2/everything";

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
}

/// NewsAPI `everything` search, newest first.
pub struct NewsApiProvider {
    agent: Agent,
    url: String,
    api_key: String,
}

impl NewsApiProvider {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: config.into(),
            url: NEWSAPI_URL.to_string(),
            api_key,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

impl HeadlineProvider for NewsApiProvider {
    fn headlines(&self, query: &str) -> Result<Vec<Headline>, ServiceError> {
        let mut response = self
            .agent
            .get(&self.url)
            .query("q", query)
            .query("sortBy", "publishedAt")
            .query("apiKey", &self.api_key)
            .call()?;
        let parsed: EverythingResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| ServiceError::Malformed(e.to_string()))?;
        Ok(titles(parsed))
    }
}

fn titles(response: EverythingResponse) -> Vec<Headline> {
    response
        .articles
        .into_iter()
        .filter_map(|article| article.title)
        .filter(|title| !title.trim().is_empty())
        .map(Headline::new)
        .collect()
}
