//! Chat-completion client
//!
//! One configured client value is built at process start and threaded
//! through the classification loop. The `Completion` seam keeps the
//! loop testable without a network.

use anyhow::{anyhow, Context, Result};
use serde_json::json;
use std::path::Path;

pub trait Completion {
    fn complete(&self, system: &str, user: &str) -> Result<String>;
}

pub struct OpenAiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    /// key file wins over the environment; the key is trimmed either way
    pub fn new(api_key_file: Option<&Path>, model: String) -> Result<Self> {
        let api_key = match api_key_file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("could not read API key file {:?}", path))?,
            None => std::env::var(config::API_KEY_ENV)
                .with_context(|| format!("{} is not set", config::API_KEY_ENV))?,
        }
        .trim()
        .to_string();

        if api_key.is_empty() {
            anyhow::bail!("API key is empty");
        }

        let base_url = std::env::var(config::BASE_URL_ENV)
            .unwrap_or_else(|_| config::DEFAULT_BASE_URL.to_string());

        Ok(Self {
            http: reqwest::blocking::Client::new(),
            api_key,
            base_url,
            model,
        })
    }
}

impl Completion for OpenAiClient {
    fn complete(&self, system: &str, user: &str) -> Result<String> {
        let url = format!(
            "{}/chat/completions",
            self.base_url.trim_end_matches('/')
        );

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ],
            "temperature": config::TEMPERATURE,
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| anyhow!("request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().unwrap_or_default();
            return Err(anyhow!("API error ({}): {}", status, text));
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| anyhow!("failed to parse JSON: {}", e))?;

        json["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow!("invalid response format"))
    }
}
