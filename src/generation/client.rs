use std::fmt;
use std::time::Duration;

use color_eyre::Result;
use serde::{Deserialize, Serialize};

use crate::names;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f64,
    k: u32,
    stop_sequences: [&'a str; 0],
    return_likelihoods: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    generations: Vec<Generation>,
}

#[derive(Deserialize)]
struct Generation {
    text: String,
}

#[derive(Debug)]
pub enum GenerationError {
    /// Transport failure or non-success status from the provider.
    Provider(String),
    /// The provider call exceeded the request timeout.
    Timeout,
    /// The provider answered with zero completions.
    Empty,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Provider(detail) => write!(f, "provider error: {detail}"),
            GenerationError::Timeout => write!(f, "provider call timed out"),
            GenerationError::Empty => write!(f, "provider returned no completions"),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Client for the Cohere generate API. Constructed once at startup and
/// cloned into handlers; the base URL is injectable so tests can point it
/// at a local stand-in.
#[derive(Clone)]
pub struct GenerationClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GenerationClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self> {
        Self::with_timeout(
            api_key,
            base_url,
            Duration::from_secs(names::PROVIDER_TIMEOUT_SECS),
        )
    }

    /// Build a client with an explicit request timeout. A provider call
    /// exceeding it fails with [`GenerationError::Timeout`].
    pub fn with_timeout(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Submit a prompt and return the text of the first completion.
    /// One outbound call per invocation; failures are terminal for the
    /// request, there is no retry.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GenerateRequest {
            model: names::GENERATION_MODEL,
            prompt,
            max_tokens: names::GENERATION_MAX_TOKENS,
            temperature: names::GENERATION_TEMPERATURE,
            k: 0,
            stop_sequences: [],
            return_likelihoods: "NONE",
        };

        let resp = self
            .client
            .post(format!("{}/v1/generate", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else {
                    GenerationError::Provider(e.to_string())
                }
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            tracing::error!("generation provider error: {status} - {text}");
            return Err(GenerationError::Provider(format!(
                "provider returned {status}"
            )));
        }

        let data: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| GenerationError::Provider(e.to_string()))?;

        let generation = data.generations.into_iter().next().ok_or(GenerationError::Empty)?;

        tracing::debug!("provider returned {} chars", generation.text.len());
        Ok(generation.text)
    }
}
