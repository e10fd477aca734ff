#![forbid(unsafe_code)]

//! Client for the outline-generation collaborator.
//!
//! The collaborator's whole contract, as far as medusa is concerned:
//! given a prompt string, return a `{name, children}` tree or fail. This
//! crate performs the one network call, validates the payload through
//! `medusa_core::Outline` before anything reaches the model layer, and
//! never retries — a failed generation requires explicit resubmission.

use medusa_core::Outline;
use serde_json::Value;
use url::Url;

mod wire;

pub use wire::{MAX_OUTPUT_TOKENS, SCHEMA_DEPTH, TEMPERATURE};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("GEMINI_API_KEY is not set in the environment")]
    MissingApiKey,

    #[error("invalid collaborator endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("outline request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("outline service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("outline service returned no candidates")]
    EmptyResponse,

    #[error("outline payload is not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidOutline(#[from] medusa_core::Error),
}

#[derive(Debug, Clone)]
pub struct GenConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: Url,
}

impl GenConfig {
    /// Reads the key from `GEMINI_API_KEY`; fails before any request is
    /// attempted when it is unset or blank.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(Error::MissingApiKey)?;
        Self::new(api_key)
    }

    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: Url::parse(DEFAULT_ENDPOINT)?,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    fn generate_url(&self) -> Result<Url> {
        Ok(self
            .endpoint
            .join(&format!("models/{}:generateContent", self.model))?)
    }
}

pub struct OutlineClient {
    http: reqwest::Client,
    config: GenConfig,
}

impl OutlineClient {
    pub fn new(config: GenConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(GenConfig::from_env()?))
    }

    /// One generation round trip: prompt in, validated outline out.
    pub async fn generate(&self, topic: &str) -> Result<Outline> {
        let url = self.config.generate_url()?;
        let request = wire::generate_request(topic);
        tracing::debug!(model = %self.config.model, "requesting outline");

        let response = self
            .http
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%status, "outline request rejected");
            return Err(Error::Status { status, body });
        }

        let response: wire::GenerateResponse = response.json().await?;
        let text = response.first_text().ok_or(Error::EmptyResponse)?;
        let value: Value = serde_json::from_str(&text)?;
        let outline = Outline::from_value(&value)?;
        tracing::debug!(nodes = outline.node_count(), "outline generated");
        Ok(outline)
    }
}
