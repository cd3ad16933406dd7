use std::time::Duration;

use async_trait::async_trait;
use ruido_core::ports::{ModelError, ModelRequest, RecommendationModel};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::OracleConfig;
use crate::wire::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};

const USER_AGENT: &str = concat!("ruido/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum OracleError {
  #[error("missing API key: set the {0} environment variable")]
  MissingKey(String),

  #[error("http client error: {0}")]
  Client(String),
}

/// `RecommendationModel` backed by the Gemini `generateContent` endpoint.
///
/// Sends the system instruction, the user prompt and the declared response
/// schema with `responseMimeType = application/json`, and returns the text
/// of the first candidate untouched.
pub struct GeminiModel {
  http_client: reqwest::Client,
  endpoint: String,
  model: String,
  api_key: String,
  temperature: Option<f32>,
}

impl GeminiModel {
  pub fn new(cfg: &OracleConfig, api_key: impl Into<String>) -> Result<Self, OracleError> {
    let http_client = reqwest::Client::builder()
      .user_agent(USER_AGENT)
      .timeout(Duration::from_secs(cfg.timeout_secs))
      .build()
      .map_err(|e| OracleError::Client(e.to_string()))?;

    Ok(Self {
      http_client,
      endpoint: cfg.endpoint.trim_end_matches('/').to_string(),
      model: cfg.model.clone(),
      api_key: api_key.into(),
      temperature: cfg.temperature,
    })
  }

  /// Builds the adapter with the key found in `cfg.api_key_env`.
  pub fn from_env(cfg: &OracleConfig) -> Result<Self, OracleError> {
    let key = cfg.api_key().ok_or_else(|| OracleError::MissingKey(cfg.api_key_env.clone()))?;
    Self::new(cfg, key)
  }

  pub fn url(&self) -> String {
    format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
  }

  pub fn body(&self, request: &ModelRequest) -> GenerateContentRequest {
    GenerateContentRequest {
      system_instruction: Content::text(None, request.system_instruction.clone()),
      contents: vec![Content::text(Some("user"), request.prompt.clone())],
      generation_config: GenerationConfig {
        response_mime_type: "application/json",
        response_schema: request.response_schema.clone(),
        temperature: self.temperature,
      },
    }
  }
}

#[async_trait]
impl RecommendationModel for GeminiModel {
  async fn generate(&self, request: &ModelRequest) -> Result<String, ModelError> {
    debug!(model = %self.model, prompt_len = request.prompt.len(), "querying generative model");

    let response = self
      .http_client
      .post(self.url())
      .header("x-goog-api-key", &self.api_key)
      .json(&self.body(request))
      .send()
      .await
      .map_err(|e| ModelError::Transport(e.to_string()))?;

    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
      return Err(ModelError::Credential(format!("rejected with status {}", status.as_u16())));
    }

    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(ModelError::Status { status: status.as_u16(), body });
    }

    let parsed: GenerateContentResponse =
      response.json().await.map_err(|e| ModelError::Transport(e.to_string()))?;

    let text = parsed.text().ok_or(ModelError::Empty)?;
    info!(model = %self.model, bytes = text.len(), "generative model responded");
    Ok(text)
  }
}
