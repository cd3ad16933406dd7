use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
  #[error("transport error: {0}")]
  Transport(String),

  #[error("model returned status {status}: {body}")]
  Status { status: u16, body: String },

  #[error("empty response")]
  Empty,

  #[error("missing credential: {0}")]
  Credential(String),
}

/// Petición ya formateada para el modelo generativo.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
  pub system_instruction: String,
  pub prompt: String,
  /// Esquema de salida que el modelo debe respetar (JSON).
  pub response_schema: serde_json::Value,
}

/// Port del modelo generativo externo.
///
/// Devuelve el texto crudo de la respuesta; validarlo contra el esquema es
/// trabajo del cliente de recomendaciones, no del adapter.
#[async_trait]
pub trait RecommendationModel: Send + Sync {
  async fn generate(&self, request: &ModelRequest) -> Result<String, ModelError>;
}
