//! Request/response bodies of the `models/{model}:generateContent` endpoint.
//! Only the fields this client uses are modelled.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
  #[serde(default)]
  pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub role: Option<String>,
  #[serde(default)]
  pub parts: Vec<Part>,
}

impl Content {
  pub fn text(role: Option<&str>, text: impl Into<String>) -> Self {
    Content { role: role.map(str::to_string), parts: vec![Part { text: Some(text.into()) }] }
  }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
  pub response_mime_type: &'static str,
  pub response_schema: serde_json::Value,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
  pub system_instruction: Content,
  pub contents: Vec<Content>,
  pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
  pub content: Option<Content>,
  pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
  #[serde(default)]
  pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
  /// Concatenated text parts of the first candidate, if it has any.
  pub fn text(&self) -> Option<String> {
    let content = self.candidates.first()?.content.as_ref()?;
    let text: String = content.parts.iter().filter_map(|p| p.text.as_deref()).collect();
    (!text.is_empty()).then_some(text)
  }
}
