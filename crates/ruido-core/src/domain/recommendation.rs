use crate::domain::ids::{ProducerId, SampleId};
use serde::{Deserialize, Serialize};

/// Acción de interfaz que el modelo puede pedir junto a su respuesta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UiTrigger {
  GotoVault,
  GotoRegistry,
  GotoAuth,
  UploadForm,
  SuccessStamp,
}

impl UiTrigger {
  pub const ALL: [UiTrigger; 5] =
    [UiTrigger::GotoVault, UiTrigger::GotoRegistry, UiTrigger::GotoAuth, UiTrigger::UploadForm, UiTrigger::SuccessStamp];

  pub fn as_str(&self) -> &'static str {
    match self {
      UiTrigger::GotoVault => "GOTO_VAULT",
      UiTrigger::GotoRegistry => "GOTO_REGISTRY",
      UiTrigger::GotoAuth => "GOTO_AUTH",
      UiTrigger::UploadForm => "UPLOAD_FORM",
      UiTrigger::SuccessStamp => "SUCCESS_STAMP",
    }
  }
}

pub const FALLBACK_CONTENT: &str = "Signal degradation. Please re-state your sonic intention.";

/// Respuesta estructurada del modelo de recomendación.
///
/// Es exactamente la forma del esquema declarado al modelo: `content` es
/// obligatorio y el resto es opcional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
  pub content: String,
  #[serde(default)]
  pub ui_trigger: Option<UiTrigger>,
  #[serde(default)]
  pub recommended_sample_ids: Vec<SampleId>,
  #[serde(default)]
  pub recommended_producer_ids: Vec<ProducerId>,
}

impl Recommendation {
  /// Valor fijo devuelto ante cualquier fallo de transporte o de parseo.
  pub fn fallback() -> Self {
    Recommendation {
      content: FALLBACK_CONTENT.to_string(),
      ui_trigger: None,
      recommended_sample_ids: Vec::new(),
      recommended_producer_ids: Vec::new(),
    }
  }

  pub fn is_fallback(&self) -> bool {
    *self == Self::fallback()
  }
}

/// Contexto opcional de una petición: qué hay en pantalla y qué hueco se
/// quiere reemplazar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationContext {
  pub current_sample_ids: Vec<SampleId>,
  pub refresh_id: Option<SampleId>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_minimal_payload() {
    let rec: Recommendation = serde_json::from_str(r#"{"content":"hi"}"#).unwrap();
    assert_eq!(rec.content, "hi");
    assert!(rec.ui_trigger.is_none());
    assert!(rec.recommended_sample_ids.is_empty());
  }

  #[test]
  fn trigger_uses_wire_names() {
    let rec: Recommendation = serde_json::from_str(
      r#"{"content":"x","uiTrigger":"GOTO_VAULT","recommendedSampleIds":["s1","s4"],"recommendedProducerIds":["p1"]}"#,
    )
    .unwrap();
    assert_eq!(rec.ui_trigger, Some(UiTrigger::GotoVault));
    assert_eq!(rec.recommended_sample_ids, vec![SampleId::from("s1"), SampleId::from("s4")]);

    for t in UiTrigger::ALL {
      assert_eq!(serde_json::to_string(&t).unwrap(), format!("\"{}\"", t.as_str()));
    }
  }

  #[test]
  fn unknown_trigger_is_rejected() {
    assert!(serde_json::from_str::<Recommendation>(r#"{"content":"x","uiTrigger":"SIGN_ON"}"#).is_err());
    assert!(serde_json::from_str::<Recommendation>(r#"{"uiTrigger":null}"#).is_err());
  }
}
