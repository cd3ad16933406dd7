use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::domain::{Catalog, Recommendation, RecommendationContext, UiTrigger};
use crate::ports::{ModelRequest, RecommendationModel};

const PERSONA: &str = "You are the Ruido AI Oracle Core, a world-class sonic architect. You translate abstract \
creative intent into precise artifact recommendations.";

const SONIC_MAPPING: &str = "SONIC MAPPING PROTOCOL:
1. Parse \"Musician Speak\":
   - \"Crispy/High-end\" -> Focus on High BPM, Snares, or Digital textures.
   - \"Earthy/Warm\" -> Focus on Neo-Soul, Rhodes, or Analog-labeled artifacts.
   - \"Haunting/Dark\" -> Focus on Industrial, Dark Ambient, or minor keys (Fm, Cm).
2. Nuance Analysis: Identify if the user is building a foundation (drums/bass) or adding \"ear candy\" (one-shots/FX).";

const APP_COMMANDS: &str = "APP ARCHITECTURE COMMANDS:
- If user asks to see their stuff: uiTrigger = 'GOTO_VAULT'
- If user wants to browse: uiTrigger = 'GOTO_REGISTRY'
- If user needs to sign in: uiTrigger = 'GOTO_AUTH'
- If user wants to sell/upload: uiTrigger = 'UPLOAD_FORM' (check authentication context).
- After a completed action: uiTrigger = 'SUCCESS_STAMP'";

const REFRESH_RULES: &str = "REFRESH LOGIC:
- If a refresh slot is given, the user dislikes the recommendation with that ID.
- Provide a STRATEGIC ALTERNATIVE for that slot while keeping the overall project vibe consistent.
- Never return any artifact that is currently visible.";

/// Output schema declared to the model.
///
/// Uses the OpenAPI subset understood by `generateContent`: `content` is
/// required, `uiTrigger` is a nullable enum, the id lists are ordered.
pub fn recommendation_schema() -> Value {
  let triggers: Vec<&str> = UiTrigger::ALL.iter().map(UiTrigger::as_str).collect();

  json!({
    "type": "OBJECT",
    "properties": {
      "content": { "type": "STRING" },
      "uiTrigger": { "type": "STRING", "nullable": true, "enum": triggers },
      "recommendedSampleIds": { "type": "ARRAY", "items": { "type": "STRING" } },
      "recommendedProducerIds": { "type": "ARRAY", "items": { "type": "STRING" } }
    },
    "required": ["content"]
  })
}

/// Builds the fixed system instruction, embedding the lightweight catalog
/// projection. Prices and license counters are never part of it.
pub fn system_instruction(catalog: &Catalog) -> String {
  let samples = serde_json::to_string(&catalog.summaries()).unwrap_or_else(|_| "[]".to_string());
  let triggers: Vec<&str> = UiTrigger::ALL.iter().map(UiTrigger::as_str).collect();

  format!(
    "{PERSONA}\n\n{SONIC_MAPPING}\n\n{APP_COMMANDS}\n\n{REFRESH_RULES}\n\n\
     CATALOG ACCESS:\nSAMPLES: {samples}\n\n\
     OUTPUT FORMAT: Strictly JSON.\n\
     {{\"content\": string, \"uiTrigger\": {} | null, \"recommendedSampleIds\": [string], \"recommendedProducerIds\": [string]}}",
    triggers.join(" | ")
  )
}

/// User-turn prompt: the request text, the authentication context and, when
/// refreshing, the slot to replace and the ids to exclude.
pub fn user_prompt(user_text: &str, authenticated: bool, context: &RecommendationContext) -> String {
  let auth = if authenticated { "signed in" } else { "not signed in" };

  match &context.refresh_id {
    Some(slot) => {
      let visible: Vec<&str> = context.current_sample_ids.iter().map(|id| id.as_str()).collect();
      format!(
        "SYSTEM ACTION: REFRESH SLOT {slot}. Current visible artifacts: [{visible}]. \
         The user wants a superior alternative for the project vibe previously established: \"{user_text}\". \
         Replace slot {slot} specifically with exactly one artifact not in [{visible}].\n\
         AUTHENTICATION CONTEXT: user is {auth}.",
        visible = visible.join(", ")
      )
    }
    None => format!("{user_text}\nAUTHENTICATION CONTEXT: user is {auth}."),
  }
}

/// Parses raw model output against the declared schema.
pub fn parse_recommendation(raw: &str) -> Result<Recommendation, serde_json::Error> {
  serde_json::from_str(raw.trim())
}

/// Recommendation client: prompt in, structured recommendation out.
///
/// Ranking lives entirely in the external model. This type only owns the
/// request/response contract and the fallback; [`RecommendationClient::recommend`]
/// never returns an error.
pub struct RecommendationClient<M>
where
  M: RecommendationModel,
{
  model: M,
  system_instruction: String,
  schema: Value,
}

impl<M> RecommendationClient<M>
where
  M: RecommendationModel,
{
  pub fn new(model: M, catalog: &Catalog) -> Self {
    Self { model, system_instruction: system_instruction(catalog), schema: recommendation_schema() }
  }

  pub fn model(&self) -> &M {
    &self.model
  }

  pub fn build_request(&self, user_text: &str, authenticated: bool, context: &RecommendationContext) -> ModelRequest {
    ModelRequest {
      system_instruction: self.system_instruction.clone(),
      prompt: user_prompt(user_text, authenticated, context),
      response_schema: self.schema.clone(),
    }
  }

  pub async fn recommend(
    &self,
    user_text: &str,
    authenticated: bool,
    context: &RecommendationContext,
  ) -> Recommendation {
    let request = self.build_request(user_text, authenticated, context);

    let raw = match self.model.generate(&request).await {
      Ok(raw) => raw,
      Err(e) => {
        warn!(error = %e, "recommendation model unavailable, using fallback");
        return Recommendation::fallback();
      }
    };

    match parse_recommendation(&raw) {
      Ok(rec) => {
        debug!(
          samples = rec.recommended_sample_ids.len(),
          producers = rec.recommended_producer_ids.len(),
          trigger = ?rec.ui_trigger,
          "recommendation received"
        );
        rec
      }
      Err(e) => {
        warn!(error = %e, "recommendation failed schema validation, using fallback");
        Recommendation::fallback()
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Licenses, Price, ProducerId, Sample, SampleId, SampleKind};
  use crate::ports::ModelError;
  use async_trait::async_trait;
  use std::sync::Mutex;

  struct CannedModel {
    reply: Result<String, String>,
    seen: Mutex<Vec<ModelRequest>>,
  }

  impl CannedModel {
    fn ok(body: &str) -> Self {
      Self { reply: Ok(body.to_string()), seen: Mutex::new(Vec::new()) }
    }

    fn failing() -> Self {
      Self { reply: Err("connection reset".to_string()), seen: Mutex::new(Vec::new()) }
    }
  }

  #[async_trait]
  impl RecommendationModel for CannedModel {
    async fn generate(&self, request: &ModelRequest) -> Result<String, ModelError> {
      self.seen.lock().unwrap().push(request.clone());
      self.reply.clone().map_err(ModelError::Transport)
    }
  }

  fn catalog() -> Catalog {
    let s = Sample {
      id: SampleId::from("s1"),
      title: "Void Sub Bass Loop".into(),
      producer_id: ProducerId::from("p1"),
      producer_name: "Ghost Echo".into(),
      pack_id: None,
      genre: "Techno".into(),
      bpm: 128,
      key: "Fm".into(),
      kind: SampleKind::Loop,
      price: Price::from_cents(2499),
      licenses: Licenses::capped(2, 5),
      audio_url: "https://cdn.test/s1.mp3".into(),
      tags: vec!["dark".into()],
      description: "Moog sub.".into(),
    };
    Catalog::new(vec![], vec![s])
  }

  #[tokio::test]
  async fn valid_response_is_returned_as_is() {
    let client = RecommendationClient::new(
      CannedModel::ok(r#"{"content":"Go dark.","uiTrigger":"GOTO_REGISTRY","recommendedSampleIds":["s1"]}"#),
      &catalog(),
    );

    let rec = client.recommend("dark techno", false, &RecommendationContext::default()).await;
    assert_eq!(rec.content, "Go dark.");
    assert_eq!(rec.ui_trigger, Some(UiTrigger::GotoRegistry));
    assert_eq!(rec.recommended_sample_ids, vec![SampleId::from("s1")]);
  }

  #[tokio::test]
  async fn malformed_payload_degrades_to_fallback() {
    let client = RecommendationClient::new(CannedModel::ok("{\"contnt\": 3"), &catalog());
    let rec = client.recommend("anything", true, &RecommendationContext::default()).await;

    assert_eq!(rec, Recommendation::fallback());
    assert_eq!(rec.content, "Signal degradation. Please re-state your sonic intention.");
    assert!(rec.ui_trigger.is_none());
  }

  #[tokio::test]
  async fn transport_failure_degrades_to_fallback() {
    let client = RecommendationClient::new(CannedModel::failing(), &catalog());
    let rec = client.recommend("anything", false, &RecommendationContext::default()).await;
    assert!(rec.is_fallback());
  }

  #[tokio::test]
  async fn request_embeds_projection_without_commercial_fields() {
    let client = RecommendationClient::new(CannedModel::ok(r#"{"content":"ok"}"#), &catalog());
    client.recommend("warm keys", true, &RecommendationContext::default()).await;

    let seen = client.model().seen.lock().unwrap();
    let req = &seen[0];
    assert!(req.system_instruction.contains("\"id\":\"s1\""));
    assert!(req.system_instruction.contains("Moog sub."));
    assert!(!req.system_instruction.contains("licensesSold"));
    assert!(!req.system_instruction.contains("2499"));
    assert!(req.prompt.starts_with("warm keys"));
    assert!(req.prompt.contains("user is signed in"));
    assert_eq!(req.response_schema["required"], json!(["content"]));
  }

  #[test]
  fn refresh_prompt_targets_slot_and_excludes_visible() {
    let ctx = RecommendationContext {
      current_sample_ids: vec![SampleId::from("s1"), SampleId::from("s4")],
      refresh_id: Some(SampleId::from("s4")),
    };
    let prompt = user_prompt("dark drums", false, &ctx);

    assert!(prompt.starts_with("SYSTEM ACTION: REFRESH SLOT s4."));
    assert!(prompt.contains("Current visible artifacts: [s1, s4]"));
    assert!(prompt.contains("\"dark drums\""));
    assert!(prompt.contains("not in [s1, s4]"));
  }

  #[test]
  fn schema_enumerates_every_trigger() {
    let schema = recommendation_schema();
    let values = schema["properties"]["uiTrigger"]["enum"].as_array().unwrap();
    assert_eq!(values.len(), 5);
    assert!(values.contains(&json!("SUCCESS_STAMP")));
  }
}
