use crate::domain::ids::{ProducerId, SampleId};
use crate::domain::recommendation::{Recommendation, UiTrigger};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
  User,
  Assistant,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
  pub samples: Vec<SampleId>,
  pub producers: Vec<ProducerId>,
}

/// Un mensaje del transcript del Oracle. El transcript solo crece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
  pub role: ChatRole,
  pub content: String,
  pub ui_trigger: Option<UiTrigger>,
  pub recommendations: Option<Recommendations>,
}

impl ChatMessage {
  pub fn user(content: impl Into<String>) -> Self {
    ChatMessage { role: ChatRole::User, content: content.into(), ui_trigger: None, recommendations: None }
  }

  pub fn assistant(content: impl Into<String>) -> Self {
    ChatMessage { role: ChatRole::Assistant, content: content.into(), ui_trigger: None, recommendations: None }
  }

  pub fn with_trigger(mut self, trigger: UiTrigger) -> Self {
    self.ui_trigger = Some(trigger);
    self
  }

  pub fn recommended_samples(&self) -> Option<&[SampleId]> {
    self.recommendations.as_ref().map(|r| r.samples.as_slice())
  }
}

impl From<Recommendation> for ChatMessage {
  fn from(rec: Recommendation) -> Self {
    ChatMessage {
      role: ChatRole::Assistant,
      content: rec.content,
      ui_trigger: rec.ui_trigger,
      recommendations: Some(Recommendations {
        samples: rec.recommended_sample_ids,
        producers: rec.recommended_producer_ids,
      }),
    }
  }
}
