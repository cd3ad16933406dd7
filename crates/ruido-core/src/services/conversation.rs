use tracing::debug;

use crate::domain::{ChatMessage, ChatRole, Recommendation, RecommendationContext, SampleId, UiTrigger};
use crate::errors::ConversationError;

pub const GREETING: &str = "Protocol engaged. I am the Ruido Oracle. Describe your sonic parameters, and I will \
extract the required artifacts from the vault.";

/// Identifies the single in-flight request of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnTicket(u64);

/// A request the host must send to the recommendation client and hand
/// back through [`Conversation::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
  pub ticket: TurnTicket,
  pub text: String,
  pub context: RecommendationContext,
}

/// Oracle transcript with busy gating.
///
/// At most one request is outstanding; a second submit while busy is
/// refused. Once closed, late responses are dropped instead of being applied.
#[derive(Debug)]
pub struct Conversation {
  messages: Vec<ChatMessage>,
  in_flight: Option<TurnTicket>,
  next_ticket: u64,
  closed: bool,
}

impl Default for Conversation {
  fn default() -> Self {
    Self::new()
  }
}

impl Conversation {
  pub fn new() -> Self {
    Self { messages: vec![ChatMessage::assistant(GREETING)], in_flight: None, next_ticket: 0, closed: false }
  }

  pub fn messages(&self) -> &[ChatMessage] {
    &self.messages
  }

  pub fn is_busy(&self) -> bool {
    self.in_flight.is_some()
  }

  pub fn is_closed(&self) -> bool {
    self.closed
  }

  /// Sample ids of the most recent assistant message that carried any.
  pub fn visible_sample_ids(&self) -> Vec<SampleId> {
    self
      .messages
      .iter()
      .rev()
      .filter(|m| m.role == ChatRole::Assistant)
      .find_map(|m| m.recommended_samples())
      .map(<[SampleId]>::to_vec)
      .unwrap_or_default()
  }

  /// Appends the user's message and opens a turn.
  pub fn submit(&mut self, text: &str) -> Result<PendingTurn, ConversationError> {
    if text.trim().is_empty() {
      return Err(ConversationError::Blank);
    }
    let ticket = self.open_turn()?;
    self.messages.push(ChatMessage::user(text));

    let context = RecommendationContext { current_sample_ids: self.visible_sample_ids(), refresh_id: None };
    Ok(PendingTurn { ticket, text: text.to_string(), context })
  }

  /// Asks for a replacement of one recommended slot. No user message is
  /// added to the transcript.
  pub fn submit_refresh(&mut self, slot: &SampleId) -> Result<PendingTurn, ConversationError> {
    let ticket = self.open_turn()?;
    let context =
      RecommendationContext { current_sample_ids: self.visible_sample_ids(), refresh_id: Some(slot.clone()) };
    let text = format!("Replace artifact {slot}. Extract alternative unit.");
    Ok(PendingTurn { ticket, text, context })
  }

  /// Applies the response of `ticket`. Returns `None` when the response is
  /// stale or the conversation was closed meanwhile.
  pub fn resolve(&mut self, ticket: TurnTicket, recommendation: Recommendation) -> Option<&ChatMessage> {
    if self.closed || self.in_flight != Some(ticket) {
      debug!(?ticket, closed = self.closed, "discarding stale recommendation");
      return None;
    }
    self.in_flight = None;
    self.messages.push(ChatMessage::from(recommendation));
    self.messages.last()
  }

  /// Releases the busy flag without appending anything.
  pub fn abandon(&mut self, ticket: TurnTicket) {
    if self.in_flight == Some(ticket) {
      self.in_flight = None;
    }
  }

  /// Local assistant message (e.g. sign-in confirmation).
  pub fn push_assistant(&mut self, content: impl Into<String>, trigger: Option<UiTrigger>) {
    if self.closed {
      return;
    }
    let mut msg = ChatMessage::assistant(content);
    msg.ui_trigger = trigger;
    self.messages.push(msg);
  }

  /// Tears the conversation down; any in-flight response will be dropped.
  pub fn close(&mut self) {
    self.closed = true;
    self.in_flight = None;
  }

  fn open_turn(&mut self) -> Result<TurnTicket, ConversationError> {
    if self.closed {
      return Err(ConversationError::Closed);
    }
    if self.in_flight.is_some() {
      return Err(ConversationError::Busy);
    }
    let ticket = TurnTicket(self.next_ticket);
    self.next_ticket += 1;
    self.in_flight = Some(ticket);
    Ok(ticket)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ProducerId;

  fn rec(content: &str, samples: &[&str]) -> Recommendation {
    Recommendation {
      content: content.to_string(),
      ui_trigger: None,
      recommended_sample_ids: samples.iter().map(|s| SampleId::from(*s)).collect(),
      recommended_producer_ids: vec![ProducerId::from("p1")],
    }
  }

  #[test]
  fn starts_with_greeting() {
    let c = Conversation::new();
    assert_eq!(c.messages().len(), 1);
    assert_eq!(c.messages()[0].role, ChatRole::Assistant);
    assert_eq!(c.messages()[0].content, GREETING);
  }

  #[test]
  fn blank_input_is_rejected() {
    let mut c = Conversation::new();
    assert_eq!(c.submit("   ").unwrap_err(), ConversationError::Blank);
    assert!(!c.is_busy());
  }

  #[test]
  fn second_submit_while_busy_is_refused() {
    let mut c = Conversation::new();
    let turn = c.submit("dark techno").unwrap();

    assert!(c.is_busy());
    assert_eq!(c.submit("more").unwrap_err(), ConversationError::Busy);
    assert_eq!(c.messages().len(), 2);

    let msg = c.resolve(turn.ticket, rec("Try these.", &["s1"])).unwrap();
    assert_eq!(msg.recommended_samples(), Some(&[SampleId::from("s1")][..]));
    assert!(!c.is_busy());
  }

  #[test]
  fn refresh_uses_last_recommendations_and_adds_no_user_message() {
    let mut c = Conversation::new();
    let t = c.submit("dusty loops").unwrap();
    c.resolve(t.ticket, rec("Here.", &["s2", "s5"]));

    let refresh = c.submit_refresh(&SampleId::from("s5")).unwrap();
    assert_eq!(refresh.context.current_sample_ids, vec![SampleId::from("s2"), SampleId::from("s5")]);
    assert_eq!(refresh.context.refresh_id, Some(SampleId::from("s5")));
    assert_eq!(refresh.text, "Replace artifact s5. Extract alternative unit.");
    assert_eq!(c.messages().len(), 3);
  }

  #[test]
  fn response_after_close_is_discarded() {
    let mut c = Conversation::new();
    let t = c.submit("anything").unwrap();
    c.close();

    assert!(c.resolve(t.ticket, rec("late", &[])).is_none());
    assert_eq!(c.messages().len(), 2);
    assert_eq!(c.submit("again").unwrap_err(), ConversationError::Closed);
  }

  #[test]
  fn abandoned_turn_frees_the_slot() {
    let mut c = Conversation::new();
    let t = c.submit("one").unwrap();
    c.abandon(t.ticket);

    let t2 = c.submit("two").unwrap();
    assert!(c.resolve(t.ticket, rec("stale", &[])).is_none());
    assert!(c.resolve(t2.ticket, rec("fresh", &[])).is_some());
  }
}
