use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use futures::StreamExt;
use ruido_core::domain::{AppView, Catalog, ChatMessage, Sample, SampleId, UiTrigger, UserState};
use ruido_core::ports::{AuthProvider, Clock, MediaTransport, RecommendationModel};
use ruido_core::services::{Conversation, PendingTurn, RecommendationClient, StorefrontSession, TurnTicket};
use ruido_core::{ConversationError, CoreError, PurchaseError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::dto::SessionSnapshot;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
  m.lock().unwrap_or_else(|e| e.into_inner())
}

/// Single-slot dismissal timer.
///
/// Holds at most one sleeping task. Scheduling a new deadline aborts the
/// previous task, so an old banner's timer never races a new banner.
#[derive(Default)]
struct DismissalTimer {
  slot: Mutex<Option<(Instant, JoinHandle<()>)>>,
}

impl DismissalTimer {
  fn schedule<T, C>(&self, session: &Arc<Mutex<StorefrontSession<T, C>>>, deadline: Option<Instant>)
  where
    T: MediaTransport + Send + 'static,
    C: Clock + Send + 'static,
  {
    let mut slot = lock(&self.slot);

    if let (Some((scheduled, _)), Some(deadline)) = (slot.as_ref(), deadline) {
      if *scheduled == deadline {
        return;
      }
    }
    if let Some((_, handle)) = slot.take() {
      handle.abort();
    }

    let Some(deadline) = deadline else {
      return;
    };

    let session = Arc::clone(session);
    let handle = tokio::spawn(async move {
      tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
      if lock(&session).dismiss_expired() {
        debug!("notification dismissed");
      }
    });
    *slot = Some((deadline, handle));
  }

  fn cancel(&self) {
    if let Some((_, handle)) = lock(&self.slot).take() {
      handle.abort();
    }
  }
}

/// Releases the conversation's busy flag if a send is dropped mid-flight.
struct TurnGuard<'a> {
  conversation: &'a Mutex<Conversation>,
  ticket: Option<TurnTicket>,
}

impl TurnGuard<'_> {
  fn disarm(&mut self) -> Option<TurnTicket> {
    self.ticket.take()
  }
}

impl Drop for TurnGuard<'_> {
  fn drop(&mut self) {
    if let Some(ticket) = self.ticket.take() {
      lock(self.conversation).abandon(ticket);
    }
  }
}

/// Live storefront: the session view-model wired to its collaborators.
///
/// Owns the single media handle (inside the session), the Oracle
/// conversation, the recommendation client, one identity subscription and
/// the notification timer. Must be used from within a tokio runtime.
pub struct Storefront<T, C, M, A>
where
  T: MediaTransport + Send + 'static,
  C: Clock + Send + 'static,
  M: RecommendationModel,
  A: AuthProvider + 'static,
{
  session: Arc<Mutex<StorefrontSession<T, C>>>,
  conversation: Mutex<Conversation>,
  client: RecommendationClient<M>,
  auth: Arc<A>,
  timer: DismissalTimer,
  identity_task: Mutex<Option<JoinHandle<()>>>,
}

impl<T, C, M, A> Storefront<T, C, M, A>
where
  T: MediaTransport + Send + 'static,
  C: Clock + Send + 'static,
  M: RecommendationModel,
  A: AuthProvider + 'static,
{
  pub fn new(session: StorefrontSession<T, C>, model: M, auth: Arc<A>) -> Self {
    let client = RecommendationClient::new(model, session.catalog());
    Self {
      session: Arc::new(Mutex::new(session)),
      conversation: Mutex::new(Conversation::new()),
      client,
      auth,
      timer: DismissalTimer::default(),
      identity_task: Mutex::new(None),
    }
  }

  /// Subscribes to identity changes. Calling it again replaces the previous
  /// subscription.
  pub fn start(&self) {
    let mut changes = self.auth.identity_changes();
    let session = Arc::clone(&self.session);

    let task = tokio::spawn(async move {
      while let Some(identity) = changes.next().await {
        lock(&session).set_authenticated_user(identity);
      }
    });

    if let Some(previous) = lock(&self.identity_task).replace(task) {
      previous.abort();
    }
  }

  /// Ends the session: drops the identity subscription, cancels the banner
  /// timer, stops playback and closes the conversation so in-flight
  /// responses are discarded.
  pub fn shutdown(&self) {
    if let Some(task) = lock(&self.identity_task).take() {
      task.abort();
    }
    self.timer.cancel();
    lock(&self.session).close_player();
    lock(&self.conversation).close();
    info!("storefront session closed");
  }

  // -------- READ --------

  pub fn snapshot(&self) -> SessionSnapshot {
    SessionSnapshot::capture(&lock(&self.session))
  }

  pub fn messages(&self) -> Vec<ChatMessage> {
    lock(&self.conversation).messages().to_vec()
  }

  pub fn is_busy(&self) -> bool {
    lock(&self.conversation).is_busy()
  }

  pub fn auth(&self) -> &Arc<A> {
    &self.auth
  }

  pub fn catalog(&self) -> Catalog {
    lock(&self.session).catalog().clone()
  }

  /// Artifacts recommended in `message`, resolved against the live catalog.
  /// Ids the catalog does not know are skipped.
  pub fn recommended_samples(&self, message: &ChatMessage) -> Vec<Sample> {
    let session = lock(&self.session);
    let ids = message.recommended_samples().unwrap_or_default();
    session.catalog().resolve_samples(ids).into_iter().cloned().collect()
  }

  /// Runs `f` against the session view-model, then reschedules the banner.
  pub fn with_session<R>(&self, f: impl FnOnce(&mut StorefrontSession<T, C>) -> R) -> R {
    let (out, deadline) = {
      let mut session = lock(&self.session);
      let out = f(&mut session);
      (out, session.notification_deadline())
    };
    self.timer.schedule(&self.session, deadline);
    out
  }

  // -------- SESSION INTENTS --------

  pub fn search(&self, term: &str) {
    self.with_session(|s| s.search(term));
  }

  pub fn navigate(&self, view: AppView) {
    self.with_session(|s| s.navigate(view));
  }

  pub fn purchase(&self, id: &SampleId) -> Result<(), PurchaseError> {
    self.with_session(|s| s.purchase(id))
  }

  pub fn play(&self, id: &SampleId) -> Result<(), CoreError> {
    self.with_session(|s| s.select_for_playback(id))
  }

  pub fn toggle_playback(&self) {
    self.with_session(|s| s.toggle_playback());
  }

  pub fn media_ended(&self) {
    self.with_session(|s| s.on_media_ended());
  }

  pub fn close_player(&self) {
    self.with_session(|s| s.close_player());
  }

  // -------- IDENTITY --------

  /// Interactive sign-in. Cancellation and provider errors both end as
  /// "no identity" without a banner.
  pub async fn sign_in(&self) -> Option<UserState> {
    match self.auth.sign_in().await {
      Ok(Some(user)) => {
        self.with_session(|s| s.set_authenticated_user(Some(user.clone())));
        lock(&self.conversation)
          .push_assistant(format!("Identity Synchronized. Welcome back, {}.", user.label()), Some(UiTrigger::SuccessStamp));
        Some(user)
      }
      Ok(None) => {
        debug!("sign-in cancelled");
        None
      }
      Err(e) => {
        warn!(error = %e, "sign-in failed");
        None
      }
    }
  }

  pub async fn sign_out(&self) {
    if let Err(e) = self.auth.sign_out().await {
      warn!(error = %e, "provider sign-out failed");
    }
    self.with_session(|s| s.sign_out());
  }

  // -------- ORACLE --------

  /// Sends a message to the Oracle. Returns the appended assistant message,
  /// or `None` when the session was shut down before the answer arrived.
  pub async fn send_message(&self, text: &str) -> Result<Option<ChatMessage>, ConversationError> {
    let turn = lock(&self.conversation).submit(text)?;
    Ok(self.run_turn(turn).await)
  }

  /// Asks for an alternative to one recommended artifact.
  pub async fn refresh_slot(&self, slot: &SampleId) -> Result<Option<ChatMessage>, ConversationError> {
    let turn = lock(&self.conversation).submit_refresh(slot)?;
    Ok(self.run_turn(turn).await)
  }

  async fn run_turn(&self, turn: PendingTurn) -> Option<ChatMessage> {
    let mut guard = TurnGuard { conversation: &self.conversation, ticket: Some(turn.ticket) };
    let authenticated = lock(&self.session).is_authenticated();

    let recommendation = self.client.recommend(&turn.text, authenticated, &turn.context).await;
    let trigger = recommendation.ui_trigger;

    let ticket = guard.disarm()?;
    let applied = lock(&self.conversation).resolve(ticket, recommendation).cloned();

    if applied.is_some() {
      if let Some(trigger) = trigger {
        self.apply_trigger(trigger).await;
      }
    }
    applied
  }

  async fn apply_trigger(&self, trigger: UiTrigger) {
    debug!(?trigger, "applying ui trigger");
    match trigger {
      UiTrigger::GotoVault => self.navigate(AppView::Vault),
      UiTrigger::GotoRegistry => self.navigate(AppView::Registry),
      UiTrigger::GotoAuth => {
        self.sign_in().await;
      }
      UiTrigger::UploadForm | UiTrigger::SuccessStamp => {}
    }
  }
}

impl<T, C, M, A> Drop for Storefront<T, C, M, A>
where
  T: MediaTransport + Send + 'static,
  C: Clock + Send + 'static,
  M: RecommendationModel,
  A: AuthProvider + 'static,
{
  fn drop(&mut self) {
    if let Some(task) = lock(&self.identity_task).take() {
      task.abort();
    }
    self.timer.cancel();
  }
}
