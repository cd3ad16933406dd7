use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::domain::{
  AppView, Catalog, Notification, PlaybackState, Sample, SampleId, SessionId, UserState,
};
use crate::errors::{CoreError, PurchaseError};
use crate::ports::{Clock, MediaTransport};

/// Delay before a notification banner is dismissed.
pub const DEFAULT_NOTIFICATION_DELAY: Duration = Duration::from_secs(3);

/// Single-slot notification timer.
///
/// Emitting replaces both the banner and its deadline, so a pending dismissal
/// of an older banner can never clear a newer one.
#[derive(Debug, Default)]
struct NotificationSlot {
  current: Option<(Notification, Instant)>,
}

impl NotificationSlot {
  fn emit(&mut self, notification: Notification, deadline: Instant) {
    self.current = Some((notification, deadline));
  }

  fn visible(&self, now: Instant) -> Option<&Notification> {
    match &self.current {
      Some((n, deadline)) if now < *deadline => Some(n),
      _ => None,
    }
  }

  fn deadline(&self) -> Option<Instant> {
    self.current.as_ref().map(|(_, d)| *d)
  }

  fn clear_expired(&mut self, now: Instant) -> bool {
    match &self.current {
      Some((_, deadline)) if now >= *deadline => {
        self.current = None;
        true
      }
      _ => false,
    }
  }
}

/// Session view-model of the storefront.
///
/// Owns everything that changes while a visitor browses: the catalog's
/// license counters, search term, ownership set, playback, identity, active
/// view and the notification banner. Every method is a synchronous
/// transition; the only deferred effect is the notification dismissal, which
/// the host drives through [`StorefrontSession::notification_deadline`] and
/// [`StorefrontSession::dismiss_expired`].
pub struct StorefrontSession<T, C>
where
  T: MediaTransport,
  C: Clock,
{
  id: SessionId,
  catalog: Catalog,
  search_term: String,
  owned: Vec<SampleId>,
  playback: PlaybackState,
  user: Option<UserState>,
  view: AppView,
  notice: NotificationSlot,
  notification_delay: Duration,
  transport: T,
  clock: C,
}

impl<T, C> StorefrontSession<T, C>
where
  T: MediaTransport,
  C: Clock,
{
  pub fn new(catalog: Catalog, transport: T, clock: C) -> Self {
    Self::with_notification_delay(catalog, transport, clock, DEFAULT_NOTIFICATION_DELAY)
  }

  pub fn with_notification_delay(catalog: Catalog, transport: T, clock: C, notification_delay: Duration) -> Self {
    let id = SessionId::new();
    info!(session = %id, samples = catalog.samples.len(), "storefront session opened");

    Self {
      id,
      catalog,
      search_term: String::new(),
      owned: Vec::new(),
      playback: PlaybackState::Idle,
      user: None,
      view: AppView::Landing,
      notice: NotificationSlot::default(),
      notification_delay,
      transport,
      clock,
    }
  }

  pub fn id(&self) -> SessionId {
    self.id
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  pub fn transport(&self) -> &T {
    &self.transport
  }

  // -------- VIEW --------

  pub fn view(&self) -> AppView {
    self.view
  }

  pub fn navigate(&mut self, view: AppView) {
    debug!(session = %self.id, ?view, "navigate");
    self.view = view;
  }

  // -------- SEARCH / REGISTRY --------

  pub fn search(&mut self, term: impl Into<String>) {
    self.search_term = term.into();
  }

  pub fn search_term(&self) -> &str {
    &self.search_term
  }

  /// Artifacts visible in the registry under the current search term.
  pub fn registry(&self) -> Vec<&Sample> {
    self.catalog.search(&self.search_term)
  }

  // -------- OWNERSHIP / VAULT --------

  pub fn is_owned(&self, id: &SampleId) -> bool {
    self.owned.contains(id)
  }

  /// Purchased ids in purchase order.
  pub fn owned_ids(&self) -> &[SampleId] {
    &self.owned
  }

  pub fn owned_count(&self) -> usize {
    self.owned.len()
  }

  /// Owned artifacts in catalog order.
  pub fn vault(&self) -> Vec<&Sample> {
    self.catalog.samples.iter().filter(|s| self.owned.contains(&s.id)).collect()
  }

  /// Secures one license of `id` for this session.
  ///
  /// Rejections leave every counter untouched. Owned and sold-out rejections
  /// still raise a banner; an unknown id is only logged.
  pub fn purchase(&mut self, id: &SampleId) -> Result<(), PurchaseError> {
    if self.is_owned(id) {
      debug!(session = %self.id, sample_id = %id, "purchase ignored: already owned");
      self.notify(Notification::already_owned());
      return Err(PurchaseError::AlreadyOwned(id.clone()));
    }

    let Some(sample) = self.catalog.sample_mut(id) else {
      warn!(session = %self.id, sample_id = %id, "purchase of unknown artifact");
      return Err(PurchaseError::Unknown(id.clone()));
    };

    match sample.sell_license() {
      Ok(remaining) => {
        self.owned.push(id.clone());
        info!(session = %self.id, sample_id = %id, remaining, "artifact secured");
        self.notify(Notification::purchased(id));
        Ok(())
      }
      Err(e) => {
        info!(session = %self.id, sample_id = %id, error = %e, "purchase rejected");
        self.notify(Notification::sold_out(id));
        Err(PurchaseError::SoldOut(id.clone()))
      }
    }
  }

  // -------- PLAYBACK --------

  pub fn playback(&self) -> &PlaybackState {
    &self.playback
  }

  pub fn is_playing(&self) -> bool {
    self.playback.is_playing()
  }

  /// The artifact loaded in the player, with live license counters.
  pub fn current_sample(&self) -> Option<&Sample> {
    self.playback.current().and_then(|id| self.catalog.sample(id))
  }

  /// Selecting the current artifact toggles it; any other artifact replaces
  /// it after the previous one has been stopped.
  pub fn select_for_playback(&mut self, id: &SampleId) -> Result<(), CoreError> {
    if self.playback.current() == Some(id) {
      self.toggle_playback();
      return Ok(());
    }

    let url = self.catalog.sample(id).map(|s| s.audio_url.clone()).ok_or_else(|| CoreError::SampleNotFound(id.clone()))?;

    if let PlaybackState::Loaded { sample_id, .. } = &self.playback {
      debug!(session = %self.id, previous = %sample_id, "releasing previous artifact");
      self.transport.stop();
    }

    self.playback = PlaybackState::Loaded { sample_id: id.clone(), playing: true };
    self.transport.load(&url);
    self.start_transport();
    Ok(())
  }

  /// Pause/resume of the current artifact. No-op while idle.
  pub fn toggle_playback(&mut self) {
    match self.playback {
      PlaybackState::Idle => {}
      PlaybackState::Loaded { playing: true, .. } => {
        self.transport.pause();
        self.set_playing(false);
      }
      PlaybackState::Loaded { playing: false, .. } => {
        self.set_playing(true);
        self.start_transport();
      }
    }
  }

  /// The media reached its end: paused, still loaded.
  pub fn on_media_ended(&mut self) {
    self.set_playing(false);
  }

  pub fn close_player(&mut self) {
    if self.playback != PlaybackState::Idle {
      self.transport.stop();
      self.playback = PlaybackState::Idle;
    }
  }

  fn start_transport(&mut self) {
    if let Err(e) = self.transport.play() {
      warn!(session = %self.id, error = %e, "playback start failed");
      self.set_playing(false);
    }
  }

  fn set_playing(&mut self, value: bool) {
    if let PlaybackState::Loaded { playing, .. } = &mut self.playback {
      *playing = value;
    }
  }

  // -------- IDENTITY --------

  pub fn user(&self) -> Option<&UserState> {
    self.user.as_ref()
  }

  pub fn is_authenticated(&self) -> bool {
    self.user.is_some()
  }

  /// Mirrors an event from the auth provider. `None` while already signed
  /// out changes nothing.
  pub fn set_authenticated_user(&mut self, user: Option<UserState>) {
    if self.user == user {
      return;
    }
    match &user {
      Some(u) => info!(session = %self.id, uid = %u.uid, "identity synchronized"),
      None => info!(session = %self.id, "identity cleared"),
    }
    self.user = user;
  }

  pub fn sign_out(&mut self) {
    self.user = None;
    self.notify(Notification::disconnected());
  }

  // -------- NOTIFICATIONS --------

  /// The banner currently on screen, if its delay has not elapsed.
  pub fn notification(&self) -> Option<&Notification> {
    self.notice.visible(self.clock.now())
  }

  /// When the pending banner should be dismissed.
  pub fn notification_deadline(&self) -> Option<Instant> {
    self.notice.deadline()
  }

  /// Drops the banner if its deadline passed. Returns `true` if one was cleared.
  pub fn dismiss_expired(&mut self) -> bool {
    self.notice.clear_expired(self.clock.now())
  }

  fn notify(&mut self, notification: Notification) {
    let deadline = self.clock.now() + self.notification_delay;
    self.notice.emit(notification, deadline);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Licenses, NotificationKind, Price, Producer, ProducerId, Rating, SampleKind, UserRole};
  use crate::ports::{ManualClock, PlaybackError};

  #[derive(Debug, Clone, PartialEq, Eq)]
  enum Call {
    Load(String),
    Play,
    Pause,
    Stop,
  }

  #[derive(Default)]
  struct RecordingTransport {
    calls: Vec<Call>,
    block_play: bool,
  }

  impl MediaTransport for RecordingTransport {
    fn load(&mut self, url: &str) {
      self.calls.push(Call::Load(url.to_string()));
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
      self.calls.push(Call::Play);
      if self.block_play { Err(PlaybackError::Blocked("autoplay".into())) } else { Ok(()) }
    }

    fn pause(&mut self) {
      self.calls.push(Call::Pause);
    }

    fn stop(&mut self) {
      self.calls.push(Call::Stop);
    }
  }

  fn sample(id: &str, title: &str, producer: &str, sold: u32, max: u32) -> Sample {
    Sample {
      id: SampleId::from(id),
      title: title.to_string(),
      producer_id: ProducerId::from("p1"),
      producer_name: producer.to_string(),
      pack_id: None,
      genre: "Techno".to_string(),
      bpm: 128,
      key: "Fm".to_string(),
      kind: SampleKind::Loop,
      price: Price::from_cents(2499),
      licenses: Licenses::capped(sold, max),
      audio_url: format!("https://cdn.test/{id}.mp3"),
      tags: vec![],
      description: String::new(),
    }
  }

  fn catalog() -> Catalog {
    let producer = Producer {
      id: ProducerId::from("p1"),
      name: "Ghost Echo".to_string(),
      specialization: vec!["Techno".to_string()],
      bio: String::new(),
      avatar: String::new(),
      sample_count: 12,
      rating: Rating::from_tenths(49),
    };
    Catalog::new(
      vec![producer],
      vec![
        sample("s1", "Void Sub Bass Loop", "Ghost Echo", 2, 5),
        sample("s2", "Dusk Rhodes Progressions", "Lush Theory", 4, 5),
        sample("s3", "Steel Snare One-Shot", "HyperDrive", 0, 5),
        sample("s9", "Last Unit", "HyperDrive", 5, 5),
      ],
    )
  }

  fn session() -> (StorefrontSession<RecordingTransport, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    (StorefrontSession::new(catalog(), RecordingTransport::default(), clock.clone()), clock)
  }

  fn sold(s: &StorefrontSession<RecordingTransport, ManualClock>, id: &str) -> u32 {
    s.catalog().sample(&SampleId::from(id)).unwrap().licenses.sold()
  }

  #[test]
  fn purchase_secures_license_and_clears_banner_after_delay() {
    let (mut s, clock) = session();
    let id = SampleId::from("s3");

    s.purchase(&id).unwrap();

    assert_eq!(sold(&s, "s3"), 1);
    assert_eq!(s.owned_ids(), &[id.clone()]);
    let n = s.notification().unwrap();
    assert_eq!(n.kind, NotificationKind::Purchased);
    assert_eq!(n.message, "Registry Updated: Artifact s3 Secured.");

    clock.advance(Duration::from_millis(2999));
    assert!(s.notification().is_some());
    assert!(!s.dismiss_expired());

    clock.advance(Duration::from_millis(1));
    assert!(s.notification().is_none());
    assert!(s.dismiss_expired());
    assert!(s.notification_deadline().is_none());
  }

  #[test]
  fn second_purchase_is_idempotent() {
    let (mut s, _) = session();
    let id = SampleId::from("s1");

    s.purchase(&id).unwrap();
    assert_eq!(s.purchase(&id), Err(PurchaseError::AlreadyOwned(id.clone())));

    assert_eq!(sold(&s, "s1"), 3);
    assert_eq!(s.owned_count(), 1);
    assert_eq!(s.notification().unwrap().message, "Artifact already secured.");
  }

  #[test]
  fn sold_out_purchase_changes_nothing() {
    let (mut s, _) = session();
    let id = SampleId::from("s9");

    assert_eq!(s.purchase(&id), Err(PurchaseError::SoldOut(id.clone())));
    assert_eq!(sold(&s, "s9"), 5);
    assert!(!s.is_owned(&id));
    assert_eq!(s.notification().unwrap().kind, NotificationKind::SoldOut);
  }

  #[test]
  fn unknown_purchase_is_silent() {
    let (mut s, _) = session();
    let id = SampleId::from("nope");

    assert_eq!(s.purchase(&id), Err(PurchaseError::Unknown(id)));
    assert!(s.notification().is_none());
    assert_eq!(s.owned_count(), 0);
  }

  #[test]
  fn last_license_then_sold_out() {
    let (mut s, _) = session();
    s.purchase(&SampleId::from("s2")).unwrap();
    assert_eq!(sold(&s, "s2"), 5);
    assert!(s.catalog().sample(&SampleId::from("s2")).unwrap().is_sold_out());
  }

  #[test]
  fn newer_banner_replaces_pending_dismissal() {
    let (mut s, clock) = session();
    s.purchase(&SampleId::from("s3")).unwrap();

    clock.advance(Duration::from_secs(2));
    s.sign_out();

    clock.advance(Duration::from_secs(2));
    assert_eq!(s.notification().unwrap().message, "Disconnected from Registry.");

    clock.advance(Duration::from_secs(1));
    assert!(s.notification().is_none());
  }

  #[test]
  fn search_matches_title_or_producer_case_insensitively() {
    let (mut s, _) = session();

    s.search("ghost");
    let titles: Vec<_> = s.registry().iter().map(|x| x.title.as_str()).collect();
    assert_eq!(titles, vec!["Void Sub Bass Loop"]);

    s.search("RHODES");
    assert_eq!(s.registry().len(), 1);

    s.search("");
    assert_eq!(s.registry().len(), 4);
  }

  #[test]
  fn selecting_same_artifact_toggles_without_reload() {
    let (mut s, _) = session();
    let id = SampleId::from("s1");

    s.select_for_playback(&id).unwrap();
    assert!(s.is_playing());
    s.select_for_playback(&id).unwrap();
    assert!(!s.is_playing());
    s.select_for_playback(&id).unwrap();
    assert!(s.is_playing());

    let loads = s.transport().calls.iter().filter(|c| matches!(c, Call::Load(_))).count();
    assert_eq!(loads, 1);
    assert_eq!(
      s.transport().calls,
      vec![Call::Load("https://cdn.test/s1.mp3".into()), Call::Play, Call::Pause, Call::Play]
    );
  }

  #[test]
  fn switching_artifacts_stops_previous_first() {
    let (mut s, _) = session();
    s.select_for_playback(&SampleId::from("s1")).unwrap();
    s.select_for_playback(&SampleId::from("s2")).unwrap();

    assert_eq!(s.playback().current(), Some(&SampleId::from("s2")));
    assert!(s.is_playing());
    assert_eq!(
      s.transport().calls[2..],
      [Call::Stop, Call::Load("https://cdn.test/s2.mp3".into()), Call::Play]
    );
  }

  #[test]
  fn blocked_autoplay_resets_flag() {
    let clock = ManualClock::new();
    let transport = RecordingTransport { block_play: true, ..Default::default() };
    let mut s = StorefrontSession::new(catalog(), transport, clock);

    s.select_for_playback(&SampleId::from("s1")).unwrap();
    assert_eq!(s.playback().current(), Some(&SampleId::from("s1")));
    assert!(!s.is_playing());

    s.toggle_playback();
    assert!(!s.is_playing());
  }

  #[test]
  fn media_end_keeps_artifact_loaded() {
    let (mut s, _) = session();
    s.select_for_playback(&SampleId::from("s3")).unwrap();
    s.on_media_ended();

    assert!(!s.is_playing());
    assert_eq!(s.current_sample().unwrap().title, "Steel Snare One-Shot");

    s.close_player();
    assert_eq!(s.playback(), &PlaybackState::Idle);
    assert_eq!(s.transport().calls.last(), Some(&Call::Stop));
  }

  #[test]
  fn selecting_unknown_artifact_leaves_player_alone() {
    let (mut s, _) = session();
    s.select_for_playback(&SampleId::from("s1")).unwrap();

    let err = s.select_for_playback(&SampleId::from("zz")).unwrap_err();
    assert!(matches!(err, CoreError::SampleNotFound(_)));
    assert!(s.playback().is_playing_sample(&SampleId::from("s1")));
  }

  #[test]
  fn vault_lists_owned_in_catalog_order() {
    let (mut s, _) = session();
    s.purchase(&SampleId::from("s3")).unwrap();
    s.purchase(&SampleId::from("s1")).unwrap();

    let ids: Vec<_> = s.vault().iter().map(|x| x.id.as_str()).collect();
    assert_eq!(ids, vec!["s1", "s3"]);
  }

  #[test]
  fn clearing_identity_twice_is_harmless() {
    let (mut s, _) = session();
    let user = UserState {
      uid: "u-1".into(),
      email: None,
      display_name: Some("Nova".into()),
      role: UserRole::Artist,
    };

    s.set_authenticated_user(Some(user.clone()));
    assert_eq!(s.user(), Some(&user));

    s.set_authenticated_user(None);
    s.set_authenticated_user(None);
    assert!(!s.is_authenticated());
    assert!(s.notification().is_none());
  }
}
