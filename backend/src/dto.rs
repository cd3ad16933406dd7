use ruido_core::domain::{AppView, Sample, SampleKind, UserState};
use ruido_core::ports::{Clock, MediaTransport};
use ruido_core::services::StorefrontSession;
use serde::Serialize;

/// One card of the registry or vault grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleCardDto {
  pub id: String,
  pub title: String,
  pub producer_name: String,
  pub genre: String,
  pub bpm: u16,
  pub key: String,
  pub kind: SampleKind,
  pub price: String,
  pub remaining_licenses: u32,
  pub max_licenses: u32,
  pub owned: bool,
  pub playing: bool,
}

/// Bottom player overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
  pub id: String,
  pub title: String,
  pub producer_name: String,
  pub remaining_licenses: u32,
  pub playing: bool,
}

/// Everything a renderer needs to draw the storefront, in one value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
  pub view: AppView,
  pub search_term: String,
  pub registry: Vec<SampleCardDto>,
  pub vault: Vec<SampleCardDto>,
  pub player: Option<PlayerDto>,
  pub notification: Option<String>,
  pub user: Option<UserState>,
}

impl SessionSnapshot {
  pub fn capture<T, C>(session: &StorefrontSession<T, C>) -> Self
  where
    T: MediaTransport,
    C: Clock,
  {
    let card = |s: &Sample| SampleCardDto {
      id: s.id.to_string(),
      title: s.title.clone(),
      producer_name: s.producer_name.clone(),
      genre: s.genre.clone(),
      bpm: s.bpm,
      key: s.key.clone(),
      kind: s.kind,
      price: s.price.to_string(),
      remaining_licenses: s.remaining_licenses(),
      max_licenses: s.licenses.max(),
      owned: session.is_owned(&s.id),
      playing: session.playback().is_playing_sample(&s.id),
    };

    SessionSnapshot {
      view: session.view(),
      search_term: session.search_term().to_string(),
      registry: session.registry().into_iter().map(card).collect(),
      vault: session.vault().into_iter().map(card).collect(),
      player: session.current_sample().map(|s| PlayerDto {
        id: s.id.to_string(),
        title: s.title.clone(),
        producer_name: s.producer_name.clone(),
        remaining_licenses: s.remaining_licenses(),
        playing: session.is_playing(),
      }),
      notification: session.notification().map(|n| n.message.clone()),
      user: session.user().cloned(),
    }
  }
}
