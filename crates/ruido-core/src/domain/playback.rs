use crate::domain::ids::SampleId;

/// Estado del reproductor global.
///
/// `Idle` → nada cargado. `Loaded` → un único artifact actual, reproduciendo
/// o en pausa. Nunca hay dos artifacts actuales.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
  #[default]
  Idle,
  Loaded { sample_id: SampleId, playing: bool },
}

impl PlaybackState {
  pub fn current(&self) -> Option<&SampleId> {
    match self {
      PlaybackState::Idle => None,
      PlaybackState::Loaded { sample_id, .. } => Some(sample_id),
    }
  }

  pub fn is_playing(&self) -> bool {
    matches!(self, PlaybackState::Loaded { playing: true, .. })
  }

  /// `true` si `id` es el artifact actual y está sonando.
  pub fn is_playing_sample(&self, id: &SampleId) -> bool {
    matches!(self, PlaybackState::Loaded { sample_id, playing: true } if sample_id == id)
  }
}
