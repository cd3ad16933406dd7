#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
  /// El runtime bloqueó el inicio (política de autoplay, sin gesto del usuario).
  #[error("playback blocked: {0}")]
  Blocked(String),

  #[error("nothing loaded")]
  NothingLoaded,

  #[error("transport error: {0}")]
  Transport(String),
}

/// El único handle de reproducción que posee la sesión.
///
/// La sesión garantiza el orden `stop` → `load` → `play` al cambiar de
/// artifact, así que el adapter nunca tiene dos fuentes sonando. El fin
/// natural del medio se notifica a la sesión con `on_media_ended`.
pub trait MediaTransport {
  fn load(&mut self, url: &str);
  fn play(&mut self) -> Result<(), PlaybackError>;
  fn pause(&mut self);
  /// Suelta el medio cargado.
  fn stop(&mut self);
}

impl<T: MediaTransport + ?Sized> MediaTransport for Box<T> {
  fn load(&mut self, url: &str) {
    (**self).load(url)
  }

  fn play(&mut self) -> Result<(), PlaybackError> {
    (**self).play()
  }

  fn pause(&mut self) {
    (**self).pause()
  }

  fn stop(&mut self) {
    (**self).stop()
  }
}
