use ruido_core::ports::{MediaTransport, PlaybackError};
use tracing::{debug, info};

/// Headless media handle.
///
/// Tracks what a real audio element would hold (one source, playing or not)
/// and logs every transition. With `autoplay` off, `play` fails the way a
/// browser blocks playback that was not started by a gesture.
#[derive(Debug, Clone, Default)]
pub struct HeadlessTransport {
  source: Option<String>,
  playing: bool,
  autoplay_blocked: bool,
}

impl HeadlessTransport {
  pub fn new(autoplay: bool) -> Self {
    Self { source: None, playing: false, autoplay_blocked: !autoplay }
  }

  pub fn source(&self) -> Option<&str> {
    self.source.as_deref()
  }

  pub fn is_playing(&self) -> bool {
    self.playing
  }
}

impl MediaTransport for HeadlessTransport {
  fn load(&mut self, url: &str) {
    debug!(url, "transport: load");
    self.source = Some(url.to_string());
    self.playing = false;
  }

  fn play(&mut self) -> Result<(), PlaybackError> {
    let Some(source) = &self.source else {
      return Err(PlaybackError::NothingLoaded);
    };
    if self.autoplay_blocked {
      return Err(PlaybackError::Blocked("autoplay disabled".into()));
    }
    info!(source = %source, "transport: play");
    self.playing = true;
    Ok(())
  }

  fn pause(&mut self) {
    debug!("transport: pause");
    self.playing = false;
  }

  fn stop(&mut self) {
    debug!(source = ?self.source, "transport: stop");
    self.source = None;
    self.playing = false;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn play_requires_a_source() {
    let mut t = HeadlessTransport::new(true);
    assert_eq!(t.play(), Err(PlaybackError::NothingLoaded));

    t.load("https://cdn.test/a.mp3");
    assert!(t.play().is_ok());
    assert!(t.is_playing());

    t.stop();
    assert!(t.source().is_none());
    assert!(!t.is_playing());
  }

  #[test]
  fn blocked_autoplay_keeps_source_loaded() {
    let mut t = HeadlessTransport::new(false);
    t.load("https://cdn.test/a.mp3");
    assert!(matches!(t.play(), Err(PlaybackError::Blocked(_))));
    assert_eq!(t.source(), Some("https://cdn.test/a.mp3"));
  }
}
