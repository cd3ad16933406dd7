use std::time::Duration;

use ruido_config::{ConfigBackend, ConfigError, TomlConfigBackend, config_backend};
use serde::{Deserialize, Serialize};

pub const SECTION: &str = "session";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionConfig {
  /// How long a notification banner stays up.
  #[serde(default = "default_notification_delay_ms")]
  pub notification_delay_ms: u64,

  /// Whether the headless transport may start playback without a gesture.
  #[serde(default = "default_autoplay")]
  pub autoplay: bool,
}

fn default_notification_delay_ms() -> u64 {
  3_000
}

fn default_autoplay() -> bool {
  true
}

impl Default for SessionConfig {
  fn default() -> Self {
    SessionConfig {
      notification_delay_ms: default_notification_delay_ms(),
      autoplay: default_autoplay(),
    }
  }
}

impl SessionConfig {
  pub fn load() -> Result<Self, ConfigError> {
    Self::load_from(config_backend()?)
  }

  pub fn load_from(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    let cfg: Self = backend.load_section_with_default(SECTION)?;
    backend.save_section(SECTION, &cfg)?;
    Ok(cfg)
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    config_backend()?.save_section(SECTION, self)
  }

  pub fn notification_delay(&self) -> Duration {
    Duration::from_millis(self.notification_delay_ms)
  }
}
