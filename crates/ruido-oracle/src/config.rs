use ruido_config::{ConfigBackend, ConfigError, TomlConfigBackend, config_backend};
use serde::{Deserialize, Serialize};

pub const SECTION: &str = "oracle";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OracleConfig {
  /// Generative model queried for recommendations.
  #[serde(default = "default_model")]
  pub model: String,

  /// Base URL of the Generative Language API.
  #[serde(default = "default_endpoint")]
  pub endpoint: String,

  /// Name of the environment variable holding the API key. The key itself
  /// never goes to disk.
  #[serde(default = "default_api_key_env")]
  pub api_key_env: String,

  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,

  pub temperature: Option<f32>,
}

fn default_model() -> String {
  "gemini-3-pro-preview".into()
}

fn default_endpoint() -> String {
  "https://generativelanguage.googleapis.com".into()
}

fn default_api_key_env() -> String {
  "API_KEY".into()
}

fn default_timeout_secs() -> u64 {
  30
}

impl Default for OracleConfig {
  fn default() -> Self {
    OracleConfig {
      model: default_model(),
      endpoint: default_endpoint(),
      api_key_env: default_api_key_env(),
      timeout_secs: default_timeout_secs(),
      temperature: None,
    }
  }
}

impl OracleConfig {
  /// Loads `[oracle]` from ruido.toml (defaults if absent) and writes the
  /// effective values back so they are discoverable.
  pub fn load() -> Result<Self, ConfigError> {
    Self::load_from(config_backend()?)
  }

  /// Variant for tests: inject a different backend.
  pub fn load_from(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    let cfg: Self = backend.load_section_with_default(SECTION)?;
    backend.save_section(SECTION, &cfg)?;
    Ok(cfg)
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    config_backend()?.save_section(SECTION, self)
  }

  /// Reads the API key from the configured environment variable.
  pub fn api_key(&self) -> Option<String> {
    std::env::var(&self.api_key_env).ok().filter(|k| !k.trim().is_empty())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use ruido_config::RuidoPaths;
  use tempfile::tempdir;

  #[test]
  fn load_writes_defaults_back() {
    let tmp = tempdir().unwrap();
    let backend = TomlConfigBackend::new(RuidoPaths::at(tmp.path().to_path_buf()).unwrap());

    let cfg = OracleConfig::load_from(&backend).unwrap();
    assert_eq!(cfg, OracleConfig::default());

    let raw = std::fs::read_to_string(backend.paths().config_file()).unwrap();
    assert!(raw.contains("[oracle]"));
    assert!(raw.contains("gemini-3-pro-preview"));
  }

  #[test]
  fn partial_section_keeps_other_defaults() {
    let tmp = tempdir().unwrap();
    let backend = TomlConfigBackend::new(RuidoPaths::at(tmp.path().to_path_buf()).unwrap());
    std::fs::write(backend.paths().config_file(), "[oracle]\nmodel = \"gemini-2.5-flash\"\ntimeout_secs = 5\n")
      .unwrap();

    let cfg = OracleConfig::load_from(&backend).unwrap();
    assert_eq!(cfg.model, "gemini-2.5-flash");
    assert_eq!(cfg.timeout_secs, 5);
    assert_eq!(cfg.api_key_env, "API_KEY");
  }
}
