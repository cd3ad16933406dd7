use crate::io::atomic_write_str;
use crate::paths::{ConfigError, RuidoPaths};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use tracing::debug;

// toml_edit keeps user comments and layout when a section is rewritten.
use toml_edit::{DocumentMut, Item};

pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;
}

pub struct TomlConfigBackend {
  paths: RuidoPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: RuidoPaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &RuidoPaths {
    &self.paths
  }

  /// Like `load_section`, but a missing file or section yields `T::default()`.
  pub fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    let path = self.paths.config_file();
    let content = match fs::read_to_string(&path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        debug!(?path, section, "config file missing, using defaults");
        return Ok(T::default());
      }
      Err(e) => return Err(e.into()),
    };

    let toml_val: toml::Table = toml::from_str(&content)?;

    let Some(table) = toml_val.get(section) else {
      return Ok(T::default());
    };

    decode_section(section, table.clone())
  }
}

fn decode_section<T: DeserializeOwned>(section: &str, value: toml::Value) -> Result<T, ConfigError> {
  value.try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let path = self.paths.config_file();
    let content = fs::read_to_string(&path)?;
    let toml_val: toml::Table = toml::from_str(&content)?;

    let table = toml_val
      .get(section)
      .ok_or_else(|| ConfigError::Other(format!("missing section [{section}] in {:?}", path)))?;

    decode_section(section, table.clone())
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let path = self.paths.config_file();

    let mut doc: DocumentMut = match fs::read_to_string(&path) {
      Ok(content) => content.parse::<DocumentMut>().map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?,
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    // The section is encoded on its own ("foo = 1\nbar = 2\n") and grafted
    // into the document as a table.
    let section_str =
      toml::to_string(value).map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;

    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?
      .into_item();

    doc[section] = section_item;

    atomic_write_str(&path, &doc.to_string())?;
    debug!(?path, section, "config section saved");

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;
  use tempfile::tempdir;

  #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
  struct Sample {
    delay_ms: u64,
    name: Option<String>,
  }

  fn backend() -> (tempfile::TempDir, TomlConfigBackend) {
    let tmp = tempdir().unwrap();
    let paths = RuidoPaths::at(tmp.path().to_path_buf()).unwrap();
    (tmp, TomlConfigBackend::new(paths))
  }

  #[test]
  fn missing_file_yields_default() {
    let (_tmp, b) = backend();
    let v: Sample = b.load_section_with_default("session").unwrap();
    assert_eq!(v, Sample::default());
    assert!(b.load_section::<Sample>("session").is_err());
  }

  #[test]
  fn save_then_load_round_trips_and_keeps_comments() {
    let (_tmp, b) = backend();
    let path = b.paths().config_file();
    fs::write(&path, "# keep me\n[other]\nx = 1\n").unwrap();

    let value = Sample { delay_ms: 3000, name: Some("ruido".into()) };
    b.save_section("session", &value).unwrap();

    let loaded: Sample = b.load_section("session").unwrap();
    assert_eq!(loaded, value);

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("# keep me"));
    assert!(raw.contains("[other]"));
  }

  #[test]
  fn bad_section_shape_is_reported() {
    let (_tmp, b) = backend();
    fs::write(b.paths().config_file(), "[session]\ndelay_ms = \"soon\"\n").unwrap();

    let err = b.load_section::<Sample>("session").unwrap_err();
    assert!(err.to_string().contains("decode section [session]"));
  }
}
