use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Catalog identifiers are short opaque strings (`s1`, `p3`, `sp0`).
///
/// They come from seed data and from the recommendation model, so they are
/// kept as strings and never parsed.
macro_rules! string_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(String);

    impl $name {
      pub fn new(id: impl Into<String>) -> Self {
        $name(id.into())
      }

      pub fn as_str(&self) -> &str {
        &self.0
      }
    }

    impl From<&str> for $name {
      fn from(s: &str) -> Self {
        $name(s.to_owned())
      }
    }

    impl From<String> for $name {
      fn from(s: String) -> Self {
        $name(s)
      }
    }

    impl AsRef<str> for $name {
      fn as_ref(&self) -> &str {
        &self.0
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }
  };
}

string_id!(
  /// Identificador de un artifact (sample) del catálogo.
  SampleId
);

string_id!(
  /// Identificador de un productor.
  ProducerId
);

string_id!(
  /// Identificador de un sound pack.
  PackId
);

/// Identificador de una sesión de storefront.
///
/// Se genera con UUID v4 al abrir la sesión y sirve para correlacionar logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
  pub fn new() -> Self {
    SessionId(Uuid::new_v4())
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for SessionId {
  fn default() -> Self {
    Self::new()
  }
}

impl From<Uuid> for SessionId {
  fn from(u: Uuid) -> Self {
    SessionId(u)
  }
}

impl fmt::Display for SessionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}
