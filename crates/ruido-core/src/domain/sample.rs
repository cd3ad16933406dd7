use crate::domain::ids::{PackId, ProducerId, SampleId};
use crate::domain::license::{LicenseError, Licenses};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tipo de artifact: loop o one-shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleKind {
  Loop,
  #[serde(rename = "One-shot")]
  OneShot,
}

impl fmt::Display for SampleKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SampleKind::Loop => f.write_str("Loop"),
      SampleKind::OneShot => f.write_str("One-shot"),
    }
  }
}

/// Precio en centavos. `24.99` → `2499`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u32);

impl Price {
  pub const fn from_cents(cents: u32) -> Self {
    Price(cents)
  }

  pub fn cents(&self) -> u32 {
    self.0
  }
}

impl fmt::Display for Price {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
  }
}

/// El Artifact (Sample): la unidad que se vende y se reproduce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
  pub id: SampleId,
  pub title: String,
  pub producer_id: ProducerId,
  /// Nombre del productor desnormalizado; la búsqueda lo usa directamente.
  pub producer_name: String,
  pub pack_id: Option<PackId>,
  pub genre: String,
  pub bpm: u16,
  pub key: String,
  #[serde(rename = "type")]
  pub kind: SampleKind,
  pub price: Price,
  #[serde(flatten)]
  pub licenses: Licenses,
  pub audio_url: String,
  pub tags: Vec<String>,
  pub description: String,
}

impl Sample {
  /// Coincidencia de búsqueda: título O nombre del productor contienen el
  /// término, sin distinguir mayúsculas. `needle` ya debe venir en minúsculas.
  pub fn matches_lowercase(&self, needle: &str) -> bool {
    self.title.to_lowercase().contains(needle) || self.producer_name.to_lowercase().contains(needle)
  }

  pub fn matches(&self, term: &str) -> bool {
    self.matches_lowercase(&term.to_lowercase())
  }

  pub fn is_sold_out(&self) -> bool {
    self.licenses.is_exhausted()
  }

  pub fn remaining_licenses(&self) -> u32 {
    self.licenses.remaining()
  }

  pub(crate) fn sell_license(&mut self) -> Result<u32, LicenseError> {
    self.licenses.acquire()
  }
}

/// Proyección ligera que se envía al modelo de recomendación.
///
/// No lleva precio ni licencias: nada de estado comercial sale del cliente.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleSummary<'a> {
  pub id: &'a SampleId,
  pub title: &'a str,
  pub genre: &'a str,
  pub tags: &'a [String],
  pub description: &'a str,
}

impl<'a> From<&'a Sample> for SampleSummary<'a> {
  fn from(s: &'a Sample) -> Self {
    SampleSummary { id: &s.id, title: &s.title, genre: &s.genre, tags: &s.tags, description: &s.description }
  }
}
