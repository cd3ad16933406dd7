use crate::domain::ids::{ProducerId, SampleId};
use crate::domain::producer::Producer;
use crate::domain::sample::{Sample, SampleSummary};
use crate::domain::sound_pack::SoundPack;
use serde::{Deserialize, Serialize};

/// El catálogo completo en memoria: productores, packs y artifacts.
///
/// Solo `licenses` de cada sample cambia en tiempo de ejecución, y solo a
/// través de la sesión.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
  pub producers: Vec<Producer>,
  pub packs: Vec<SoundPack>,
  pub samples: Vec<Sample>,
}

impl Catalog {
  pub fn new(producers: Vec<Producer>, samples: Vec<Sample>) -> Self {
    let packs = SoundPack::derive_all(&producers);
    Catalog { producers, packs, samples }
  }

  pub fn sample(&self, id: &SampleId) -> Option<&Sample> {
    self.samples.iter().find(|s| &s.id == id)
  }

  pub(crate) fn sample_mut(&mut self, id: &SampleId) -> Option<&mut Sample> {
    self.samples.iter_mut().find(|s| &s.id == id)
  }

  pub fn producer(&self, id: &ProducerId) -> Option<&Producer> {
    self.producers.iter().find(|p| &p.id == id)
  }

  /// Artifacts cuyo título o productor contienen `term` (sin mayúsculas).
  /// Un término vacío devuelve todo el catálogo.
  pub fn search(&self, term: &str) -> Vec<&Sample> {
    let needle = term.to_lowercase();
    self.samples.iter().filter(|s| s.matches_lowercase(&needle)).collect()
  }

  /// Proyección ligera para el prompt del modelo.
  pub fn summaries(&self) -> Vec<SampleSummary<'_>> {
    self.samples.iter().map(SampleSummary::from).collect()
  }

  /// Resuelve ids recomendados a samples, descartando los que no existen.
  pub fn resolve_samples<'a>(&'a self, ids: &[SampleId]) -> Vec<&'a Sample> {
    ids.iter().filter_map(|id| self.sample(id)).collect()
  }

  pub fn resolve_producers<'a>(&'a self, ids: &[ProducerId]) -> Vec<&'a Producer> {
    ids.iter().filter_map(|id| self.producer(id)).collect()
  }
}
