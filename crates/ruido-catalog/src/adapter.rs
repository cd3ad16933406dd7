use std::collections::HashSet;

use ruido_core::domain::{Catalog, Producer, Sample};
use ruido_core::ports::{CatalogError, CatalogSource};
use tracing::debug;

use crate::seed::{PRODUCERS, SAMPLES};

/// `CatalogSource` backed by the static seed data.
///
/// Every load hands out a fresh copy, so each session starts from the seed
/// license counters.
#[derive(Debug, Clone)]
pub struct SeedCatalog {
  producers: Vec<Producer>,
  samples: Vec<Sample>,
}

impl SeedCatalog {
  pub fn new() -> Self {
    Self { producers: PRODUCERS.to_vec(), samples: SAMPLES.to_vec() }
  }

  /// Seed built from custom data; mostly for tests and demos.
  pub fn from_parts(producers: Vec<Producer>, samples: Vec<Sample>) -> Self {
    Self { producers, samples }
  }
}

impl Default for SeedCatalog {
  fn default() -> Self {
    Self::new()
  }
}

impl CatalogSource for SeedCatalog {
  fn load_catalog(&self) -> Result<Catalog, CatalogError> {
    let catalog = Catalog::new(self.producers.clone(), self.samples.clone());
    validate(&catalog)?;
    debug!(producers = catalog.producers.len(), samples = catalog.samples.len(), "seed catalog loaded");
    Ok(catalog)
  }
}

/// Rejects duplicate ids and dangling producer/pack references.
fn validate(catalog: &Catalog) -> Result<(), CatalogError> {
  let mut seen = HashSet::new();
  for s in &catalog.samples {
    if !seen.insert(&s.id) {
      return Err(CatalogError::Invalid(format!("duplicate sample id {}", s.id)));
    }
    if catalog.producer(&s.producer_id).is_none() {
      return Err(CatalogError::Invalid(format!("sample {} references unknown producer {}", s.id, s.producer_id)));
    }
    if let Some(pack) = &s.pack_id {
      if !catalog.packs.iter().any(|p| &p.id == pack) {
        return Err(CatalogError::Invalid(format!("sample {} references unknown pack {pack}", s.id)));
      }
    }
  }

  let mut producers = HashSet::new();
  for p in &catalog.producers {
    if !producers.insert(&p.id) {
      return Err(CatalogError::Invalid(format!("duplicate producer id {}", p.id)));
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use ruido_core::domain::SampleId;

  #[test]
  fn seed_loads_and_validates() {
    let catalog = SeedCatalog::new().load_catalog().unwrap();

    assert_eq!(catalog.producers.len(), 20);
    assert_eq!(catalog.packs.len(), 20);
    assert_eq!(catalog.samples.len(), 5);
    assert_eq!(catalog.packs[0].title, "Ghost Echo Artifacts Vol. 1");
  }

  #[test]
  fn seed_honours_license_invariant() {
    let catalog = SeedCatalog::new().load_catalog().unwrap();
    for s in &catalog.samples {
      assert!(s.licenses.sold() <= s.licenses.max(), "{}", s.id);
    }

    let s3 = catalog.sample(&SampleId::from("s3")).unwrap();
    assert_eq!((s3.licenses.sold(), s3.licenses.max()), (0, 5));
  }

  #[test]
  fn search_ghost_finds_void_sub_bass() {
    let catalog = SeedCatalog::new().load_catalog().unwrap();
    let hits: Vec<_> = catalog.search("ghost").into_iter().map(|s| s.title.as_str()).collect();
    assert_eq!(hits, vec!["Void Sub Bass Loop", "Warehouse Kick Drum"]);
  }

  #[test]
  fn dangling_producer_is_rejected() {
    let mut samples = SAMPLES.to_vec();
    samples[0].producer_id = "p99".into();
    let err = SeedCatalog::from_parts(PRODUCERS.to_vec(), samples).load_catalog().unwrap_err();
    assert!(matches!(err, CatalogError::Invalid(msg) if msg.contains("p99")));
  }

  #[test]
  fn duplicate_sample_is_rejected() {
    let mut samples = SAMPLES.to_vec();
    samples.push(samples[0].clone());
    assert!(SeedCatalog::from_parts(PRODUCERS.to_vec(), samples).load_catalog().is_err());
  }
}
