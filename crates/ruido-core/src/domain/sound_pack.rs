use crate::domain::ids::{PackId, ProducerId};
use crate::domain::producer::Producer;
use serde::{Deserialize, Serialize};

/// Colección de artifacts de un productor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundPack {
  pub id: PackId,
  pub title: String,
  pub producer_id: ProducerId,
  pub producer_name: String,
  pub sample_count: u32,
  pub genre: String,
  pub cover_image: String,
  pub description: String,
}

impl SoundPack {
  /// Deriva el pack del productor en la posición `index` del registro.
  ///
  /// Es determinista: la misma lista de productores produce siempre los
  /// mismos packs (`sp0`, `sp1`, ...).
  pub fn for_producer(index: usize, producer: &Producer) -> Self {
    let genre = producer.specialization.first().cloned().unwrap_or_default();

    SoundPack {
      id: PackId::new(format!("sp{index}")),
      title: format!("{} Artifacts Vol. {}", producer.name, index + 1),
      producer_id: producer.id.clone(),
      producer_name: producer.name.clone(),
      sample_count: producer.sample_count,
      cover_image: format!(
        "https://images.unsplash.com/photo-{}?auto=format&fit=crop&q=80&w=400",
        1_500_000_000_000u64 + index as u64 * 10_000
      ),
      description: format!("Highly exclusive {genre} collection from the vault of {}.", producer.name),
      genre,
    }
  }

  pub fn derive_all(producers: &[Producer]) -> Vec<SoundPack> {
    producers.iter().enumerate().map(|(i, p)| SoundPack::for_producer(i, p)).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::rating::Rating;

  fn producer(id: &str, name: &str, spec: &[&str]) -> Producer {
    Producer {
      id: ProducerId::from(id),
      name: name.to_string(),
      specialization: spec.iter().map(|s| s.to_string()).collect(),
      bio: String::new(),
      avatar: String::new(),
      sample_count: 12,
      rating: Rating::from_tenths(49),
    }
  }

  #[test]
  fn packs_are_derived_one_per_producer() {
    let producers = vec![producer("p1", "Ghost Echo", &["Techno", "Dark Ambient"]), producer("p2", "Aether", &[])];
    let packs = SoundPack::derive_all(&producers);

    assert_eq!(packs.len(), 2);
    assert_eq!(packs[0].id.as_str(), "sp0");
    assert_eq!(packs[0].title, "Ghost Echo Artifacts Vol. 1");
    assert_eq!(packs[0].genre, "Techno");
    assert_eq!(packs[0].description, "Highly exclusive Techno collection from the vault of Ghost Echo.");
    assert_eq!(packs[1].genre, "");
    assert_eq!(packs, SoundPack::derive_all(&producers));
  }
}
