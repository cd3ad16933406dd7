use crate::domain::ids::ProducerId;
use crate::domain::rating::Rating;
use serde::{Deserialize, Serialize};

/// Un productor del registro. Dato semilla inmutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Producer {
  pub id: ProducerId,
  pub name: String,
  /// Géneros en los que se especializa; el primero define su sound pack.
  pub specialization: Vec<String>,
  pub bio: String,
  pub avatar: String,
  pub sample_count: u32,
  pub rating: Rating,
}
