use serde::{Deserialize, Serialize};
use std::fmt;

/// Valoración de un productor en una escala de 0.0 a 5.0.
///
/// Internamente se guarda como centésimas (`u16`) en formato *fixed-point*:
///
/// - `0.0`  → `0`
/// - `4.9`  → `490`
/// - `5.0`  → `500`
///
/// Así la comparación y el orden son exactos y la constante puede vivir en
/// datos semilla sin pasar por `f32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Rating(u16);

impl Rating {
  const SCALE_FACTOR: u16 = 100;
  const MAX_VALUE: u16 = 5 * Self::SCALE_FACTOR;

  /// Crea una `Rating` a partir de un valor en coma flotante.
  ///
  /// Devuelve `None` si el valor queda fuera de `[0.0, 5.0]` o no es finito.
  pub fn new(value: f32) -> Option<Self> {
    if !value.is_finite() || !(0.0..=5.0).contains(&value) {
      return None;
    }

    let scaled = (value * Self::SCALE_FACTOR as f32).round() as u16;
    (scaled <= Self::MAX_VALUE).then_some(Self(scaled))
  }

  /// Construye la valoración desde décimas (`49` → 4.9), saturando en 5.0.
  pub const fn from_tenths(tenths: u16) -> Self {
    let scaled = tenths.saturating_mul(10);
    if scaled > Self::MAX_VALUE { Self(Self::MAX_VALUE) } else { Self(scaled) }
  }

  pub fn as_f32(&self) -> f32 {
    self.0 as f32 / Self::SCALE_FACTOR as f32
  }

  /// Representación en estrellas; `floor` para que solo 5.0 llene las cinco.
  pub fn stars(&self) -> String {
    let full = (self.0 / Self::SCALE_FACTOR) as usize;
    let mut out = "★".repeat(full);
    out.push_str(&"☆".repeat(5 - full));
    out
  }
}

impl TryFrom<f32> for Rating {
  type Error = String;

  fn try_from(value: f32) -> Result<Self, Self::Error> {
    Rating::new(value).ok_or_else(|| format!("rating out of range: {value}"))
  }
}

impl From<Rating> for f32 {
  fn from(r: Rating) -> Self {
    r.as_f32()
  }
}

impl fmt::Display for Rating {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:.1}", self.as_f32())
  }
}
