use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LicenseError {
  #[error("all {max} licenses already sold")]
  Exhausted { max: u32 },

  #[error("invalid license counters: {sold} sold of {max}")]
  Invalid { sold: u32, max: u32 },
}

/// Contador de licencias de un artifact.
///
/// Mantiene `0 <= sold <= max` en todo momento: los campos son privados y la
/// única forma de avanzar el contador es [`Licenses::acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLicenses")]
pub struct Licenses {
  #[serde(rename = "licensesSold")]
  sold: u32,
  #[serde(rename = "maxLicenses")]
  max: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLicenses {
  licenses_sold: u32,
  max_licenses: u32,
}

impl TryFrom<RawLicenses> for Licenses {
  type Error = LicenseError;

  fn try_from(raw: RawLicenses) -> Result<Self, Self::Error> {
    Licenses::new(raw.licenses_sold, raw.max_licenses)
  }
}

impl Licenses {
  pub fn new(sold: u32, max: u32) -> Result<Self, LicenseError> {
    if sold > max {
      return Err(LicenseError::Invalid { sold, max });
    }
    Ok(Self { sold, max })
  }

  /// Variante infalible para datos semilla: recorta `sold` a `max`.
  pub const fn capped(sold: u32, max: u32) -> Self {
    let sold = if sold > max { max } else { sold };
    Self { sold, max }
  }

  pub fn sold(&self) -> u32 {
    self.sold
  }

  pub fn max(&self) -> u32 {
    self.max
  }

  pub fn remaining(&self) -> u32 {
    self.max - self.sold
  }

  pub fn is_exhausted(&self) -> bool {
    self.sold >= self.max
  }

  /// Vende una licencia. Devuelve las que quedan.
  pub fn acquire(&mut self) -> Result<u32, LicenseError> {
    if self.is_exhausted() {
      return Err(LicenseError::Exhausted { max: self.max });
    }
    self.sold += 1;
    Ok(self.remaining())
  }
}
