// crates/ruido-core/src/errors.rs
use thiserror::Error;

use crate::domain::ids::SampleId;

/// Error genérico del núcleo de Ruido.
///
/// Las capas superiores (runtime, adaptadores) lo mapean a logs o a
/// notificaciones; nada de lo que llega aquí es fatal.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("catalog error: {0}")]
  Catalog(String),

  #[error("model error: {0}")]
  Model(String),

  #[error("auth error: {0}")]
  Auth(String),

  #[error("sample not found: {0}")]
  SampleNotFound(SampleId),
}

/// Rechazos de una compra. Ninguno cambia el estado de la sesión.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
  #[error("artifact {0} already owned")]
  AlreadyOwned(SampleId),

  #[error("artifact {0} sold out")]
  SoldOut(SampleId),

  #[error("unknown artifact {0}")]
  Unknown(SampleId),
}

/// Rechazos del envío de mensajes al Oracle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversationError {
  #[error("message is empty")]
  Blank,

  #[error("a recommendation request is already in flight")]
  Busy,

  #[error("conversation closed")]
  Closed,
}
