use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::UserState;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
  #[error("provider error: {0}")]
  Provider(String),
}

/// Flujo de cambios de identidad.
///
/// El primer elemento es la identidad actual (o `None`); después llega uno
/// por cada cambio. Soltar el stream cancela la suscripción.
pub type IdentityStream = BoxStream<'static, Option<UserState>>;

/// Port del proveedor externo de autenticación.
#[async_trait]
pub trait AuthProvider: Send + Sync {
  /// Login interactivo. `Ok(None)` si el usuario lo cancela.
  async fn sign_in(&self) -> Result<Option<UserState>, AuthError>;

  async fn sign_out(&self) -> Result<(), AuthError>;

  fn identity_changes(&self) -> IdentityStream;
}
