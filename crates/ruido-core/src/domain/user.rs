use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UserRole {
  #[default]
  Artist,
  Collector,
}

/// Identidad de la sesión autenticada.
///
/// Solo existe mientras el proveedor externo reporta un usuario; nunca se
/// persiste desde el core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
  /// Identificador opaco del proveedor de autenticación.
  pub uid: String,
  pub email: Option<String>,
  pub display_name: Option<String>,
  pub role: UserRole,
}

impl UserState {
  /// Nombre para mostrar: `display_name`, luego el email, luego el uid.
  pub fn label(&self) -> &str {
    self.display_name.as_deref().or(self.email.as_deref()).unwrap_or(&self.uid)
  }

  /// Inicial usada en el avatar de la barra de navegación.
  pub fn initial(&self) -> Option<char> {
    self.display_name.as_deref().and_then(|n| n.chars().next())
  }
}
