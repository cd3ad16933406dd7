use crate::domain::ids::SampleId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NotificationKind {
  Purchased,
  AlreadyOwned,
  SoldOut,
  Disconnected,
}

/// Banner transitorio. Lo descarta el temporizador de la sesión.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
  pub kind: NotificationKind,
  pub message: String,
}

impl Notification {
  pub fn purchased(id: &SampleId) -> Self {
    Notification { kind: NotificationKind::Purchased, message: format!("Registry Updated: Artifact {id} Secured.") }
  }

  pub fn already_owned() -> Self {
    Notification { kind: NotificationKind::AlreadyOwned, message: "Artifact already secured.".to_string() }
  }

  pub fn sold_out(id: &SampleId) -> Self {
    Notification { kind: NotificationKind::SoldOut, message: format!("Artifact {id} sold out.") }
  }

  pub fn disconnected() -> Self {
    Notification { kind: NotificationKind::Disconnected, message: "Disconnected from Registry.".to_string() }
  }
}
