use std::sync::Mutex;

use async_trait::async_trait;
use futures::StreamExt;
use ruido_core::domain::UserState;
use ruido_core::ports::{AuthError, AuthProvider, IdentityStream};
use tokio::sync::watch;
use tracing::info;

/// In-process `AuthProvider`.
///
/// `sign_in` hands out the identity queued with [`LocalAuthProvider::queue_sign_in`]
/// (none queued behaves like a cancelled popup). Identity changes are fanned
/// out through a `watch` channel, so every subscriber first sees the current
/// value and then each change.
pub struct LocalAuthProvider {
  identity: watch::Sender<Option<UserState>>,
  next_sign_in: Mutex<Option<UserState>>,
}

impl LocalAuthProvider {
  pub fn new() -> Self {
    let (identity, _) = watch::channel(None);
    Self { identity, next_sign_in: Mutex::new(None) }
  }

  /// Identity returned by the next interactive sign-in.
  pub fn queue_sign_in(&self, user: UserState) {
    *self.next_sign_in.lock().unwrap_or_else(|e| e.into_inner()) = Some(user);
  }

  /// Identity change coming from outside the session (e.g. token expiry).
  pub fn set_identity(&self, user: Option<UserState>) {
    self.identity.send_replace(user);
  }

  pub fn current(&self) -> Option<UserState> {
    self.identity.borrow().clone()
  }
}

impl Default for LocalAuthProvider {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
  async fn sign_in(&self) -> Result<Option<UserState>, AuthError> {
    let queued = self.next_sign_in.lock().unwrap_or_else(|e| e.into_inner()).take();
    match queued {
      Some(user) => {
        info!(uid = %user.uid, "local sign-in");
        self.identity.send_replace(Some(user.clone()));
        Ok(Some(user))
      }
      None => Ok(None),
    }
  }

  async fn sign_out(&self) -> Result<(), AuthError> {
    self.identity.send_replace(None);
    Ok(())
  }

  fn identity_changes(&self) -> IdentityStream {
    let rx = self.identity.subscribe();

    futures::stream::unfold((rx, true), |(mut rx, first)| async move {
      if !first {
        rx.changed().await.ok()?;
      }
      let current = rx.borrow_and_update().clone();
      Some((current, (rx, false)))
    })
    .boxed()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use ruido_core::domain::UserRole;

  fn nova() -> UserState {
    UserState { uid: "u-1".into(), email: Some("nova@ruido.test".into()), display_name: Some("Nova".into()), role: UserRole::Artist }
  }

  #[tokio::test]
  async fn cancelled_sign_in_yields_none() {
    let auth = LocalAuthProvider::new();
    assert_eq!(auth.sign_in().await.unwrap(), None);
    assert!(auth.current().is_none());
  }

  #[tokio::test]
  async fn subscription_sees_current_then_changes() {
    let auth = LocalAuthProvider::new();
    let mut changes = auth.identity_changes();

    assert_eq!(changes.next().await, Some(None));

    auth.queue_sign_in(nova());
    auth.sign_in().await.unwrap();
    assert_eq!(changes.next().await, Some(Some(nova())));

    auth.sign_out().await.unwrap();
    assert_eq!(changes.next().await, Some(None));
  }
}
