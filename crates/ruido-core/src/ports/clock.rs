use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Fuente de tiempo de la sesión. Solo se usa para vencer notificaciones.
pub trait Clock {
  fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> Instant {
    Instant::now()
  }
}

/// Reloj manual para tests y hosts que avanzan el tiempo a mano.
/// Los clones comparten el mismo instante.
#[derive(Debug, Clone)]
pub struct ManualClock {
  now: Arc<Mutex<Instant>>,
}

impl ManualClock {
  pub fn new() -> Self {
    Self { now: Arc::new(Mutex::new(Instant::now())) }
  }

  pub fn advance(&self, by: Duration) {
    let mut guard = self.now.lock().unwrap_or_else(|e| e.into_inner());
    *guard += by;
  }
}

impl Default for ManualClock {
  fn default() -> Self {
    Self::new()
  }
}

impl Clock for ManualClock {
  fn now(&self) -> Instant {
    *self.now.lock().unwrap_or_else(|e| e.into_inner())
  }
}
