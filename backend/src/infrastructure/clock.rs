use std::time::Instant;

use ruido_core::ports::Clock;

/// `Clock` that follows tokio's timer, so a paused test runtime also pauses
/// notification deadlines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
  fn now(&self) -> Instant {
    tokio::time::Instant::now().into_std()
  }
}
