//! Cooperative cancellation for batch operations.
//!
//! A [`CancelToken`] is a cheap clonable handle over an atomic flag. The
//! server holds one in its state, `POST /stop` trips it, and `/web2pdf`
//! resets it at the start of each request. The fan-out executor checks the
//! token at per-task start and when collecting completed results; in-flight
//! browser sessions are never interrupted.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Clonable cancellation handle shared between the HTTP layer and a batch.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip the token. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Clear the token for a fresh request.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
