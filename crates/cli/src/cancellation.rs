//! Interrupt (Ctrl+C) cancellation for a search run.
//!
//! Responsibilities:
//! - Provide a cloneable token the poll loop, the export backoff and the
//!   result drains can wait on alongside their own futures.
//! - Install the Ctrl+C listener that trips the token.
//! - Centralize the cancellation message printed before exiting with 130.
//!
//! Does NOT handle:
//! - Deciding what to clean up on cancellation (the executors cancel their
//!   server job and flush the sink themselves).
//!
//! Invariants:
//! - Once cancelled, the token remains cancelled forever.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::Notify;

/// Cancellation token usable across async tasks.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancellationToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel token (idempotent).
    pub fn cancel(&self) {
        let was_cancelled = self.cancelled.swap(true, Ordering::SeqCst);
        if !was_cancelled {
            self.notify.notify_waiters();
        }
    }

    /// True if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Await cancellation.
    ///
    /// Creates the `notified()` future before checking the flag so a
    /// concurrent `cancel()` is never missed.
    pub async fn cancelled(&self) {
        let notified = self.notify.notified();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

/// Spawn a task that cancels `token` on the first Ctrl+C.
pub fn install_ctrl_c_handler(token: &CancellationToken) {
    let token = token.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        token.cancel();
    });
}

/// Print standard cancellation message to stderr.
pub fn print_cancelled_message() {
    eprintln!("^C\nSearch cancelled by user");
}
