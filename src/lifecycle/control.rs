//! Reload and stop requests for a watched `Config`.
//!
//! `ReloadControl` is the sending half, cloned into every signal listener.
//! `ReloadTriggers` is the receiving half, consumed by the reload loop.

use tokio::sync::{broadcast, mpsc};

/// Handle for asking the reload loop to reload or to stop.
#[derive(Debug, Clone)]
pub struct ReloadControl {
    reload_tx: mpsc::Sender<()>,
    stop_tx: broadcast::Sender<()>,
}

/// Receiving side of a `ReloadControl`.
#[derive(Debug)]
pub struct ReloadTriggers {
    pub(crate) reloads: mpsc::Receiver<()>,
    pub(crate) stop: broadcast::Receiver<()>,
}

impl ReloadControl {
    /// Create a control handle and its triggers. At most `pending` reload
    /// requests are queued; further requests while the queue is full fold
    /// into the ones already waiting.
    pub fn channel(pending: usize) -> (Self, ReloadTriggers) {
        let (reload_tx, reloads) = mpsc::channel(pending.max(1));
        let (stop_tx, stop) = broadcast::channel(1);

        let control = Self { reload_tx, stop_tx };
        let triggers = ReloadTriggers { reloads, stop };
        (control, triggers)
    }

    /// Ask for a reload. Returns false once the reload loop is gone.
    pub fn request_reload(&self) -> bool {
        match self.reload_tx.try_send(()) {
            Ok(()) | Err(mpsc::error::TrySendError::Full(())) => true,
            Err(mpsc::error::TrySendError::Closed(())) => false,
        }
    }

    /// Ask the reload loop and every listener to stop.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(());
    }

    /// Receiver that fires when `stop` is called.
    pub fn subscribe_stop(&self) -> broadcast::Receiver<()> {
        self.stop_tx.subscribe()
    }

    /// Whether the reload loop is still receiving requests.
    pub fn is_active(&self) -> bool {
        !self.reload_tx.is_closed()
    }
}
