use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Cooperative shutdown flag shared by the listen loop and the server.
#[derive(Clone, Default)]
pub struct ShutdownHandle {
    shutdown: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    pub fn signal(&self) {
        if !self.shutdown.swap(true, Ordering::SeqCst) {
            tracing::info!("Graceful shutdown initiated");
            self.notify.notify_waiters();
        }
    }

    pub async fn wait(&self) {
        // Subscribe to Notify BEFORE checking the flag to avoid TOCTOU race:
        // without this, signal() could fire between the check and the await,
        // and notify_waiters() would have no subscribers, losing the notification.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_shutting_down() {
            return;
        }
        notified.await;
    }

    /// Signals shutdown on Ctrl-C.
    pub fn signal_on_ctrl_c(&self) {
        let handle = self.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                handle.signal();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn wait_returns_after_signal() {
        let handle = ShutdownHandle::new();
        let waiter = handle.clone();
        let task = tokio::spawn(async move { waiter.wait().await });

        handle.signal();
        let joined = tokio::time::timeout(Duration::from_secs(1), task).await;
        assert!(joined.is_ok());
        assert!(handle.is_shutting_down());
    }

    #[tokio::test]
    async fn wait_after_signal_is_immediate() {
        let handle = ShutdownHandle::new();
        handle.signal();
        let waited = tokio::time::timeout(Duration::from_millis(100), handle.wait()).await;
        assert!(waited.is_ok());
    }
}
