//! Cancellation for in-flight store calls.
//!
//! A caller that loses interest in a result (a closed view, a dropped
//! command) cancels the signal; pending store calls resolve to
//! `StoreError::Cancelled` and no follow-up write is issued.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

use crate::store::StoreError;

#[derive(Debug, Clone)]
pub struct CancelSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelSignal {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Fails with `Cancelled` once the signal has fired.
    pub fn checkpoint(&self) -> Result<(), StoreError> {
        if self.is_cancelled() {
            Err(StoreError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Resolves when the signal fires.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this only returns once set.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Runs `fut` unless the signal fires first.
    pub async fn run<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        self.checkpoint()?;
        tokio::select! {
            biased;
            () = self.cancelled() => Err(StoreError::Cancelled),
            result = fut => result,
        }
    }
}
