//! Busy flags
//!
//! A shareable boolean that a component owns and raises while it is working.
//! Raising the flag hands out a guard that lowers it again when dropped, so the
//! flag is cleared on every exit path, including early returns and panics.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared busy flag
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    inner: Arc<AtomicBool>,
}

impl BusyFlag {
    /// Create a new, lowered flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the flag is currently raised
    pub fn is_set(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }

    /// Raise the flag if it is lowered
    ///
    /// Returns `None` when somebody else already holds it.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.inner
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard {
                inner: self.inner.clone(),
            })
    }
}

/// Lowers the owning [`BusyFlag`] on drop
#[derive(Debug)]
pub struct BusyGuard {
    inner: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.inner.store(false, Ordering::SeqCst);
    }
}
