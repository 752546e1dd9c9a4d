//! Single-flight busy flag shared between a worker and its background task.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Observable state of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Busy,
}

/// Per-worker busy flag.
///
/// At most one [`BusyGuard`] exists per flag at any time. Clones share the
/// same underlying state, so a clone can be used to observe a worker after
/// the worker itself has been dropped.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    inner: Arc<AtomicBool>,
}

impl BusyFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move from `Idle` to `Busy`.
    ///
    /// Returns `None` when the flag is already busy. The flag returns to
    /// `Idle` when the guard is dropped, including during unwinding.
    #[must_use]
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.inner
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard {
                inner: Arc::clone(&self.inner),
            })
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.inner.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn state(&self) -> WorkerState {
        if self.is_busy() {
            WorkerState::Busy
        } else {
            WorkerState::Idle
        }
    }
}

/// Proof of exclusive ownership of a [`BusyFlag`].
#[derive(Debug)]
pub struct BusyGuard {
    inner: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.inner.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_release() {
        let flag = BusyFlag::new();
        let guard = flag.try_acquire().unwrap();
        assert_eq!(flag.state(), WorkerState::Busy);
        assert!(flag.try_acquire().is_none());

        drop(guard);
        assert_eq!(flag.state(), WorkerState::Idle);
        assert!(flag.try_acquire().is_some());
    }

    #[test]
    fn clones_observe_same_state() {
        let flag = BusyFlag::new();
        let observer = flag.clone();
        let _guard = flag.try_acquire().unwrap();
        assert!(observer.is_busy());
    }

    #[test]
    fn released_on_panic() {
        let flag = BusyFlag::new();
        let inner = flag.clone();
        let result = std::panic::catch_unwind(move || {
            let _guard = inner.try_acquire().unwrap();
            panic!("task blew up");
        });
        assert!(result.is_err());
        assert!(!flag.is_busy());
    }
}
