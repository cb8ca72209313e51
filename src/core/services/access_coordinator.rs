use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::core::errors::{Result, TrailError};

/// Serializes every read and write against a shared store.
///
/// At most one unit of work runs at a time system-wide. A releasing
/// holder broadcasts to all waiters, each of which re-checks
/// availability under the lock, so no wake-up can be missed. No FIFO
/// fairness among waiters is promised, only forward progress.
///
/// The store itself is owned by the coordinator; the only way to touch
/// it is through [`with_exclusive_access`](Self::with_exclusive_access).
pub struct AccessCoordinator<S> {
    store: S,
    state: Mutex<CoordinatorState>,
    released: Condvar,
}

/// Guarded state: idle (`busy == false`) or busy, plus a terminal
/// closed flag used to abandon waiters during shutdown.
#[derive(Debug, Default)]
struct CoordinatorState {
    busy: bool,
    closed: bool,
}

impl<S> AccessCoordinator<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: Mutex::new(CoordinatorState::default()),
            released: Condvar::new(),
        }
    }

    /// Acquire sole access to the store, run `work`, release, and wake
    /// all waiters.
    ///
    /// Blocks the calling thread until the store is idle. A caller
    /// whose wait is cut short (the coordinator was closed, or the
    /// lock was poisoned by a holder that died) abandons the wait and
    /// gets [`TrailError::Interrupted`] instead of partial access.
    ///
    /// The release-and-broadcast runs even when `work` fails or
    /// panics, so a failing holder cannot strand later callers.
    pub fn with_exclusive_access<T>(&self, work: impl FnOnce(&S) -> Result<T>) -> Result<T> {
        let mut state = self.state.lock().map_err(|_| TrailError::Interrupted)?;
        loop {
            if state.closed {
                return Err(TrailError::Interrupted);
            }
            if !state.busy {
                break;
            }
            state = self
                .released
                .wait(state)
                .map_err(|_| TrailError::Interrupted)?;
        }
        state.busy = true;
        drop(state);

        let _release = ReleaseGuard {
            state: &self.state,
            released: &self.released,
        };
        work(&self.store)
    }

    /// Close the coordinator: wake every waiter and fail all further
    /// calls with [`TrailError::Interrupted`]. The current holder, if
    /// any, finishes its work normally.
    pub fn close(&self) {
        let mut state = lock_even_if_poisoned(&self.state);
        state.closed = true;
        drop(state);
        self.released.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        lock_even_if_poisoned(&self.state).closed
    }
}

/// Marks the state idle and broadcasts on drop, whatever happened to
/// the holder.
struct ReleaseGuard<'a> {
    state: &'a Mutex<CoordinatorState>,
    released: &'a Condvar,
}

impl Drop for ReleaseGuard<'_> {
    fn drop(&mut self) {
        let mut state = lock_even_if_poisoned(self.state);
        state.busy = false;
        drop(state);
        self.released.notify_all();
    }
}

/// A poisoned state lock still wraps valid data; releasing and closing
/// must go through even after some holder panicked.
fn lock_even_if_poisoned<'a>(
    state: &'a Mutex<CoordinatorState>,
) -> MutexGuard<'a, CoordinatorState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
