//! Counting semaphore with interruptible waits
//!
//! Built on `parking_lot::{Mutex, Condvar}` rather than atomics: the permit
//! count and the closed flag must be observed together, and blocked waiters
//! must wake on either a release or a close.

use parking_lot::{Condvar, Mutex};

use crate::error::{PipelineError, Result};

struct SemState {
    permits: usize,
    closed: bool,
}

/// A counting semaphore whose waits can be interrupted by closing it.
///
/// Closing fails every present and future `acquire` with
/// [`PipelineError::Interrupted`] without consuming or producing permits, so
/// a stop request is indistinguishable from a wake to a blocked waiter and
/// the permit accounting is never perturbed by shutdown.
pub struct Semaphore {
    state: Mutex<SemState>,
    available: Condvar,
}

impl Semaphore {
    /// Create a semaphore with the given initial permit count
    pub fn new(permits: usize) -> Self {
        Self {
            state: Mutex::new(SemState {
                permits,
                closed: false,
            }),
            available: Condvar::new(),
        }
    }

    /// Block until a permit is available, then consume it.
    ///
    /// Returns `Interrupted` if the semaphore is closed, whether the close
    /// happened before this call or while it was blocked. On error no permit
    /// has been consumed.
    pub fn acquire(&self) -> Result<()> {
        let mut state = self.state.lock();
        loop {
            if state.closed {
                return Err(PipelineError::Interrupted);
            }
            if state.permits > 0 {
                state.permits -= 1;
                return Ok(());
            }
            self.available.wait(&mut state);
        }
    }

    /// Add one permit and wake a single waiter, if any
    pub fn release(&self) {
        let mut state = self.state.lock();
        state.permits += 1;
        drop(state);
        self.available.notify_one();
    }

    /// Close the semaphore, waking every blocked waiter. Idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if !state.closed {
            state.closed = true;
            drop(state);
            self.available.notify_all();
        }
    }

    /// Whether the semaphore has been closed
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Current permit count (observability only)
    pub fn permits(&self) -> usize {
        self.state.lock().permits
    }
}
