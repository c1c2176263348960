use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Cooperative stop flag that also wakes sleepers
///
/// Clones share the same flag. `wait` doubles as an interruptible sleep, so
/// the scheduler's dwell and pacing pauses end as soon as a stop is raised.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    /// Create a signal in the running state
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the stop flag and wake every waiter
    pub fn stop(&self) {
        let (flag, wake) = &*self.inner;
        *flag.lock().unwrap_or_else(PoisonError::into_inner) = true;
        wake.notify_all();
    }

    /// True once `stop` has been called
    pub fn is_stopped(&self) -> bool {
        let (flag, _) = &*self.inner;
        *flag.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sleep for `timeout` unless stopped first; returns whether a stop was raised
    pub fn wait(&self, timeout: Duration) -> bool {
        let (flag, wake) = &*self.inner;
        let deadline = Instant::now() + timeout;
        let mut stopped = flag.lock().unwrap_or_else(PoisonError::into_inner);

        while !*stopped {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            stopped = match wake.wait_timeout(stopped, deadline - now) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }

        *stopped
    }
}
