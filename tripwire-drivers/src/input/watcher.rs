//! Edge watcher with bounded retry
//!
//! Edge detectors on some platforms fail spuriously, for example when a
//! previous registration on the same pin has not been torn down yet. Such
//! faults are treated as transient: the wait is simply issued again. The
//! retry loop is bounded by an optional attempt count and an optional
//! overall deadline; with neither set it retries for as long as it takes.

use tripwire_core::traits::WatchError;
use tripwire_hal::{Edge, EdgeInput, Monotonic};

/// Bounds on how long a wait may keep retrying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RetryPolicy {
    /// Give up after this many faulted waits
    pub max_attempts: Option<u32>,
    /// Give up once this much time has passed since the wait began
    pub timeout_ms: Option<u32>,
}

impl RetryPolicy {
    /// Retry forever, wait forever
    pub const UNBOUNDED: Self = Self {
        max_attempts: None,
        timeout_ms: None,
    };

    pub const fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub const fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

/// One input pin plus its retry policy
pub struct EdgeWatcher<P, C> {
    pin: P,
    clock: C,
    policy: RetryPolicy,
}

impl<P: EdgeInput, C: Monotonic> EdgeWatcher<P, C> {
    pub fn new(pin: P, clock: C, policy: RetryPolicy) -> Self {
        Self { pin, clock, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Instantaneous level, true = high
    pub fn is_high(&self) -> bool {
        self.pin.is_high()
    }

    /// Block until `edge`, retrying driver faults within the policy
    pub fn wait(&mut self, edge: Edge) -> Result<(), WatchError> {
        self.wait_within(edge, None)
    }

    /// Like [`wait`](Self::wait), with `timeout_ms` replacing the policy's
    /// timeout for this call when set
    pub fn wait_within(&mut self, edge: Edge, timeout_ms: Option<u32>) -> Result<(), WatchError> {
        let limit = timeout_ms.or(self.policy.timeout_ms);
        let started = self.clock.now_ms();
        let mut attempts: u32 = 0;

        loop {
            let remaining = match limit {
                Some(limit) => {
                    let elapsed = self.clock.now_ms().saturating_sub(started);
                    if elapsed >= u64::from(limit) {
                        return Err(WatchError::TimedOut);
                    }
                    // elapsed < limit, so this fits
                    Some(limit - elapsed as u32)
                }
                None => None,
            };

            attempts = attempts.saturating_add(1);
            match self.pin.wait_for_edge(edge, remaining) {
                Ok(true) => return Ok(()),
                Ok(false) => return Err(WatchError::TimedOut),
                Err(_) => {
                    if self.policy.max_attempts.is_some_and(|max| attempts >= max) {
                        error!("edge wait failed {} times, giving up", attempts);
                        return Err(WatchError::RetriesExhausted { attempts });
                    }
                    warn!("edge wait fault, retrying (attempt {})", attempts);
                }
            }
        }
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}
