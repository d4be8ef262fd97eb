//! Time source abstraction
//!
//! Blocking delays use `embedded_hal::delay::DelayNs`; this trait only adds
//! a monotonic millisecond counter for deadline bookkeeping.

/// Monotonic millisecond clock
pub trait Monotonic {
    /// Milliseconds since an arbitrary, fixed epoch
    ///
    /// Must never go backwards.
    fn now_ms(&self) -> u64;
}

impl<T: Monotonic + ?Sized> Monotonic for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
