//! GPIO pin abstractions
//!
//! Provides traits for digital input and output lines, including the
//! blocking edge wait the arming sequence relies on.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Signal transition direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high
    Rising,
    /// High to low
    Falling,
}

/// Input pin that can block until a transition occurs
///
/// Implementations arm the edge detector, block the caller, and disarm it
/// again before returning. A fault means the detector could not be armed or
/// the wait was interrupted (for example because another edge registration
/// raced this one); the caller decides whether to retry.
pub trait EdgeInput: InputPin {
    /// Error type for a failed wait
    type Error;

    /// Block until `edge` is seen on the pin
    ///
    /// Returns `Ok(true)` when the edge occurred and `Ok(false)` when
    /// `timeout_ms` elapsed first. `None` waits forever.
    fn wait_for_edge(&mut self, edge: Edge, timeout_ms: Option<u32>) -> Result<bool, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Led {
        high: bool,
    }

    impl OutputPin for Led {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    struct Level(bool);

    impl InputPin for Level {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_set_state() {
        let mut led = Led { high: false };
        led.set_state(true);
        assert!(led.is_set_high());
        led.set_state(false);
        assert!(!led.is_set_high());
    }

    #[test]
    fn test_is_low_default() {
        assert!(Level(false).is_low());
        assert!(!Level(true).is_low());
    }
}
