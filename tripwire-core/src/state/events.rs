//! Events that trigger phase transitions

/// Events that can trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Display configured, indicators set to "not armed"
    Start,
    /// Arming trigger completed
    Armed,
    /// Sense line read open during a tick
    SenseOpened,
    /// Remaining time reached zero
    TimeElapsed,
    /// Cycle outcome handled, start over
    CycleReset,
    /// Cycle dropped after a fault
    Abort,
}
