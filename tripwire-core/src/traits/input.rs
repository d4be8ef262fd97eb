//! Digital input traits
//!
//! The controller names lines logically; which pin backs each line is
//! board glue's business.

pub use tripwire_hal::Edge;

/// Logical input lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Arming button, pulled up, low while pressed
    Button,
    /// Wire-sense loop, pulled up, low while the wire is intact
    Sense,
}

/// An observed transition on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeEvent {
    pub line: Line,
    pub edge: Edge,
}

/// Edge wait failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchError {
    /// The caller-supplied timeout elapsed without the edge
    TimedOut,
    /// Driver faults persisted past the retry bound
    RetriesExhausted { attempts: u32 },
}

impl core::fmt::Display for WatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WatchError::TimedOut => f.write_str("edge wait timed out"),
            WatchError::RetriesExhausted { attempts } => {
                write!(f, "edge wait failed after {} attempts", attempts)
            }
        }
    }
}

/// Trait for watching the named input lines
pub trait LineWatcher {
    /// Block until `edge` occurs on `line`
    ///
    /// `timeout_ms` bounds this wait alone; `None` falls back to the
    /// implementation's configured timeout. Transient driver faults are
    /// retried internally; only the bounds surface as errors.
    fn wait_for_edge(
        &mut self,
        line: Line,
        edge: Edge,
        timeout_ms: Option<u32>,
    ) -> Result<EdgeEvent, WatchError>;

    /// Instantaneous level of `line` (true = high), never blocks
    fn read_level(&mut self, line: Line) -> bool;

    /// Sense wire present (line pulled low)
    fn sense_intact(&mut self) -> bool {
        !self.read_level(Line::Sense)
    }
}
