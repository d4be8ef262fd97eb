//! Hardware abstraction traits
//!
//! These traits define the interface between the countdown logic
//! and the concrete drivers.

pub mod display;
pub mod input;
pub mod notify;

pub use display::{SegmentDisplay, ROW_COUNT};
pub use input::{Edge, EdgeEvent, Line, LineWatcher, WatchError};
pub use notify::{Notifier, NotifyOutcome};
