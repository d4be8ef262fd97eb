//! Tripwire Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the countdown
//! controller is written against. Board glue (a Raspberry Pi running
//! linux-embedded-hal, an embassy target, ...) implements them once and
//! the rest of the workspace stays board-agnostic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tripwire-core (controller, state)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tripwire-drivers (HT16K33, watcher)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tripwire-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::EdgeInput`] - Digital I/O
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`clock::Monotonic`] - Millisecond time source

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use clock::Monotonic;
pub use gpio::{Edge, EdgeInput, InputPin, OutputPin};
pub use i2c::{EmbeddedHalI2c, I2cBus, I2cFault};
