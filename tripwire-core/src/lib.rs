//! Board-agnostic core logic for the Tripwire countdown
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (segment display, input lines, notifier)
//! - Phase machine for the arm/countdown cycle
//! - Countdown accounting and `MM:SS` digit decomposition
//! - Seven-segment encoding
//! - Configuration types, validation and loading
//! - The controller tying them together

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod countdown;
pub mod segment;
pub mod state;
pub mod traits;

pub use controller::{Controller, ControllerError, CycleOutcome, Indicators};
