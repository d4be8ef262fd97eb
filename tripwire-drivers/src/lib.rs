//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tripwire-core:
//!
//! - Register transport over any `tripwire_hal::I2cBus`
//! - HT16K33 segment display driver
//! - Edge watcher and named input lines
//! - HTTP expiry notifier over `embedded-io` streams

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

pub mod bus;
pub mod display;
pub mod input;
pub mod notify;
