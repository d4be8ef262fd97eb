//! Expiry notifiers

mod http;

pub use http::{Connect, HttpNotifier};
