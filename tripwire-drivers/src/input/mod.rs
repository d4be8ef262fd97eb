//! Digital input watching
//!
//! Blocking edge waits with bounded retry, and the named line set the
//! controller consumes.

mod lines;
mod watcher;

pub use lines::InputLines;
pub use watcher::{EdgeWatcher, RetryPolicy};
