//! Configuration types
//!
//! Board-agnostic countdown configuration, its validation rules and a
//! minimal text loader.

pub mod loader;
pub mod types;
pub mod url;

pub use loader::{load_config, parse_config, ParseError};
pub use types::*;
pub use url::{Endpoint, Scheme, UrlError};
