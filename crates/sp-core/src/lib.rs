//! sp-core: numeric foundation shared by the simpost crates.
//!
//! Contains:
//! - numeric (Real + finiteness check + number rendering)
//! - error (shared error type)

pub mod error;
pub mod numeric;

pub use error::CoreError;
pub use numeric::*;
