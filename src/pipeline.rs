//! The analysis pipeline: mood ranking, then a named sort, then the limit.
//!
//! An [`Engine`] is immutable once built, so one instance can serve any
//! number of concurrent requests; every call works on its own copies.

mod engine;
mod methods;

pub use engine::*;
pub use methods::*;
