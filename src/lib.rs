//! Rank tracks by how close their audio features sit to a mood, then sort
//! them by any field with one of three interchangeable algorithms.

pub mod config;
pub mod error;
pub mod mood;
pub mod pipeline;
pub mod record;
pub mod runtime;
pub mod server;
pub mod sort;
pub mod source;
pub mod summary;

pub use error::{Error, Result};
