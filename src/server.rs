//! HTTP front end for the analysis pipeline.
//!
//! The engine and the loaded tracks are shared read-only across requests.

mod routes;
mod state;

pub use routes::{ApiError, make_app, run_server};
pub use state::ServerState;

#[cfg(test)]
mod tests;
