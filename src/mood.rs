//! Mood scoring: how far each track sits from a mood's ideal audio features.
//!
//! A profile maps features to targets. A track's `mood_score` is the mean of
//! `|value - target|` over the profile's features only, so smaller is a
//! closer match. Tempo distances enter the mean in BPM, unscaled, and
//! dominate the 0..1 features whenever a profile names tempo.

mod profile;
mod score;

pub use profile::*;
pub use score::*;

#[cfg(test)]
mod tests;
