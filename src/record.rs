//! Track records and the field access the ranking engine relies on.
//!
//! Records come in two shapes: [`Track`] as supplied by the data source and
//! [`ScoredTrack`] once a mood profile has been applied. Both expose their
//! fields by name through [`Record`], which is all the sorter needs.

mod feature;
mod model;
mod value;

pub use feature::*;
pub use model::*;
pub use value::*;
