//! In-memory persistence for stations and lines.
//!
//! The store owns the station registry and every line, and supplies the
//! per-line locking that section mutations rely on: each line sits
//! behind its own mutex, so mutations to one line are serialized while
//! different lines proceed in parallel.

mod error;
mod memory;

pub use error::StoreError;
pub use memory::{LineView, SubwayStore};
