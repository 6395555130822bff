//! Domain types for subway line maintenance.
//!
//! This module contains the section chain algorithm and the line
//! aggregate built on it. It performs no I/O and emits no log events;
//! every failure is returned to the caller as a `ChainError`.

mod chain;
mod error;
mod line;
mod section;
mod station;

pub use chain::SectionChain;
pub use error::ChainError;
pub use line::{Line, LineId};
pub use section::{Distance, Section};
pub use station::{Station, StationId};
