//! Station identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a registered station.
///
/// The section chain treats this as opaque: it only compares ids for
/// equality and hashes them. Allocation is the station registry's concern.
///
/// # Examples
///
/// ```
/// use subway_server::domain::StationId;
///
/// let gangnam = StationId::new(1);
/// assert_eq!(gangnam.get(), 1);
/// assert_eq!(gangnam.to_string(), "1");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(u64);

impl StationId {
    /// Wraps a raw station id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for StationId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
