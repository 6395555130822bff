//! Section and distance types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ChainError, StationId};

/// A strictly positive section length.
///
/// Zero is rejected at construction, so every `Distance` in the system is
/// usable as a section length without further checks.
///
/// # Examples
///
/// ```
/// use subway_server::domain::Distance;
///
/// let d = Distance::new(10).unwrap();
/// assert_eq!(d.get(), 10);
///
/// assert!(Distance::new(0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Distance(u32);

impl Distance {
    /// Creates a distance, rejecting zero.
    pub fn new(value: u32) -> Result<Self, ChainError> {
        if value == 0 {
            return Err(ChainError::InvalidSection("distance must be positive"));
        }
        Ok(Self(value))
    }

    /// Returns the raw length.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Sum of two distances, or `DistanceOverflow`.
    pub fn checked_add(self, other: Distance) -> Result<Distance, ChainError> {
        self.0
            .checked_add(other.0)
            .map(Distance)
            .ok_or(ChainError::DistanceOverflow)
    }

    /// The remainder of `self` after cutting `part` out of it.
    ///
    /// Fails with `InvalidDistance` unless `part` is strictly shorter, so
    /// the remainder is always positive.
    pub fn split_off(self, part: Distance) -> Result<Distance, ChainError> {
        if part >= self {
            return Err(ChainError::InvalidDistance {
                requested: part,
                existing: self,
            });
        }
        Ok(Distance(self.0 - part.0))
    }
}

impl TryFrom<u32> for Distance {
    type Error = ChainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Distance::new(value)
    }
}

impl From<Distance> for u32 {
    fn from(d: Distance) -> Self {
        d.0
    }
}

impl fmt::Debug for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Distance({})", self.0)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed link between two adjacent stations on a line.
///
/// Sections are immutable values: chain mutations replace them, never
/// edit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Section {
    up_station: StationId,
    down_station: StationId,
    distance: Distance,
}

impl Section {
    /// Creates a section, rejecting one whose ends are the same station.
    pub fn new(
        up_station: StationId,
        down_station: StationId,
        distance: Distance,
    ) -> Result<Self, ChainError> {
        if up_station == down_station {
            return Err(ChainError::InvalidSection(
                "up and down stations must differ",
            ));
        }
        Ok(Self {
            up_station,
            down_station,
            distance,
        })
    }

    pub fn up_station(&self) -> StationId {
        self.up_station
    }

    pub fn down_station(&self) -> StationId {
        self.down_station
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Returns true if either end of this section is `station`.
    pub fn touches(&self, station: StationId) -> bool {
        self.up_station == station || self.down_station == station
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({})",
            self.up_station, self.down_station, self.distance
        )
    }
}
