//! The line aggregate.
//!
//! A `Line` owns one `SectionChain` plus display metadata. Every section
//! mutation goes through the chain; the line only swaps in the result
//! once the chain has accepted it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ChainError, Section, SectionChain, StationId};

/// Identifier of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(u64);

impl LineId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A subway line: metadata plus its chain of sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    id: LineId,
    name: String,
    color: String,
    sections: SectionChain,
}

impl Line {
    /// Creates a line whose chain holds exactly `initial`.
    ///
    /// Cannot fail: `Section::new` and `Distance::new` already reject
    /// equal endpoints and zero distance with `InvalidSection`.
    pub fn create(
        id: LineId,
        name: impl Into<String>,
        color: impl Into<String>,
        initial: Section,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            sections: SectionChain::new(initial),
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn sections(&self) -> &SectionChain {
        &self.sections
    }

    /// Replaces the line's name and color.
    pub fn update(&mut self, name: impl Into<String>, color: impl Into<String>) {
        self.name = name.into();
        self.color = color.into();
    }

    /// Adds a section to the line.
    ///
    /// On error the line is unchanged.
    pub fn add_section(&mut self, section: Section) -> Result<(), ChainError> {
        self.sections = self.sections.insert(section)?;
        Ok(())
    }

    /// Removes a station from the line.
    ///
    /// On error the line is unchanged.
    pub fn remove_section(&mut self, station: StationId) -> Result<(), ChainError> {
        self.sections = self.sections.remove(station)?;
        Ok(())
    }

    /// Stations in path order.
    pub fn stations(&self) -> Result<Vec<StationId>, ChainError> {
        self.sections.ordered_stations()
    }

    /// Returns true if `station` is on this line.
    pub fn contains(&self, station: StationId) -> bool {
        self.sections.contains(station)
    }

    /// Total length of the line.
    pub fn distance(&self) -> u64 {
        self.sections.total_distance()
    }
}
