//! Section chain maintenance.
//!
//! A line's sections form a single simple path: every section's down
//! station is the next section's up station, no station appears twice,
//! and the path never branches. Sections are stored as plain values and
//! the path order is recomputed from the up/down links when needed.
//!
//! Mutations never touch the receiver. `insert` and `remove` build a
//! complete new section set and return it as a new chain, so a rejected
//! request leaves the line exactly as it was.

use std::collections::{HashMap, HashSet};

use super::{ChainError, Section, StationId};

/// The ordered, non-branching set of sections belonging to one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionChain {
    sections: Vec<Section>,
}

impl SectionChain {
    /// Creates a chain holding exactly one section.
    pub fn new(initial: Section) -> Self {
        Self {
            sections: vec![initial],
        }
    }

    /// The sections of this chain, in no guaranteed order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false: a chain holds at least one section.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns true if `station` is on this chain.
    pub fn contains(&self, station: StationId) -> bool {
        self.sections.iter().any(|s| s.touches(station))
    }

    /// Sum of all section distances.
    pub fn total_distance(&self) -> u64 {
        self.sections
            .iter()
            .map(|s| u64::from(s.distance().get()))
            .sum()
    }

    /// Stations in path order, from the up terminal to the down terminal.
    ///
    /// The result always has `len() + 1` distinct entries. Fails with
    /// `ChainIntegrity` if the sections do not form one simple path.
    pub fn ordered_stations(&self) -> Result<Vec<StationId>, ChainError> {
        let mut next: HashMap<StationId, &Section> = HashMap::with_capacity(self.sections.len());
        let mut downs: HashSet<StationId> = HashSet::with_capacity(self.sections.len());

        for section in &self.sections {
            if next.insert(section.up_station(), section).is_some() {
                return Err(ChainError::ChainIntegrity(
                    "a station starts more than one section",
                ));
            }
            if !downs.insert(section.down_station()) {
                return Err(ChainError::ChainIntegrity(
                    "a station ends more than one section",
                ));
            }
        }

        let mut heads = self
            .sections
            .iter()
            .map(Section::up_station)
            .filter(|up| !downs.contains(up));
        let head = heads
            .next()
            .ok_or(ChainError::ChainIntegrity("no up terminal"))?;
        if heads.next().is_some() {
            return Err(ChainError::ChainIntegrity("more than one up terminal"));
        }

        // Ups and downs are each unique and the head is nobody's down, so
        // this walk cannot revisit a station.
        let mut stations = Vec::with_capacity(self.sections.len() + 1);
        stations.push(head);
        let mut current = head;
        while let Some(section) = next.get(&current) {
            current = section.down_station();
            stations.push(current);
        }

        if stations.len() != self.sections.len() + 1 {
            return Err(ChainError::ChainIntegrity(
                "sections are not connected into one path",
            ));
        }

        Ok(stations)
    }

    /// Adds a section, extending the line or splitting an existing section.
    ///
    /// Exactly one end of `section` must already be on the line:
    /// - If the known end is the terminal the new section points away
    ///   from, the section becomes the new terminal edge.
    /// - Otherwise the existing section leaving (or entering) the known
    ///   end on the same side is split in two. The new section must be
    ///   strictly shorter than it, and the remainder goes to the other
    ///   half.
    pub fn insert(&self, section: Section) -> Result<Self, ChainError> {
        let up = section.up_station();
        let down = section.down_station();

        match (self.contains(up), self.contains(down)) {
            (true, true) => Err(ChainError::DuplicateSection {
                up,
                down,
                reason: "both stations are already on the line",
            }),
            (false, false) => Err(ChainError::DuplicateSection {
                up,
                down,
                reason: "neither station is on the line",
            }),
            (true, false) => self.insert_after(section),
            (false, true) => self.insert_before(section),
        }
    }

    /// Inserts a section whose up station is already on the line.
    fn insert_after(&self, section: Section) -> Result<Self, ChainError> {
        let Some((idx, existing)) = self.outgoing(section.up_station()) else {
            // Known end is the down terminal.
            let mut sections = self.sections.clone();
            sections.push(section);
            return Ok(Self { sections });
        };

        let remainder = existing.distance().split_off(section.distance())?;
        let tail = Section::new(section.down_station(), existing.down_station(), remainder)?;
        Ok(self.replace(idx, [section, tail]))
    }

    /// Inserts a section whose down station is already on the line.
    fn insert_before(&self, section: Section) -> Result<Self, ChainError> {
        let Some((idx, existing)) = self.incoming(section.down_station()) else {
            // Known end is the up terminal.
            let mut sections = Vec::with_capacity(self.sections.len() + 1);
            sections.push(section);
            sections.extend_from_slice(&self.sections);
            return Ok(Self { sections });
        };

        let remainder = existing.distance().split_off(section.distance())?;
        let head = Section::new(existing.up_station(), section.up_station(), remainder)?;
        Ok(self.replace(idx, [head, section]))
    }

    /// Removes a station from the line.
    ///
    /// A terminal station takes its one section with it. An internal
    /// station's two sections are merged into one spanning both, with the
    /// summed distance.
    pub fn remove(&self, station: StationId) -> Result<Self, ChainError> {
        if self.sections.len() == 1 {
            return Err(ChainError::SingleSection);
        }

        match (self.incoming(station), self.outgoing(station)) {
            (None, None) => Err(ChainError::StationNotFound(station)),
            (Some((idx, _)), None) | (None, Some((idx, _))) => {
                let mut sections = self.sections.clone();
                sections.remove(idx);
                Ok(Self { sections })
            }
            (Some((before_idx, before)), Some((after_idx, after))) => {
                let merged = Section::new(
                    before.up_station(),
                    after.down_station(),
                    before.distance().checked_add(after.distance())?,
                )?;
                let sections = self
                    .sections
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != after_idx)
                    .map(|(i, s)| if i == before_idx { merged } else { *s })
                    .collect();
                Ok(Self { sections })
            }
        }
    }

    /// The section whose up station is `station`.
    fn outgoing(&self, station: StationId) -> Option<(usize, &Section)> {
        self.sections
            .iter()
            .enumerate()
            .find(|(_, s)| s.up_station() == station)
    }

    /// The section whose down station is `station`.
    fn incoming(&self, station: StationId) -> Option<(usize, &Section)> {
        self.sections
            .iter()
            .enumerate()
            .find(|(_, s)| s.down_station() == station)
    }

    /// Copy of this chain with the section at `idx` replaced by `pieces`.
    fn replace(&self, idx: usize, pieces: [Section; 2]) -> Self {
        let mut sections = self.sections.clone();
        sections.splice(idx..=idx, pieces);
        Self { sections }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Distance;

    fn id(n: u64) -> StationId {
        StationId::new(n)
    }

    fn dist(n: u32) -> Distance {
        Distance::new(n).unwrap()
    }

    fn section(up: u64, down: u64, d: u32) -> Section {
        Section::new(id(up), id(down), dist(d)).unwrap()
    }

    fn ids(raw: &[u64]) -> Vec<StationId> {
        raw.iter().copied().map(id).collect()
    }

    fn distance_between(chain: &SectionChain, up: u64, down: u64) -> Option<Distance> {
        chain
            .sections()
            .iter()
            .find(|s| s.up_station() == id(up) && s.down_station() == id(down))
            .map(Section::distance)
    }

    /// 1 -> 2 (10)
    fn single() -> SectionChain {
        SectionChain::new(section(1, 2, 10))
    }

    /// 1 -> 2 (10) -> 3 (6)
    fn double() -> SectionChain {
        single().insert(section(2, 3, 6)).unwrap()
    }

    #[test]
    fn new_chain_has_two_stations() {
        let chain = single();
        assert_eq!(chain.len(), 1);
        assert!(!chain.is_empty());
        assert_eq!(chain.ordered_stations().unwrap(), ids(&[1, 2]));
    }

    #[test]
    fn append_at_down_terminal() {
        let chain = double();
        assert_eq!(chain.ordered_stations().unwrap(), ids(&[1, 2, 3]));
        assert_eq!(chain.total_distance(), 16);
    }

    #[test]
    fn prepend_at_up_terminal() {
        let chain = single().insert(section(7, 1, 4)).unwrap();
        assert_eq!(chain.ordered_stations().unwrap(), ids(&[7, 1, 2]));
        assert_eq!(chain.total_distance(), 14);
    }

    #[test]
    fn split_sharing_up_station() {
        let chain = single().insert(section(1, 5, 4)).unwrap();
        assert_eq!(chain.ordered_stations().unwrap(), ids(&[1, 5, 2]));
        assert_eq!(distance_between(&chain, 1, 5), Some(dist(4)));
        assert_eq!(distance_between(&chain, 5, 2), Some(dist(6)));
        assert_eq!(chain.total_distance(), 10);
    }

    #[test]
    fn split_sharing_down_station() {
        let chain = single().insert(section(5, 2, 4)).unwrap();
        assert_eq!(chain.ordered_stations().unwrap(), ids(&[1, 5, 2]));
        assert_eq!(distance_between(&chain, 1, 5), Some(dist(6)));
        assert_eq!(distance_between(&chain, 5, 2), Some(dist(4)));
    }

    #[test]
    fn split_internal_station() {
        // 1 -> 2 -> 3, insert 2 -> 9 inside 2 -> 3
        let chain = double().insert(section(2, 9, 2)).unwrap();
        assert_eq!(chain.ordered_stations().unwrap(), ids(&[1, 2, 9, 3]));
        assert_eq!(distance_between(&chain, 2, 9), Some(dist(2)));
        assert_eq!(distance_between(&chain, 9, 3), Some(dist(4)));
    }

    #[test]
    fn split_too_long_rejected() {
        let chain = single();
        assert_eq!(
            chain.insert(section(1, 5, 10)),
            Err(ChainError::InvalidDistance {
                requested: dist(10),
                existing: dist(10),
            })
        );
        assert!(matches!(
            chain.insert(section(5, 2, 11)),
            Err(ChainError::InvalidDistance { .. })
        ));
        assert_eq!(chain, single());
    }

    #[test]
    fn both_stations_present_rejected() {
        let chain = double();
        for (up, down) in [(1, 2), (2, 1), (1, 3), (3, 1)] {
            assert!(
                matches!(
                    chain.insert(section(up, down, 1)),
                    Err(ChainError::DuplicateSection { .. })
                ),
                "{up} -> {down} should be rejected"
            );
        }
    }

    #[test]
    fn disconnected_section_rejected() {
        let chain = single();
        assert!(matches!(
            chain.insert(section(3, 4, 6)),
            Err(ChainError::DuplicateSection { .. })
        ));
        assert_eq!(chain.ordered_stations().unwrap(), ids(&[1, 2]));
    }

    #[test]
    fn remove_down_terminal() {
        let chain = double().remove(id(3)).unwrap();
        assert_eq!(chain.ordered_stations().unwrap(), ids(&[1, 2]));
        assert_eq!(chain.total_distance(), 10);
    }

    #[test]
    fn remove_up_terminal() {
        let chain = double().remove(id(1)).unwrap();
        assert_eq!(chain.ordered_stations().unwrap(), ids(&[2, 3]));
        assert_eq!(chain.total_distance(), 6);
    }

    #[test]
    fn remove_internal_merges() {
        let chain = double().remove(id(2)).unwrap();
        assert_eq!(chain.ordered_stations().unwrap(), ids(&[1, 3]));
        assert_eq!(chain.len(), 1);
        assert_eq!(distance_between(&chain, 1, 3), Some(dist(16)));
    }

    #[test]
    fn remove_from_single_section_rejected() {
        let chain = single();
        assert_eq!(chain.remove(id(2)), Err(ChainError::SingleSection));
        assert_eq!(chain.remove(id(1)), Err(ChainError::SingleSection));
        assert_eq!(chain, single());
    }

    #[test]
    fn remove_unknown_station_rejected() {
        assert_eq!(
            double().remove(id(42)),
            Err(ChainError::StationNotFound(id(42)))
        );
    }

    #[test]
    fn merge_overflow_rejected() {
        let chain = SectionChain::new(section(1, 2, u32::MAX))
            .insert(section(2, 3, 1))
            .unwrap();
        assert_eq!(chain.remove(id(2)), Err(ChainError::DistanceOverflow));
    }

    /// Chain over an arbitrary section set, bypassing insert/remove.
    fn unchecked(sections: Vec<Section>) -> SectionChain {
        SectionChain { sections }
    }

    #[test]
    fn ordered_stations_independent_of_storage_order() {
        let chain = unchecked(vec![section(3, 4, 1), section(1, 2, 1), section(2, 3, 1)]);
        assert_eq!(chain.ordered_stations().unwrap(), ids(&[1, 2, 3, 4]));
    }

    #[test]
    fn ordered_stations_rejects_broken_paths() {
        assert!(matches!(
            unchecked(vec![]).ordered_stations(),
            Err(ChainError::ChainIntegrity(_))
        ));

        // branch: 1 -> 2, 1 -> 3
        assert!(matches!(
            unchecked(vec![section(1, 2, 1), section(1, 3, 1)]).ordered_stations(),
            Err(ChainError::ChainIntegrity(_))
        ));

        // merge: 1 -> 3, 2 -> 3
        assert!(matches!(
            unchecked(vec![section(1, 3, 1), section(2, 3, 1)]).ordered_stations(),
            Err(ChainError::ChainIntegrity(_))
        ));

        // cycle: 1 -> 2 -> 1
        assert!(matches!(
            unchecked(vec![section(1, 2, 1), section(2, 1, 1)]).ordered_stations(),
            Err(ChainError::ChainIntegrity(_))
        ));

        // disjoint: 1 -> 2, 3 -> 4
        assert!(matches!(
            unchecked(vec![section(1, 2, 1), section(3, 4, 1)]).ordered_stations(),
            Err(ChainError::ChainIntegrity(_))
        ));

        // path plus detached cycle: 1 -> 2, 3 -> 4 -> 3
        assert!(matches!(
            unchecked(vec![
                section(1, 2, 1),
                section(3, 4, 1),
                section(4, 3, 1)
            ]).ordered_stations(),
            Err(ChainError::ChainIntegrity(_))
        ));
    }
}
