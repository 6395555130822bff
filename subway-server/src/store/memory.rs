//! In-memory subway store.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::domain::{Distance, Line, LineId, Section, Station, StationId};

use super::error::StoreError;

/// Snapshot of a line with its stations resolved, in path order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineView {
    pub id: LineId,
    pub name: String,
    pub color: String,
    /// Total length of the line
    pub distance: u64,
    pub stations: Vec<Station>,
}

/// Thread-safe store of stations and lines.
///
/// Cloning is cheap and every clone shares the same data. Locks are
/// always taken in the order stations, line map, single line.
#[derive(Clone, Default)]
pub struct SubwayStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    stations: RwLock<BTreeMap<StationId, Station>>,
    lines: RwLock<BTreeMap<LineId, Arc<Mutex<Line>>>>,
    last_station_id: AtomicU64,
    last_line_id: AtomicU64,
}

impl SubwayStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new station.
    pub async fn create_station(&self, name: impl Into<String>) -> Station {
        let id = StationId::new(self.inner.last_station_id.fetch_add(1, Ordering::Relaxed) + 1);
        let station = Station::new(id, name);

        let mut stations = self.inner.stations.write().await;
        stations.insert(id, station.clone());
        info!(station_id = %id, name = %station.name, "station created");

        station
    }

    /// Look up a station by id.
    pub async fn find_station(&self, id: StationId) -> Result<Station, StoreError> {
        let stations = self.inner.stations.read().await;
        stations
            .get(&id)
            .cloned()
            .ok_or(StoreError::StationNotFound(id))
    }

    /// All stations, ordered by id.
    pub async fn list_stations(&self) -> Vec<Station> {
        let stations = self.inner.stations.read().await;
        stations.values().cloned().collect()
    }

    /// Delete a station that no line uses.
    pub async fn delete_station(&self, id: StationId) -> Result<(), StoreError> {
        let mut stations = self.inner.stations.write().await;
        if !stations.contains_key(&id) {
            return Err(StoreError::StationNotFound(id));
        }

        let lines = self.inner.lines.read().await;
        for (line_id, line) in lines.iter() {
            if line.lock().await.contains(id) {
                return Err(StoreError::StationInUse {
                    station: id,
                    line: *line_id,
                });
            }
        }

        stations.remove(&id);
        info!(station_id = %id, "station deleted");
        Ok(())
    }

    /// Create a line with a single section between two registered stations.
    pub async fn create_line(
        &self,
        name: impl Into<String>,
        color: impl Into<String>,
        up_station: StationId,
        down_station: StationId,
        distance: Distance,
    ) -> Result<LineView, StoreError> {
        let stations = self.inner.stations.read().await;
        ensure_registered(&stations, &[up_station, down_station])?;

        let section = Section::new(up_station, down_station, distance)?;
        let id = LineId::new(self.inner.last_line_id.fetch_add(1, Ordering::Relaxed) + 1);
        let line = Line::create(id, name, color, section);
        let view = view(&line, &stations)?;

        let mut lines = self.inner.lines.write().await;
        lines.insert(id, Arc::new(Mutex::new(line)));
        info!(line_id = %id, name = %view.name, "line created");

        Ok(view)
    }

    /// Look up a line by id.
    pub async fn find_line(&self, id: LineId) -> Result<LineView, StoreError> {
        let stations = self.inner.stations.read().await;
        let handle = self.line_handle(id).await?;
        let line = handle.lock().await;
        view(&line, &stations)
    }

    /// All lines, ordered by id.
    pub async fn list_lines(&self) -> Result<Vec<LineView>, StoreError> {
        let stations = self.inner.stations.read().await;
        let lines = self.inner.lines.read().await;

        let mut views = Vec::with_capacity(lines.len());
        for handle in lines.values() {
            let line = handle.lock().await;
            views.push(view(&line, &stations)?);
        }
        Ok(views)
    }

    /// Change a line's name and color.
    pub async fn update_line(
        &self,
        id: LineId,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<(), StoreError> {
        let handle = self.line_handle(id).await?;
        let mut line = handle.lock().await;
        line.update(name, color);
        info!(line_id = %id, name = %line.name(), "line updated");
        Ok(())
    }

    /// Delete a line together with its sections.
    pub async fn delete_line(&self, id: LineId) -> Result<(), StoreError> {
        let mut lines = self.inner.lines.write().await;
        lines.remove(&id).ok_or(StoreError::LineNotFound(id))?;
        info!(line_id = %id, "line deleted");
        Ok(())
    }

    /// Add a section to a line.
    ///
    /// Both stations must be registered. The line's lock is held from
    /// reading the current chain until the new chain is committed.
    pub async fn add_section(
        &self,
        line_id: LineId,
        up_station: StationId,
        down_station: StationId,
        distance: Distance,
    ) -> Result<(), StoreError> {
        let stations = self.inner.stations.read().await;
        ensure_registered(&stations, &[up_station, down_station])?;
        let section = Section::new(up_station, down_station, distance)?;

        let handle = self.line_handle(line_id).await?;
        let mut line = handle.lock().await;
        line.add_section(section)?;
        debug!(
            line_id = %line_id,
            section = %section,
            sections = line.sections().len(),
            "section added"
        );
        Ok(())
    }

    /// Remove a station from a line.
    pub async fn remove_section(
        &self,
        line_id: LineId,
        station: StationId,
    ) -> Result<(), StoreError> {
        let handle = self.line_handle(line_id).await?;
        let mut line = handle.lock().await;
        line.remove_section(station)?;
        debug!(
            line_id = %line_id,
            station_id = %station,
            sections = line.sections().len(),
            "station removed from line"
        );
        Ok(())
    }

    async fn line_handle(&self, id: LineId) -> Result<Arc<Mutex<Line>>, StoreError> {
        let lines = self.inner.lines.read().await;
        lines.get(&id).cloned().ok_or(StoreError::LineNotFound(id))
    }
}

fn ensure_registered(
    stations: &BTreeMap<StationId, Station>,
    ids: &[StationId],
) -> Result<(), StoreError> {
    match ids.iter().find(|id| !stations.contains_key(*id)) {
        Some(&missing) => Err(StoreError::StationNotFound(missing)),
        None => Ok(()),
    }
}

/// Resolve a line's ordered station ids against the registry.
fn view(line: &Line, stations: &BTreeMap<StationId, Station>) -> Result<LineView, StoreError> {
    let resolved = line
        .stations()?
        .into_iter()
        .map(|id| {
            stations
                .get(&id)
                .cloned()
                .ok_or(StoreError::StationNotFound(id))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LineView {
        id: line.id(),
        name: line.name().to_string(),
        color: line.color().to_string(),
        distance: line.distance(),
        stations: resolved,
    })
}
