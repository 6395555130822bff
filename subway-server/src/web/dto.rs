//! Data transfer objects for web requests and responses.
//!
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::domain::{LineId, Station, StationId};
use crate::store::LineView;

/// Request to register a station.
#[derive(Debug, Deserialize)]
pub struct CreateStationRequest {
    pub name: String,
}

/// A station in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationResponse {
    pub id: StationId,
    pub name: String,
}

impl From<Station> for StationResponse {
    fn from(station: Station) -> Self {
        Self {
            id: station.id,
            name: station.name,
        }
    }
}

/// Request to create a line with its first section.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLineRequest {
    pub name: String,
    pub color: String,
    pub up_station_id: StationId,
    pub down_station_id: StationId,
    /// Length of the first section; must be positive
    pub distance: u32,
}

/// Request to rename or recolor a line.
#[derive(Debug, Deserialize)]
pub struct UpdateLineRequest {
    pub name: String,
    pub color: String,
}

/// A line with its stations in path order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineResponse {
    pub id: LineId,
    pub name: String,
    pub color: String,
    /// Total length of all sections
    pub distance: u64,
    pub stations: Vec<StationResponse>,
}

impl From<LineView> for LineResponse {
    fn from(view: LineView) -> Self {
        Self {
            id: view.id,
            name: view.name,
            color: view.color,
            distance: view.distance,
            stations: view.stations.into_iter().map(StationResponse::from).collect(),
        }
    }
}

/// Request to add a section to a line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRequest {
    pub up_station_id: StationId,
    pub down_station_id: StationId,
    pub distance: u32,
}

/// Query for removing a station from a line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveSectionQuery {
    pub station_id: StationId,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_line_request_uses_camel_case() {
        let json = r#"{
            "name": "Sinbundang",
            "color": "bg-red-600",
            "upStationId": 1,
            "downStationId": 2,
            "distance": 10
        }"#;
        let req: CreateLineRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "Sinbundang");
        assert_eq!(req.up_station_id, StationId::new(1));
        assert_eq!(req.down_station_id, StationId::new(2));
        assert_eq!(req.distance, 10);
    }

    #[test]
    fn section_request_requires_all_fields() {
        let json = r#"{"upStationId": 1, "distance": 6}"#;
        assert!(serde_json::from_str::<SectionRequest>(json).is_err());
    }

    #[test]
    fn line_response_from_view() {
        let view = LineView {
            id: LineId::new(3),
            name: "Sinbundang".into(),
            color: "bg-red-600".into(),
            distance: 16,
            stations: vec![
                Station::new(StationId::new(1), "Gangnam"),
                Station::new(StationId::new(2), "Yangjae"),
                Station::new(StationId::new(3), "Jeongja"),
            ],
        };

        let response = LineResponse::from(view);
        assert_eq!(response.id, LineId::new(3));
        assert_eq!(response.distance, 16);
        assert_eq!(response.stations.len(), 3);
        assert_eq!(response.stations[2].name, "Jeongja");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["stations"][0]["id"], 1);
        assert_eq!(json["stations"][0]["name"], "Gangnam");
    }
}
