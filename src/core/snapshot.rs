//! Facility-Snapshot: das Datenpaket, das der Host an die Szene übergibt.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::room_settings::RoomVisibilitySettings;
use super::{Area, Boundary, Sensor};

/// Sensoren, Areas und Raum-Einstellungen einer Visualisierung.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilitySnapshot {
    pub sensors: Vec<Sensor>,
    pub areas: Vec<Area>,
    pub room_settings: RoomVisibilitySettings,
    pub floor_plan_url: Option<String>,
}

impl FacilitySnapshot {
    /// Lädt einen Snapshot aus einer JSON-Datei.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Snapshot nicht lesbar: {}", path.display()))?;
        let snapshot = Self::from_json_str(&content)
            .with_context(|| format!("Snapshot ungültig: {}", path.display()))?;
        log::info!(
            "Snapshot geladen: {} Sensoren, {} Areas aus {}",
            snapshot.sensors.len(),
            snapshot.areas.len(),
            path.display()
        );
        Ok(snapshot)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("JSON-Struktur passt nicht zum Facility-Snapshot")
    }

    /// Schreibt den Snapshot als formatiertes JSON.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Snapshot nicht serialisierbar")?;
        std::fs::write(path, json)
            .with_context(|| format!("Snapshot nicht schreibbar: {}", path.display()))
    }

    pub fn sensor(&self, id: u64) -> Option<&Sensor> {
        self.sensors.iter().find(|s| s.id == id)
    }

    pub fn sensor_mut(&mut self, id: u64) -> Option<&mut Sensor> {
        self.sensors.iter_mut().find(|s| s.id == id)
    }

    // ── Mutationen des Datenlayers (vom Host nach Callbacks aufgerufen) ──

    /// Übernimmt eine abgeschlossene Verschiebung.
    pub fn apply_drop(&mut self, id: u64, x: f32, y: f32, area_id: Option<u64>) -> bool {
        let Some(sensor) = self.sensor_mut(id) else {
            return false;
        };
        sensor.x = x;
        sensor.y = y;
        if area_id.is_some() {
            sensor.area_id = area_id;
        }
        true
    }

    /// Übernimmt neue Raumgrenzen; das Polygon wird damit überflüssig.
    pub fn apply_boundary(&mut self, id: u64, boundary: Boundary) -> bool {
        let Some(sensor) = self.sensor_mut(id) else {
            return false;
        };
        sensor.boundary = Some(boundary);
        sensor.polygon = None;
        true
    }

    pub fn remove_sensor(&mut self, id: u64) -> Option<Sensor> {
        let index = self.sensors.iter().position(|s| s.id == id)?;
        Some(self.sensors.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "sensors": [
            {"id": 1, "x": 0.2, "y": 0.3, "sensor_type": "temperature", "area_id": 10},
            {"id": 2, "x": 0.6, "y": 0.6, "sensor_type": "co2", "floor_level": 1}
        ],
        "areas": [
            {"id": 1, "area_type": "building", "name": "HQ"},
            {"id": 10, "parent_id": 1, "area_type": "floor", "floor_level": 0, "name": "EG"}
        ],
        "floor_plan_url": "file:///plans/eg.png"
    }"#;

    #[test]
    fn parses_snapshot_with_defaults() {
        let snapshot = FacilitySnapshot::from_json_str(SAMPLE).unwrap();
        assert_eq!(snapshot.sensors.len(), 2);
        assert_eq!(snapshot.areas.len(), 2);
        assert_eq!(snapshot.room_settings, RoomVisibilitySettings::default());
        assert_eq!(snapshot.floor_plan_url.as_deref(), Some("file:///plans/eg.png"));
    }

    #[test]
    fn invalid_json_reports_context() {
        let err = FacilitySnapshot::from_json_str("{\"sensors\": 5}").unwrap_err();
        assert!(format!("{:#}", err).contains("Facility-Snapshot"));
    }

    #[test]
    fn data_layer_mutations() {
        let mut snapshot = FacilitySnapshot::from_json_str(SAMPLE).unwrap();

        assert!(snapshot.apply_drop(2, 0.1, 0.9, Some(10)));
        assert_eq!(snapshot.sensor(2).unwrap().area_id, Some(10));
        assert!(!snapshot.apply_drop(99, 0.0, 0.0, None));

        assert!(snapshot.apply_boundary(1, Boundary::new(0.1, 0.2, 0.1, 0.2)));
        assert!(snapshot.sensor(1).unwrap().room_rect().is_some());

        assert_eq!(snapshot.remove_sensor(1).map(|s| s.id), Some(1));
        assert!(snapshot.sensor(1).is_none());
    }
}
