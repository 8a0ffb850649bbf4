//! Sensor-Datenmodell: Position, optionale Raumgeometrie und Live-Telemetrie.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boundary::{resolve_rect, ResolvedRect};
use super::status::ParameterKind;
use super::Boundary;

/// Standard-Höhe eines Markers (in Wandhöhen): knapp über der Decke.
pub const DEFAULT_SENSOR_ELEVATION: f32 = 1.05;

/// Letzter Messwert eines Sensors mit seinem Schwellwert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub val: f32,
    pub threshold: f32,
}

/// Ein physischer Sensor auf dem Etagenplan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// Normalisierte X-Position [0, 1]
    pub x: f32,
    /// Normalisierte Y-Position [0, 1]
    pub y: f32,
    /// Normalisierte Höhe; `None` → `DEFAULT_SENSOR_ELEVATION`
    #[serde(default)]
    pub z: Option<f32>,
    #[serde(default)]
    pub boundary: Option<Boundary>,
    #[serde(default)]
    pub polygon: Option<Vec<[f32; 2]>>,
    /// Zugeordnete Area (bevorzugt)
    #[serde(default)]
    pub area_id: Option<u64>,
    /// Legacy-Zuordnung über die Etagen-Ebene
    #[serde(default)]
    pub floor_level: Option<i32>,
    #[serde(default)]
    pub sensor_type: String,
    #[serde(default)]
    pub telemetry: Option<Telemetry>,
}

impl Sensor {
    /// Minimal-Konstruktor: Punkt-Sensor ohne Zuordnung und Telemetrie.
    pub fn new(id: u64, x: f32, y: f32, sensor_type: &str) -> Self {
        Self {
            id,
            name: String::new(),
            x,
            y,
            z: None,
            boundary: None,
            polygon: None,
            area_id: None,
            floor_level: None,
            sensor_type: sensor_type.to_string(),
            telemetry: None,
        }
    }

    pub fn with_area(mut self, area_id: u64) -> Self {
        self.area_id = Some(area_id);
        self
    }

    pub fn with_floor_level(mut self, level: i32) -> Self {
        self.floor_level = Some(level);
        self
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = Some(boundary);
        self
    }

    pub fn with_telemetry(mut self, val: f32, threshold: f32) -> Self {
        self.telemetry = Some(Telemetry { val, threshold });
        self
    }

    /// Position in normalisierten Etagen-Koordinaten.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Marker-Höhe in Wandhöhen.
    pub fn elevation(&self) -> f32 {
        self.z
            .filter(|z| z.is_finite())
            .unwrap_or(DEFAULT_SENSOR_ELEVATION)
    }

    /// Raumgeometrie; `None` → Sensor wird nur als Punkt-Marker dargestellt.
    pub fn room_rect(&self) -> Option<ResolvedRect> {
        resolve_rect(self.boundary.as_ref(), self.polygon.as_deref())
    }

    /// Messgröße aus dem Sensortyp.
    pub fn parameter(&self) -> ParameterKind {
        ParameterKind::from_sensor_type(&self.sensor_type)
    }

    /// Anzeigename (Fallback: Typ und ID).
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("{} #{}", self.sensor_type, self.id)
        } else {
            self.name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elevation_defaults_above_ceiling() {
        let sensor = Sensor::new(1, 0.5, 0.5, "temperature");
        assert_eq!(sensor.elevation(), DEFAULT_SENSOR_ELEVATION);

        let mut low = sensor.clone();
        low.z = Some(0.2);
        assert_eq!(low.elevation(), 0.2);
    }

    #[test]
    fn sensor_without_geometry_has_no_room() {
        let sensor = Sensor::new(1, 0.5, 0.5, "co2");
        assert!(sensor.room_rect().is_none());

        let room = sensor.with_boundary(Boundary::new(0.1, 0.4, 0.1, 0.4));
        assert!(room.room_rect().is_some());
    }

    #[test]
    fn deserializes_minimal_json() {
        let json = r#"{
            "id": 7,
            "x": 0.25,
            "y": 0.75,
            "sensor_type": "humidity",
            "telemetry": {"val": 55.0, "threshold": 70.0},
            "polygon": [[0.1, 0.1], [0.3, 0.1], [0.3, 0.4]]
        }"#;
        let sensor: Sensor = serde_json::from_str(json).expect("Sensor muss parsen");

        assert_eq!(sensor.id, 7);
        assert_eq!(sensor.parameter(), ParameterKind::Humidity);
        assert!(sensor.room_rect().is_some());
        assert_eq!(sensor.display_name(), "humidity #7");
    }
}
