//! Callback-Vertrag zum Host (Datenlayer).
//!
//! Die Szene persistiert nichts selbst. Abgeschlossene Gesten landen als
//! `HostEvent` in der Outbox des States und werden vom Controller an die
//! `SceneCallbacks`-Implementierung des Hosts zugestellt.

use crate::core::{Boundary, RoomVisibilitySettings, Sensor};

/// Ein an den Host gemeldetes Ereignis.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    SensorClicked {
        sensor: Sensor,
    },
    /// Normalisierte Zielposition und Area unter dem Drop-Punkt
    SensorDropped {
        sensor_id: u64,
        x: f32,
        y: f32,
        area_id: Option<u64>,
    },
    BoundaryUpdated {
        sensor_id: u64,
        boundary: Boundary,
    },
    SensorRemoved {
        sensor_id: u64,
    },
    SettingsChanged {
        settings: RoomVisibilitySettings,
    },
}

/// Vom Host implementierte Callbacks.
pub trait SceneCallbacks {
    fn on_sensor_click(&mut self, sensor: &Sensor);

    fn on_sensor_drop(&mut self, sensor_id: u64, x: f32, y: f32, area_id: Option<u64>);

    fn on_boundary_update(&mut self, sensor_id: u64, boundary: &Boundary);

    /// Nur aufgerufen, wenn der Host `HostCapabilities::sensor_remove` setzt.
    fn on_sensor_remove(&mut self, _sensor_id: u64) {}

    fn on_settings_change(&mut self, _settings: &RoomVisibilitySettings) {}
}

/// Optionale Fähigkeiten des Hosts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostCapabilities {
    /// Host bietet das Entfernen von Sensoren an
    pub sensor_remove: bool,
}

/// Stellt ein Event an die Callbacks zu.
pub fn dispatch(event: &HostEvent, callbacks: &mut dyn SceneCallbacks) {
    match event {
        HostEvent::SensorClicked { sensor } => callbacks.on_sensor_click(sensor),
        HostEvent::SensorDropped {
            sensor_id,
            x,
            y,
            area_id,
        } => callbacks.on_sensor_drop(*sensor_id, *x, *y, *area_id),
        HostEvent::BoundaryUpdated {
            sensor_id,
            boundary,
        } => callbacks.on_boundary_update(*sensor_id, boundary),
        HostEvent::SensorRemoved { sensor_id } => callbacks.on_sensor_remove(*sensor_id),
        HostEvent::SettingsChanged { settings } => callbacks.on_settings_change(settings),
    }
}
