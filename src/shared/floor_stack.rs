//! Ergebnis der Etagen-Komposition: geordnete Layer mit ihren Elementen.
//!
//! Lebt im shared-Modul, da `app` den Stapel baut und `render` ihn zeichnet.
//! Hit-Tests der Interaktion laufen auf genau diesem Stapel, damit nur
//! gegriffen werden kann, was auch sichtbar ist.

use glam::Vec2;

use crate::core::{Boundary, LayerPlacement, SensorStatus};

/// Ein darzustellendes Element einer Etage (in Zeichenreihenfolge).
#[derive(Debug, Clone, PartialEq)]
pub enum LayerElement {
    /// Boden der Etage (Floor-Plan oder Grid)
    BasePlane,
    /// Raum aus der Area-Hierarchie (ohne Sensor)
    ArchitecturalRoom {
        area_id: u64,
        name: String,
        rect: Boundary,
    },
    /// Raumvolumen eines Sensors, nach Status eingefärbt
    SensorRoom {
        sensor_id: u64,
        area_id: Option<u64>,
        rect: Boundary,
        status: SensorStatus,
        opacity: f32,
        color: [f32; 4],
        label: String,
        value: Option<f32>,
    },
    /// Punkt-Marker eines Sensors ohne Raumgeometrie
    Marker {
        sensor_id: u64,
        area_id: Option<u64>,
        position: Vec2,
        elevation: f32,
        status: SensorStatus,
        color: [f32; 4],
        label: String,
        value: Option<f32>,
    },
}

impl LayerElement {
    /// Sensor-ID, falls das Element zu einem Sensor gehört.
    pub fn sensor_id(&self) -> Option<u64> {
        match self {
            LayerElement::SensorRoom { sensor_id, .. } | LayerElement::Marker { sensor_id, .. } => {
                Some(*sensor_id)
            }
            LayerElement::BasePlane | LayerElement::ArchitecturalRoom { .. } => None,
        }
    }

    /// Zeichen-Rang: Boden < Architektur < Sensor-Räume < Marker.
    pub fn paint_rank(&self) -> u8 {
        match self {
            LayerElement::BasePlane => 0,
            LayerElement::ArchitecturalRoom { .. } => 1,
            LayerElement::SensorRoom { .. } => 2,
            LayerElement::Marker { .. } => 3,
        }
    }
}

/// Eine sichtbare Etage.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorLayer {
    /// Ordinal im Gesamtstapel (inkl. ausgeblendeter Etagen)
    pub index: usize,
    pub level: i32,
    /// Etagen-Area, falls die Etage aus der Hierarchie stammt
    pub area_id: Option<u64>,
    pub name: String,
    pub placement: LayerPlacement,
    pub elements: Vec<LayerElement>,
}

impl FloorLayer {
    pub fn sensor_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.elements.iter().filter_map(LayerElement::sensor_id)
    }

    pub fn contains_sensor(&self, sensor_id: u64) -> bool {
        self.sensor_ids().any(|id| id == sensor_id)
    }

    /// Raumrechteck eines Sensors auf dieser Etage.
    pub fn sensor_room(&self, sensor_id: u64) -> Option<Boundary> {
        self.elements.iter().find_map(|e| match e {
            LayerElement::SensorRoom { sensor_id: id, rect, .. } if *id == sensor_id => Some(*rect),
            _ => None,
        })
    }

    /// Area-Zuordnung eines Sensors auf dieser Etage.
    pub fn sensor_area(&self, sensor_id: u64) -> Option<u64> {
        self.elements.iter().find_map(|e| match e {
            LayerElement::SensorRoom { sensor_id: id, area_id, .. }
            | LayerElement::Marker { sensor_id: id, area_id, .. }
                if *id == sensor_id =>
            {
                *area_id
            }
            _ => None,
        })
    }
}

/// Geordneter Etagen-Stapel eines Frames (unterste Etage zuerst).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloorStack {
    /// Nur sichtbare Etagen
    pub layers: Vec<FloorLayer>,
    /// Anzahl aller Etagen (auch ausgeblendete)
    pub total_layers: usize,
    /// Etagen-Ebenen aller Etagen in Stapel-Reihenfolge
    pub all_levels: Vec<i32>,
}

impl FloorStack {
    pub fn layer(&self, index: usize) -> Option<&FloorLayer> {
        self.layers.iter().find(|l| l.index == index)
    }

    pub fn layer_for_level(&self, level: i32) -> Option<&FloorLayer> {
        self.layers.iter().find(|l| l.level == level)
    }

    /// Sichtbare Etage, auf der ein Sensor dargestellt wird.
    pub fn layer_of_sensor(&self, sensor_id: u64) -> Option<&FloorLayer> {
        self.layers.iter().find(|l| l.contains_sensor(sensor_id))
    }

    /// Hat der Sensor eine dargestellte Raumgeometrie?
    pub fn sensor_has_room(&self, sensor_id: u64) -> bool {
        self.layers.iter().any(|l| l.sensor_room(sensor_id).is_some())
    }

    /// Anzahl dargestellter Sensoren über alle sichtbaren Etagen.
    pub fn sensor_count(&self) -> usize {
        self.layers.iter().map(|l| l.sensor_ids().count()).sum()
    }
}
