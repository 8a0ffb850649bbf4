//! Gesten-Zustände und erlaubte Übergänge.

use glam::Vec2;

use crate::core::{Boundary, ResizeHandle};

/// Art der aktiven Geste (ohne Nutzdaten).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureKind {
    #[default]
    Idle,
    RotatingCamera,
    PanningCamera,
    DraggingSensor,
    DrawingBoundary,
    ResizingBoundary,
}

impl GestureKind {
    /// Darf aus `self` in `next` gewechselt werden?
    ///
    /// Aus `Idle` ist jede Geste erreichbar, jede Geste endet in `Idle`.
    /// Einzige Ausnahme: ein Entwurf kann direkt über sein Handle in die
    /// Größenänderung übergehen.
    pub fn can_enter(self, next: GestureKind) -> bool {
        match (self, next) {
            (GestureKind::Idle, _) | (_, GestureKind::Idle) => true,
            (GestureKind::DrawingBoundary, GestureKind::ResizingBoundary) => true,
            _ => false,
        }
    }

    pub fn is_idle(self) -> bool {
        self == GestureKind::Idle
    }

    pub fn label(self) -> &'static str {
        match self {
            GestureKind::Idle => "bereit",
            GestureKind::RotatingCamera => "Drehen",
            GestureKind::PanningCamera => "Verschieben",
            GestureKind::DraggingSensor => "Sensor ziehen",
            GestureKind::DrawingBoundary => "Grenze zeichnen",
            GestureKind::ResizingBoundary => "Grenze ändern",
        }
    }
}

/// Aktive Geste mit ihren Arbeitsdaten.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    RotatingCamera {
        /// Letzte Zeigerposition (Screen)
        last: Vec2,
    },
    PanningCamera {
        /// `pointer - pan` beim Start
        anchor: Vec2,
    },
    DraggingSensor {
        sensor_id: u64,
        /// Stapel-Index der Etage
        layer: usize,
        /// Aktuelle Position (normalisiert)
        preview: Vec2,
        /// Versatz zwischen Bodenpunkt unter dem Zeiger und Marker-Fußpunkt
        grab: Vec2,
    },
    DrawingBoundary {
        sensor_id: u64,
        layer: usize,
        /// Startpunkt (normalisiert)
        anchor: Vec2,
        preview: Boundary,
    },
    ResizingBoundary {
        sensor_id: u64,
        layer: usize,
        handle: ResizeHandle,
        original: Boundary,
        preview: Boundary,
    },
}

impl Gesture {
    pub fn kind(&self) -> GestureKind {
        match self {
            Gesture::Idle => GestureKind::Idle,
            Gesture::RotatingCamera { .. } => GestureKind::RotatingCamera,
            Gesture::PanningCamera { .. } => GestureKind::PanningCamera,
            Gesture::DraggingSensor { .. } => GestureKind::DraggingSensor,
            Gesture::DrawingBoundary { .. } => GestureKind::DrawingBoundary,
            Gesture::ResizingBoundary { .. } => GestureKind::ResizingBoundary,
        }
    }

    /// Sensor, der von der Geste bearbeitet wird.
    pub fn sensor_id(&self) -> Option<u64> {
        match self {
            Gesture::DraggingSensor { sensor_id, .. }
            | Gesture::DrawingBoundary { sensor_id, .. }
            | Gesture::ResizingBoundary { sensor_id, .. } => Some(*sensor_id),
            _ => None,
        }
    }
}
