//! Render-Szene als expliziter Übergabevertrag zwischen App und Renderer.
//!
//! Lebt im shared-Modul, da `app` sie baut und `render` sie konsumiert.

use super::options::ViewerOptions;
use super::FloorStack;
use crate::core::{
    Boundary, CameraState, ContainerRect, FloorBackground, RoomVisibilitySettings, SceneTransform,
    StatusPalette,
};

/// Grenze, die gerade gezeichnet oder verändert wird.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DraftBoundary {
    pub sensor_id: u64,
    /// Stapel-Index der Etage
    pub layer: usize,
    pub rect: Boundary,
}

/// Read-only Daten für einen Render-Frame.
#[derive(Clone)]
pub struct RenderScene {
    /// Komponierter Etagen-Stapel inkl. Live-Vorschau
    pub stack: FloorStack,
    /// `None`, solange der Viewport keine Fläche hat
    pub transform: Option<SceneTransform>,
    /// Kamera-Zustand für diesen Frame
    pub camera: CameraState,
    pub container: ContainerRect,
    /// Deckkräfte, Wandhöhe, Labels
    pub room_settings: RoomVisibilitySettings,
    pub palette: StatusPalette,
    /// Floor-Plan-Bild oder Raster
    pub background: FloorBackground,
    pub selected_sensor: Option<u64>,
    /// Im gesperrten Modus werden andere Sensoren gedimmt
    pub locked_sensor: Option<u64>,
    /// Resize-Handles am selektierten Raum anzeigen
    pub show_handles: bool,
    pub draft: Option<DraftBoundary>,
    /// Laufzeit-Optionen für Farben und Größen
    pub options: ViewerOptions,
}

impl RenderScene {
    /// Wird der Sensor im gesperrten Modus gedimmt?
    pub fn is_dimmed(&self, sensor_id: u64) -> bool {
        self.locked_sensor.is_some_and(|locked| locked != sensor_id)
    }
}
