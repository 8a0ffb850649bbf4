//! Zentrale Konfiguration des Floorplan-Viewers.
//!
//! `ViewerOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Kamera ──────────────────────────────────────────────────────────

/// Zoom-Schritt bei stufenweisem Zoom (Toolbar-Buttons / Shortcuts).
pub const CAMERA_ZOOM_STEP: f32 = 0.1;
/// Zoom-Änderung pro Mausrad-Pixel.
pub const CAMERA_WHEEL_ZOOM_SPEED: f32 = 0.0015;

// ── Etagen-Ebene ────────────────────────────────────────────────────

/// Anteil des Containers, den die Etagen-Ebene bei Zoom 1 füllt.
pub const PLANE_FILL: f32 = 0.8;
/// Seitenverhältnis der Etagen-Ebene (Breite / Höhe).
pub const PLANE_ASPECT: f32 = 1.5;
/// Anzahl Grid-Linien pro Achse, wenn kein Floor-Plan geladen ist.
pub const GRID_DIVISIONS: u32 = 10;

// ── Interaktion ─────────────────────────────────────────────────────

/// Bewegung (Pixel), unterhalb der eine Geste als Klick gilt.
pub const CLICK_THRESHOLD_PX: f32 = 5.0;
/// Pick-Radius für Sensor-Marker in Screen-Pixeln.
pub const MARKER_PICK_RADIUS_PX: f32 = 12.0;
/// Pick-Radius für Resize-Handles in Screen-Pixeln.
pub const HANDLE_RADIUS_PX: f32 = 8.0;

// ── Marker-Rendering ────────────────────────────────────────────────

/// Marker-Radius in Screen-Pixeln.
pub const MARKER_RADIUS_PX: f32 = 7.0;
/// Farbe der Selektions-Hervorhebung (RGBA: Magenta).
pub const SELECTION_COLOR: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
/// Farbe eines Boundary-Entwurfs (RGBA: Cyan).
pub const DRAFT_COLOR: [f32; 4] = [0.0, 0.8, 1.0, 1.0];

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Viewer-Optionen.
/// Wird als `floorplan_studio.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    // ── Kamera ──────────────────────────────────────────────────
    /// Zoom-Schritt bei Toolbar-Buttons / Shortcuts
    pub camera_zoom_step: f32,
    /// Zoom-Änderung pro Mausrad-Pixel
    pub camera_wheel_zoom_speed: f32,

    // ── Etagen-Ebene ────────────────────────────────────────────
    pub plane_fill: f32,
    pub plane_aspect: f32,
    pub grid_divisions: u32,

    // ── Interaktion ─────────────────────────────────────────────
    /// Klick-/Drag-Schwelle in Pixeln
    pub click_threshold_px: f32,
    pub marker_pick_radius_px: f32,
    pub handle_radius_px: f32,

    // ── Darstellung ─────────────────────────────────────────────
    pub marker_radius_px: f32,
    pub selection_color: [f32; 4],
    pub draft_color: [f32; 4],
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            camera_zoom_step: CAMERA_ZOOM_STEP,
            camera_wheel_zoom_speed: CAMERA_WHEEL_ZOOM_SPEED,

            plane_fill: PLANE_FILL,
            plane_aspect: PLANE_ASPECT,
            grid_divisions: GRID_DIVISIONS,

            click_threshold_px: CLICK_THRESHOLD_PX,
            marker_pick_radius_px: MARKER_PICK_RADIUS_PX,
            handle_radius_px: HANDLE_RADIUS_PX,

            marker_radius_px: MARKER_RADIUS_PX,
            selection_color: SELECTION_COLOR,
            draft_color: DRAFT_COLOR,
        }
    }
}

impl ViewerOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("floorplan_studio"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("floorplan_studio.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_roundtrip_keeps_values() {
        let mut options = ViewerOptions::default();
        options.click_threshold_px = 9.0;
        options.plane_aspect = 2.0;

        let text = toml::to_string_pretty(&options).unwrap();
        let back: ViewerOptions = toml::from_str(&text).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let back: ViewerOptions = toml::from_str("handle_radius_px = 4.0\n").unwrap();
        assert_eq!(back.handle_radius_px, 4.0);
        assert_eq!(back.click_threshold_px, CLICK_THRESHOLD_PX);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let options = ViewerOptions::load_from_file(std::path::Path::new("/nope/floorplan_studio.toml"));
        assert_eq!(options, ViewerOptions::default());
    }
}
