//! Kamera der 2.5D-Szene: Rotation, Zoom und Pan.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rotation der Szene in Grad.
///
/// `x` kippt die Etagen-Ebene (Pitch), `y` dreht sie um die Bildschirm-Vertikale (Yaw).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    /// Pitch in Grad, immer in [-90, 90]
    pub x: f32,
    /// Yaw in Grad, immer in [0, 360)
    pub y: f32,
}

impl Rotation {
    /// Erstellt eine normalisierte Rotation.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_pitch(x),
            y: wrap_yaw(y),
        }
    }
}

/// Begrenzt den Pitch auf [-PITCH_LIMIT, PITCH_LIMIT]. NaN wird zu 0.
fn clamp_pitch(pitch: f32) -> f32 {
    if pitch.is_nan() {
        return 0.0;
    }
    pitch.clamp(-CameraState::PITCH_LIMIT, CameraState::PITCH_LIMIT)
}

/// Faltet den Yaw nach [0, 360).
fn wrap_yaw(yaw: f32) -> f32 {
    if !yaw.is_finite() {
        return 0.0;
    }
    let wrapped = yaw.rem_euclid(360.0);
    // rem_euclid kann bei sehr kleinen negativen Werten exakt 360.0 liefern
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Benannte Kamera-Ansichten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewPreset {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
    Perspective,
}

impl ViewPreset {
    /// Alle Presets in Toolbar-Reihenfolge.
    pub const ALL: [ViewPreset; 7] = [
        ViewPreset::Perspective,
        ViewPreset::Front,
        ViewPreset::Back,
        ViewPreset::Left,
        ViewPreset::Right,
        ViewPreset::Top,
        ViewPreset::Bottom,
    ];

    /// Feste Rotation des Presets.
    pub fn rotation(self) -> Rotation {
        match self {
            ViewPreset::Front => Rotation::new(0.0, 0.0),
            ViewPreset::Back => Rotation::new(0.0, 180.0),
            ViewPreset::Left => Rotation::new(0.0, 90.0),
            ViewPreset::Right => Rotation::new(0.0, 270.0),
            ViewPreset::Top => Rotation::new(90.0, 0.0),
            ViewPreset::Bottom => Rotation::new(-90.0, 0.0),
            ViewPreset::Perspective => Rotation::new(55.0, 20.0),
        }
    }

    /// Anzeigename für Toolbar und Logs.
    pub fn label(self) -> &'static str {
        match self {
            ViewPreset::Front => "Front",
            ViewPreset::Back => "Hinten",
            ViewPreset::Left => "Links",
            ViewPreset::Right => "Rechts",
            ViewPreset::Top => "Oben",
            ViewPreset::Bottom => "Unten",
            ViewPreset::Perspective => "Perspektive",
        }
    }
}

/// Kamera-Zustand der Szene.
///
/// Alle Mutationen klemmen ihre Eingaben, ungültige Werte werden nie abgelehnt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Rotation in Grad
    pub rotation: Rotation,
    /// Zoom-Faktor (1.0 = Originalgröße)
    pub zoom: f32,
    /// Verschiebung in Pixeln relativ zur Container-Mitte
    pub pan: Vec2,
}

impl CameraState {
    /// Minimaler Zoom-Faktor.
    pub const ZOOM_MIN: f32 = 0.1;
    /// Maximaler Zoom-Faktor.
    pub const ZOOM_MAX: f32 = 5.0;
    /// Betragsgrenze für den Pitch in Grad.
    pub const PITCH_LIMIT: f32 = 90.0;
    /// Rotation in Grad pro Pixel Mausbewegung.
    pub const DEGREES_PER_PIXEL: f32 = 0.5;

    /// Erstellt die neutrale Frontkamera (keine Rotation, Zoom 1, kein Pan).
    pub fn new() -> Self {
        Self {
            rotation: Rotation::default(),
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }

    /// Ändert den Zoom additiv und klemmt auf [ZOOM_MIN, ZOOM_MAX].
    ///
    /// Gibt `true` zurück, wenn sich der Zoom tatsächlich geändert hat.
    pub fn zoom_by(&mut self, delta: f32) -> bool {
        let old = self.zoom;
        let target = if delta.is_finite() { old + delta } else { old };
        self.zoom = target.clamp(Self::ZOOM_MIN, Self::ZOOM_MAX);
        self.zoom != old
    }

    /// Zoomt so, dass der Punkt unter dem Cursor stabil bleibt.
    ///
    /// `cursor_offset` ist die Zeigerposition relativ zur Container-Mitte.
    pub fn zoom_towards(&mut self, delta: f32, cursor_offset: Vec2) {
        let old_zoom = self.zoom;
        if !self.zoom_by(delta) {
            return;
        }
        let ratio = self.zoom / old_zoom;
        self.pan = cursor_offset - (cursor_offset - self.pan) * ratio;
    }

    /// Dreht die Kamera anhand eines Zeiger-Deltas in Pixeln.
    pub fn rotate_by_drag(&mut self, delta: Vec2) {
        self.rotation = Rotation::new(
            self.rotation.x - delta.y * Self::DEGREES_PER_PIXEL,
            self.rotation.y + delta.x * Self::DEGREES_PER_PIXEL,
        );
    }

    /// Setzt die Kamera auf ein benanntes Preset (Zoom und Pan bleiben).
    pub fn apply_preset(&mut self, preset: ViewPreset) {
        self.rotation = preset.rotation();
    }

    /// Zoom 1, kein Pan, Perspektiv-Preset.
    pub fn reset_view(&mut self) {
        self.zoom = 1.0;
        self.pan = Vec2::ZERO;
        self.apply_preset(ViewPreset::Perspective);
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zoom_is_additive_and_clamped() {
        let mut camera = CameraState::new();
        assert!(camera.zoom_by(0.5));
        assert_relative_eq!(camera.zoom, 1.5);

        camera.zoom_by(100.0);
        assert_relative_eq!(camera.zoom, CameraState::ZOOM_MAX);

        camera.zoom_by(-100.0);
        assert_relative_eq!(camera.zoom, CameraState::ZOOM_MIN);

        // Am Limit keine Änderung mehr
        assert!(!camera.zoom_by(-1.0));
    }

    #[test]
    fn test_zoom_sequence_stays_in_range() {
        let mut camera = CameraState::new();
        let deltas = [0.7, 3.1, -0.2, 9.0, -4.4, -0.05, -12.0, 0.01, f32::NAN, 2.5];
        for delta in deltas {
            camera.zoom_by(delta);
            assert!(camera.zoom >= CameraState::ZOOM_MIN);
            assert!(camera.zoom <= CameraState::ZOOM_MAX);
        }
    }

    #[test]
    fn test_zoom_towards_keeps_cursor_point_fixed() {
        let mut camera = CameraState::new();
        camera.pan = Vec2::new(30.0, -10.0);
        let cursor = Vec2::new(120.0, 80.0);

        // Szenenpunkt unter dem Cursor (in Einheiten vor dem Zoom)
        let under_cursor = (cursor - camera.pan) / camera.zoom;

        camera.zoom_towards(1.0, cursor);

        let back = camera.pan + under_cursor * camera.zoom;
        assert_relative_eq!(back.x, cursor.x, epsilon = 1e-4);
        assert_relative_eq!(back.y, cursor.y, epsilon = 1e-4);
    }

    #[test]
    fn test_zoom_towards_without_change_keeps_pan() {
        let mut camera = CameraState::new();
        camera.zoom = CameraState::ZOOM_MAX;
        camera.pan = Vec2::new(5.0, 5.0);

        camera.zoom_towards(1.0, Vec2::new(100.0, 100.0));

        assert_eq!(camera.pan, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_rotate_drag_clamps_pitch_and_wraps_yaw() {
        let mut camera = CameraState::new();

        camera.rotate_by_drag(Vec2::new(0.0, -1000.0));
        assert_relative_eq!(camera.rotation.x, 90.0);

        camera.rotate_by_drag(Vec2::new(0.0, 5000.0));
        assert_relative_eq!(camera.rotation.x, -90.0);

        camera.rotate_by_drag(Vec2::new(-30.0, 0.0));
        assert_relative_eq!(camera.rotation.y, 345.0);

        camera.rotate_by_drag(Vec2::new(750.0, 0.0));
        assert!(camera.rotation.y >= 0.0 && camera.rotation.y < 360.0);
        assert_relative_eq!(camera.rotation.y, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_rotation_stays_normalized_for_any_drag_sequence() {
        let mut camera = CameraState::new();
        let drags = [
            Vec2::new(13.0, -400.0),
            Vec2::new(-999.0, 3.5),
            Vec2::new(720.0, 720.0),
            Vec2::new(-0.001, -181.0),
            Vec2::new(1e6, -1e6),
        ];
        for drag in drags {
            camera.rotate_by_drag(drag);
            assert!((-90.0..=90.0).contains(&camera.rotation.x));
            assert!(camera.rotation.y >= 0.0 && camera.rotation.y < 360.0);
        }
    }

    #[test]
    fn test_reset_view_uses_perspective_preset() {
        let mut camera = CameraState::new();
        camera.zoom = 3.0;
        camera.pan = Vec2::new(40.0, 2.0);

        camera.reset_view();

        assert_eq!(camera.zoom, 1.0);
        assert_eq!(camera.pan, Vec2::ZERO);
        assert_eq!(camera.rotation, ViewPreset::Perspective.rotation());
    }
}
