//! Handler für Kamera und Viewport.

use glam::Vec2;

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::{ContainerRect, ViewPreset};

/// Setzt die Kamera auf den Standardzustand zurück.
pub fn reset_camera(state: &mut AppState) {
    use_cases::camera::reset_camera(state);
}

/// Zoomt stufenweise hinein.
pub fn zoom_in(state: &mut AppState) {
    use_cases::camera::zoom_in(state);
}

/// Zoomt stufenweise heraus.
pub fn zoom_out(state: &mut AppState) {
    use_cases::camera::zoom_out(state);
}

/// Mausrad-Zoom mit stabilem Punkt unter dem Cursor.
pub fn wheel_zoom(state: &mut AppState, delta: f32, cursor: Vec2) {
    use_cases::camera::wheel_zoom(state, delta, cursor);
}

pub fn apply_preset(state: &mut AppState, preset: ViewPreset) {
    use_cases::camera::apply_preset(state, preset);
}

/// Aktualisiert das Viewport-Rechteck im State.
pub fn set_viewport_rect(state: &mut AppState, rect: ContainerRect) {
    use_cases::viewport::set_rect(state, rect);
}
