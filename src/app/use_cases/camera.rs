//! Use-Case-Funktionen für Kamera-Steuerung.
//!
//! Im gesperrten Modus bleibt die Kamera in der Frontansicht ohne Pan;
//! nur der Zoom ist frei.

use glam::Vec2;

use crate::app::AppState;
use crate::core::ViewPreset;

/// Zoom 1, kein Pan; Perspektive bzw. Frontansicht im gesperrten Modus.
pub fn reset_camera(state: &mut AppState) {
    state.view.camera.reset_view();
    if state.edit_mode.locked_sensor().is_some() {
        state.view.camera.apply_preset(ViewPreset::Front);
    }
}

/// Zoomt die Kamera stufenweise hinein.
pub fn zoom_in(state: &mut AppState) {
    state.view.camera.zoom_by(state.options.camera_zoom_step);
}

/// Zoomt die Kamera stufenweise heraus.
pub fn zoom_out(state: &mut AppState) {
    state.view.camera.zoom_by(-state.options.camera_zoom_step);
}

/// Zoomt um `delta` und hält den Punkt unter dem Cursor stabil.
///
/// Im gesperrten Modus wird um die Container-Mitte gezoomt, der Pan bleibt null.
pub fn wheel_zoom(state: &mut AppState, delta: f32, cursor: Vec2) {
    if state.edit_mode.locked_sensor().is_some() {
        state.view.camera.zoom_by(delta);
        return;
    }
    let offset = state.view.container.offset_from_center(cursor);
    state.view.camera.zoom_towards(delta, offset);
}

/// Dreht die Kamera anhand eines Zeiger-Deltas (Pixel).
pub fn rotate_by_drag(state: &mut AppState, delta: Vec2) {
    if state.edit_mode.locked_sensor().is_some() {
        return;
    }
    state.view.camera.rotate_by_drag(delta);
}

/// Setzt den Pan (Pixel relativ zur Container-Mitte).
pub fn set_pan(state: &mut AppState, pan: Vec2) {
    if state.edit_mode.locked_sensor().is_some() || !pan.is_finite() {
        return;
    }
    state.view.camera.pan = pan;
}

/// Wendet ein benanntes Preset an; gesperrt ist nur die Frontansicht erlaubt.
pub fn apply_preset(state: &mut AppState, preset: ViewPreset) {
    if state.edit_mode.locked_sensor().is_some() && preset != ViewPreset::Front {
        log::debug!("Preset {:?} im gesperrten Modus verworfen", preset);
        return;
    }
    state.view.camera.apply_preset(preset);
}
