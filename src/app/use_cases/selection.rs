//! Use-Case-Funktionen für Selektion und Bearbeitungsmodus.

use crate::app::host::HostEvent;
use crate::app::{AppState, EditMode};
use crate::core::ViewPreset;

/// Setzt die Selektion. Unbekannte Sensoren heben die Selektion auf.
///
/// Im gesperrten Modus bleibt der gesperrte Sensor selektiert.
pub fn select_sensor(state: &mut AppState, sensor_id: Option<u64>) {
    if let Some(locked) = state.edit_mode.locked_sensor() {
        if sensor_id != Some(locked) {
            log::debug!("Selektion im gesperrten Modus bleibt bei Sensor {}", locked);
            return;
        }
    }
    let known = sensor_id.filter(|id| state.scene.sensor(*id).is_some());
    if known != sensor_id {
        log::warn!("Sensor {:?} existiert nicht, Selektion aufgehoben", sensor_id);
    }
    state.selection.selected_sensor = known;
}

/// Wechselt den Bearbeitungsmodus.
///
/// Sperren setzt Selektion und Frontansicht ohne Pan; Entsperren kehrt zur
/// Perspektive zurück.
pub fn set_edit_mode(state: &mut AppState, mode: EditMode) {
    if mode == state.edit_mode {
        return;
    }
    state.interaction.cancel();
    let was_locked = state.edit_mode.locked_sensor().is_some();

    match mode {
        EditMode::Locked { sensor_id } => {
            if state.scene.sensor(sensor_id).is_none() {
                log::warn!("Sperren abgelehnt: Sensor {} existiert nicht", sensor_id);
                return;
            }
            state.selection.selected_sensor = Some(sensor_id);
            state.view.camera.apply_preset(ViewPreset::Front);
            state.view.camera.pan = glam::Vec2::ZERO;
        }
        EditMode::View | EditMode::Edit => {
            if was_locked {
                state.view.camera.reset_view();
            }
        }
    }

    log::info!("Modus: {}", mode.label());
    state.edit_mode = mode;
}

/// Meldet den selektierten Sensor zur Entfernung an den Host.
///
/// Die Szene löscht nichts selbst; bis zum nächsten Snapshot bleibt der
/// Sensor sichtbar, nur Selektion und Vorschau werden verworfen.
pub fn remove_selected(state: &mut AppState) {
    if !state.host_capabilities.sensor_remove {
        log::debug!("Host unterstützt kein Entfernen von Sensoren");
        return;
    }
    let Some(sensor_id) = state.selection.selected_sensor.take() else {
        return;
    };
    state.scene.pending.forget_sensor(sensor_id);
    if state.edit_mode.locked_sensor() == Some(sensor_id) {
        state.edit_mode = EditMode::Edit;
        state.view.camera.reset_view();
    }
    state.outbox.push(HostEvent::SensorRemoved { sensor_id });
    log::info!("Entfernen von Sensor {} angefordert", sensor_id);
}
