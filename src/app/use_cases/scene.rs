//! Use-Case-Funktionen für Host-Daten.

use crate::app::host::HostEvent;
use crate::app::{AppState, EditMode};
use crate::core::{FacilitySnapshot, RoomVisibilitySettings};

/// Übernimmt einen neuen Snapshot des Hosts.
///
/// Laufende Gesten werden verworfen, unbestätigte Änderungen gelten als
/// bestätigt. Selektion und Sperre auf verschwundene Sensoren fallen weg.
pub fn replace_snapshot(state: &mut AppState, snapshot: FacilitySnapshot) {
    state.interaction.teardown();
    let url_changed = snapshot.floor_plan_url != state.scene.snapshot.floor_plan_url;
    let first = state.scene.revision == 0;
    state.scene.replace(snapshot);

    if let Some(id) = state.selection.selected_sensor {
        if state.scene.sensor(id).is_none() {
            log::debug!("Selektierter Sensor {} nicht mehr vorhanden", id);
            state.selection.selected_sensor = None;
        }
    }
    if let Some(id) = state.edit_mode.locked_sensor() {
        if state.scene.sensor(id).is_none() {
            log::info!("Gesperrter Sensor {} entfernt, Sperre aufgehoben", id);
            state.edit_mode = EditMode::Edit;
            state.view.camera.reset_view();
        }
    }

    if url_changed || first {
        let url = state.scene.snapshot.floor_plan_url.as_deref();
        state.view.background = state.view.floor_plans.get_or_load(url);
        state.view.background_dirty = true;
    }

    log::debug!(
        "Snapshot #{}: {} Sensoren, {} Areas",
        state.scene.revision,
        state.sensor_count(),
        state.scene.snapshot.areas.len()
    );
}

/// Übernimmt geänderte Raum-Einstellungen lokal und meldet sie dem Host.
pub fn report_settings_change(state: &mut AppState, settings: RoomVisibilitySettings) {
    if settings == state.scene.snapshot.room_settings {
        return;
    }
    state.scene.snapshot.room_settings = settings.clone();
    state.outbox.push(HostEvent::SettingsChanged { settings });
}
