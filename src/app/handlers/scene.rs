//! Handler für Host-Daten und Raum-Einstellungen.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::{FacilitySnapshot, RoomVisibilitySettings};

/// Übernimmt einen neuen Datenstand des Hosts.
pub fn replace_snapshot(state: &mut AppState, snapshot: FacilitySnapshot) {
    use_cases::scene::replace_snapshot(state, snapshot);
}

pub fn report_settings_change(state: &mut AppState, settings: RoomVisibilitySettings) {
    use_cases::scene::report_settings_change(state, settings);
}

/// Öffnet den Datei-Dialog für einen Snapshot.
pub fn request_open_dialog(state: &mut AppState) {
    state.ui.show_open_dialog = true;
}
