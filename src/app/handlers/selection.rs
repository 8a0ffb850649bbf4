//! Handler für Selektion und Bearbeitungsmodus.

use crate::app::use_cases;
use crate::app::{AppState, EditMode};

pub fn select_sensor(state: &mut AppState, sensor_id: Option<u64>) {
    use_cases::selection::select_sensor(state, sensor_id);
}

/// Wechselt den Bearbeitungsmodus.
pub fn set_edit_mode(state: &mut AppState, mode: EditMode) {
    use_cases::selection::set_edit_mode(state, mode);
}

/// Meldet den selektierten Sensor zur Entfernung an den Host.
pub fn remove_selected(state: &mut AppState) {
    use_cases::selection::remove_selected(state);
}
