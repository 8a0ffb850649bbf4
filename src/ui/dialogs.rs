//! Datei-Dialoge (rfd).

use std::path::PathBuf;

use crate::app::UiState;

/// Zeigt den Snapshot-Dialog, falls angefordert. Liefert die gewählte Datei.
pub fn pick_snapshot_file(ui_state: &mut UiState) -> Option<PathBuf> {
    if !ui_state.show_open_dialog {
        return None;
    }
    ui_state.show_open_dialog = false;

    rfd::FileDialog::new()
        .add_filter("Facility Snapshot", &["json"])
        .pick_file()
}
