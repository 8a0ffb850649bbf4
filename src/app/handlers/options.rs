//! Handler für Laufzeit-Optionen und Anwendungssteuerung.

use crate::app::AppState;
use crate::shared::ViewerOptions;

/// Übernimmt neue Optionen und persistiert sie.
pub fn apply_options(state: &mut AppState, options: ViewerOptions) -> anyhow::Result<()> {
    state.options = options;
    let path = ViewerOptions::config_path();
    state.options.save_to_file(&path)
}

/// Setzt Optionen auf Standardwerte zurück und persistiert sie.
pub fn reset_options(state: &mut AppState) -> anyhow::Result<()> {
    state.options = ViewerOptions::default();
    let path = ViewerOptions::config_path();
    state.options.save_to_file(&path)
}

pub fn toggle_settings_panel(state: &mut AppState) {
    state.ui.show_settings_panel = !state.ui.show_settings_panel;
}

/// Fordert das kontrollierte Beenden an.
pub fn request_exit(state: &mut AppState) {
    state.interaction.teardown();
    state.should_exit = true;
}
