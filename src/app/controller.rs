//! Application Controller für zentrale Event-Verarbeitung.

use super::host::{self, SceneCallbacks};
use super::render_scene;
use super::{AppCommand, AppIntent, AppState};
use crate::shared::RenderScene;

/// Orchestriert UI-Events und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Kamera & Viewport ===
            AppCommand::ResetCamera => handlers::view::reset_camera(state),
            AppCommand::ZoomIn => handlers::view::zoom_in(state),
            AppCommand::ZoomOut => handlers::view::zoom_out(state),
            AppCommand::WheelZoom { delta, cursor } => {
                handlers::view::wheel_zoom(state, delta, cursor)
            }
            AppCommand::ApplyViewPreset { preset } => handlers::view::apply_preset(state, preset),
            AppCommand::SetViewportRect { rect } => handlers::view::set_viewport_rect(state, rect),

            // === Interaktion ===
            AppCommand::PointerDown { input } => handlers::interaction::pointer_down(state, input),
            AppCommand::PointerMove { pos } => handlers::interaction::pointer_move(state, pos),
            AppCommand::PointerUp { pos } => handlers::interaction::pointer_up(state, pos),
            AppCommand::CancelGesture => handlers::interaction::cancel(state),

            // === Selektion & Modus ===
            AppCommand::SetEditMode { mode } => handlers::selection::set_edit_mode(state, mode),
            AppCommand::SelectSensor { sensor_id } => {
                handlers::selection::select_sensor(state, sensor_id)
            }
            AppCommand::RemoveSelectedSensor => handlers::selection::remove_selected(state),

            // === Szene ===
            AppCommand::ReplaceSnapshot { snapshot } => {
                handlers::scene::replace_snapshot(state, *snapshot)
            }
            AppCommand::ReportSettingsChange { settings } => {
                handlers::scene::report_settings_change(state, settings)
            }
            AppCommand::RequestOpenSnapshotDialog => handlers::scene::request_open_dialog(state),

            // === Optionen & Anwendungssteuerung ===
            AppCommand::ApplyOptions { options } => {
                handlers::options::apply_options(state, options)?
            }
            AppCommand::ResetOptions => handlers::options::reset_options(state)?,
            AppCommand::ToggleSettingsPanel => handlers::options::toggle_settings_panel(state),
            AppCommand::RequestExit => handlers::options::request_exit(state),
        }

        Ok(())
    }

    /// Stellt alle wartenden Host-Events zu. Liefert die Anzahl.
    pub fn flush_host_events(
        &mut self,
        state: &mut AppState,
        callbacks: &mut dyn SceneCallbacks,
    ) -> usize {
        let events = state.take_host_events();
        for event in &events {
            log::debug!("Host-Event: {:?}", event);
            host::dispatch(event, callbacks);
        }
        events.len()
    }

    /// Baut die Render-Szene aus dem aktuellen AppState.
    pub fn build_render_scene(&self, state: &AppState) -> RenderScene {
        render_scene::build(state)
    }
}
