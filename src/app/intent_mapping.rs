//! Mapping von UI-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState, EditMode};
use crate::core::ViewPreset;

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::ResetCameraRequested => vec![AppCommand::ResetCamera],
        AppIntent::ZoomInRequested => vec![AppCommand::ZoomIn],
        AppIntent::ZoomOutRequested => vec![AppCommand::ZoomOut],
        AppIntent::WheelScrolled { pos, delta } => {
            if !delta.is_finite() || delta == 0.0 {
                return vec![];
            }
            vec![AppCommand::WheelZoom {
                delta: delta * state.options.camera_wheel_zoom_speed,
                cursor: pos,
            }]
        }
        AppIntent::ViewPresetRequested { preset } => {
            if state.edit_mode.locked_sensor().is_some() && preset != ViewPreset::Front {
                log::debug!("Ansicht {:?} im gesperrten Modus ignoriert", preset);
                return vec![];
            }
            vec![AppCommand::ApplyViewPreset { preset }]
        }
        AppIntent::ViewportResized { rect } => {
            if rect == state.view.container {
                vec![]
            } else {
                vec![AppCommand::SetViewportRect { rect }]
            }
        }

        AppIntent::PointerPressed { input } => vec![AppCommand::PointerDown { input }],
        AppIntent::PointerMoved { pos } => {
            if state.interaction.captures_pointer() {
                vec![AppCommand::PointerMove { pos }]
            } else {
                vec![]
            }
        }
        AppIntent::PointerReleased { pos } => {
            if state.interaction.captures_pointer() {
                vec![AppCommand::PointerUp { pos }]
            } else {
                vec![]
            }
        }
        AppIntent::CancelGestureRequested => vec![AppCommand::CancelGesture],

        AppIntent::EditModeRequested { mode } => vec![
            AppCommand::CancelGesture,
            AppCommand::SetEditMode { mode },
        ],
        AppIntent::LockSelectedRequested => match state.selection.selected_sensor {
            Some(sensor_id) => vec![
                AppCommand::CancelGesture,
                AppCommand::SetEditMode {
                    mode: EditMode::Locked { sensor_id },
                },
            ],
            None => vec![],
        },
        AppIntent::SensorSelected { sensor_id } => vec![AppCommand::SelectSensor { sensor_id }],
        AppIntent::DeleteSelectedRequested => {
            let removable = state.host_capabilities.sensor_remove
                && state.edit_mode.allows_editing()
                && state.selection.selected_sensor.is_some();
            if removable {
                vec![AppCommand::CancelGesture, AppCommand::RemoveSelectedSensor]
            } else {
                vec![]
            }
        }

        AppIntent::SnapshotReplaced { snapshot } => vec![AppCommand::ReplaceSnapshot { snapshot }],
        AppIntent::RoomSettingsEdited { settings } => {
            vec![AppCommand::ReportSettingsChange { settings }]
        }
        AppIntent::OpenSnapshotRequested => vec![AppCommand::RequestOpenSnapshotDialog],

        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],
        AppIntent::ResetOptionsRequested => vec![AppCommand::ResetOptions],
        AppIntent::ToggleSettingsPanelRequested => vec![AppCommand::ToggleSettingsPanel],
        AppIntent::ExitRequested => vec![AppCommand::CancelGesture, AppCommand::RequestExit],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ContainerRect;
    use glam::Vec2;

    #[test]
    fn pointer_motion_only_mapped_while_captured() {
        let state = AppState::new();
        let commands = map_intent_to_commands(&state, AppIntent::PointerMoved { pos: Vec2::ONE });
        assert!(commands.is_empty());
    }

    #[test]
    fn unchanged_viewport_produces_no_command() {
        let mut state = AppState::new();
        let rect = ContainerRect::from_size(Vec2::new(640.0, 480.0));
        assert_eq!(
            map_intent_to_commands(&state, AppIntent::ViewportResized { rect }).len(),
            1
        );

        state.view.container = rect;
        assert!(map_intent_to_commands(&state, AppIntent::ViewportResized { rect }).is_empty());
    }

    #[test]
    fn locked_mode_only_accepts_front_preset() {
        let mut state = AppState::new();
        state.edit_mode = EditMode::Locked { sensor_id: 1 };

        let top = map_intent_to_commands(&state, AppIntent::ViewPresetRequested { preset: ViewPreset::Top });
        assert!(top.is_empty());
        let front = map_intent_to_commands(&state, AppIntent::ViewPresetRequested { preset: ViewPreset::Front });
        assert_eq!(front.len(), 1);
    }

    #[test]
    fn delete_requires_host_capability() {
        let mut state = AppState::new();
        state.edit_mode = EditMode::Edit;
        state.selection.selected_sensor = Some(4);
        assert!(map_intent_to_commands(&state, AppIntent::DeleteSelectedRequested).is_empty());

        state.host_capabilities.sensor_remove = true;
        let commands = map_intent_to_commands(&state, AppIntent::DeleteSelectedRequested);
        assert!(matches!(commands.last(), Some(AppCommand::RemoveSelectedSensor)));
    }

    #[test]
    fn wheel_delta_is_scaled_by_options() {
        let state = AppState::new();
        let commands = map_intent_to_commands(
            &state,
            AppIntent::WheelScrolled {
                pos: Vec2::new(10.0, 20.0),
                delta: 100.0,
            },
        );
        match commands.as_slice() {
            [AppCommand::WheelZoom { delta, cursor }] => {
                assert_eq!(*delta, 100.0 * state.options.camera_wheel_zoom_speed);
                assert_eq!(*cursor, Vec2::new(10.0, 20.0));
            }
            other => panic!("unerwartete Commands: {:?}", other),
        }
    }
}
