//! Builder für Render-Szenen aus dem AppState.

use crate::app::interaction::Gesture;
use crate::app::AppState;
use crate::core::StatusPalette;
use crate::shared::{DraftBoundary, RenderScene};

/// Baut eine RenderScene aus dem aktuellen AppState.
pub fn build(state: &AppState) -> RenderScene {
    let settings = &state.scene.snapshot.room_settings;
    let stack = state.compose_stack();

    let draft = match state.interaction.gesture() {
        Gesture::DrawingBoundary {
            sensor_id,
            layer,
            preview,
            ..
        }
        | Gesture::ResizingBoundary {
            sensor_id,
            layer,
            preview,
            ..
        } => Some(DraftBoundary {
            sensor_id: *sensor_id,
            layer: *layer,
            rect: *preview,
        }),
        _ => None,
    };

    // Handles nur im Bearbeitungsmodus und nicht während eines Sensor-Drags
    let show_handles = state.edit_mode.allows_editing()
        && !matches!(state.interaction.gesture(), Gesture::DraggingSensor { .. })
        && state
            .selection
            .selected_sensor
            .is_some_and(|id| stack.sensor_has_room(id));

    RenderScene {
        transform: state.scene_transform(),
        stack,
        camera: state.view.camera,
        container: state.view.container,
        room_settings: settings.clone(),
        palette: StatusPalette::for_mode(settings.vision_mode),
        background: state.view.background.clone(),
        selected_sensor: state.selection.selected_sensor,
        locked_sensor: state.edit_mode.locked_sensor(),
        show_handles,
        draft,
        options: state.options.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::build;
    use crate::app::{AppState, EditMode};
    use crate::core::{Boundary, ContainerRect, FacilitySnapshot, Sensor};
    use glam::Vec2;

    fn state() -> AppState {
        let mut state = AppState::new();
        state.view.container = ContainerRect::from_size(Vec2::new(1280.0, 720.0));
        state.scene.replace(FacilitySnapshot {
            sensors: vec![
                Sensor::new(1, 0.5, 0.5, "co2").with_boundary(Boundary::new(0.4, 0.6, 0.4, 0.6)),
                Sensor::new(2, 0.1, 0.1, "temperature"),
            ],
            ..FacilitySnapshot::default()
        });
        state
    }

    #[test]
    fn empty_viewport_has_no_transform() {
        let mut state = state();
        state.view.container = ContainerRect::default();

        let scene = build(&state);

        assert!(scene.transform.is_none());
        assert_eq!(scene.stack.layers.len(), 1);
    }

    #[test]
    fn handles_only_in_edit_mode_for_sensor_rooms() {
        let mut state = state();
        state.selection.selected_sensor = Some(1);
        assert!(!build(&state).show_handles);

        state.edit_mode = EditMode::Edit;
        assert!(build(&state).show_handles);

        state.selection.selected_sensor = Some(2);
        assert!(!build(&state).show_handles);
    }

    #[test]
    fn locked_mode_dims_other_sensors() {
        let mut state = state();
        state.edit_mode = EditMode::Locked { sensor_id: 1 };

        let scene = build(&state);

        assert!(!scene.is_dimmed(1));
        assert!(scene.is_dimmed(2));
    }

    #[test]
    fn pending_changes_are_visible_before_host_confirms() {
        let mut state = state();
        state.scene.pending.set_position(2, Vec2::new(0.9, 0.9));

        let scene = build(&state);
        let marker = scene
            .stack
            .layers
            .iter()
            .flat_map(|l| l.elements.iter())
            .find_map(|e| match e {
                crate::shared::LayerElement::Marker {
                    sensor_id: 2,
                    position,
                    ..
                } => Some(*position),
                _ => None,
            });

        assert_eq!(marker, Some(Vec2::new(0.9, 0.9)));
    }
}
