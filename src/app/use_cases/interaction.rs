//! Use-Case-Funktionen für Zeiger-Gesten.
//!
//! Baut für jedes Pointer-Event den Interaktions-Kontext aus dem State,
//! lässt die Zustandsmaschine entscheiden und wendet deren Effekte an.

use glam::Vec2;

use super::{camera, selection};
use crate::app::host::HostEvent;
use crate::app::interaction::{
    InteractionContext, InteractionEffect, InteractionController, PointerInput, RejectReason,
};
use crate::app::AppState;
use crate::core::{SceneTransform, ViewPreset};
use crate::shared::FloorStack;

pub fn pointer_down(state: &mut AppState, input: PointerInput) {
    let effects = with_context(state, |controller, ctx| controller.pointer_down(ctx, input));
    apply_effects(state, effects);
}

pub fn pointer_move(state: &mut AppState, pos: Vec2) {
    let effects = with_context(state, |controller, ctx| controller.pointer_move(ctx, pos));
    apply_effects(state, effects);
}

pub fn pointer_up(state: &mut AppState, pos: Vec2) {
    let effects = with_context(state, |controller, ctx| controller.pointer_up(ctx, pos));
    apply_effects(state, effects);
}

/// Bricht die laufende Geste ab. Live-Vorschauen verfallen, der Host erfährt nichts.
pub fn cancel(state: &mut AppState) {
    state.interaction.cancel();
}

fn with_context<F>(state: &mut AppState, f: F) -> Vec<InteractionEffect>
where
    F: FnOnce(&mut InteractionController, &InteractionContext) -> Vec<InteractionEffect>,
{
    let stack: FloorStack = state.compose_stack();
    let transform: Option<SceneTransform> = state.scene_transform();
    let ctx = InteractionContext {
        stack: &stack,
        transform: transform.as_ref(),
        mode: state.edit_mode,
        selected: state.selection.selected_sensor,
        pan: state.view.camera.pan,
        options: &state.options,
    };
    f(&mut state.interaction, &ctx)
}

/// Wendet die Effekte der Zustandsmaschine auf den State an.
///
/// Abgeschlossene Änderungen werden als unbestätigte Überlagerung gehalten,
/// bis der Host einen neuen Snapshot liefert.
pub fn apply_effects(state: &mut AppState, effects: Vec<InteractionEffect>) {
    for effect in effects {
        match effect {
            InteractionEffect::RotateCamera { delta } => camera::rotate_by_drag(state, delta),
            InteractionEffect::SetPan { pan } => camera::set_pan(state, pan),
            InteractionEffect::SelectSensor { sensor_id } => {
                selection::select_sensor(state, sensor_id)
            }
            InteractionEffect::SensorClicked { sensor_id } => {
                if let Some(sensor) = state.scene.sensor(sensor_id) {
                    let sensor = sensor.clone();
                    state.outbox.push(HostEvent::SensorClicked { sensor });
                }
            }
            InteractionEffect::SensorDropped {
                sensor_id,
                x,
                y,
                area_id,
            } => {
                state.scene.pending.set_position(sensor_id, Vec2::new(x, y));
                state.outbox.push(HostEvent::SensorDropped {
                    sensor_id,
                    x,
                    y,
                    area_id,
                });
                log::info!("Sensor {} verschoben nach ({:.3}, {:.3})", sensor_id, x, y);
            }
            InteractionEffect::BoundaryCommitted {
                sensor_id,
                boundary,
            } => {
                state.scene.pending.set_boundary(sensor_id, boundary);
                state.outbox.push(HostEvent::BoundaryUpdated {
                    sensor_id,
                    boundary,
                });
                log::info!("Grenze von Sensor {} aktualisiert", sensor_id);
            }
            InteractionEffect::Rejected { requested, reason } => {
                let message = match reason {
                    RejectReason::GestureActive(active) => {
                        format!("{} nicht möglich: {} läuft", requested.label(), active.label())
                    }
                    RejectReason::CameraLocked => format!(
                        "{} gesperrt: Kamera fest in {}",
                        requested.label(),
                        ViewPreset::Front.label()
                    ),
                    RejectReason::NoProjection => {
                        format!("{}: Zeiger liegt nicht auf der Etage", requested.label())
                    }
                };
                log::debug!("{}", message);
                state.ui.status_message = Some(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::interaction::{GestureKind, PointerModifiers};
    use crate::app::EditMode;
    use crate::core::{
        Area, AreaType, Boundary, ContainerRect, FacilitySnapshot, LayerPlacement, Sensor,
    };
    use approx::assert_relative_eq;

    /// Eine Etage, Sensor 1 als Marker, Sensor 2 mit Raum; Frontkamera.
    fn state_with_scene() -> AppState {
        let mut state = AppState::new();
        state.view.container = ContainerRect::from_size(Vec2::new(800.0, 600.0));
        state.scene.replace(FacilitySnapshot {
            sensors: vec![
                Sensor::new(1, 0.25, 0.25, "temperature").with_area(10),
                Sensor::new(2, 0.7, 0.7, "humidity")
                    .with_area(10)
                    .with_boundary(Boundary::new(0.6, 0.8, 0.6, 0.8)),
            ],
            areas: vec![
                Area::new(1, None, AreaType::Building, "HQ"),
                Area::new(10, Some(1), AreaType::Floor, "EG").with_floor_level(0),
            ],
            ..FacilitySnapshot::default()
        });
        state
    }

    fn placement(state: &AppState) -> LayerPlacement {
        state.compose_stack().layers[0].placement
    }

    fn screen_of(state: &AppState, floor: Vec2) -> Vec2 {
        let transform = state.scene_transform().unwrap();
        transform.to_screen(&placement(state), floor)
    }

    #[test]
    fn dragging_marker_to_center_reports_normalized_drop() {
        let mut state = state_with_scene();
        state.edit_mode = EditMode::Edit;
        let start = screen_of(&state, Vec2::new(0.25, 0.25));

        pointer_down(&mut state, PointerInput::primary(start));
        assert_eq!(state.interaction.kind(), GestureKind::DraggingSensor);
        pointer_move(&mut state, Vec2::new(300.0, 250.0));
        pointer_up(&mut state, Vec2::new(400.0, 300.0));

        let events = state.take_host_events();
        match events.as_slice() {
            [HostEvent::SensorDropped {
                sensor_id, x, y, area_id,
            }] => {
                assert_eq!(*sensor_id, 1);
                assert_relative_eq!(*x, 0.5, epsilon = 1e-4);
                assert_relative_eq!(*y, 0.5, epsilon = 1e-4);
                assert_eq!(*area_id, Some(10));
            }
            other => panic!("unerwartete Events: {:?}", other),
        }
        assert!(state.interaction.kind().is_idle());
        let pending = state.scene.pending.position_of(1).unwrap();
        assert_relative_eq!(pending.x, 0.5, epsilon = 1e-4);
        assert_relative_eq!(pending.y, 0.5, epsilon = 1e-4);
    }

    #[test]
    fn click_on_marker_selects_and_notifies_host() {
        let mut state = state_with_scene();
        let pos = screen_of(&state, Vec2::new(0.25, 0.25));

        pointer_down(&mut state, PointerInput::primary(pos));
        pointer_up(&mut state, pos + Vec2::new(1.0, 1.0));

        assert_eq!(state.selection.selected_sensor, Some(1));
        let events = state.take_host_events();
        assert!(matches!(
            events.as_slice(),
            [HostEvent::SensorClicked { sensor }] if sensor.id == 1
        ));
    }

    #[test]
    fn click_on_room_selects_its_sensor() {
        let mut state = state_with_scene();
        let pos = screen_of(&state, Vec2::new(0.7, 0.7));

        pointer_down(&mut state, PointerInput::primary(pos));
        pointer_up(&mut state, pos);

        assert_eq!(state.selection.selected_sensor, Some(2));
    }

    #[test]
    fn empty_space_drag_rotates_and_click_deselects() {
        let mut state = state_with_scene();
        state.selection.selected_sensor = Some(1);
        let empty = Vec2::new(20.0, 20.0);

        pointer_down(&mut state, PointerInput::primary(empty));
        pointer_up(&mut state, empty);
        assert_eq!(state.selection.selected_sensor, None);

        pointer_down(&mut state, PointerInput::primary(empty));
        pointer_move(&mut state, empty + Vec2::new(40.0, 0.0));
        pointer_up(&mut state, empty + Vec2::new(40.0, 0.0));
        assert_relative_eq!(state.view.camera.rotation.y, 20.0);
    }

    #[test]
    fn shift_drag_pans_camera() {
        let mut state = state_with_scene();
        let start = Vec2::new(20.0, 20.0);
        let input = PointerInput::primary(start).with_modifiers(PointerModifiers {
            shift: true,
            ..Default::default()
        });

        pointer_down(&mut state, input);
        pointer_move(&mut state, start + Vec2::new(30.0, -10.0));

        assert_eq!(state.view.camera.pan, Vec2::new(30.0, -10.0));
        pointer_up(&mut state, start + Vec2::new(30.0, -10.0));
        assert!(state.take_host_events().is_empty());
    }

    #[test]
    fn locked_mode_reports_refused_rotation() {
        let mut state = state_with_scene();
        state.edit_mode = EditMode::Locked { sensor_id: 1 };

        pointer_down(&mut state, PointerInput::primary(Vec2::new(20.0, 20.0)));

        assert!(state.interaction.kind().is_idle());
        assert!(state.ui.status_message.is_some());
    }

    #[test]
    fn ctrl_drag_draws_boundary_for_selected_sensor() {
        let mut state = state_with_scene();
        state.edit_mode = EditMode::Edit;
        state.selection.selected_sensor = Some(1);
        let ctrl = PointerModifiers {
            ctrl: true,
            ..Default::default()
        };
        let start = screen_of(&state, Vec2::new(0.1, 0.5));
        let end = screen_of(&state, Vec2::new(0.4, 0.9));

        pointer_down(&mut state, PointerInput::primary(start).with_modifiers(ctrl));
        assert_eq!(state.interaction.kind(), GestureKind::DrawingBoundary);
        pointer_move(&mut state, end);
        assert!(state.scene_overrides().boundary_of(1).is_some());
        pointer_up(&mut state, end);

        let events = state.take_host_events();
        match events.as_slice() {
            [HostEvent::BoundaryUpdated { sensor_id, boundary }] => {
                assert_eq!(*sensor_id, 1);
                assert_relative_eq!(boundary.x_min, 0.1, epsilon = 1e-4);
                assert_relative_eq!(boundary.x_max, 0.4, epsilon = 1e-4);
                assert_relative_eq!(boundary.y_min, 0.5, epsilon = 1e-4);
                assert_relative_eq!(boundary.y_max, 0.9, epsilon = 1e-4);
            }
            other => panic!("unerwartete Events: {:?}", other),
        }
        assert!(state.scene.pending.boundary_of(1).is_some());
    }

    #[test]
    fn cancel_discards_preview_without_host_event() {
        let mut state = state_with_scene();
        state.edit_mode = EditMode::Edit;
        let start = screen_of(&state, Vec2::new(0.25, 0.25));

        pointer_down(&mut state, PointerInput::primary(start));
        pointer_move(&mut state, Vec2::new(400.0, 300.0));
        assert!(state.scene_overrides().position_of(1).is_some());

        cancel(&mut state);

        assert!(state.interaction.kind().is_idle());
        assert!(state.scene_overrides().is_empty());
        assert!(state.take_host_events().is_empty());
    }
}
