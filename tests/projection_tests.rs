use approx::assert_relative_eq;
use floorplan_studio::app::compositor::placement_for;
use floorplan_studio::core::LayerPlacement;
use floorplan_studio::{CameraState, ContainerRect, RoomVisibilitySettings, SceneTransform, ViewPreset};
use glam::Vec2;

const SAMPLES: [Vec2; 5] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.5, 0.5),
    Vec2::new(0.13, 0.87),
    Vec2::new(0.92, 0.04),
];

fn container() -> ContainerRect {
    ContainerRect::new(Vec2::new(40.0, 25.0), Vec2::new(1024.0, 640.0))
}

fn transform(camera: &CameraState) -> SceneTransform {
    SceneTransform::new(camera, container(), 0.8, 1.5).expect("Container hat Fläche")
}

fn three_floors() -> Vec<LayerPlacement> {
    let settings = RoomVisibilitySettings::default();
    (0..3).map(|i| placement_for(i, 3, i as i32, &settings)).collect()
}

#[test]
fn test_screen_to_floor_inverts_floor_to_screen_for_every_facing_preset() {
    for preset in ViewPreset::ALL {
        let mut camera = CameraState::new();
        camera.apply_preset(preset);
        camera.zoom = 1.7;
        camera.pan = Vec2::new(-35.0, 12.0);
        let t = transform(&camera);

        for placement in three_floors() {
            for floor in SAMPLES {
                let screen = t.to_screen(&placement, floor);
                let Some(back) = t.to_floor(&placement, screen) else {
                    continue;
                };
                assert_relative_eq!(back.x, floor.x, epsilon = 1e-3);
                assert_relative_eq!(back.y, floor.y, epsilon = 1e-3);
            }
        }
    }
}

#[test]
fn test_edge_on_presets_have_no_inverse() {
    for preset in [ViewPreset::Left, ViewPreset::Right, ViewPreset::Top, ViewPreset::Bottom] {
        let mut camera = CameraState::new();
        camera.apply_preset(preset);
        let t = transform(&camera);
        let placement = LayerPlacement::flat(40.0);

        assert!(
            t.to_floor(&placement, container().center()).is_none(),
            "{preset:?} sollte keine Inverse haben"
        );
    }

    for preset in [ViewPreset::Front, ViewPreset::Back, ViewPreset::Perspective] {
        let mut camera = CameraState::new();
        camera.apply_preset(preset);
        let t = transform(&camera);
        let placement = LayerPlacement::flat(40.0);
        assert!(t.to_floor(&placement, container().center()).is_some());
    }
}

#[test]
fn test_front_view_maps_plane_center_to_container_center() {
    let t = transform(&CameraState::new());

    for placement in three_floors() {
        let screen = t.to_screen(&placement, Vec2::splat(0.5));
        assert_relative_eq!(screen.x, container().center().x, epsilon = 1e-3);
        assert_relative_eq!(screen.y, container().center().y, epsilon = 1e-3);
    }
}

#[test]
fn test_wheel_zoom_keeps_point_under_cursor() {
    let mut camera = CameraState::new();
    camera.apply_preset(ViewPreset::Perspective);
    let placement = three_floors()[1];
    let cursor = Vec2::new(812.0, 190.0);

    let before = transform(&camera)
        .to_floor(&placement, cursor)
        .expect("Perspektive ist invertierbar");
    camera.zoom_towards(0.6, container().offset_from_center(cursor));
    let after = transform(&camera).to_screen(&placement, before);

    assert_relative_eq!(camera.zoom, 1.6, epsilon = 1e-6);
    assert_relative_eq!(after.x, cursor.x, epsilon = 1e-2);
    assert_relative_eq!(after.y, cursor.y, epsilon = 1e-2);
}

#[test]
fn test_camera_inputs_are_clamped() {
    let mut camera = CameraState::new();

    camera.zoom_by(100.0);
    assert_eq!(camera.zoom, CameraState::ZOOM_MAX);
    camera.zoom_by(-100.0);
    assert_eq!(camera.zoom, CameraState::ZOOM_MIN);
    camera.zoom_by(f32::NAN);
    assert_eq!(camera.zoom, CameraState::ZOOM_MIN);

    // 400 px nach oben: Pitch läuft in die Grenze
    camera.rotate_by_drag(Vec2::new(0.0, -400.0));
    assert_eq!(camera.rotation.x, CameraState::PITCH_LIMIT);

    // Yaw läuft über 360 hinaus und wird gefaltet
    camera.rotate_by_drag(Vec2::new(760.0, 0.0));
    assert_relative_eq!(camera.rotation.y, 20.0, epsilon = 1e-4);
}

#[test]
fn test_degenerate_container_yields_no_transform() {
    let camera = CameraState::new();
    assert!(SceneTransform::new(&camera, ContainerRect::default(), 0.8, 1.5).is_none());
    assert!(SceneTransform::new(
        &camera,
        ContainerRect::from_size(Vec2::new(f32::NAN, 300.0)),
        0.8,
        1.5
    )
    .is_none());
}
