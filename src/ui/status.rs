//! Status-Bar am unteren Bildschirmrand.

use crate::app::AppState;

/// Rendert die Status-Bar
pub fn render_status_bar(ctx: &egui::Context, state: &AppState, floor_count: usize) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if state.sensor_count() > 0 || !state.scene.snapshot.areas.is_empty() {
                ui.label(format!(
                    "Sensoren: {} | Areas: {} | Etagen: {}",
                    state.sensor_count(),
                    state.scene.snapshot.areas.len(),
                    floor_count
                ));
            } else {
                ui.label("Keine Daten geladen");
            }

            ui.separator();

            let camera = &state.view.camera;
            ui.label(format!(
                "Zoom: {:.2}x | Rotation: ({:.0}°, {:.0}°)",
                camera.zoom, camera.rotation.x, camera.rotation.y
            ));

            ui.separator();
            ui.label(format!("Modus: {}", state.edit_mode.label()));

            let gesture = state.interaction.kind();
            if !gesture.is_idle() {
                ui.separator();
                ui.label(gesture.label());
            }

            if let Some(sensor) = state.selected_sensor() {
                ui.separator();
                ui.label(format!("Selektiert: {}", sensor.display_name()));
            }

            if let Some(message) = &state.ui.status_message {
                ui.separator();
                ui.label(message);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("FPS: {:.0}", 1.0 / ui.input(|i| i.stable_dt).max(1e-3)));
            });
        });
    });
}
