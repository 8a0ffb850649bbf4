//! Toolbar für Kamera, Ansichten und Bearbeitungsmodus.

use crate::app::{AppIntent, AppState, EditMode};
use crate::core::ViewPreset;

/// Rendert die Toolbar und gibt erzeugte Events zurück.
pub fn render_toolbar(ctx: &egui::Context, state: &AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();
    let mode = state.edit_mode;
    let locked = mode.locked_sensor().is_some();
    let has_selection = state.selection.selected_sensor.is_some();

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            if ui.button("Öffnen…").clicked() {
                events.push(AppIntent::OpenSnapshotRequested);
            }
            ui.separator();

            // ── Kamera ──
            if ui.button("⟲ Reset").on_hover_text("Kamera zurücksetzen (Pos1)").clicked() {
                events.push(AppIntent::ResetCameraRequested);
            }
            if ui.button("＋").on_hover_text("Hineinzoomen").clicked() {
                events.push(AppIntent::ZoomInRequested);
            }
            if ui.button("－").on_hover_text("Herauszoomen").clicked() {
                events.push(AppIntent::ZoomOutRequested);
            }
            ui.separator();

            ui.label("Ansicht:");
            for (i, preset) in ViewPreset::ALL.into_iter().enumerate() {
                let enabled = !locked || preset == ViewPreset::Front;
                let selected = state.view.camera.rotation == preset.rotation();
                let button = egui::Button::new(preset.label()).selected(selected);
                if ui
                    .add_enabled(enabled, button)
                    .on_hover_text(format!("Taste {}", i + 1))
                    .clicked()
                {
                    events.push(AppIntent::ViewPresetRequested { preset });
                }
            }
            ui.separator();

            // ── Modus ──
            if ui
                .selectable_label(mode == EditMode::View, EditMode::View.label())
                .clicked()
            {
                events.push(AppIntent::EditModeRequested {
                    mode: EditMode::View,
                });
            }
            if ui
                .selectable_label(mode == EditMode::Edit, EditMode::Edit.label())
                .clicked()
            {
                events.push(AppIntent::EditModeRequested {
                    mode: EditMode::Edit,
                });
            }
            if locked {
                if ui.selectable_label(true, "🔒 Entsperren").clicked() {
                    events.push(AppIntent::EditModeRequested {
                        mode: EditMode::Edit,
                    });
                }
            } else if ui
                .add_enabled(has_selection, egui::Button::new("🔒 Sperren"))
                .on_hover_text("Selektierten Sensor isoliert bearbeiten (L)")
                .clicked()
            {
                events.push(AppIntent::LockSelectedRequested);
            }

            if state.host_capabilities.sensor_remove {
                let removable = has_selection && mode.allows_editing();
                if ui
                    .add_enabled(removable, egui::Button::new("Entfernen"))
                    .clicked()
                {
                    events.push(AppIntent::DeleteSelectedRequested);
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .selectable_label(state.ui.show_settings_panel, "Einstellungen")
                    .clicked()
                {
                    events.push(AppIntent::ToggleSettingsPanelRequested);
                }
            });
        });
    });

    events
}
