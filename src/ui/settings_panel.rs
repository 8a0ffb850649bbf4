//! Seitenpanel für Raum-Einstellungen und Viewer-Optionen.

use crate::app::{AppIntent, AppState};
use crate::core::{CutPlane, FloorAdjustment, VisionMode};

/// Rendert das Einstellungs-Panel und gibt erzeugte Events zurück.
///
/// `all_levels` sind alle Etagen-Ebenen des Stapels, auch ausgeblendete.
pub fn render_settings_panel(ctx: &egui::Context, state: &AppState, all_levels: &[i32]) -> Vec<AppIntent> {
    let mut events = Vec::new();
    if !state.ui.show_settings_panel {
        return events;
    }

    // Arbeitskopien für Live-Bearbeitung
    let mut settings = state.scene.snapshot.room_settings.clone();
    let mut opts = state.options.clone();
    let mut settings_changed = false;
    let mut options_changed = false;

    egui::SidePanel::right("settings_panel")
        .resizable(true)
        .default_width(280.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Darstellung");

                // ── Deckkraft & Höhen ───────────────────────────
                ui.collapsing("Räume", |ui| {
                    settings_changed |= ui
                        .add(egui::Slider::new(&mut settings.wall_opacity, 0.0..=1.0).text("Wände"))
                        .changed();
                    settings_changed |= ui
                        .add(egui::Slider::new(&mut settings.floor_opacity, 0.0..=1.0).text("Boden"))
                        .changed();
                    settings_changed |= ui
                        .add(egui::Slider::new(&mut settings.ceiling_opacity, 0.0..=1.0).text("Decke"))
                        .changed();
                    settings_changed |= ui
                        .add(egui::Slider::new(&mut settings.wall_height, 0.0..=200.0).text("Wandhöhe (px)"))
                        .changed();
                    settings_changed |= ui
                        .add(egui::Slider::new(&mut settings.floor_spacing, 0.0..=400.0).text("Etagenabstand (px)"))
                        .changed();
                    settings_changed |= ui.checkbox(&mut settings.show_labels, "Beschriftungen").changed();
                });

                // ── Sichtmodus ──────────────────────────────────
                ui.horizontal(|ui| {
                    ui.label("Sichtmodus:");
                    egui::ComboBox::from_id_salt("vision_mode")
                        .selected_text(settings.vision_mode.label())
                        .show_ui(ui, |ui| {
                            for mode in VisionMode::ALL {
                                settings_changed |= ui
                                    .selectable_value(&mut settings.vision_mode, mode, mode.label())
                                    .changed();
                            }
                        });
                });

                // ── Etagen ──────────────────────────────────────
                ui.collapsing("Etagen", |ui| {
                    if all_levels.is_empty() {
                        ui.label("Keine Etagen");
                    }
                    for &level in all_levels {
                        ui.horizontal(|ui| {
                            let mut visible = settings.is_floor_visible(level);
                            if ui.checkbox(&mut visible, format!("Etage {}", level)).changed() {
                                settings.toggle_floor(level, all_levels);
                                settings_changed = true;
                            }
                        });
                        settings_changed |= floor_adjustment_edit(ui, &mut settings.floor_adjustments, level);
                    }
                });

                // ── Schnitt ─────────────────────────────────────
                ui.collapsing("Schnitt", |ui| {
                    let cut = &mut settings.section_cut;
                    settings_changed |= ui.checkbox(&mut cut.enabled, "Aktiv").changed();
                    ui.add_enabled_ui(cut.enabled, |ui| {
                        ui.horizontal(|ui| {
                            for (plane, label) in [(CutPlane::X, "X"), (CutPlane::Y, "Y"), (CutPlane::Z, "Z")] {
                                settings_changed |= ui.radio_value(&mut cut.plane, plane, label).changed();
                            }
                        });
                        settings_changed |= ui
                            .add(egui::Slider::new(&mut cut.position, 0.0..=1.0).text("Position"))
                            .changed();
                    });
                });

                ui.separator();
                ui.heading("Viewer");

                ui.collapsing("Interaktion", |ui| {
                    options_changed |= drag_value(ui, "Klick-Schwelle (px):", &mut opts.click_threshold_px, 0.0..=50.0, 0.1);
                    options_changed |= drag_value(ui, "Marker-Pick-Radius (px):", &mut opts.marker_pick_radius_px, 1.0..=50.0, 0.1);
                    options_changed |= drag_value(ui, "Handle-Radius (px):", &mut opts.handle_radius_px, 1.0..=50.0, 0.1);
                    options_changed |= drag_value(ui, "Zoom-Schritt:", &mut opts.camera_zoom_step, 0.01..=1.0, 0.01);
                    options_changed |= drag_value(ui, "Mausrad-Zoom:", &mut opts.camera_wheel_zoom_speed, 0.0001..=0.01, 0.0001);
                });

                ui.collapsing("Ebene & Marker", |ui| {
                    options_changed |= drag_value(ui, "Füllgrad:", &mut opts.plane_fill, 0.1..=1.0, 0.01);
                    options_changed |= drag_value(ui, "Seitenverhältnis:", &mut opts.plane_aspect, 0.2..=5.0, 0.01);
                    ui.horizontal(|ui| {
                        ui.label("Raster-Teilung:");
                        options_changed |= ui
                            .add(egui::DragValue::new(&mut opts.grid_divisions).range(1..=50))
                            .changed();
                    });
                    options_changed |= drag_value(ui, "Marker-Radius (px):", &mut opts.marker_radius_px, 1.0..=30.0, 0.1);
                    options_changed |= color_edit(ui, "Selektion:", &mut opts.selection_color);
                    options_changed |= color_edit(ui, "Entwurf:", &mut opts.draft_color);
                });

                ui.add_space(8.0);
                if ui.button("Standardwerte").clicked() {
                    events.push(AppIntent::ResetOptionsRequested);
                }
            });
        });

    if settings_changed {
        events.push(AppIntent::RoomSettingsEdited { settings });
    }
    if options_changed {
        events.push(AppIntent::OptionsChanged { options: opts });
    }

    events
}

/// Offset und Skalierung einer Etage; legt die Anpassung bei Bedarf an.
fn floor_adjustment_edit(ui: &mut egui::Ui, adjustments: &mut Vec<FloorAdjustment>, level: i32) -> bool {
    let mut adjustment = adjustments
        .iter()
        .find(|a| a.floor_level == level)
        .copied()
        .unwrap_or(FloorAdjustment {
            floor_level: level,
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        });

    let mut changed = false;
    ui.indent(("floor_adjustment", level), |ui| {
        ui.horizontal(|ui| {
            ui.label("Offset:");
            changed |= ui.add(egui::DragValue::new(&mut adjustment.offset_x).speed(1.0).prefix("x ")).changed();
            changed |= ui.add(egui::DragValue::new(&mut adjustment.offset_y).speed(1.0).prefix("y ")).changed();
            ui.label("Skalierung:");
            changed |= ui
                .add(egui::DragValue::new(&mut adjustment.scale).range(0.1..=5.0).speed(0.01))
                .changed();
        });
    });

    if changed {
        match adjustments.iter_mut().find(|a| a.floor_level == level) {
            Some(existing) => *existing = adjustment,
            None => adjustments.push(adjustment),
        }
    }
    changed
}

fn drag_value(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut f32,
    range: std::ops::RangeInclusive<f32>,
    speed: f64,
) -> bool {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::DragValue::new(value).range(range).speed(speed))
            .changed()
    })
    .inner
}

fn color_edit(ui: &mut egui::Ui, label: &str, color: &mut [f32; 4]) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);
        let mut c = egui::Color32::from_rgba_unmultiplied(
            (color[0] * 255.0) as u8,
            (color[1] * 255.0) as u8,
            (color[2] * 255.0) as u8,
            (color[3] * 255.0) as u8,
        );
        if ui.color_edit_button_srgba(&mut c).changed() {
            color[0] = c.r() as f32 / 255.0;
            color[1] = c.g() as f32 / 255.0;
            color[2] = c.b() as f32 / 255.0;
            color[3] = c.a() as f32 / 255.0;
            changed = true;
        }
    });
    changed
}
