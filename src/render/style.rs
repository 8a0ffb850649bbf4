//! Farbumrechnung und Deckkräfte für den Painter.

use eframe::egui;

/// Alpha-Faktor für Sensoren außerhalb des gesperrten Sensors.
pub const DIMMED_ALPHA: f32 = 0.2;
/// Alpha-Faktor der Architektur-Böden relativ zur Boden-Deckkraft.
pub const ARCHITECTURE_FLOOR_ALPHA: f32 = 0.5;
/// Strichstärke von Raum-Umrissen in Pixeln.
pub const OUTLINE_WIDTH: f32 = 1.0;
pub const SELECTION_WIDTH: f32 = 2.5;
pub const LABEL_SIZE: f32 = 12.0;

/// RGBA `[0,1]` mit zusätzlichem Alpha-Faktor → `Color32`.
pub fn to_color32(color: [f32; 4], alpha: f32) -> egui::Color32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        channel(color[3] * alpha),
    )
}

/// Alpha-Faktor eines Sensors abhängig vom gesperrten Modus.
pub fn sensor_alpha(dimmed: bool) -> f32 {
    if dimmed {
        DIMMED_ALPHA
    } else {
        1.0
    }
}

/// Kontrastfarbe für Text auf einem Hintergrund.
pub fn label_color(background: [f32; 4]) -> egui::Color32 {
    let luminance = 0.299 * background[0] + 0.587 * background[1] + 0.114 * background[2];
    if luminance > 0.5 {
        egui::Color32::from_gray(20)
    } else {
        egui::Color32::from_gray(235)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_color32_clamps_and_scales_alpha() {
        let opaque = to_color32([1.0, 0.0, 0.0, 1.0], 1.0);
        assert_eq!(opaque, egui::Color32::RED);

        let hidden = to_color32([0.3, 0.3, 0.3, 1.0], 0.0);
        assert_eq!(hidden.a(), 0);

        let over = to_color32([2.0, -1.0, 0.0, 3.0], 1.0);
        assert_eq!(over, egui::Color32::RED);
    }

    #[test]
    fn label_color_contrasts_background() {
        assert_eq!(label_color([0.95, 0.95, 0.95, 1.0]), egui::Color32::from_gray(20));
        assert_eq!(label_color([0.05, 0.1, 0.1, 1.0]), egui::Color32::from_gray(235));
    }
}
