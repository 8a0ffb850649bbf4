//! Overlays über dem Etagen-Stapel: Selektion, Resize-Handles, Entwurf.

use eframe::egui;

use super::layer_painter::{fill_quad, to_pos, PaintContext};
use super::style::{to_color32, SELECTION_WIDTH};
use crate::core::{Boundary, ResizeHandle};
use crate::shared::{FloorLayer, LayerElement};

pub(super) fn paint_overlays(ctx: &PaintContext) {
    if let Some(selected) = ctx.scene.selected_sensor {
        paint_selection(ctx, selected);
    }
    if let Some(draft) = ctx.scene.draft {
        if let Some(layer) = ctx.scene.stack.layer(draft.layer) {
            paint_draft(ctx, layer, &draft.rect);
        }
    }
}

fn paint_selection(ctx: &PaintContext, sensor_id: u64) {
    let Some(layer) = ctx.scene.stack.layer_of_sensor(sensor_id) else {
        return;
    };
    let color = to_color32(ctx.scene.options.selection_color, 1.0);
    let stroke = egui::Stroke::new(SELECTION_WIDTH, color);

    if let Some(rect) = layer.sensor_room(sensor_id) {
        let floor = ctx.transform.rect_quad(&layer.placement, &rect, 0.0);
        let ceiling = ctx.transform.rect_quad(&layer.placement, &rect, 1.0);
        fill_quad(ctx.painter, floor, egui::Color32::TRANSPARENT, stroke);
        fill_quad(ctx.painter, ceiling, egui::Color32::TRANSPARENT, stroke);
        if ctx.scene.show_handles {
            paint_handles(ctx, layer, &rect, color);
        }
        return;
    }

    let marker = layer.elements.iter().find_map(|e| match e {
        LayerElement::Marker {
            sensor_id: id,
            position,
            elevation,
            ..
        } if *id == sensor_id => Some((*position, *elevation)),
        _ => None,
    });
    if let Some((position, elevation)) = marker {
        let head = ctx
            .transform
            .to_screen_at_height(&layer.placement, position, elevation);
        if head.is_finite() {
            ctx.painter.circle_stroke(
                to_pos(head),
                ctx.scene.options.marker_radius_px + 4.0,
                stroke,
            );
        }
    }
}

/// Ecken-Handles auf Bodenhöhe; dort greift auch der Hit-Test.
fn paint_handles(ctx: &PaintContext, layer: &FloorLayer, rect: &Boundary, color: egui::Color32) {
    let radius = ctx.scene.options.handle_radius_px * 0.6;
    for handle in ResizeHandle::ALL {
        let screen = ctx.transform.to_screen(&layer.placement, rect.corner(handle));
        if !screen.is_finite() {
            continue;
        }
        ctx.painter.rect(
            egui::Rect::from_center_size(to_pos(screen), egui::vec2(radius * 2.0, radius * 2.0)),
            1.0,
            egui::Color32::WHITE,
            egui::Stroke::new(1.5, color),
            egui::StrokeKind::Middle,
        );
    }
}

fn paint_draft(ctx: &PaintContext, layer: &FloorLayer, rect: &Boundary) {
    let color = ctx.scene.options.draft_color;
    let quad = ctx.transform.rect_quad(&layer.placement, rect, 0.0);
    fill_quad(
        ctx.painter,
        quad,
        to_color32(color, 0.15),
        egui::Stroke::new(SELECTION_WIDTH, to_color32(color, 1.0)),
    );
}
