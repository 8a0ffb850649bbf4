//! Zeichnet eine Etage mit ihren Elementen.

use eframe::egui;
use glam::Vec2;

use super::style::{
    label_color, sensor_alpha, to_color32, ARCHITECTURE_FLOOR_ALPHA, LABEL_SIZE, OUTLINE_WIDTH,
};
use crate::core::{Boundary, SceneTransform};
use crate::shared::{FloorLayer, LayerElement, RenderScene};

/// Gemeinsamer Kontext aller Zeichenfunktionen eines Frames.
pub(super) struct PaintContext<'a> {
    pub painter: &'a egui::Painter,
    pub transform: &'a SceneTransform,
    pub scene: &'a RenderScene,
    pub floor_texture: Option<egui::TextureId>,
}

pub(super) fn to_pos(v: Vec2) -> egui::Pos2 {
    egui::pos2(v.x, v.y)
}

fn quad_points(quad: [Vec2; 4]) -> Vec<egui::Pos2> {
    quad.iter().copied().map(to_pos).collect()
}

/// Konvexes Viereck; leere oder degenerierte Vierecke werden übersprungen.
pub(super) fn fill_quad(
    painter: &egui::Painter,
    quad: [Vec2; 4],
    fill: egui::Color32,
    stroke: egui::Stroke,
) {
    if quad.iter().any(|p| !p.is_finite()) || (fill.a() == 0 && stroke.is_empty()) {
        return;
    }
    painter.add(egui::Shape::convex_polygon(quad_points(quad), fill, stroke));
}

pub(super) fn paint_layer(ctx: &PaintContext, layer: &FloorLayer) {
    for element in &layer.elements {
        match element {
            LayerElement::BasePlane => paint_base_plane(ctx, layer),
            LayerElement::ArchitecturalRoom { name, rect, .. } => {
                paint_architecture(ctx, layer, name, rect)
            }
            LayerElement::SensorRoom {
                sensor_id,
                rect,
                opacity,
                color,
                label,
                value,
                ..
            } => paint_sensor_room(ctx, layer, *sensor_id, rect, *opacity, *color, label, *value),
            LayerElement::Marker {
                sensor_id,
                position,
                elevation,
                color,
                label,
                value,
                ..
            } => paint_marker(ctx, layer, *sensor_id, *position, *elevation, *color, label, *value),
        }
    }
}

// ── Boden ───────────────────────────────────────────────────────────

fn paint_base_plane(ctx: &PaintContext, layer: &FloorLayer) {
    let settings = &ctx.scene.room_settings;
    let palette = &ctx.scene.palette;
    let quad = ctx
        .transform
        .rect_quad(&layer.placement, &Boundary::UNIT, 0.0);
    let floor_color = to_color32(palette.floor, settings.floor_opacity);
    let outline = egui::Stroke::new(OUTLINE_WIDTH, to_color32(palette.architecture, 0.8));

    match ctx.floor_texture {
        Some(texture) => {
            let tint = egui::Color32::from_white_alpha(
                (settings.floor_opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
            );
            paint_textured_quad(ctx.painter, texture, quad, tint);
            fill_quad(ctx.painter, quad, egui::Color32::TRANSPARENT, outline);
        }
        None => {
            fill_quad(ctx.painter, quad, floor_color, outline);
            paint_grid(ctx, layer);
        }
    }
}

/// Floor-Plan-Bild als Mesh mit zwei Dreiecken.
fn paint_textured_quad(
    painter: &egui::Painter,
    texture: egui::TextureId,
    quad: [Vec2; 4],
    tint: egui::Color32,
) {
    if quad.iter().any(|p| !p.is_finite()) {
        return;
    }
    let uvs = [
        egui::pos2(0.0, 0.0),
        egui::pos2(1.0, 0.0),
        egui::pos2(1.0, 1.0),
        egui::pos2(0.0, 1.0),
    ];
    let mut mesh = egui::Mesh::with_texture(texture);
    for (corner, uv) in quad.iter().zip(uvs) {
        mesh.vertices.push(egui::epaint::Vertex {
            pos: to_pos(*corner),
            uv,
            color: tint,
        });
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(egui::Shape::mesh(mesh));
}

/// Ersatz-Raster, solange kein Floor-Plan verfügbar ist.
fn paint_grid(ctx: &PaintContext, layer: &FloorLayer) {
    let divisions = ctx.scene.options.grid_divisions.max(1);
    let stroke = egui::Stroke::new(0.5, to_color32(ctx.scene.palette.architecture, 0.35));
    for i in 1..divisions {
        let t = i as f32 / divisions as f32;
        for (a, b) in [
            (Vec2::new(t, 0.0), Vec2::new(t, 1.0)),
            (Vec2::new(0.0, t), Vec2::new(1.0, t)),
        ] {
            let a = ctx.transform.to_screen(&layer.placement, a);
            let b = ctx.transform.to_screen(&layer.placement, b);
            if a.is_finite() && b.is_finite() {
                ctx.painter.line_segment([to_pos(a), to_pos(b)], stroke);
            }
        }
    }
}

// ── Räume ───────────────────────────────────────────────────────────

fn paint_architecture(ctx: &PaintContext, layer: &FloorLayer, name: &str, rect: &Boundary) {
    let settings = &ctx.scene.room_settings;
    let color = ctx.scene.palette.architecture;
    let floor = ctx.transform.rect_quad(&layer.placement, rect, 0.0);
    fill_quad(
        ctx.painter,
        floor,
        to_color32(color, settings.floor_opacity * ARCHITECTURE_FLOOR_ALPHA),
        egui::Stroke::new(OUTLINE_WIDTH, to_color32(color, 0.9)),
    );
    paint_walls(ctx, layer, rect, color, settings.wall_opacity * 0.5, 1.0);

    if settings.show_labels && !name.is_empty() {
        let anchor = ctx.transform.to_screen(&layer.placement, rect.center());
        paint_label(ctx.painter, anchor, name, egui::Color32::from_gray(90));
    }
}

#[allow(clippy::too_many_arguments)]
fn paint_sensor_room(
    ctx: &PaintContext,
    layer: &FloorLayer,
    sensor_id: u64,
    rect: &Boundary,
    opacity: f32,
    color: [f32; 4],
    label: &str,
    value: Option<f32>,
) {
    let settings = &ctx.scene.room_settings;
    let alpha = sensor_alpha(ctx.scene.is_dimmed(sensor_id));

    let floor = ctx.transform.rect_quad(&layer.placement, rect, 0.0);
    fill_quad(
        ctx.painter,
        floor,
        to_color32(color, settings.floor_opacity * opacity * alpha),
        egui::Stroke::new(OUTLINE_WIDTH, to_color32(color, alpha)),
    );
    paint_walls(ctx, layer, rect, color, opacity, alpha);

    let ceiling = ctx.transform.rect_quad(&layer.placement, rect, 1.0);
    fill_quad(
        ctx.painter,
        ceiling,
        to_color32(color, settings.ceiling_opacity * alpha),
        egui::Stroke::new(OUTLINE_WIDTH, to_color32(color, 0.6 * alpha)),
    );

    if settings.show_labels {
        let anchor = ctx.transform.to_screen_at_height(&layer.placement, rect.center(), 1.0);
        paint_label(ctx.painter, anchor, &label_text(label, value), label_color(ctx.scene.palette.floor));
    }
}

/// Vier Wände vom Boden bis zur Wandhöhe, hintere zuerst.
fn paint_walls(
    ctx: &PaintContext,
    layer: &FloorLayer,
    rect: &Boundary,
    color: [f32; 4],
    opacity: f32,
    alpha: f32,
) {
    let mut walls = ctx.transform.wall_quads(&layer.placement, rect, 1.0);
    // Wände mit tieferem Bildschirm-Mittelpunkt liegen vorne
    walls.sort_by(|a, b| quad_center(a).y.total_cmp(&quad_center(b).y));
    let fill = to_color32(color, opacity * alpha);
    let stroke = egui::Stroke::new(OUTLINE_WIDTH * 0.5, to_color32(color, 0.5 * alpha));
    for wall in walls {
        fill_quad(ctx.painter, wall, fill, stroke);
    }
}

fn quad_center(quad: &[Vec2; 4]) -> Vec2 {
    quad.iter().copied().sum::<Vec2>() * 0.25
}

// ── Marker ──────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn paint_marker(
    ctx: &PaintContext,
    layer: &FloorLayer,
    sensor_id: u64,
    position: Vec2,
    elevation: f32,
    color: [f32; 4],
    label: &str,
    value: Option<f32>,
) {
    let alpha = sensor_alpha(ctx.scene.is_dimmed(sensor_id));
    let base = ctx.transform.to_screen(&layer.placement, position);
    let head = ctx
        .transform
        .to_screen_at_height(&layer.placement, position, elevation);
    if !base.is_finite() || !head.is_finite() {
        return;
    }
    let radius = ctx.scene.options.marker_radius_px;

    // Lot vom Marker auf den Boden
    ctx.painter.line_segment(
        [to_pos(base), to_pos(head)],
        egui::Stroke::new(1.0, to_color32(color, 0.6 * alpha)),
    );
    ctx.painter.circle_filled(to_pos(base), radius * 0.3, to_color32(color, 0.5 * alpha));
    ctx.painter.circle(
        to_pos(head),
        radius,
        to_color32(color, alpha),
        egui::Stroke::new(1.0, egui::Color32::from_black_alpha((200.0 * alpha) as u8)),
    );

    if ctx.scene.room_settings.show_labels {
        let anchor = head - Vec2::new(0.0, radius + 2.0);
        paint_label(ctx.painter, anchor, &label_text(label, value), label_color(ctx.scene.palette.floor));
    }
}

// ── Labels ──────────────────────────────────────────────────────────

/// Label-Text mit Messwert, falls vorhanden.
pub(super) fn label_text(label: &str, value: Option<f32>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{label}: {v:.1}"),
        None => label.to_string(),
    }
}

fn paint_label(painter: &egui::Painter, anchor: Vec2, text: &str, color: egui::Color32) {
    if !anchor.is_finite() {
        return;
    }
    painter.text(
        to_pos(anchor),
        egui::Align2::CENTER_BOTTOM,
        text,
        egui::FontId::proportional(LABEL_SIZE),
        color,
    );
}
