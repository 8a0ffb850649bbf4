//! Zeichnen der 2.5D-Szene mit dem egui-Painter.
//!
//! Jede Etage wird als Stapel affiner Vierecke gezeichnet: Boden (Floor-Plan
//! oder Raster), Architektur-Räume, Sensor-Räume mit Wänden und Decke,
//! danach Marker. Overlays (Selektion, Handles, Entwurf) liegen obenauf.

mod layer_painter;
mod overlay;
mod style;
mod texture;

pub use crate::shared::RenderScene;
pub use style::{to_color32, DIMMED_ALPHA};
pub use texture::FloorPlanTexture;

use eframe::egui;

use crate::core::FloorBackground;

/// Haupt-Renderer der Szene.
///
/// Hält nur die Floor-Plan-Textur als eigenen Zustand; alles andere kommt
/// pro Frame aus der `RenderScene`.
pub struct SceneRenderer {
    floor_plan: FloorPlanTexture,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self {
            floor_plan: FloorPlanTexture::new(),
        }
    }

    /// Übernimmt einen neuen Etagen-Hintergrund.
    pub fn set_background(&mut self, ctx: &egui::Context, background: &FloorBackground) {
        match background.image() {
            Some(image) => self.floor_plan.upload(ctx, image),
            None => self.floor_plan.clear(),
        }
    }

    /// Zeichnet die komplette Szene in den Painter.
    pub fn render_scene(&self, painter: &egui::Painter, scene: &RenderScene) {
        let Some(transform) = scene.transform.as_ref() else {
            return;
        };

        let ctx = layer_painter::PaintContext {
            painter,
            transform,
            scene,
            floor_texture: self.floor_plan.id(),
        };
        for layer in &scene.stack.layers {
            layer_painter::paint_layer(&ctx, layer);
        }
        overlay::paint_overlays(&ctx);
    }
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new()
    }
}
