//! Floor-Plan-Textur für den egui-Painter.

use eframe::egui;

use crate::core::FloorPlanImage;

/// Hochgeladene Floor-Plan-Textur.
#[derive(Default)]
pub struct FloorPlanTexture {
    handle: Option<egui::TextureHandle>,
    source: Option<String>,
}

impl FloorPlanTexture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lädt ein Bild hoch. Bereits aktuelle Quellen werden nicht erneut übertragen.
    pub fn upload(&mut self, ctx: &egui::Context, image: &FloorPlanImage) {
        if self.source.as_deref() == Some(image.source.as_str()) && self.handle.is_some() {
            return;
        }
        let size = [image.width() as usize, image.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.pixels.as_raw());
        self.handle = Some(ctx.load_texture(
            format!("floor-plan:{}", image.source),
            color_image,
            egui::TextureOptions::LINEAR,
        ));
        self.source = Some(image.source.clone());
        log::info!(
            "Floor-Plan-Textur hochgeladen: {}x{} ({})",
            size[0],
            size[1],
            image.source
        );
    }

    /// Gibt die Textur frei; der Boden wird wieder als Raster gezeichnet.
    pub fn clear(&mut self) {
        if self.handle.take().is_some() {
            log::debug!("Floor-Plan-Textur freigegeben");
        }
        self.source = None;
    }

    pub fn id(&self) -> Option<egui::TextureId> {
        self.handle.as_ref().map(|h| h.id())
    }
}
