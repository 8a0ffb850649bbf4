//! Hintergrund-Rasterbild einer Etage.
//!
//! Ein fehlgeschlagener Ladeversuch bricht die Komposition nie ab: der Cache
//! merkt sich das Ergebnis und liefert stattdessen den Grid-Hintergrund.

use std::path::PathBuf;
use std::sync::Arc;

use image::{GenericImageView, RgbaImage};
use indexmap::IndexMap;
use thiserror::Error;

/// Fehler beim Laden eines Etagenplans.
#[derive(Debug, Error)]
pub enum FloorPlanError {
    #[error("Leere Floor-Plan-URL")]
    Empty,
    #[error("Nicht unterstütztes URL-Schema: {0}")]
    UnsupportedScheme(String),
    #[error("Floor-Plan konnte nicht gelesen werden: {path:?}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Dekodiertes Etagenplan-Bild (RGBA8).
#[derive(Debug, Clone)]
pub struct FloorPlanImage {
    /// Ursprüngliche URL (Cache-Schlüssel, Textur-Name)
    pub source: String,
    pub pixels: RgbaImage,
}

impl FloorPlanImage {
    /// Lädt ein Bild von einer lokalen Datei oder `file://`-URL.
    pub fn load(url: &str) -> Result<Self, FloorPlanError> {
        let path = resolve_path(url)?;
        let image = image::open(&path).map_err(|source| FloorPlanError::Decode {
            path: path.clone(),
            source,
        })?;
        let (width, height) = image.dimensions();
        log::info!("Floor-Plan geladen: {} ({}x{})", path.display(), width, height);

        Ok(Self::from_rgba(url, image.to_rgba8()))
    }

    pub fn from_rgba(source: &str, pixels: RgbaImage) -> Self {
        Self {
            source: source.to_string(),
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Seitenverhältnis Breite / Höhe (1.0 bei leerem Bild).
    pub fn aspect(&self) -> f32 {
        if self.height() == 0 || self.width() == 0 {
            1.0
        } else {
            self.width() as f32 / self.height() as f32
        }
    }
}

/// Hintergrund der Etagen-Ebene.
#[derive(Debug, Clone, Default)]
pub enum FloorBackground {
    Image(Arc<FloorPlanImage>),
    /// Fallback ohne (ladbares) Bild
    #[default]
    Grid,
}

impl FloorBackground {
    pub fn image(&self) -> Option<&Arc<FloorPlanImage>> {
        match self {
            FloorBackground::Image(image) => Some(image),
            FloorBackground::Grid => None,
        }
    }
}

/// Ergebnis-Cache pro URL; auch Fehlschläge werden gemerkt.
#[derive(Debug, Default)]
pub struct FloorPlanCache {
    entries: IndexMap<String, FloorBackground>,
}

impl FloorPlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Liefert den Hintergrund für `url`, lädt beim ersten Zugriff.
    pub fn get_or_load(&mut self, url: Option<&str>) -> FloorBackground {
        let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) else {
            return FloorBackground::Grid;
        };
        if let Some(cached) = self.entries.get(url) {
            return cached.clone();
        }

        let background = match FloorPlanImage::load(url) {
            Ok(image) => FloorBackground::Image(Arc::new(image)),
            Err(e) => {
                log::warn!("Floor-Plan '{}' nicht verfügbar, nutze Grid: {:#}", url, anyhow::Error::new(e));
                FloorBackground::Grid
            }
        };
        self.entries.insert(url.to_string(), background.clone());
        background
    }

    /// Vergisst alle Einträge (z.B. nach dem Laden eines neuen Snapshots).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Wandelt eine Floor-Plan-URL in einen lokalen Pfad.
fn resolve_path(url: &str) -> Result<PathBuf, FloorPlanError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(FloorPlanError::Empty);
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Err(FloorPlanError::UnsupportedScheme(trimmed.to_string()));
    }
    let path = trimmed.strip_prefix("file://").unwrap_or(trimmed);
    Ok(PathBuf::from(path))
}
