//! Sichtbarkeits-Einstellungen der Raumdarstellung.
//!
//! Gehört dem Host und wird vom Kern nur gelesen. Änderungen aus einem
//! Einstellungs-Panel laufen als `SettingsChanged`-Callback zurück zum Host.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Farbschema der Szene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisionMode {
    #[default]
    Normal,
    Night,
    /// Alternative Palette (farbenblind-freundlich)
    Alternate,
}

impl VisionMode {
    pub const ALL: [VisionMode; 3] = [VisionMode::Normal, VisionMode::Night, VisionMode::Alternate];

    pub fn label(self) -> &'static str {
        match self {
            VisionMode::Normal => "Normal",
            VisionMode::Night => "Nacht",
            VisionMode::Alternate => "Alternativ",
        }
    }
}

/// Schnittebene des Section-Cuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutPlane {
    #[default]
    X,
    Y,
    Z,
}

/// Section-Cut: blendet Geometrie jenseits einer Ebene aus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionCut {
    pub enabled: bool,
    pub plane: CutPlane,
    /// Normalisierte Position der Ebene [0, 1]
    pub position: f32,
}

impl Default for SectionCut {
    fn default() -> Self {
        Self {
            enabled: false,
            plane: CutPlane::X,
            position: 1.0,
        }
    }
}

/// Manuelle Verschiebung und Skalierung einer Etage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorAdjustment {
    pub floor_level: i32,
    #[serde(default)]
    pub offset_x: f32,
    #[serde(default)]
    pub offset_y: f32,
    #[serde(default = "default_floor_scale")]
    pub scale: f32,
}

fn default_floor_scale() -> f32 {
    1.0
}

impl FloorAdjustment {
    /// Offset in Pixeln.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }

    /// Skalierung; ungültige oder nicht-positive Werte werden zu 1.0.
    pub fn effective_scale(&self) -> f32 {
        if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        }
    }
}

/// Standard-Deckkraft der Wände.
pub const DEFAULT_WALL_OPACITY: f32 = 0.3;
/// Standard-Deckkraft der Bodenflächen.
pub const DEFAULT_FLOOR_OPACITY: f32 = 0.6;
/// Standard-Deckkraft der Decken.
pub const DEFAULT_CEILING_OPACITY: f32 = 0.1;
/// Standard-Wandhöhe in Pixeln (Zoom 1).
pub const DEFAULT_WALL_HEIGHT: f32 = 40.0;
/// Standard-Etagenabstand in Pixeln (Zoom 1).
pub const DEFAULT_FLOOR_SPACING: f32 = 120.0;

/// Konfiguration der Raumdarstellung pro Visualisierung.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomVisibilitySettings {
    pub wall_opacity: f32,
    pub floor_opacity: f32,
    pub ceiling_opacity: f32,
    pub wall_height: f32,
    pub floor_spacing: f32,
    /// Sichtbare Etagen-Ebenen; leer = alle
    pub visible_floors: Vec<i32>,
    pub floor_adjustments: Vec<FloorAdjustment>,
    pub section_cut: SectionCut,
    pub vision_mode: VisionMode,
    pub show_labels: bool,
}

impl Default for RoomVisibilitySettings {
    fn default() -> Self {
        Self {
            wall_opacity: DEFAULT_WALL_OPACITY,
            floor_opacity: DEFAULT_FLOOR_OPACITY,
            ceiling_opacity: DEFAULT_CEILING_OPACITY,
            wall_height: DEFAULT_WALL_HEIGHT,
            floor_spacing: DEFAULT_FLOOR_SPACING,
            visible_floors: Vec::new(),
            floor_adjustments: Vec::new(),
            section_cut: SectionCut::default(),
            vision_mode: VisionMode::Normal,
            show_labels: true,
        }
    }
}

impl RoomVisibilitySettings {
    /// Wird die Etage angezeigt? Leere Liste bedeutet „alle“.
    pub fn is_floor_visible(&self, level: i32) -> bool {
        self.visible_floors.is_empty() || self.visible_floors.contains(&level)
    }

    /// Manuelle Anpassung einer Etage, falls konfiguriert.
    pub fn adjustment_for(&self, level: i32) -> Option<&FloorAdjustment> {
        self.floor_adjustments
            .iter()
            .find(|adj| adj.floor_level == level)
    }

    /// Schaltet die Sichtbarkeit einer Etage um.
    ///
    /// `all_levels` wird gebraucht, um von „alle“ (leere Liste) auf eine
    /// explizite Liste zu wechseln.
    pub fn toggle_floor(&mut self, level: i32, all_levels: &[i32]) {
        if self.visible_floors.is_empty() {
            self.visible_floors = all_levels.to_vec();
        }
        if let Some(pos) = self.visible_floors.iter().position(|l| *l == level) {
            self.visible_floors.remove(pos);
        } else {
            self.visible_floors.push(level);
            self.visible_floors.sort_unstable();
        }
        // Alle sichtbar → wieder als leere Liste speichern
        if all_levels.iter().all(|l| self.visible_floors.contains(l)) {
            self.visible_floors.clear();
        }
    }
}
