//! Achsenparallele Raumgrenzen in normalisierten Etagen-Koordinaten.
//!
//! Auflösungsreihenfolge für die Raumgeometrie eines Sensors oder einer Area:
//! 1. explizite Grenzen `{x_min, x_max, y_min, y_max}`
//! 2. Bounding Box des Polygons
//! 3. keine Geometrie → nur Punkt-Marker

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rechteck in normalisierten Koordinaten ([0, 1] relativ zur Etagen-Ebene).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Boundary {
    /// Die gesamte Etagen-Ebene.
    pub const UNIT: Boundary = Boundary {
        x_min: 0.0,
        x_max: 1.0,
        y_min: 0.0,
        y_max: 1.0,
    };

    /// Erstellt eine Grenze; vertauschte Min/Max-Werte werden sortiert.
    pub fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        Self {
            x_min: x_min.min(x_max),
            x_max: x_min.max(x_max),
            y_min: y_min.min(y_max),
            y_max: y_min.max(y_max),
        }
    }

    /// Rechteck aus zwei beliebigen Eckpunkten.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self::new(a.x, b.x, a.y, b.y)
    }

    /// Bounding Box eines Polygons. Nicht-endliche Punkte werden ignoriert.
    pub fn from_polygon(points: &[[f32; 2]]) -> Option<Self> {
        let mut finite = points
            .iter()
            .filter(|p| p[0].is_finite() && p[1].is_finite());
        let first = finite.next()?;

        let mut rect = Self {
            x_min: first[0],
            x_max: first[0],
            y_min: first[1],
            y_max: first[1],
        };
        for p in finite {
            rect.x_min = rect.x_min.min(p[0]);
            rect.x_max = rect.x_max.max(p[0]);
            rect.y_min = rect.y_min.min(p[1]);
            rect.y_max = rect.y_max.max(p[1]);
        }
        Some(rect)
    }

    /// Alle Werte endlich?
    pub fn is_finite(&self) -> bool {
        self.x_min.is_finite()
            && self.x_max.is_finite()
            && self.y_min.is_finite()
            && self.y_max.is_finite()
    }

    /// Endlich und mit positiver Fläche.
    pub fn is_renderable(&self) -> bool {
        self.is_finite() && self.width() > 0.0 && self.height() > 0.0
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.x_min + self.x_max) * 0.5,
            (self.y_min + self.y_max) * 0.5,
        )
    }

    /// Punkt innerhalb (Ränder inklusive)?
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x_min
            && point.x <= self.x_max
            && point.y >= self.y_min
            && point.y <= self.y_max
    }

    /// Schneidet das Rechteck auf [0, 1]² zu.
    pub fn clamped_to_unit(&self) -> Self {
        Self::new(
            self.x_min.clamp(0.0, 1.0),
            self.x_max.clamp(0.0, 1.0),
            self.y_min.clamp(0.0, 1.0),
            self.y_max.clamp(0.0, 1.0),
        )
    }

    /// Eckpunkt eines Resize-Handles.
    pub fn corner(&self, handle: ResizeHandle) -> Vec2 {
        match handle {
            ResizeHandle::TopLeft => Vec2::new(self.x_min, self.y_min),
            ResizeHandle::TopRight => Vec2::new(self.x_max, self.y_min),
            ResizeHandle::BottomRight => Vec2::new(self.x_max, self.y_max),
            ResizeHandle::BottomLeft => Vec2::new(self.x_min, self.y_max),
        }
    }

    /// Eckpunkte im Uhrzeigersinn ab oben links.
    pub fn corners(&self) -> [Vec2; 4] {
        ResizeHandle::ALL.map(|handle| self.corner(handle))
    }

    /// Verschiebt eine Ecke; die gegenüberliegende bleibt fix.
    pub fn with_corner_moved(&self, handle: ResizeHandle, to: Vec2) -> Self {
        Self::from_corners(self.corner(handle.opposite()), to)
    }
}

/// Eck-Handles zum Ändern der Raumgröße.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 4] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomRight,
        ResizeHandle::BottomLeft,
    ];

    /// Diagonal gegenüberliegendes Handle.
    pub fn opposite(self) -> Self {
        match self {
            ResizeHandle::TopLeft => ResizeHandle::BottomRight,
            ResizeHandle::TopRight => ResizeHandle::BottomLeft,
            ResizeHandle::BottomRight => ResizeHandle::TopLeft,
            ResizeHandle::BottomLeft => ResizeHandle::TopRight,
        }
    }
}

/// Herkunft einer aufgelösten Raumgeometrie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometrySource {
    Explicit,
    Polygon,
}

/// Ergebnis der Geometrie-Auflösung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRect {
    pub rect: Boundary,
    pub source: GeometrySource,
}

/// Löst das Raumrechteck aus expliziten Grenzen oder Polygon auf.
///
/// Explizite Grenzen haben immer Vorrang. Nicht-endliche oder flächenlose
/// Geometrie zählt als nicht vorhanden; `None` bedeutet „nur Marker“.
pub fn resolve_rect(explicit: Option<&Boundary>, polygon: Option<&[[f32; 2]]>) -> Option<ResolvedRect> {
    if let Some(bounds) = explicit {
        let rect = Boundary::new(bounds.x_min, bounds.x_max, bounds.y_min, bounds.y_max);
        if rect.is_renderable() {
            return Some(ResolvedRect {
                rect,
                source: GeometrySource::Explicit,
            });
        }
    }

    polygon
        .and_then(Boundary::from_polygon)
        .filter(Boundary::is_renderable)
        .map(|rect| ResolvedRect {
            rect,
            source: GeometrySource::Polygon,
        })
}
