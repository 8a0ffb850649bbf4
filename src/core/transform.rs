//! Affine 2.5D-Transformation zwischen Etagen-Ebene und Bildschirm.
//!
//! Pro Frame wird aus dem Kamera-Zustand genau eine View-Matrix gebaut:
//!
//! ```text
//! T(Container-Mitte) · T(Pan) · R_y · R_x · S(Zoom) · Local(Etage)
//! ```
//!
//! `Local` bildet normalisierte Etagen-Koordinaten `(u, v, e)` auf Pixel der
//! Etagen-Ebene ab (`e` = Höhe in Wandhöhen) und enthält Skalierung, Offset und
//! Höhenlage der Etage. Vorwärts-Projektion (Rendering) und Rückprojektion
//! (Zeiger → Etage) lesen beide dieselbe Matrix.

use glam::{Mat2, Mat4, Vec2, Vec3};

use super::camera::CameraState;
use super::Boundary;

/// Unterhalb dieses Werts gilt die Etagen-Ebene als hochkant zur Ansicht.
const MIN_PLANE_FACING: f32 = 1e-3;

/// Bildschirm-Rechteck des Viewports in Pixeln.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerRect {
    /// Linke obere Ecke
    pub min: Vec2,
    /// Breite und Höhe
    pub size: Vec2,
}

impl ContainerRect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Container mit Ursprung (0, 0).
    pub fn from_size(size: Vec2) -> Self {
        Self::new(Vec2::ZERO, size)
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Keine Fläche oder ungültige Werte.
    pub fn is_degenerate(&self) -> bool {
        !(self.min.is_finite() && self.size.is_finite() && self.size.x > 0.0 && self.size.y > 0.0)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.min + self.size;
        point.x >= self.min.x && point.x <= max.x && point.y >= self.min.y && point.y <= max.y
    }

    /// Zeigerposition relativ zur Container-Mitte (für Zoom-zum-Cursor).
    pub fn offset_from_center(&self, screen: Vec2) -> Vec2 {
        screen - self.center()
    }
}

/// Lage einer Etage innerhalb des Etagen-Stapels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerPlacement {
    /// Höhenlage in Pixeln (Zoom 1)
    pub elevation: f32,
    /// Manuelle Verschiebung in Pixeln
    pub offset: Vec2,
    /// Manuelle Skalierung der Etagen-Ebene
    pub scale: f32,
    /// Wandhöhe in Pixeln (Skala der `e`-Koordinate)
    pub wall_height: f32,
}

impl LayerPlacement {
    /// Einzelne Etage ohne Versatz.
    pub fn flat(wall_height: f32) -> Self {
        Self {
            elevation: 0.0,
            offset: Vec2::ZERO,
            scale: 1.0,
            wall_height,
        }
    }
}

impl Default for LayerPlacement {
    fn default() -> Self {
        Self::flat(crate::core::room_settings::DEFAULT_WALL_HEIGHT)
    }
}

/// View-Transformation eines Frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneTransform {
    view: Mat4,
    plane_size: Vec2,
    container: ContainerRect,
}

impl SceneTransform {
    /// Baut die View-Matrix. `None` bei Container ohne Fläche.
    ///
    /// `plane_fill` ist der Anteil des Containers, den die Etagen-Ebene bei
    /// Zoom 1 einnimmt, `plane_aspect` ihr Seitenverhältnis (Breite / Höhe).
    pub fn new(
        camera: &CameraState,
        container: ContainerRect,
        plane_fill: f32,
        plane_aspect: f32,
    ) -> Option<Self> {
        if container.is_degenerate() {
            return None;
        }
        let fill = positive_or(plane_fill, 0.8);
        let aspect = positive_or(plane_aspect, 1.0);
        let width = container.size.x.min(container.size.y * aspect) * fill;
        let plane_size = Vec2::new(width, width / aspect);

        let center = container.center();
        let view = Mat4::from_translation(center.extend(0.0))
            * Mat4::from_translation(camera.pan.extend(0.0))
            * Mat4::from_rotation_y(camera.rotation.y.to_radians())
            * Mat4::from_rotation_x(camera.rotation.x.to_radians())
            * Mat4::from_scale(Vec3::splat(camera.zoom));

        Some(Self {
            view,
            plane_size,
            container,
        })
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Größe der Etagen-Ebene in Pixeln bei Zoom 1.
    pub fn plane_size(&self) -> Vec2 {
        self.plane_size
    }

    pub fn container(&self) -> ContainerRect {
        self.container
    }

    /// Lokale Matrix einer Etage: normalisiert `(u, v, e)` → Ebenen-Pixel.
    pub fn local_matrix(&self, placement: &LayerPlacement) -> Mat4 {
        let scale = positive_or(placement.scale, 1.0);
        Mat4::from_translation(placement.offset.extend(placement.elevation))
            * Mat4::from_scale(Vec3::new(scale, scale, 1.0))
            * Mat4::from_translation(Vec3::new(
                -0.5 * self.plane_size.x,
                -0.5 * self.plane_size.y,
                0.0,
            ))
            * Mat4::from_scale(Vec3::new(
                self.plane_size.x,
                self.plane_size.y,
                placement.wall_height,
            ))
    }

    /// Gesamtmatrix einer Etage (View · Local).
    pub fn layer_matrix(&self, placement: &LayerPlacement) -> Mat4 {
        self.view * self.local_matrix(placement)
    }

    /// Etagen-Punkt auf Bodenhöhe → Bildschirm.
    pub fn to_screen(&self, placement: &LayerPlacement, floor: Vec2) -> Vec2 {
        self.to_screen_at_height(placement, floor, 0.0)
    }

    /// Etagen-Punkt in `height` Wandhöhen über dem Boden → Bildschirm.
    pub fn to_screen_at_height(&self, placement: &LayerPlacement, floor: Vec2, height: f32) -> Vec2 {
        self.layer_matrix(placement)
            .transform_point3(Vec3::new(floor.x, floor.y, height))
            .truncate()
    }

    /// Bildschirm → Etagen-Punkt auf Bodenhöhe (exakte Inverse von `to_screen`).
    ///
    /// `None`, wenn die Ebene nahezu hochkant zur Ansicht steht.
    pub fn to_floor(&self, placement: &LayerPlacement, screen: Vec2) -> Option<Vec2> {
        if !screen.is_finite() {
            return None;
        }
        let m = self.layer_matrix(placement);
        let axis_u = m.x_axis.truncate();
        let axis_v = m.y_axis.truncate();
        let origin = m.w_axis.truncate().truncate();

        let u2 = axis_u.truncate();
        let v2 = axis_v.truncate();
        // Flächenverhältnis Projektion / Original = Kosinus zwischen Ebenen-Normale und Blickrichtung
        let facing = u2.perp_dot(v2) / (axis_u.length() * axis_v.length());
        if !facing.is_finite() || facing.abs() < MIN_PLANE_FACING {
            return None;
        }

        let floor = Mat2::from_cols(u2, v2).inverse() * (screen - origin);
        floor.is_finite().then_some(floor)
    }

    /// Bildschirm-Eckpunkte eines Rechtecks in `height` Wandhöhen.
    pub fn rect_quad(&self, placement: &LayerPlacement, rect: &Boundary, height: f32) -> [Vec2; 4] {
        let m = self.layer_matrix(placement);
        rect.corners()
            .map(|c| m.transform_point3(Vec3::new(c.x, c.y, height)).truncate())
    }

    /// Vier Wand-Vierecke eines Raums vom Boden bis `height`.
    pub fn wall_quads(&self, placement: &LayerPlacement, rect: &Boundary, height: f32) -> [[Vec2; 4]; 4] {
        let bottom = self.rect_quad(placement, rect, 0.0);
        let top = self.rect_quad(placement, rect, height);
        std::array::from_fn(|i| {
            let j = (i + 1) % 4;
            [bottom[i], bottom[j], top[j], top[i]]
        })
    }

    /// Pixel pro normalisierter Einheit auf einer Etage (für Pick-Radien).
    pub fn floor_pixels_per_unit(&self, placement: &LayerPlacement) -> f32 {
        let m = self.layer_matrix(placement);
        m.x_axis.truncate().length().max(m.y_axis.truncate().length())
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::Rotation;
    use approx::assert_relative_eq;

    fn container() -> ContainerRect {
        ContainerRect::new(Vec2::new(100.0, 50.0), Vec2::new(800.0, 600.0))
    }

    #[test]
    fn center_of_container_maps_to_plane_center() {
        let transform = SceneTransform::new(&CameraState::new(), container(), 0.8, 1.5).unwrap();
        let floor = transform
            .to_floor(&LayerPlacement::default(), container().center())
            .unwrap();
        assert_relative_eq!(floor.x, 0.5, epsilon = 1e-5);
        assert_relative_eq!(floor.y, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn roundtrip_with_rotation_zoom_and_layer_offset() {
        let camera = CameraState {
            rotation: Rotation::new(35.0, 20.0),
            zoom: 1.7,
            pan: Vec2::new(-40.0, 25.0),
        };
        let transform = SceneTransform::new(&camera, container(), 0.8, 1.5).unwrap();
        let placement = LayerPlacement {
            elevation: 60.0,
            offset: Vec2::new(15.0, -8.0),
            scale: 0.9,
            wall_height: 40.0,
        };

        for screen in [Vec2::new(200.0, 120.0), Vec2::new(500.0, 350.0), Vec2::new(830.0, 600.0)] {
            let floor = transform.to_floor(&placement, screen).unwrap();
            let back = transform.to_screen(&placement, floor);
            assert_relative_eq!(back.x, screen.x, epsilon = 1e-2);
            assert_relative_eq!(back.y, screen.y, epsilon = 1e-2);
        }
    }

    #[test]
    fn degenerate_container_has_no_transform() {
        let empty = ContainerRect::from_size(Vec2::new(0.0, 400.0));
        assert!(SceneTransform::new(&CameraState::new(), empty, 0.8, 1.5).is_none());
    }

    #[test]
    fn edge_on_plane_cannot_be_projected() {
        for rotation in [Rotation::new(90.0, 0.0), Rotation::new(0.0, 90.0), Rotation::new(-90.0, 45.0)] {
            let camera = CameraState {
                rotation,
                ..CameraState::new()
            };
            let transform = SceneTransform::new(&camera, container(), 0.8, 1.5).unwrap();
            assert!(transform
                .to_floor(&LayerPlacement::default(), container().center())
                .is_none());
        }
    }

    #[test]
    fn elevation_lifts_points_upwards_when_tilted() {
        let camera = CameraState {
            rotation: Rotation::new(60.0, 0.0),
            ..CameraState::new()
        };
        let transform = SceneTransform::new(&camera, container(), 0.8, 1.5).unwrap();
        let placement = LayerPlacement::default();

        let floor = transform.to_screen_at_height(&placement, Vec2::splat(0.5), 0.0);
        let ceiling = transform.to_screen_at_height(&placement, Vec2::splat(0.5), 1.0);
        assert!(ceiling.y < floor.y);
    }

    #[test]
    fn wall_quads_share_floor_corners() {
        let transform = SceneTransform::new(&CameraState::new(), container(), 0.8, 1.5).unwrap();
        let placement = LayerPlacement::default();
        let rect = Boundary::new(0.2, 0.4, 0.2, 0.6);

        let floor = transform.rect_quad(&placement, &rect, 0.0);
        let walls = transform.wall_quads(&placement, &rect, 1.0);
        for (i, wall) in walls.iter().enumerate() {
            assert_eq!(wall[0], floor[i]);
            assert_eq!(wall[1], floor[(i + 1) % 4]);
        }
    }
}
