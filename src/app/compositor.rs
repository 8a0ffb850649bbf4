//! Multi-Floor-Compositor: baut den Etagen-Stapel aus Area-Baum und Sensoren.
//!
//! Ablauf pro Frame:
//! 1. Etagen finden (Floor-Areas des Gebäudes, sonst Etagen-Ebenen der Sensoren)
//! 2. Höhenlage, Offset und Skalierung pro Etage bestimmen
//! 3. Sichtbarkeit und Section-Cut anwenden
//! 4. Räume und Sensoren den Etagen zuordnen
//! 5. Elemente in Zeichenreihenfolge ablegen

use glam::Vec2;
use indexmap::IndexMap;

use crate::core::room_settings::{DEFAULT_FLOOR_SPACING, DEFAULT_WALL_HEIGHT};
use crate::core::status::status_of;
use crate::core::{
    room_opacity, Area, AreaIndex, AreaType, Boundary, CutPlane, LayerPlacement,
    RoomVisibilitySettings, SectionCut, Sensor, StatusPalette,
};
use crate::shared::{FloorLayer, FloorStack, LayerElement};

/// Vorläufige Positionen und Grenzen, die die Host-Daten überlagern.
///
/// Enthält sowohl die Live-Vorschau einer laufenden Geste als auch bereits
/// gemeldete, vom Host noch nicht bestätigte Änderungen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneOverrides {
    positions: IndexMap<u64, Vec2>,
    boundaries: IndexMap<u64, Boundary>,
}

impl SceneOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_position(&mut self, sensor_id: u64, position: Vec2) {
        self.positions.insert(sensor_id, position);
    }

    pub fn set_boundary(&mut self, sensor_id: u64, boundary: Boundary) {
        self.boundaries.insert(sensor_id, boundary);
    }

    pub fn position_of(&self, sensor_id: u64) -> Option<Vec2> {
        self.positions.get(&sensor_id).copied()
    }

    pub fn boundary_of(&self, sensor_id: u64) -> Option<Boundary> {
        self.boundaries.get(&sensor_id).copied()
    }

    /// Entfernt alle Überlagerungen eines Sensors.
    pub fn forget_sensor(&mut self, sensor_id: u64) {
        self.positions.shift_remove(&sensor_id);
        self.boundaries.shift_remove(&sensor_id);
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.boundaries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.boundaries.is_empty()
    }

    /// Kombiniert zwei Überlagerungen; `other` gewinnt bei Konflikten.
    pub fn merged_with(&self, other: &SceneOverrides) -> SceneOverrides {
        let mut merged = self.clone();
        merged.positions.extend(other.positions.iter().map(|(k, v)| (*k, *v)));
        merged.boundaries.extend(other.boundaries.iter().map(|(k, v)| (*k, *v)));
        merged
    }
}

/// Eine gefundene Etage vor der Sichtbarkeitsprüfung.
#[derive(Debug, Clone, PartialEq)]
struct FloorSlot {
    level: i32,
    area_id: Option<u64>,
    name: String,
}

/// Baut den Etagen-Stapel eines Frames.
pub fn compose(
    sensors: &[Sensor],
    areas: &[Area],
    settings: &RoomVisibilitySettings,
    overrides: &SceneOverrides,
) -> FloorStack {
    let index = AreaIndex::new(areas);
    let floors = discover_floors(&index, sensors);
    let total = floors.len();
    let palette = StatusPalette::for_mode(settings.vision_mode);
    let cut = &settings.section_cut;

    let mut architecture: Vec<Vec<LayerElement>> = vec![Vec::new(); total];
    let mut sensor_rooms: Vec<Vec<LayerElement>> = vec![Vec::new(); total];
    let mut markers: Vec<Vec<LayerElement>> = vec![Vec::new(); total];

    for area in index.iter().filter(|a| a.is_room()) {
        let Some(slot) = slot_for(&index, &floors, Some(area.id), area.floor_level) else {
            log::debug!("Raum {} keiner Etage zuordenbar", area.id);
            continue;
        };
        let Some(rect) = area.room_rect().and_then(|r| cut_rect(cut, r.rect)) else {
            continue;
        };
        architecture[slot].push(LayerElement::ArchitecturalRoom {
            area_id: area.id,
            name: area.name.clone(),
            rect,
        });
    }

    for sensor in sensors {
        let Some(slot) = slot_for(&index, &floors, sensor.area_id, sensor.floor_level) else {
            log::debug!("Sensor {} keiner Etage zuordenbar", sensor.id);
            continue;
        };
        let status = status_of(sensor.telemetry.as_ref());
        let color = palette.color(status);
        let value = sensor.telemetry.map(|t| t.val);

        let room = overrides
            .boundary_of(sensor.id)
            .filter(Boundary::is_renderable)
            .or_else(|| sensor.room_rect().map(|r| r.rect));

        match room {
            Some(rect) => {
                let Some(rect) = cut_rect(cut, rect) else {
                    continue;
                };
                sensor_rooms[slot].push(LayerElement::SensorRoom {
                    sensor_id: sensor.id,
                    area_id: sensor.area_id,
                    rect,
                    status,
                    opacity: room_opacity(
                        settings.wall_opacity,
                        sensor.parameter(),
                        sensor.telemetry.as_ref(),
                    ),
                    color,
                    label: sensor.display_name(),
                    value,
                });
            }
            None => {
                let position = overrides
                    .position_of(sensor.id)
                    .unwrap_or_else(|| sensor.position());
                if !position.is_finite() || !keeps_point(cut, position) {
                    continue;
                }
                markers[slot].push(LayerElement::Marker {
                    sensor_id: sensor.id,
                    area_id: sensor.area_id,
                    position,
                    elevation: sensor.elevation(),
                    status,
                    color,
                    label: sensor.display_name(),
                    value,
                });
            }
        }
    }

    let mut layers = Vec::with_capacity(total);
    let all_levels: Vec<i32> = floors.iter().map(|f| f.level).collect();

    for (i, ((floor, arch), (rooms, marks))) in floors
        .into_iter()
        .zip(architecture)
        .zip(sensor_rooms.into_iter().zip(markers))
        .enumerate()
    {
        if !settings.is_floor_visible(floor.level) || !keeps_layer(cut, i, total) {
            continue;
        }
        let mut elements = Vec::with_capacity(1 + arch.len() + rooms.len() + marks.len());
        elements.push(LayerElement::BasePlane);
        elements.extend(arch);
        elements.extend(rooms);
        elements.extend(marks);

        layers.push(FloorLayer {
            index: i,
            level: floor.level,
            area_id: floor.area_id,
            placement: placement_for(i, total, floor.level, settings),
            name: floor.name,
            elements,
        });
    }

    FloorStack {
        layers,
        total_layers: total,
        all_levels,
    }
}

/// Kleinster Architektur-Raum unter `point`, sonst die Etagen-Area.
pub fn area_at(layer: &FloorLayer, point: Vec2) -> Option<u64> {
    layer
        .elements
        .iter()
        .filter_map(|e| match e {
            LayerElement::ArchitecturalRoom { area_id, rect, .. } if rect.contains(point) => {
                Some((*area_id, rect.width() * rect.height()))
            }
            _ => None,
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
        .or(layer.area_id)
}

/// Höhenlage, Offset und Skalierung einer Etage.
pub fn placement_for(
    index: usize,
    total: usize,
    level: i32,
    settings: &RoomVisibilitySettings,
) -> LayerPlacement {
    let spacing = finite_or(settings.floor_spacing, DEFAULT_FLOOR_SPACING);
    let elevation = index as f32 * spacing - spacing * total as f32 / 2.0;
    let adjustment = settings.adjustment_for(level);

    LayerPlacement {
        elevation,
        offset: adjustment.map_or(Vec2::ZERO, |a| a.offset()),
        scale: adjustment.map_or(1.0, |a| a.effective_scale()),
        wall_height: finite_or(settings.wall_height, DEFAULT_WALL_HEIGHT),
    }
}

// ── Etagen-Erkennung ────────────────────────────────────────────────

fn discover_floors(index: &AreaIndex, sensors: &[Sensor]) -> Vec<FloorSlot> {
    let root = index.building_root();
    let building = root.map(|b| b.id);
    // Etagen anderer Gebäude gehören nicht in diesen Stapel
    let in_building = |id: u64| match root {
        Some(b) if b.area_type == AreaType::Building => index.root_of(id) == Some(b.id),
        _ => true,
    };
    let mut floors: Vec<FloorSlot> = index
        .iter()
        .filter(|a| {
            (a.area_type == AreaType::Floor && in_building(a.id))
                || (building.is_some()
                    && a.parent_id == building
                    && a.area_type != AreaType::Building
                    && !a.is_room())
        })
        .enumerate()
        .map(|(ordinal, a)| FloorSlot {
            level: index
                .effective_floor_level(a.id)
                .unwrap_or(ordinal as i32),
            area_id: Some(a.id),
            name: a.name.clone(),
        })
        .collect();

    if floors.is_empty() {
        let mut levels: Vec<i32> = sensors
            .iter()
            .map(|s| {
                s.floor_level
                    .or_else(|| s.area_id.and_then(|a| index.effective_floor_level(a)))
                    .unwrap_or(0)
            })
            .collect();
        levels.sort_unstable();
        levels.dedup();
        if levels.is_empty() {
            levels.push(0);
        }
        floors = levels
            .into_iter()
            .map(|level| FloorSlot {
                level,
                area_id: None,
                name: format!("Etage {}", level),
            })
            .collect();
    }

    floors.sort_by_key(|f| f.level);
    floors
}

/// Etage eines Raums oder Sensors: erst über die Area-Kette, dann über die Ebene.
fn slot_for(
    index: &AreaIndex,
    floors: &[FloorSlot],
    area_id: Option<u64>,
    floor_level: Option<i32>,
) -> Option<usize> {
    if let Some(area_id) = area_id {
        let by_area = floors.iter().position(|f| {
            f.area_id
                .is_some_and(|floor_area| index.rolls_up_to(area_id, floor_area))
        });
        if by_area.is_some() {
            return by_area;
        }
    }
    let level = floor_level
        .or_else(|| area_id.and_then(|a| index.effective_floor_level(a)))
        .unwrap_or(0);
    floors.iter().position(|f| f.level == level)
}

// ── Section-Cut ─────────────────────────────────────────────────────

fn cut_position(cut: &SectionCut) -> f32 {
    if cut.position.is_finite() {
        cut.position.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Beschneidet ein Rechteck an der Schnittebene; `None` wenn nichts übrig bleibt.
fn cut_rect(cut: &SectionCut, rect: Boundary) -> Option<Boundary> {
    if !cut.enabled {
        return Some(rect);
    }
    let p = cut_position(cut);
    let clipped = match cut.plane {
        CutPlane::X => Boundary {
            x_max: rect.x_max.min(p),
            ..rect
        },
        CutPlane::Y => Boundary {
            y_max: rect.y_max.min(p),
            ..rect
        },
        CutPlane::Z => rect,
    };
    clipped.is_renderable().then_some(clipped)
}

fn keeps_point(cut: &SectionCut, point: Vec2) -> bool {
    if !cut.enabled {
        return true;
    }
    let p = cut_position(cut);
    match cut.plane {
        CutPlane::X => point.x <= p,
        CutPlane::Y => point.y <= p,
        CutPlane::Z => true,
    }
}

fn keeps_layer(cut: &SectionCut, index: usize, total: usize) -> bool {
    if !cut.enabled || cut.plane != CutPlane::Z || total == 0 {
        return true;
    }
    (index as f32 + 0.5) / total as f32 <= cut_position(cut)
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SensorStatus;
    use approx::assert_relative_eq;

    fn building() -> Vec<Area> {
        vec![
            Area::new(1, None, AreaType::Building, "HQ"),
            Area::new(12, Some(1), AreaType::Floor, "OG").with_floor_level(1),
            Area::new(11, Some(1), AreaType::Floor, "EG").with_floor_level(0),
            Area::new(110, Some(11), AreaType::Room, "Lager")
                .with_boundary(Boundary::new(0.0, 0.5, 0.0, 0.5)),
            Area::new(111, Some(110), AreaType::Room, "Kühlzelle")
                .with_boundary(Boundary::new(0.1, 0.2, 0.1, 0.2)),
        ]
    }

    #[test]
    fn floors_sorted_by_level_with_centered_elevation() {
        let stack = compose(&[], &building(), &RoomVisibilitySettings::default(), &SceneOverrides::new());

        assert_eq!(stack.all_levels, vec![0, 1]);
        assert_eq!(stack.layers[0].area_id, Some(11));
        assert_relative_eq!(stack.layers[0].placement.elevation, -DEFAULT_FLOOR_SPACING);
        assert_relative_eq!(stack.layers[1].placement.elevation, 0.0);
    }

    #[test]
    fn elements_follow_paint_order() {
        let sensors = vec![
            Sensor::new(1, 0.8, 0.8, "temperature").with_area(11),
            Sensor::new(2, 0.3, 0.3, "co2")
                .with_area(110)
                .with_boundary(Boundary::new(0.25, 0.45, 0.25, 0.45))
                .with_telemetry(1200.0, 1000.0),
        ];
        let stack = compose(&sensors, &building(), &RoomVisibilitySettings::default(), &SceneOverrides::new());
        let ground = stack.layer_for_level(0).unwrap();

        let ranks: Vec<u8> = ground.elements.iter().map(LayerElement::paint_rank).collect();
        assert_eq!(ranks, vec![0, 1, 1, 2, 3]);
        assert!(matches!(
            ground.elements[3],
            LayerElement::SensorRoom { status: SensorStatus::Critical, .. }
        ));
        assert!(stack.layer_for_level(1).unwrap().sensor_ids().next().is_none());
    }

    #[test]
    fn fallback_floors_come_from_sensor_levels() {
        let sensors = vec![
            Sensor::new(1, 0.5, 0.5, "temperature").with_floor_level(2),
            Sensor::new(2, 0.5, 0.5, "temperature"),
            Sensor::new(3, 0.5, 0.5, "temperature").with_floor_level(2),
        ];
        let stack = compose(&sensors, &[], &RoomVisibilitySettings::default(), &SceneOverrides::new());

        assert_eq!(stack.all_levels, vec![0, 2]);
        assert!(stack.layer_for_level(0).unwrap().contains_sensor(2));
        assert_eq!(stack.layer_for_level(2).unwrap().sensor_ids().count(), 2);
    }

    #[test]
    fn empty_input_still_has_one_base_plane() {
        let stack = compose(&[], &[], &RoomVisibilitySettings::default(), &SceneOverrides::new());
        assert_eq!(stack.layers.len(), 1);
        assert_eq!(stack.layers[0].elements, vec![LayerElement::BasePlane]);
    }

    #[test]
    fn cyclic_areas_do_not_hang() {
        let areas = vec![
            Area::new(1, Some(2), AreaType::Floor, "A").with_floor_level(0),
            Area::new(2, Some(1), AreaType::Room, "B").with_boundary(Boundary::new(0.1, 0.2, 0.1, 0.2)),
        ];
        let sensors = vec![Sensor::new(7, 0.5, 0.5, "humidity").with_area(2)];
        let stack = compose(&sensors, &areas, &RoomVisibilitySettings::default(), &SceneOverrides::new());

        assert_eq!(stack.total_layers, 1);
        assert!(stack.layers[0].contains_sensor(7));
    }

    #[test]
    fn floors_of_other_buildings_stay_out_of_the_stack() {
        let mut areas = building();
        areas.extend([
            Area::new(2, None, AreaType::Building, "Lagerhalle"),
            Area::new(20, Some(2), AreaType::Floor, "Halle EG").with_floor_level(0),
            Area::new(21, Some(2), AreaType::Floor, "Halle OG").with_floor_level(1),
            Area::new(22, Some(2), AreaType::Floor, "Halle DG").with_floor_level(2),
        ]);
        let stack = compose(&[], &areas, &RoomVisibilitySettings::default(), &SceneOverrides::new());

        assert_eq!(stack.total_layers, 2);
        assert_eq!(stack.all_levels, vec![0, 1]);
        let floor_ids: Vec<Option<u64>> = stack.layers.iter().map(|l| l.area_id).collect();
        assert_eq!(floor_ids, vec![Some(11), Some(12)]);
    }

    #[test]
    fn overrides_replace_position_and_boundary() {
        let sensors = vec![Sensor::new(1, 0.1, 0.1, "temperature").with_area(11)];
        let mut overrides = SceneOverrides::new();
        overrides.set_position(1, Vec2::new(0.7, 0.6));

        let stack = compose(&sensors, &building(), &RoomVisibilitySettings::default(), &overrides);
        let marker = stack.layer_of_sensor(1).unwrap().elements.last().unwrap().clone();
        assert!(matches!(marker, LayerElement::Marker { position, .. } if position == Vec2::new(0.7, 0.6)));

        overrides.set_boundary(1, Boundary::new(0.6, 0.8, 0.5, 0.7));
        let stack = compose(&sensors, &building(), &RoomVisibilitySettings::default(), &overrides);
        assert!(stack.sensor_has_room(1));
    }

    #[test]
    fn section_cut_clips_rooms_and_drops_markers() {
        let sensors = vec![
            Sensor::new(1, 0.9, 0.1, "temperature").with_area(11),
            Sensor::new(2, 0.2, 0.1, "temperature").with_area(11),
        ];
        let mut settings = RoomVisibilitySettings::default();
        settings.section_cut = SectionCut {
            enabled: true,
            plane: CutPlane::X,
            position: 0.3,
        };

        let stack = compose(&sensors, &building(), &settings, &SceneOverrides::new());
        let ground = stack.layer_for_level(0).unwrap();
        assert!(!ground.contains_sensor(1));
        assert!(ground.contains_sensor(2));
        let lager = ground
            .elements
            .iter()
            .find_map(|e| match e {
                LayerElement::ArchitecturalRoom { area_id: 110, rect, .. } => Some(*rect),
                _ => None,
            })
            .unwrap();
        assert_relative_eq!(lager.x_max, 0.3);
    }

    #[test]
    fn z_cut_hides_upper_floors() {
        let mut settings = RoomVisibilitySettings::default();
        settings.section_cut = SectionCut {
            enabled: true,
            plane: CutPlane::Z,
            position: 0.5,
        };
        let stack = compose(&[], &building(), &settings, &SceneOverrides::new());

        assert_eq!(stack.layers.len(), 1);
        assert_eq!(stack.layers[0].level, 0);
        assert_eq!(stack.total_layers, 2);
    }

    #[test]
    fn area_at_prefers_smallest_room() {
        let stack = compose(&[], &building(), &RoomVisibilitySettings::default(), &SceneOverrides::new());
        let ground = stack.layer_for_level(0).unwrap();

        assert_eq!(area_at(ground, Vec2::new(0.15, 0.15)), Some(111));
        assert_eq!(area_at(ground, Vec2::new(0.4, 0.4)), Some(110));
        assert_eq!(area_at(ground, Vec2::new(0.9, 0.9)), Some(11));
    }

    #[test]
    fn floor_adjustment_moves_layer() {
        let mut settings = RoomVisibilitySettings::default();
        settings.floor_adjustments.push(crate::core::FloorAdjustment {
            floor_level: 1,
            offset_x: 20.0,
            offset_y: -5.0,
            scale: 0.5,
        });
        let stack = compose(&[], &building(), &settings, &SceneOverrides::new());
        let upper = stack.layer_for_level(1).unwrap();

        assert_eq!(upper.placement.offset, Vec2::new(20.0, -5.0));
        assert_eq!(upper.placement.scale, 0.5);
    }
}
