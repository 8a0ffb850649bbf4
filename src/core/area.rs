//! Area-Hierarchie (Gebäude → Etage → Raum) mit tiefenbegrenzten Ahnen-Abfragen.
//!
//! Die Daten kommen von außen und sind nicht garantiert zyklenfrei.
//! Jede Ahnen-Traversierung bricht nach `MAX_ANCESTOR_DEPTH` Schritten ab
//! und wertet die Beziehung dann als „nicht gefunden“.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::boundary::{resolve_rect, ResolvedRect};
use super::Boundary;

/// Maximale Anzahl Eltern-Schritte bei Ahnen-Traversierungen.
pub const MAX_ANCESTOR_DEPTH: usize = 5;

/// Art einer Area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaType {
    Building,
    Floor,
    Room,
    Zone,
    #[default]
    #[serde(other)]
    Other,
}

/// Eine Area des Gebäudebaums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: u64,
    /// `None` markiert eine Wurzel (Gebäude)
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub area_type: AreaType,
    #[serde(default)]
    pub floor_level: Option<i32>,
    #[serde(default)]
    pub boundary: Option<Boundary>,
    #[serde(default)]
    pub polygon_coords: Option<Vec<[f32; 2]>>,
    #[serde(default)]
    pub name: String,
}

impl Area {
    /// Minimal-Konstruktor für Tests und Demo-Daten.
    pub fn new(id: u64, parent_id: Option<u64>, area_type: AreaType, name: &str) -> Self {
        Self {
            id,
            parent_id,
            area_type,
            floor_level: None,
            boundary: None,
            polygon_coords: None,
            name: name.to_string(),
        }
    }

    /// Setzt die Etagen-Ebene (Builder-Stil).
    pub fn with_floor_level(mut self, level: i32) -> Self {
        self.floor_level = Some(level);
        self
    }

    /// Setzt explizite Grenzen (Builder-Stil).
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = Some(boundary);
        self
    }

    /// Raumgeometrie, falls vorhanden.
    pub fn room_rect(&self) -> Option<ResolvedRect> {
        resolve_rect(self.boundary.as_ref(), self.polygon_coords.as_deref())
    }

    /// Ist die Area ein darstellbarer Raum (kein Gebäude, keine Etage, mit Geometrie)?
    pub fn is_room(&self) -> bool {
        !matches!(self.area_type, AreaType::Building | AreaType::Floor)
            && self.room_rect().is_some()
    }
}

/// Read-only Index über einer Area-Liste (Einfüge-Reihenfolge bleibt erhalten).
#[derive(Debug, Clone)]
pub struct AreaIndex<'a> {
    by_id: IndexMap<u64, &'a Area>,
}

impl<'a> AreaIndex<'a> {
    /// Baut den Index. Doppelte IDs: der erste Eintrag gewinnt.
    pub fn new(areas: &'a [Area]) -> Self {
        let mut by_id = IndexMap::with_capacity(areas.len());
        for area in areas {
            by_id.entry(area.id).or_insert(area);
        }
        Self { by_id }
    }

    pub fn get(&self, id: u64) -> Option<&'a Area> {
        self.by_id.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Area> + '_ {
        self.by_id.values().copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Ahnen-Kette ab `id` (exklusive), höchstens `MAX_ANCESTOR_DEPTH` Einträge.
    pub fn ancestors(&self, id: u64) -> Vec<u64> {
        let mut chain = Vec::with_capacity(MAX_ANCESTOR_DEPTH);
        let mut current = self.get(id).and_then(|a| a.parent_id);
        while let Some(parent) = current {
            if chain.len() >= MAX_ANCESTOR_DEPTH {
                break;
            }
            chain.push(parent);
            current = self.get(parent).and_then(|a| a.parent_id);
        }
        chain
    }

    /// Gehört `id` zu `ancestor` (direkt oder über die Ahnen-Kette)?
    ///
    /// Zyklen und zu tiefe Ketten ergeben deterministisch `false`, solange
    /// `ancestor` nicht innerhalb der Tiefengrenze erreicht wurde.
    pub fn rolls_up_to(&self, id: u64, ancestor: u64) -> bool {
        id == ancestor || self.ancestors(id).contains(&ancestor)
    }

    /// Sucht die Wurzel (Area ohne Parent) oberhalb von `id`.
    ///
    /// `None`, wenn die Kette zyklisch ist, ins Leere zeigt oder die
    /// Tiefengrenze überschreitet.
    pub fn root_of(&self, id: u64) -> Option<u64> {
        let mut current = self.get(id)?;
        for _ in 0..=MAX_ANCESTOR_DEPTH {
            match current.parent_id {
                None => return Some(current.id),
                Some(parent) => current = self.get(parent)?,
            }
        }
        log::debug!("Wurzelsuche für Area {} nach {} Schritten abgebrochen", id, MAX_ANCESTOR_DEPTH);
        None
    }

    /// Erstes Gebäude ohne Parent; ersatzweise die erste Wurzel überhaupt.
    pub fn building_root(&self) -> Option<&'a Area> {
        self.iter()
            .find(|a| a.parent_id.is_none() && a.area_type == AreaType::Building)
            .or_else(|| self.iter().find(|a| a.parent_id.is_none()))
    }

    /// Etagen-Ebene einer Area; fehlt sie, wird die nächste Ebene der Ahnen genommen.
    pub fn effective_floor_level(&self, id: u64) -> Option<i32> {
        let own = self.get(id)?.floor_level;
        own.or_else(|| {
            self.ancestors(id)
                .into_iter()
                .find_map(|ancestor| self.get(ancestor).and_then(|a| a.floor_level))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tower() -> Vec<Area> {
        vec![
            Area::new(1, None, AreaType::Building, "Turm"),
            Area::new(10, Some(1), AreaType::Floor, "EG").with_floor_level(0),
            Area::new(11, Some(1), AreaType::Floor, "1. OG").with_floor_level(1),
            Area::new(100, Some(10), AreaType::Room, "Serverraum")
                .with_boundary(Boundary::new(0.1, 0.3, 0.1, 0.3)),
            Area::new(1000, Some(100), AreaType::Zone, "Rack A"),
        ]
    }

    #[test]
    fn rolls_up_through_ancestor_chain() {
        let areas = tower();
        let index = AreaIndex::new(&areas);

        assert!(index.rolls_up_to(1000, 100));
        assert!(index.rolls_up_to(1000, 10));
        assert!(index.rolls_up_to(1000, 1));
        assert!(index.rolls_up_to(10, 10));
        assert!(!index.rolls_up_to(1000, 11));
    }

    #[test]
    fn cyclic_chain_terminates_without_relationship() {
        let areas = vec![
            Area::new(1, Some(2), AreaType::Floor, "A"),
            Area::new(2, Some(1), AreaType::Floor, "B"),
            Area::new(3, None, AreaType::Building, "C"),
        ];
        let index = AreaIndex::new(&areas);

        assert_eq!(index.ancestors(1).len(), MAX_ANCESTOR_DEPTH);
        assert!(!index.rolls_up_to(1, 3));
        assert_eq!(index.root_of(1), None);
        assert_eq!(index.root_of(2), None);
        // Wiederholte Abfrage liefert dasselbe Ergebnis
        assert_eq!(index.root_of(1), index.root_of(1));
    }

    #[test]
    fn chain_deeper_than_limit_is_not_found() {
        // 0 ← 1 ← 2 ← … ← 7: von 7 bis 0 sind es 7 Schritte
        let areas: Vec<Area> = (0..8)
            .map(|i| Area::new(i, if i == 0 { None } else { Some(i - 1) }, AreaType::Zone, "x"))
            .collect();
        let index = AreaIndex::new(&areas);

        assert!(index.rolls_up_to(7, 2));
        assert!(!index.rolls_up_to(7, 0));
        assert_eq!(index.root_of(7), None);
        assert_eq!(index.root_of(3), Some(0));
    }

    #[test]
    fn building_root_prefers_building_type() {
        let mut areas = tower();
        areas.insert(0, Area::new(99, None, AreaType::Zone, "Parkplatz"));
        let index = AreaIndex::new(&areas);

        assert_eq!(index.building_root().map(|a| a.id), Some(1));
    }

    #[test]
    fn effective_floor_level_inherits_from_ancestors() {
        let areas = tower();
        let index = AreaIndex::new(&areas);

        assert_eq!(index.effective_floor_level(1000), Some(0));
        assert_eq!(index.effective_floor_level(11), Some(1));
        assert_eq!(index.effective_floor_level(1), None);
    }

    #[test]
    fn rooms_need_geometry() {
        let areas = tower();
        assert!(areas[3].is_room());
        assert!(!areas[4].is_room());
        assert!(!areas[1].is_room());
    }

    #[test]
    fn unknown_area_type_deserializes_as_other() {
        let json = r#"{"id": 5, "area_type": "parking_lot", "name": "P1"}"#;
        let area: Area = serde_json::from_str(json).expect("Area muss parsen");
        assert_eq!(area.area_type, AreaType::Other);
        assert_eq!(area.parent_id, None);
    }
}
