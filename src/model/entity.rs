//! Ingestion: plant records resolved once into a closed set of entity kinds.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use super::diagnostic::{Dropped, DropReason, Section};
use super::plant::{BuildingRecord, Metadata, MiscRecord, PlantData, Position, StructureRecord};
use crate::geometry::{self, BoxSize, SiloFootprint};

/// `type` value that turns a structure into a silo.
pub const SILO_TYPE: &str = "silo";
/// `type` value that turns a misc item into a marker.
pub const MARKER_TYPE: &str = "marker";

/// Entity category, one per visibility toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Building,
    Equipment,
    Silo,
    Marker,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Building,
        Category::Equipment,
        Category::Silo,
        Category::Marker,
    ];

    /// Plural label used for toggles and summaries.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Building => "buildings",
            Self::Equipment => "equipment",
            Self::Silo => "silos",
            Self::Marker => "markers",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts singular or plural names, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "building" | "buildings" => Ok(Self::Building),
            "equipment" => Ok(Self::Equipment),
            "silo" | "silos" => Ok(Self::Silo),
            "marker" | "markers" => Ok(Self::Marker),
            other => Err(format!(
                "unknown category \"{other}\" (expected buildings, equipment, silos or markers)"
            )),
        }
    }
}

/// Fields every entity kind carries.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub color: Option<String>,
}

/// A plant entity with its kind and geometry already resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Building {
        common: EntityCommon,
        size: BoxSize,
    },
    Equipment {
        common: EntityCommon,
        /// Free-form `type` string from the record, if any.
        kind: Option<String>,
        size: BoxSize,
    },
    Silo {
        common: EntityCommon,
        footprint: SiloFootprint,
    },
    Marker {
        common: EntityCommon,
    },
}

impl Entity {
    /// Resolves a building record.
    ///
    /// # Errors
    ///
    /// Returns the drop reason when a box dimension is missing.
    pub fn from_building(record: &BuildingRecord) -> Result<Self, DropReason> {
        let dims = record.dimensions.unwrap_or_default();
        let size = geometry::building_size(&dims)?;
        Ok(Self::Building {
            common: EntityCommon {
                id: record.id.clone(),
                name: record.name.clone(),
                position: record.position,
                color: record.color.clone(),
            },
            size,
        })
    }

    /// Resolves a structure record into a silo or a piece of equipment.
    ///
    /// # Errors
    ///
    /// Returns [`DropReason::NoSiloFootprint`] for a silo that fails the
    /// inclusion rule. Equipment never fails.
    pub fn from_structure(record: &StructureRecord) -> Result<Self, DropReason> {
        let dims = record.dimensions.unwrap_or_default();
        let common = EntityCommon {
            id: record.id.clone(),
            name: record.name.clone(),
            position: record.position,
            color: record.color.clone(),
        };
        if record.kind == SILO_TYPE {
            let footprint = geometry::silo_footprint(&dims).ok_or(DropReason::NoSiloFootprint)?;
            return Ok(Self::Silo { common, footprint });
        }
        Ok(Self::Equipment {
            common,
            kind: Some(record.kind.clone()).filter(|k| !k.is_empty()),
            size: geometry::equipment_size(&dims),
        })
    }

    /// Resolves a misc record into a marker or a piece of equipment.
    pub fn from_misc(record: &MiscRecord) -> Self {
        let common = EntityCommon {
            id: record.id.clone(),
            name: record.name.clone(),
            position: record.position,
            color: record.color.clone(),
        };
        if record.kind.as_deref() == Some(MARKER_TYPE) {
            return Self::Marker { common };
        }
        Self::Equipment {
            common,
            kind: record.kind.clone(),
            size: geometry::equipment_size(&record.dimensions.unwrap_or_default()),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Building { .. } => Category::Building,
            Self::Equipment { .. } => Category::Equipment,
            Self::Silo { .. } => Category::Silo,
            Self::Marker { .. } => Category::Marker,
        }
    }

    pub fn common(&self) -> &EntityCommon {
        match self {
            Self::Building { common, .. }
            | Self::Equipment { common, .. }
            | Self::Silo { common, .. }
            | Self::Marker { common } => common,
        }
    }
}

/// A plant after ingestion: entities in document order plus what was left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestedPlant {
    pub metadata: Option<Metadata>,
    /// Buildings, then structures, then misc items, each in array order.
    pub entities: Vec<Entity>,
    pub dropped: Vec<Dropped>,
}

impl IngestedPlant {
    /// Resolves every record of `data` into an [`Entity`].
    pub fn ingest(data: &PlantData) -> Self {
        let mut entities =
            Vec::with_capacity(data.buildings.len() + data.structures.len() + data.misc.len());
        let mut dropped = Vec::new();

        for (index, record) in data.buildings.iter().enumerate() {
            match Entity::from_building(record) {
                Ok(entity) => entities.push(entity),
                Err(reason) => dropped.push(Dropped::entry(
                    Section::Buildings,
                    index,
                    Some(record.id.clone()),
                    reason,
                )),
            }
        }
        for (index, record) in data.structures.iter().enumerate() {
            match Entity::from_structure(record) {
                Ok(entity) => entities.push(entity),
                Err(reason) => dropped.push(Dropped::entry(
                    Section::Structures,
                    index,
                    Some(record.id.clone()),
                    reason,
                )),
            }
        }
        entities.extend(data.misc.iter().map(Entity::from_misc));

        Self {
            metadata: data.metadata.clone(),
            entities,
            dropped,
        }
    }

    /// Parses and ingests a JSON value, collecting notes from both steps.
    pub fn from_value(value: &Value) -> Self {
        let (data, mut dropped) = PlantData::from_value(value);
        let mut plant = Self::ingest(&data);
        dropped.append(&mut plant.dropped);
        for note in &dropped {
            log::warn!("skipped {note}");
        }
        plant.dropped = dropped;
        plant
    }

    /// Number of entities per category.
    pub fn count(&self, category: Category) -> usize {
        self.entities
            .iter()
            .filter(|e| e.category() == category)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::plant::Dimensions;

    fn structure(kind: &str, dims: Dimensions) -> StructureRecord {
        StructureRecord {
            id: "s".into(),
            kind: kind.into(),
            position: Position::default(),
            dimensions: Some(dims),
            name: "S".into(),
            color: None,
            cylindrical: None,
        }
    }

    #[test]
    fn structure_dispatch_is_exact() {
        let silo = Entity::from_structure(&structure(
            "silo",
            Dimensions {
                radius: Some(2.0),
                height: Some(8.0),
                ..Dimensions::default()
            },
        ))
        .unwrap();
        assert_eq!(silo.category(), Category::Silo);

        let upper = Entity::from_structure(&structure("Silo", Dimensions::default())).unwrap();
        assert_eq!(upper.category(), Category::Equipment);

        let marker_structure =
            Entity::from_structure(&structure("marker", Dimensions::default())).unwrap();
        assert_eq!(marker_structure.category(), Category::Equipment);
    }

    #[test]
    fn silo_without_height_is_dropped() {
        let err = Entity::from_structure(&structure(
            "silo",
            Dimensions {
                radius: Some(2.0),
                ..Dimensions::default()
            },
        ))
        .unwrap_err();
        assert_eq!(err, DropReason::NoSiloFootprint);
    }

    #[test]
    fn misc_without_type_is_equipment() {
        let rec = MiscRecord {
            id: "m".into(),
            kind: None,
            position: Position::default(),
            dimensions: None,
            name: "M".into(),
            color: None,
        };
        let entity = Entity::from_misc(&rec);
        assert_eq!(entity.category(), Category::Equipment);
    }

    #[test]
    fn ingest_keeps_document_order_and_notes() {
        let doc = json!({
            "misc": [{ "id": "m1", "type": "marker", "position": {"x": 0, "y": 0, "z": 0} }],
            "structures": [
                { "id": "s1", "type": "silo", "position": {"x": 0, "y": 0, "z": 0},
                  "dimensions": { "depth": 3 } },
                { "id": "s2", "type": "conveyor", "position": {"x": 0, "y": 0, "z": 0} }
            ],
            "buildings": [{ "id": "b1", "position": {"x": 0, "y": 0, "z": 0},
                            "dimensions": {"width": 1, "height": 1, "depth": 1} }]
        });
        let plant = IngestedPlant::from_value(&doc);
        let ids: Vec<&str> = plant
            .entities
            .iter()
            .map(|e| e.common().id.as_str())
            .collect();
        assert_eq!(ids, ["b1", "s2", "m1"]);
        assert_eq!(plant.dropped.len(), 1);
        assert_eq!(plant.dropped[0].id.as_deref(), Some("s1"));
        assert_eq!(plant.count(Category::Equipment), 1);
    }

    #[test]
    fn category_parses_singular_and_plural() {
        assert_eq!("Silos".parse::<Category>(), Ok(Category::Silo));
        assert_eq!("marker".parse::<Category>(), Ok(Category::Marker));
        assert!("pipes".parse::<Category>().is_err());
    }
}
