//! Plant document model and ingestion.

/// Notes for records left out of the scene.
pub mod diagnostic;
pub mod entity;
/// JSON document records.
pub mod plant;

pub use diagnostic::{DropReason, Dropped, Section};
pub use entity::{Category, Entity, EntityCommon, IngestedPlant};
pub use plant::{Dimensions, Metadata, PlantData, Position};
