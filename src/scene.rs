//! Scene composition: ingested entities filtered by visibility.
//!
//! Recomputed on every state change. Output keeps document order
//! (buildings, structures, misc); depth ordering is left to the renderer.

use std::fmt;

use serde::Serialize;

use crate::geometry::{self, Drawable};
use crate::model::{Category, IngestedPlant};
use crate::visibility::Visibility;

/// The drawable set for one render pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    pub drawables: Vec<Drawable>,
    /// Entities left out at ingestion, carried for reporting.
    pub dropped_count: usize,
}

/// Per-category counts of a composed scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SceneSummary {
    pub buildings: usize,
    pub equipment: usize,
    pub silos: usize,
    pub markers: usize,
    pub dropped: usize,
}

impl SceneSummary {
    pub fn total(&self) -> usize {
        self.buildings + self.equipment + self.silos + self.markers
    }
}

impl fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} drawables: {} buildings, {} equipment, {} silos, {} markers ({} skipped)",
            self.total(),
            self.buildings,
            self.equipment,
            self.silos,
            self.markers,
            self.dropped
        )
    }
}

/// Ground-plane extent of a scene, `x` and `z` in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

/// Builds the drawable set for `plant` under `visibility`.
pub fn compose(plant: &IngestedPlant, visibility: &Visibility) -> Scene {
    let drawables = plant
        .entities
        .iter()
        .filter(|entity| visibility.is_visible(entity.category()))
        .map(geometry::drawable)
        .collect();
    Scene {
        drawables,
        dropped_count: plant.dropped.len(),
    }
}

impl Scene {
    pub fn summary(&self) -> SceneSummary {
        let mut summary = SceneSummary {
            dropped: self.dropped_count,
            ..SceneSummary::default()
        };
        for d in &self.drawables {
            match d.category {
                Category::Building => summary.buildings += 1,
                Category::Equipment => summary.equipment += 1,
                Category::Silo => summary.silos += 1,
                Category::Marker => summary.markers += 1,
            }
        }
        summary
    }

    /// Ground-plane bounds covering every drawable footprint, or `None` for
    /// an empty scene.
    pub fn bounds(&self) -> Option<Bounds> {
        self.drawables.iter().fold(None, |acc, d| {
            let (hx, hz) = d.primitive.half_extent_xz();
            let c = d.center();
            let b = Bounds {
                min_x: c.x - hx,
                max_x: c.x + hx,
                min_z: c.z - hz,
                max_z: c.z + hz,
            };
            Some(match acc {
                None => b,
                Some(a) => Bounds {
                    min_x: a.min_x.min(b.min_x),
                    max_x: a.max_x.max(b.max_x),
                    min_z: a.min_z.min(b.min_z),
                    max_z: a.max_z.max(b.max_z),
                },
            })
        })
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }
}
