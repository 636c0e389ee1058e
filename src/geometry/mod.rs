//! Mapping from plant entities to renderable primitives.
//!
//! Everything here is a pure function of the entity record. The sizing
//! helpers hold the defaulting rules; [`drawable`] turns an ingested
//! [`Entity`] into the parameters a renderer needs.

pub mod color;

use serde::Serialize;

pub use color::Rgb;

use crate::model::diagnostic::DropReason;
use crate::model::entity::{Category, Entity};
use crate::model::plant::{Dimensions, Position};

/// Default building color, used only when a building record has no `color`
/// of its own.
pub const BUILDING_COLOR: &str = "#888888";
/// Default equipment color.
pub const EQUIPMENT_COLOR: &str = "#4488AA";
/// Default silo color.
pub const SILO_COLOR: &str = "#AAAAAA";
/// Default marker color.
pub const MARKER_COLOR: &str = "#FF4444";

/// Fixed marker sphere radius (world units).
pub const MARKER_RADIUS: f64 = 0.5;
/// Substitute for any missing equipment dimension.
pub const DEFAULT_EQUIPMENT_SIZE: f64 = 1.0;
/// Silo radius when neither `radius` nor both `width` and `depth` are given.
pub const FALLBACK_SILO_RADIUS: f64 = 1.0;
/// Radial segments used for silo cylinders.
pub const CYLINDER_SEGMENTS: u32 = 32;
/// Width and height segments used for marker spheres.
pub const SPHERE_SEGMENTS: u32 = 16;

/// Resolved size of a box primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// Resolved size of a silo cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SiloFootprint {
    pub radius: f64,
    pub height: f64,
}

/// Building boxes take their dimensions as given; a missing one drops the building.
pub fn building_size(dims: &Dimensions) -> Result<BoxSize, DropReason> {
    let width = dims.width().ok_or(DropReason::MissingDimension("width"))?;
    let height = dims.height().ok_or(DropReason::MissingDimension("height"))?;
    let depth = dims.depth().ok_or(DropReason::MissingDimension("depth"))?;
    Ok(BoxSize {
        width,
        height,
        depth,
    })
}

/// Equipment boxes substitute [`DEFAULT_EQUIPMENT_SIZE`] for each missing dimension.
pub fn equipment_size(dims: &Dimensions) -> BoxSize {
    BoxSize {
        width: dims.width().unwrap_or(DEFAULT_EQUIPMENT_SIZE),
        height: dims.height().unwrap_or(DEFAULT_EQUIPMENT_SIZE),
        depth: dims.depth().unwrap_or(DEFAULT_EQUIPMENT_SIZE),
    }
}

/// Silo radius: explicit `radius`, else `min(width, depth) / 2`, else the fallback.
pub fn silo_radius(dims: &Dimensions) -> f64 {
    if let Some(radius) = dims.radius() {
        return radius;
    }
    match (dims.width(), dims.depth()) {
        (Some(w), Some(d)) => w.min(d) / 2.0,
        _ => FALLBACK_SILO_RADIUS,
    }
}

/// Silo inclusion rule.
///
/// A silo is drawn only when it has a height and at least one of width or
/// radius. Anything else yields `None` and the silo is left out.
pub fn silo_footprint(dims: &Dimensions) -> Option<SiloFootprint> {
    let height = dims.height()?;
    if dims.width().is_none() && dims.radius().is_none() {
        return None;
    }
    Some(SiloFootprint {
        radius: silo_radius(dims),
        height,
    })
}

/// Shape and size handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Box {
        width: f64,
        height: f64,
        depth: f64,
    },
    Cylinder {
        radius: f64,
        height: f64,
        segments: u32,
    },
    Sphere {
        radius: f64,
        segments: u32,
    },
}

impl Primitive {
    /// Half extents on the ground plane, `(x, z)`.
    pub fn half_extent_xz(&self) -> (f64, f64) {
        match *self {
            Self::Box { width, depth, .. } => (width / 2.0, depth / 2.0),
            Self::Cylinder { radius, .. } | Self::Sphere { radius, .. } => (radius, radius),
        }
    }

    /// Primitive name as used in exports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Cylinder { .. } => "cylinder",
            Self::Sphere { .. } => "sphere",
        }
    }
}

/// One renderable item of the composed scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawable {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub primitive: Primitive,
    /// Group origin in world space.
    pub position: Position,
    /// Primitive center relative to `position`.
    pub offset: Position,
    pub color: String,
    pub emissive: bool,
    /// Label anchor relative to `position`.
    pub label_anchor: Position,
}

impl Drawable {
    /// Primitive center in world space.
    pub fn center(&self) -> Position {
        Position::new(
            self.position.x + self.offset.x,
            self.position.y + self.offset.y,
            self.position.z + self.offset.z,
        )
    }

    /// Numeric color, falling back to the category default when the record's
    /// color string is not a hex color.
    pub fn rgb(&self) -> Rgb {
        Rgb::parse(&self.color)
            .or_else(|| Rgb::parse(default_color(self.category)))
            .unwrap_or(Rgb::GRAY)
    }
}

/// Default color for an entity category.
pub fn default_color(category: Category) -> &'static str {
    match category {
        Category::Building => BUILDING_COLOR,
        Category::Equipment => EQUIPMENT_COLOR,
        Category::Silo => SILO_COLOR,
        Category::Marker => MARKER_COLOR,
    }
}

/// Maps an ingested entity to its drawable.
pub fn drawable(entity: &Entity) -> Drawable {
    let common = entity.common();
    let category = entity.category();
    let (primitive, offset_y, label_y) = match entity {
        // Buildings are centered on their position.
        Entity::Building { size, .. } => (
            Primitive::Box {
                width: size.width,
                height: size.height,
                depth: size.depth,
            },
            0.0,
            size.height / 2.0 + 1.0,
        ),
        Entity::Equipment { size, .. } => (
            Primitive::Box {
                width: size.width,
                height: size.height,
                depth: size.depth,
            },
            size.height / 2.0,
            size.height + 0.5,
        ),
        Entity::Silo { footprint, .. } => (
            Primitive::Cylinder {
                radius: footprint.radius,
                height: footprint.height,
                segments: CYLINDER_SEGMENTS,
            },
            footprint.height / 2.0,
            footprint.height + 1.0,
        ),
        Entity::Marker { .. } => (
            Primitive::Sphere {
                radius: MARKER_RADIUS,
                segments: SPHERE_SEGMENTS,
            },
            0.0,
            MARKER_RADIUS + 0.5,
        ),
    };

    Drawable {
        id: common.id.clone(),
        name: common.name.clone(),
        category,
        primitive,
        position: common.position,
        offset: Position::new(0.0, offset_y, 0.0),
        color: common
            .color
            .clone()
            .unwrap_or_else(|| default_color(category).to_string()),
        emissive: category == Category::Marker,
        label_anchor: Position::new(0.0, label_y, 0.0),
    }
}
