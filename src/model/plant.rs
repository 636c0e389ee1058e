//! Plant document records as they appear in the JSON file.
//!
//! Parsing is lenient: the only hard failure is input that is not JSON at all.
//! Fields of the wrong type read as absent. A record without an object
//! `position` is skipped and leaves a [`Dropped`] note behind.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::diagnostic::{DropReason, Dropped, Section};

/// World-space position of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default, deserialize_with = "coordinate")]
    pub x: f64,
    #[serde(default, deserialize_with = "coordinate")]
    pub y: f64,
    #[serde(default, deserialize_with = "coordinate")]
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Size fields of an entity. Which ones matter depends on the entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl Dimensions {
    /// A box-shaped dimension set.
    pub fn boxed(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            depth: Some(depth),
            radius: None,
        }
    }

    pub fn width(&self) -> Option<f64> {
        present(self.width)
    }

    pub fn height(&self) -> Option<f64> {
        present(self.height)
    }

    pub fn depth(&self) -> Option<f64> {
        present(self.depth)
    }

    pub fn radius(&self) -> Option<f64> {
        present(self.radius)
    }
}

/// A dimension counts when it is a finite, non-zero number. Negative values
/// are kept as given.
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

// Field readers for loosely typed records. A value of the wrong type reads
// as absent instead of failing the whole record; only `position` is required.

fn number<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(de)?.as_f64())
}

fn coordinate<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    Ok(number(de)?.unwrap_or_default())
}

/// Strings pass through, numbers and booleans are printed.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(scalar_text(&Value::deserialize(de)?).unwrap_or_default())
}

fn opt_text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn opt_bool<'de, D: Deserializer<'de>>(de: D) -> Result<Option<bool>, D::Error> {
    Ok(Value::deserialize(de)?.as_bool())
}

fn opt_dimensions<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Dimensions>, D::Error> {
    let value = Value::deserialize(de)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(Dimensions::deserialize(&value).ok())
}

/// Entry of the `buildings` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRecord {
    #[serde(default, deserialize_with = "text")]
    pub id: String,
    pub position: Position,
    #[serde(
        default,
        deserialize_with = "opt_dimensions",
        skip_serializing_if = "Option::is_none"
    )]
    pub dimensions: Option<Dimensions>,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Entry of the `structures` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureRecord {
    #[serde(default, deserialize_with = "text")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "text")]
    pub kind: String,
    pub position: Position,
    #[serde(
        default,
        deserialize_with = "opt_dimensions",
        skip_serializing_if = "Option::is_none"
    )]
    pub dimensions: Option<Dimensions>,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Accepted and preserved; the silo rule does not depend on it.
    #[serde(default, deserialize_with = "opt_bool", skip_serializing_if = "Option::is_none")]
    pub cylindrical: Option<bool>,
}

/// Entry of the `misc` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiscRecord {
    #[serde(default, deserialize_with = "text")]
    pub id: String,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    pub position: Position,
    #[serde(
        default,
        deserialize_with = "opt_dimensions",
        skip_serializing_if = "Option::is_none"
    )]
    pub dimensions: Option<Dimensions>,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Document and revision information shown in the metadata panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub document_numbers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub revision_info: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub revision_dates: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub revision_numbers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub revision_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<String>,
}

/// One line of revision history, zipped from the parallel metadata arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Revision<'a> {
    pub info: &'a str,
    pub date: Option<&'a str>,
    pub number: Option<&'a str>,
    pub by: Option<&'a str>,
}

impl Metadata {
    /// Revision entries keyed by `revisionInfo`; the other arrays are
    /// matched by index and may be shorter.
    pub fn revisions(&self) -> Vec<Revision<'_>> {
        fn at(list: &[String], i: usize) -> Option<&str> {
            list.get(i).map(String::as_str).filter(|s| !s.is_empty())
        }
        self.revision_info
            .iter()
            .enumerate()
            .map(|(i, info)| Revision {
                info,
                date: at(&self.revision_dates, i),
                number: at(&self.revision_numbers, i),
                by: at(&self.revision_by, i),
            })
            .collect()
    }

    /// Returns `true` when nothing would be shown in the metadata panel.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Root of a plant document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlantData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    pub buildings: Vec<BuildingRecord>,
    pub structures: Vec<StructureRecord>,
    pub misc: Vec<MiscRecord>,
}

impl PlantData {
    /// Builds the typed model from an already parsed JSON value.
    ///
    /// Returns the records that could be read together with a note for
    /// everything that had to be skipped.
    pub fn from_value(value: &Value) -> (Self, Vec<Dropped>) {
        let mut dropped = Vec::new();
        let Some(root) = value.as_object() else {
            dropped.push(Dropped::section(Section::Document, DropReason::NotAnObject));
            return (Self::default(), dropped);
        };

        let metadata = match root.get("metadata") {
            None | Some(Value::Null) => None,
            Some(raw) => match Metadata::deserialize(raw) {
                Ok(m) => Some(m),
                Err(e) => {
                    dropped.push(Dropped::section(
                        Section::Metadata,
                        DropReason::Malformed(e.to_string()),
                    ));
                    None
                }
            },
        };

        let data = Self {
            metadata,
            buildings: read_section(root.get("buildings"), Section::Buildings, &mut dropped),
            structures: read_section(root.get("structures"), Section::Structures, &mut dropped),
            misc: read_section(root.get("misc"), Section::Misc, &mut dropped),
        };
        (data, dropped)
    }
}

fn read_section<T: DeserializeOwned>(
    raw: Option<&Value>,
    section: Section,
    dropped: &mut Vec<Dropped>,
) -> Vec<T> {
    let items = match raw {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            dropped.push(Dropped::section(section, DropReason::NotAnArray));
            return Vec::new();
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match T::deserialize(item) {
            Ok(record) => records.push(record),
            Err(e) => dropped.push(Dropped::entry(
                section,
                index,
                item.get("id").and_then(scalar_text),
                DropReason::Malformed(e.to_string()),
            )),
        }
    }
    records
}
