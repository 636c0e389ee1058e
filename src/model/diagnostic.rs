//! Notes for records that were left out of the scene.

use std::fmt;

use serde::Serialize;

/// Part of the document a note refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Document,
    Metadata,
    Buildings,
    Structures,
    Misc,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Document => "document",
            Self::Metadata => "metadata",
            Self::Buildings => "buildings",
            Self::Structures => "structures",
            Self::Misc => "misc",
        };
        f.write_str(name)
    }
}

/// Why a record did not make it into the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DropReason {
    /// The document root is not a JSON object.
    NotAnObject,
    /// A section exists but is not an array.
    NotAnArray,
    /// The record could not be read (wrong types, no `position`, ...).
    Malformed(String),
    /// A building is missing one of its box dimensions.
    MissingDimension(&'static str),
    /// A silo has no height, or neither width nor radius.
    NoSiloFootprint,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("document root is not an object"),
            Self::NotAnArray => f.write_str("section is not an array"),
            Self::Malformed(detail) => write!(f, "malformed record: {detail}"),
            Self::MissingDimension(field) => write!(f, "missing dimensions.{field}"),
            Self::NoSiloFootprint => {
                f.write_str("silo needs dimensions.height and a width or radius")
            }
        }
    }
}

/// A record (or whole section) that was skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dropped {
    pub section: Section,
    /// Index inside the section array; `None` when the whole section is affected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub reason: DropReason,
}

impl Dropped {
    pub fn section(section: Section, reason: DropReason) -> Self {
        Self {
            section,
            index: None,
            id: None,
            reason,
        }
    }

    pub fn entry(section: Section, index: usize, id: Option<String>, reason: DropReason) -> Self {
        Self {
            section,
            index: Some(index),
            id,
            reason,
        }
    }
}

impl fmt::Display for Dropped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.section)?;
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        if let Some(id) = &self.id {
            write!(f, " ({id})")?;
        }
        write!(f, ": {}", self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_location_and_reason() {
        let d = Dropped::entry(
            Section::Structures,
            3,
            Some("s9".into()),
            DropReason::NoSiloFootprint,
        );
        assert_eq!(
            d.to_string(),
            "structures[3] (s9): silo needs dimensions.height and a width or radius"
        );
        let whole = Dropped::section(Section::Misc, DropReason::NotAnArray);
        assert_eq!(whole.to_string(), "misc: section is not an array");
    }
}
