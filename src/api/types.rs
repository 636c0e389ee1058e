//! API response and query types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::Drawable;
use crate::library::JsonFileEntry;
use crate::model::Dropped;
use crate::scene::SceneSummary;
use crate::visibility::Visibility;

/// Query of `/api/json-files`.
#[derive(Debug, Deserialize)]
pub struct JsonFilesQuery {
    /// Library file to return; reduced to its basename.
    pub file: Option<String>,
}

/// Listing body of `/api/json-files`.
#[derive(Debug, Serialize)]
pub struct JsonFilesResponse {
    pub files: Vec<JsonFileEntry>,
}

/// Single-document body of `/api/json-files?file=`.
#[derive(Debug, Serialize)]
pub struct ContentResponse {
    /// The document as parsed, unchanged.
    pub content: Value,
}

/// Query of `/api/scene`. Omitted flags default to visible.
#[derive(Debug, Deserialize)]
pub struct SceneQuery {
    pub file: Option<String>,
    pub buildings: Option<bool>,
    pub equipment: Option<bool>,
    pub silos: Option<bool>,
    pub markers: Option<bool>,
}

impl SceneQuery {
    pub fn visibility(&self) -> Visibility {
        let all = Visibility::default();
        Visibility {
            buildings: self.buildings.unwrap_or(all.buildings),
            equipment: self.equipment.unwrap_or(all.equipment),
            silos: self.silos.unwrap_or(all.silos),
            markers: self.markers.unwrap_or(all.markers),
        }
    }
}

/// Composed scene of one library document.
#[derive(Debug, Serialize)]
pub struct SceneResponse {
    pub summary: SceneSummary,
    pub drawables: Vec<Drawable>,
    /// Entities left out at ingestion, with the reason.
    pub dropped: Vec<Dropped>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
