//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

/// The single-building upload document: `b1`, 2×3×2 at the origin.
pub const ONE_BUILDING: &str = r#"{"buildings":[{"id":"b1","position":{"x":0,"y":0,"z":0},"dimensions":{"width":2,"height":3,"depth":2},"name":"Unit1"}]}"#;

/// A plant exercising every category and every defaulting rule.
///
/// Structures: two silos that pass the inclusion rule (explicit radius,
/// width/depth footprint), one with width but no depth (radius falls back
/// to 1), one with no height (dropped), and a conveyor with no dimensions.
/// Misc: two markers and a light pole.
pub fn mixed_plant() -> Value {
    json!({
        "metadata": {
            "documentName": "Unit 3 general arrangement",
            "documentNumbers": ["GA-300"],
            "revisionInfo": ["Initial issue", "Added coal yard"],
            "revisionDates": ["2021-03-01", "2022-07-15"],
            "revisionNumbers": ["0", "1"],
            "revisionBy": ["JS"],
            "unitInfo": "Unit 3",
            "elevation": "EL 100.0"
        },
        "buildings": [
            { "id": "b1", "name": "Boiler house", "color": "#665544",
              "position": {"x": 0, "y": 0, "z": 0},
              "dimensions": {"width": 20, "height": 40, "depth": 30} },
            { "id": "b2", "name": "Turbine hall",
              "position": {"x": 30, "y": 0, "z": 0},
              "dimensions": {"width": 25, "height": 20, "depth": 50} }
        ],
        "structures": [
            { "id": "s1", "type": "silo", "cylindrical": true, "name": "Coal silo A",
              "position": {"x": -20, "y": 0, "z": 10},
              "dimensions": {"radius": 4, "width": 100, "height": 25} },
            { "id": "s2", "type": "silo", "name": "Coal silo B",
              "position": {"x": -20, "y": 0, "z": 25},
              "dimensions": {"width": 6, "depth": 10, "height": 25} },
            { "id": "s3", "type": "silo", "name": "Lime silo",
              "position": {"x": -35, "y": 0, "z": 25},
              "dimensions": {"width": 6, "height": 12} },
            { "id": "s4", "type": "silo", "name": "Unfinished silo",
              "position": {"x": -50, "y": 0, "z": 25},
              "dimensions": {"radius": 3} },
            { "id": "s5", "type": "conveyor", "name": "Conveyor C1",
              "position": {"x": -10, "y": 5, "z": 10} }
        ],
        "misc": [
            { "id": "m1", "type": "marker", "name": "Muster point",
              "position": {"x": 10, "y": 0, "z": -15} },
            { "id": "m2", "type": "marker", "name": "Gate",
              "position": {"x": 50, "y": 0, "z": -15},
              "dimensions": {"width": 9, "height": 9, "depth": 9} },
            { "id": "m3", "type": "light_pole", "name": "Pole",
              "position": {"x": 5, "y": 0, "z": -5},
              "dimensions": {"height": 8} }
        ],
        "notes": { "source": "survey 2022" }
    })
}

/// Writes `contents` to `dir/name` and returns the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("fixture write");
    path
}
