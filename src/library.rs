//! Server-side directory of plant documents.
//!
//! Backs both the listing endpoint and the `--list` / `--select` CLI flags.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::{ViewerError, ViewerResult};

/// Default library directory, relative to the working directory.
pub const DEFAULT_LIBRARY_DIR: &str = "json-files";

/// One listed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonFileEntry {
    pub name: String,
    pub path: String,
}

/// Read access to a directory of `*.json` files.
#[derive(Debug, Clone)]
pub struct JsonLibrary {
    dir: PathBuf,
}

impl JsonLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Lists every `*.json` entry, sorted by name.
    ///
    /// A missing directory yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be read.
    pub fn list(&self) -> ViewerResult<Vec<JsonFileEntry>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.ends_with(".json") {
                files.push(JsonFileEntry {
                    path: name.clone(),
                    name,
                });
            }
        }
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// Resolves a requested name to a path inside the library.
    ///
    /// Only the final path component is kept, so `../../etc/passwd` becomes
    /// `passwd`. Returns `None` when nothing usable is left.
    pub fn resolve(&self, requested: &str) -> Option<PathBuf> {
        let base = basename(requested)?;
        Some(self.dir.join(base))
    }

    /// Reads and parses one document.
    ///
    /// # Errors
    ///
    /// [`ViewerError::NotFound`] if the (sanitised) file does not exist,
    /// [`ViewerError::InvalidJson`] if it does not parse, [`ViewerError::Io`]
    /// for any other read failure.
    pub fn read(&self, requested: &str) -> ViewerResult<Value> {
        let path = self
            .resolve(requested)
            .ok_or_else(|| ViewerError::NotFound(requested.to_string()))?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ViewerError::NotFound(requested.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        log::debug!("read library file {}", path.display());
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Last path component, splitting on both `/` and `\`.
fn basename(requested: &str) -> Option<&str> {
    requested
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_strips_directories() {
        assert_eq!(basename("../../etc/passwd"), Some("passwd"));
        assert_eq!(basename("..\\secret.json"), Some("secret.json"));
        assert_eq!(basename("plant.json"), Some("plant.json"));
        assert_eq!(basename("dir/"), None);
        assert_eq!(basename(".."), None);
    }

    #[test]
    fn missing_dir_lists_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let lib = JsonLibrary::new(tmp.path().join("absent"));
        assert!(lib.list().unwrap().is_empty());
    }

    #[test]
    fn lists_only_json_files_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("b.json"), "{}").unwrap();
        fs::write(tmp.path().join("a.json"), "{}").unwrap();
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();
        let lib = JsonLibrary::new(tmp.path());
        let names: Vec<String> = lib.list().unwrap().into_iter().map(|f| f.name).collect();
        assert_eq!(names, ["a.json", "b.json"]);
    }

    #[test]
    fn traversal_is_confined_to_library() {
        let tmp = tempfile::tempdir().unwrap();
        let lib_dir = tmp.path().join("lib");
        fs::create_dir(&lib_dir).unwrap();
        fs::write(tmp.path().join("outside.json"), "{}").unwrap();
        let lib = JsonLibrary::new(&lib_dir);
        assert!(matches!(
            lib.read("../outside.json"),
            Err(ViewerError::NotFound(_))
        ));
        assert_eq!(
            lib.resolve("../outside.json"),
            Some(lib_dir.join("outside.json"))
        );
    }

    #[test]
    fn malformed_file_is_invalid_json() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("broken.json"), "{ nope").unwrap();
        let lib = JsonLibrary::new(tmp.path());
        assert!(matches!(
            lib.read("broken.json"),
            Err(ViewerError::InvalidJson(_))
        ));
    }
}
