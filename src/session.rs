//! Viewing session: the current plant, its visibility state and the load guard.
//!
//! A session is an explicit value owned by the front end. Loading replaces
//! the current plant only on success; a failed load leaves it untouched.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ViewerError, ViewerResult};
use crate::io::export;
use crate::library::JsonLibrary;
use crate::model::{Category, IngestedPlant};
use crate::scene::{self, Scene};
use crate::store::{PLANT_SLOT, SlotStore};
use crate::visibility::Visibility;

/// Where a plant document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlantSource {
    /// A local file picked by the user. Must have a `.json` extension.
    Upload(PathBuf),
    /// A named document from the server-side library.
    Library(String),
}

impl PlantSource {
    /// Reads and parses the document.
    ///
    /// # Errors
    ///
    /// See [`ViewerError`]; uploads additionally fail with
    /// [`ViewerError::NotJsonFile`] before any IO happens.
    pub fn read(&self, library: &JsonLibrary) -> ViewerResult<Value> {
        match self {
            Self::Upload(path) => read_upload(path),
            Self::Library(name) => library.read(name),
        }
    }

    /// Short label for status lines and logs.
    pub fn label(&self) -> String {
        match self {
            Self::Upload(path) => path.display().to_string(),
            Self::Library(name) => name.clone(),
        }
    }
}

fn read_upload(path: &Path) -> ViewerResult<Value> {
    let is_json = path
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(ViewerError::NotJsonFile(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ViewerError::NotFound(path.display().to_string())
        } else {
            ViewerError::Io(e)
        }
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// A successfully loaded document.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPlant {
    /// Where the document came from.
    pub label: String,
    /// The document exactly as parsed; exports are written from this.
    pub document: Value,
    /// Ingested entities, resolved once per load.
    pub plant: IngestedPlant,
}

impl LoadedPlant {
    pub fn from_value(label: impl Into<String>, document: Value) -> Self {
        let plant = IngestedPlant::from_value(&document);
        Self {
            label: label.into(),
            document,
            plant,
        }
    }
}

/// Session-scoped viewer state.
#[derive(Debug, Clone)]
pub struct ViewerSession {
    current: Option<LoadedPlant>,
    /// Category toggles applied on every composition.
    pub visibility: Visibility,
    loading: bool,
    slot: String,
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new(Visibility::default())
    }
}

impl ViewerSession {
    pub fn new(visibility: Visibility) -> Self {
        Self {
            current: None,
            visibility,
            loading: false,
            slot: PLANT_SLOT.to_string(),
        }
    }

    /// Uses a different storage slot for the current document.
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    pub fn current(&self) -> Option<&LoadedPlant> {
        self.current.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Marks a load as started.
    ///
    /// # Errors
    ///
    /// [`ViewerError::LoadInProgress`] if a previous load has not completed.
    pub fn begin_load(&mut self) -> ViewerResult<()> {
        if self.loading {
            return Err(ViewerError::LoadInProgress);
        }
        self.loading = true;
        Ok(())
    }

    /// Finishes a load started with [`begin_load`](Self::begin_load).
    ///
    /// On success the document is written to the storage slot and becomes
    /// the current plant. On failure the previous plant stays.
    ///
    /// # Errors
    ///
    /// Passes through the load error, or the slot write error.
    pub fn complete_load(
        &mut self,
        result: ViewerResult<LoadedPlant>,
        store: &mut dyn SlotStore,
    ) -> ViewerResult<&LoadedPlant> {
        self.loading = false;
        let loaded = result?;
        let serialized = serde_json::to_string(&loaded.document)?;
        store.write(&self.slot, &serialized)?;
        log::info!(
            "loaded {} ({} entities, {} skipped)",
            loaded.label,
            loaded.plant.entities.len(),
            loaded.plant.dropped.len()
        );
        let loaded: &LoadedPlant = self.current.insert(loaded);
        Ok(loaded)
    }

    /// Single-shot load: reads `source`, stores it, makes it current.
    ///
    /// # Errors
    ///
    /// Any [`ViewerError`] from reading, parsing or storing.
    pub fn load(
        &mut self,
        source: &PlantSource,
        library: &JsonLibrary,
        store: &mut dyn SlotStore,
    ) -> ViewerResult<&LoadedPlant> {
        self.begin_load()?;
        let result = source
            .read(library)
            .map(|document| LoadedPlant::from_value(source.label(), document));
        if let Err(e) = &result {
            log::error!("failed to load {}: {e}", source.label());
        }
        self.complete_load(result, store)
    }

    /// Reads the storage slot once, as the viewer does when it opens.
    ///
    /// An empty slot yields `None`. A slot holding unparseable data is logged
    /// and also yields `None`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the store itself cannot be read.
    pub fn restore(&mut self, store: &dyn SlotStore) -> ViewerResult<Option<&LoadedPlant>> {
        let Some(raw) = store.read(&self.slot)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(document) => {
                let loaded = LoadedPlant::from_value(format!("slot {}", self.slot), document);
                let loaded: &LoadedPlant = self.current.insert(loaded);
                Ok(Some(loaded))
            }
            Err(e) => {
                log::error!("error parsing stored plant data: {e}");
                Ok(None)
            }
        }
    }

    /// Composes the current plant under the current visibility.
    pub fn scene(&self) -> Scene {
        self.current
            .as_ref()
            .map(|loaded| scene::compose(&loaded.plant, &self.visibility))
            .unwrap_or_default()
    }

    /// Flips one visibility flag and returns its new value.
    pub fn toggle(&mut self, category: Category) -> bool {
        self.visibility.toggle(category)
    }

    /// Writes the current document to `path`.
    ///
    /// # Errors
    ///
    /// [`ViewerError::NothingLoaded`] without a current plant, or any IO error.
    pub fn export_to_path(&self, path: &Path) -> ViewerResult<()> {
        let loaded = self.current.as_ref().ok_or(ViewerError::NothingLoaded)?;
        export::export_plant_json(&loaded.document, path)?;
        log::info!("exported {} to {}", loaded.label, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySlotStore;

    const ONE_BUILDING: &str = r#"{"buildings":[{"id":"b1","position":{"x":0,"y":0,"z":0},"dimensions":{"width":2,"height":3,"depth":2},"name":"Unit1"}]}"#;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn upload_loads_and_stores_document() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write(tmp.path(), "plant.json", ONE_BUILDING);
        let library = JsonLibrary::new(tmp.path().join("lib"));
        let mut store = MemorySlotStore::default();
        let mut session = ViewerSession::default();

        let loaded = session
            .load(&PlantSource::Upload(path), &library, &mut store)
            .unwrap();
        assert_eq!(loaded.plant.entities.len(), 1);
        assert!(store.read(PLANT_SLOT).unwrap().is_some());
        assert!(!session.is_loading());
    }

    #[test]
    fn upload_requires_json_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write(tmp.path(), "plant.txt", ONE_BUILDING);
        let library = JsonLibrary::new(tmp.path());
        let mut store = MemorySlotStore::default();
        let mut session = ViewerSession::default();

        let err = session
            .load(&PlantSource::Upload(path), &library, &mut store)
            .unwrap_err();
        assert!(matches!(err, ViewerError::NotJsonFile(_)));
        assert!(!session.is_loading());
    }

    #[test]
    fn uppercase_extension_is_accepted() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write(tmp.path(), "PLANT.JSON", "{}");
        let library = JsonLibrary::new(tmp.path());
        let mut store = MemorySlotStore::default();
        let mut session = ViewerSession::default();
        assert!(
            session
                .load(&PlantSource::Upload(path), &library, &mut store)
                .is_ok()
        );
    }

    #[test]
    fn failed_load_keeps_previous_plant() {
        let tmp = tempfile::tempdir().unwrap();
        let good = write(tmp.path(), "good.json", ONE_BUILDING);
        let bad = write(tmp.path(), "bad.json", "{ not json");
        let library = JsonLibrary::new(tmp.path());
        let mut store = MemorySlotStore::default();
        let mut session = ViewerSession::default();

        session
            .load(&PlantSource::Upload(good), &library, &mut store)
            .unwrap();
        let err = session
            .load(&PlantSource::Upload(bad), &library, &mut store)
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(
            session.current().map(|l| l.plant.entities.len()),
            Some(1)
        );
        let stored = store.read(PLANT_SLOT).unwrap().unwrap();
        assert!(stored.contains("Unit1"));
    }

    #[test]
    fn overlapping_load_is_rejected() {
        let mut session = ViewerSession::default();
        session.begin_load().unwrap();
        assert!(matches!(
            session.begin_load(),
            Err(ViewerError::LoadInProgress)
        ));

        let mut store = MemorySlotStore::default();
        let loaded = LoadedPlant::from_value("inline", serde_json::json!({}));
        session.complete_load(Ok(loaded), &mut store).unwrap();
        assert!(session.begin_load().is_ok());
    }

    #[test]
    fn restore_reads_slot_once() {
        let mut store = MemorySlotStore::default();
        store.write(PLANT_SLOT, ONE_BUILDING).unwrap();
        let mut session = ViewerSession::default();
        let restored = session.restore(&store).unwrap();
        assert!(restored.is_some());
        assert_eq!(session.scene().drawables.len(), 1);
    }

    #[test]
    fn restore_ignores_corrupt_slot() {
        let mut store = MemorySlotStore::default();
        store.write(PLANT_SLOT, "garbage").unwrap();
        let mut session = ViewerSession::default();
        assert!(session.restore(&store).unwrap().is_none());
        assert!(session.current().is_none());
    }

    #[test]
    fn export_without_plant_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out.json");
        let session = ViewerSession::default();
        assert!(matches!(
            session.export_to_path(&out),
            Err(ViewerError::NothingLoaded)
        ));
        assert!(!out.exists());
    }

    #[test]
    fn toggle_recomposes_scene() {
        let mut store = MemorySlotStore::default();
        store.write(PLANT_SLOT, ONE_BUILDING).unwrap();
        let mut session = ViewerSession::default();
        session.restore(&store).unwrap();
        assert!(!session.toggle(Category::Building));
        assert!(session.scene().is_empty());
    }
}
