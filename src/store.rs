//! Named-slot storage for the last loaded plant document.
//!
//! Mirrors a browser's local key-value storage: one string per slot,
//! overwritten on every write.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default slot holding the current plant document.
pub const PLANT_SLOT: &str = "plantData";

/// Key-value storage for whole documents.
pub trait SlotStore {
    /// Returns the slot contents, or `None` if the slot was never written.
    fn read(&self, slot: &str) -> io::Result<Option<String>>;

    /// Replaces the slot contents.
    fn write(&mut self, slot: &str, contents: &str) -> io::Result<()>;
}

/// Stores each slot as `<dir>/<slot>.json`.
#[derive(Debug, Clone)]
pub struct DirSlotStore {
    dir: PathBuf,
}

impl DirSlotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl SlotStore for DirSlotStore {
    fn read(&self, slot: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, slot: &str, contents: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.slot_path(slot), contents)
    }
}

/// In-memory store for tests and one-shot runs.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: HashMap<String, String>,
}

impl SlotStore for MemorySlotStore {
    fn read(&self, slot: &str) -> io::Result<Option<String>> {
        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, contents: &str) -> io::Result<()> {
        self.slots.insert(slot.to_string(), contents.to_string());
        Ok(())
    }
}
