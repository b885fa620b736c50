use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::recovery::{self, RecoveryEntry};

/// Slot name holding the full card collection.
pub const CARDS_SLOT: &str = "cards";

/// Slot name holding the full category collection.
pub const CATEGORIES_SLOT: &str = "categories";

/// Durable key-value storage port for the card store.
///
/// Each named slot holds one full JSON-serialized collection; the store
/// rewrites a whole slot on every mutation of that collection.
pub trait Slots {
    /// Raw contents of a named slot, `None` when absent or unreadable.
    fn read(&self, slot: &str) -> Option<String>;

    /// Durably replace the full contents of a named slot.
    fn write(&mut self, slot: &str, contents: &str) -> io::Result<()>;

    /// Record data that could not be handled normally. Default: discard.
    fn log_recovery(&self, _entry: RecoveryEntry) {}
}

/// File-backed slots: each slot is a `<name>.json` file in one directory,
/// written atomically, with the recovery log kept alongside.
#[derive(Debug)]
pub struct JsonFileSlots {
    dir: PathBuf,
}

impl JsonFileSlots {
    pub fn new(dir: impl Into<PathBuf>) -> JsonFileSlots {
        JsonFileSlots { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl Slots for JsonFileSlots {
    fn read(&self, slot: &str) -> Option<String> {
        std::fs::read_to_string(self.slot_path(slot)).ok()
    }

    fn write(&mut self, slot: &str, contents: &str) -> io::Result<()> {
        recovery::atomic_write(&self.slot_path(slot), contents.as_bytes())
    }

    fn log_recovery(&self, entry: RecoveryEntry) {
        recovery::log_recovery(&self.dir, entry);
    }
}

/// In-memory slots for tests and throwaway sessions. Nothing survives drop;
/// recovery entries are discarded.
#[derive(Debug, Default)]
pub struct MemorySlots {
    map: HashMap<String, String>,
}

impl MemorySlots {
    pub fn new() -> MemorySlots {
        MemorySlots::default()
    }

    /// Pre-seed a slot, as if a prior session had written it.
    pub fn seed(mut self, slot: &str, contents: &str) -> MemorySlots {
        self.map.insert(slot.to_string(), contents.to_string());
        self
    }
}

impl Slots for MemorySlots {
    fn read(&self, slot: &str) -> Option<String> {
        self.map.get(slot).cloned()
    }

    fn write(&mut self, slot: &str, contents: &str) -> io::Result<()> {
        self.map.insert(slot.to_string(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_slots_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut slots = JsonFileSlots::new(dir.path());

        assert!(slots.read(CARDS_SLOT).is_none());
        slots.write(CARDS_SLOT, "[]").unwrap();
        assert_eq!(slots.read(CARDS_SLOT).as_deref(), Some("[]"));

        // Slots are independent files.
        assert!(slots.read(CATEGORIES_SLOT).is_none());
        assert!(dir.path().join("cards.json").exists());
    }

    #[test]
    fn file_slots_overwrite_whole_slot() {
        let dir = TempDir::new().unwrap();
        let mut slots = JsonFileSlots::new(dir.path());
        slots.write(CARDS_SLOT, "[1,2,3]").unwrap();
        slots.write(CARDS_SLOT, "[]").unwrap();
        assert_eq!(slots.read(CARDS_SLOT).as_deref(), Some("[]"));
    }

    #[test]
    fn memory_slots_seed_and_read() {
        let slots = MemorySlots::new().seed(CATEGORIES_SLOT, "[]");
        assert_eq!(slots.read(CATEGORIES_SLOT).as_deref(), Some("[]"));
        assert!(slots.read(CARDS_SLOT).is_none());
    }
}
