//! Archetype templates loaded from `archetypes/*.json`.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use super::source::{matching_files, read_json};
use super::types::Archetype;

/// Archetype templates indexed by `archetype_id`.
///
/// Expansion receives the registry so variation can later be bounded per
/// archetype; today it is informational only.
#[derive(Debug, Clone, Default)]
pub struct ArchetypeRegistry {
    archetypes: BTreeMap<String, Archetype>,
}

impl ArchetypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` file in `dir`, one archetype per file.
    ///
    /// Unreadable files, malformed JSON and records without an `archetype_id`
    /// are skipped with a warning. A missing directory yields an empty registry.
    pub fn load_dir(dir: &Path) -> Self {
        let mut registry = Self::new();

        for path in matching_files(dir, |name| name.ends_with(".json")) {
            match read_json::<Archetype>(&path) {
                Ok(archetype) => {
                    debug!(
                        path = %path.display(),
                        archetype = %archetype.archetype_id,
                        "Loaded archetype"
                    );
                    registry.insert(archetype);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Could not load archetype, skipping");
                }
            }
        }

        registry
    }

    /// Insert an archetype, replacing any previous one with the same id.
    pub fn insert(&mut self, archetype: Archetype) {
        self.archetypes
            .insert(archetype.archetype_id.clone(), archetype);
    }

    pub fn get(&self, archetype_id: &str) -> Option<&Archetype> {
        self.archetypes.get(archetype_id)
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// Archetype ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.archetypes.keys().map(String::as_str)
    }
}
