//! Persona sources on disk: generated batches, committed seeds, archetypes.
//!
//! Resolution and loading are split so callers can decide when to pay for
//! I/O. Seed and archetype loading never fail as a whole: a bad file is
//! logged and skipped.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::registry::ArchetypeRegistry;
use super::types::Persona;

// ─────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────

const GENERATED_DIR: &str = "generated";
const SEEDS_DIR: &str = "seeds";
const ARCHETYPES_DIR: &str = "archetypes";

const BATCH_PREFIX: &str = "batch-";
const SEED_SUFFIX: &str = "-personas.json";

/// Batch file names in order of preference (expanded before raw).
const BATCH_FILES: [&str; 2] = ["all-personas.json", "personas.json"];

// ─────────────────────────────────────────────────────────────────
// Persona Paths
// ─────────────────────────────────────────────────────────────────

/// Directory layout under a personas root.
#[derive(Debug, Clone)]
pub struct PersonaPaths {
    root: PathBuf,
}

impl PersonaPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn generated_dir(&self) -> PathBuf {
        self.root.join(GENERATED_DIR)
    }

    pub fn seeds_dir(&self) -> PathBuf {
        self.root.join(SEEDS_DIR)
    }

    pub fn archetypes_dir(&self) -> PathBuf {
        self.root.join(ARCHETYPES_DIR)
    }

    /// Find the newest generated persona file.
    ///
    /// Batch directories are ordered by name, newest (greatest) first. Within
    /// a batch `all-personas.json` wins over `personas.json`; a batch holding
    /// neither is passed over for the next older one.
    pub fn latest_generated_file(&self) -> Option<PathBuf> {
        let generated = self.generated_dir();
        let entries = match fs::read_dir(&generated) {
            Ok(entries) => entries,
            Err(_) => {
                debug!(path = %generated.display(), "No generated personas directory");
                return None;
            }
        };

        let mut batches: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(BATCH_PREFIX))
            })
            .collect();
        batches.sort_by(|a, b| b.file_name().cmp(&a.file_name()));

        batches.iter().find_map(|batch| {
            BATCH_FILES
                .iter()
                .map(|name| batch.join(name))
                .find(|candidate| candidate.is_file())
        })
    }

    /// Load every `*-personas.json` seed file and concatenate them.
    pub fn load_seeds(&self) -> Vec<Persona> {
        let mut personas = Vec::new();

        for path in matching_files(&self.seeds_dir(), |name| name.ends_with(SEED_SUFFIX)) {
            match read_json::<Vec<Persona>>(&path) {
                Ok(batch) => {
                    debug!(path = %path.display(), count = batch.len(), "Loaded seed file");
                    personas.extend(batch);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Could not load seed file, skipping");
                }
            }
        }

        personas
    }

    /// Load archetype definitions keyed by `archetype_id`.
    pub fn load_archetypes(&self) -> ArchetypeRegistry {
        ArchetypeRegistry::load_dir(&self.archetypes_dir())
    }
}

/// Read a persona list file, as produced by the generation step.
pub fn read_persona_file(path: &Path) -> Result<Vec<Persona>> {
    read_json(path)
}

pub(super) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| Error::IoRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| Error::persona_file_invalid(path, e))
}

/// Regular files in `dir` whose name passes `keep`, sorted by name.
/// A missing or unreadable directory yields nothing.
pub(super) fn matching_files(dir: &Path, keep: impl Fn(&str) -> bool) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.file_name().and_then(|n| n.to_str()).is_some_and(|n| keep(n)))
        .collect();
    files.sort();
    files
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
