//! Shared fixtures: a personas root laid out on disk in a temp directory.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

/// A temporary personas root holding generated/, seeds/ and archetypes/.
pub struct PersonaTree {
    temp_dir: TempDir,
    root: PathBuf,
}

impl PersonaTree {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("personas");
        fs::create_dir_all(&root).unwrap();
        Self { temp_dir, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn root_str(&self) -> &str {
        self.root.to_str().unwrap()
    }

    /// The enclosing temp directory, for use as a working directory.
    pub fn workdir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write_seeds(&self, file_name: &str, personas: &[Value]) -> PathBuf {
        self.write(&self.root.join("seeds").join(file_name), personas)
    }

    pub fn write_batch(&self, batch: &str, file_name: &str, personas: &[Value]) -> PathBuf {
        let path = self.root.join("generated").join(batch).join(file_name);
        self.write(&path, personas)
    }

    pub fn write_archetype(&self, archetype_id: &str) -> PathBuf {
        let path = self
            .root
            .join("archetypes")
            .join(format!("{}.json", archetype_id));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            json!({"archetype_id": archetype_id, "label": archetype_id}).to_string(),
        )
        .unwrap();
        path
    }

    fn write(&self, path: &Path, personas: &[Value]) -> PathBuf {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, serde_json::to_string_pretty(personas).unwrap()).unwrap();
        path.to_path_buf()
    }
}

/// A persona record as the generation step writes it.
pub fn persona(id: &str, archetype: &str, stage: &str) -> Value {
    json!({
        "id": id,
        "archetype_id": archetype,
        "name": format!("Persona {}", id),
        "demographics": {"role": "engineer", "company_size": "50-200"},
        "psychographics": {
            "ai_adoption_stage": stage,
            "trust_in_ai": 0.5,
            "tool_fatigue": 0.4,
            "patience_for_learning": 0.6,
            "complexity_tolerance": 0.3,
            "migration_sensitivity": 0.7
        }
    })
}

/// `skeptics` skeptic personas followed by `others` spread over the other stages.
pub fn personas(prefix: &str, skeptics: usize, others: usize) -> Vec<Value> {
    let stages = ["curious", "early-adopter", "power-user"];
    (0..skeptics)
        .map(|i| persona(&format!("{}-sk-{}", prefix, i), "ops-lead", "skeptic"))
        .chain((0..others).map(|i| {
            persona(&format!("{}-{}", prefix, i), "product-manager", stages[i % stages.len()])
        }))
        .collect()
}
