//! Jury assembly: picks the best available persona source and samples from it.
//!
//! Priority:
//! 1. Generated personas (latest batch in `generated/`), if sufficient
//! 2. Generated plus committed seeds
//! 3. Seeds alone, expanded when there are too few

use std::fmt;
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

use super::expand::expand_persona;
use super::sample::stratified_sample;
use super::source::{read_persona_file, PersonaPaths};
use super::types::Persona;

// ─────────────────────────────────────────────────────────────────
// Draw Result
// ─────────────────────────────────────────────────────────────────

/// Which source a jury was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JurySource {
    /// A generated batch held enough personas on its own.
    Generated,
    /// A short generated batch was topped up with seeds.
    GeneratedWithSeeds,
    /// No generated batch; seeds only.
    Seeds,
}

impl fmt::Display for JurySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JurySource::Generated => write!(f, "generated"),
            JurySource::GeneratedWithSeeds => write!(f, "generated+seeds"),
            JurySource::Seeds => write!(f, "seeds"),
        }
    }
}

/// A sampled jury and how it was assembled.
#[derive(Debug, Clone)]
pub struct JuryDraw {
    pub personas: Vec<Persona>,
    pub source: JurySource,
    /// Generated file that contributed, if any.
    pub generated_file: Option<PathBuf>,
    /// Seed personas loaded.
    pub seed_count: usize,
    /// Personas synthesized by expansion.
    pub expanded_count: usize,
}

// ─────────────────────────────────────────────────────────────────
// Persona Loader
// ─────────────────────────────────────────────────────────────────

/// Resolves persona sources under a root directory and draws juries.
pub struct PersonaLoader {
    paths: PersonaPaths,
}

impl PersonaLoader {
    /// Create a loader for a personas root (holding generated/, seeds/, archetypes/).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            paths: PersonaPaths::new(root),
        }
    }

    pub fn root(&self) -> &Path {
        self.paths.root()
    }

    pub fn paths(&self) -> &PersonaPaths {
        &self.paths
    }

    /// Load personas for jury evaluation using the best available source.
    ///
    /// Fails only when neither a generated batch nor any seed persona exists.
    pub fn load_personas_for_jury<R: Rng>(
        &self,
        jury_size: usize,
        skeptic_minimum: f64,
        rng: &mut R,
    ) -> Result<Vec<Persona>> {
        self.draw_jury(jury_size, skeptic_minimum, rng)
            .map(|draw| draw.personas)
    }

    /// Like [`load_personas_for_jury`](Self::load_personas_for_jury), also
    /// reporting where the jury came from.
    pub fn draw_jury<R: Rng>(
        &self,
        jury_size: usize,
        skeptic_minimum: f64,
        rng: &mut R,
    ) -> Result<JuryDraw> {
        let generated = self.load_generated();

        if let Some((ref file, ref personas)) = generated {
            if personas.len() >= jury_size {
                info!(
                    file = %file.display(),
                    available = personas.len(),
                    jury_size,
                    "Using generated personas"
                );
                return Ok(JuryDraw {
                    personas: stratified_sample(personas, jury_size, skeptic_minimum, rng),
                    source: JurySource::Generated,
                    generated_file: Some(file.clone()),
                    seed_count: 0,
                    expanded_count: 0,
                });
            }
            warn!(
                available = personas.len(),
                jury_size,
                "Generated batch too small, supplementing with seeds"
            );
        }

        let seeds = self.paths.load_seeds();
        let (generated_file, mut pool, source) = match generated {
            Some((file, personas)) => (Some(file), personas, JurySource::GeneratedWithSeeds),
            None if seeds.is_empty() => return Err(Error::no_personas(self.paths.root())),
            None => (None, Vec::new(), JurySource::Seeds),
        };
        info!(
            count = seeds.len(),
            dir = %self.paths.seeds_dir().display(),
            "Loaded seed personas"
        );
        pool.extend(seeds.iter().cloned());

        let mut expanded_count = 0;
        if pool.len() < jury_size {
            if seeds.is_empty() {
                // Nothing to expand from; return what the generated batch offers.
                warn!(
                    available = pool.len(),
                    jury_size,
                    "No seed personas to expand from, jury will be short"
                );
            } else {
                let needed = jury_size - pool.len();
                let archetypes = self.paths.load_archetypes();
                info!(needed, archetypes = archetypes.len(), "Expanding personas from seeds");

                for index in 0..needed {
                    let seed = &seeds[rng.random_range(0..seeds.len())];
                    pool.push(expand_persona(seed, index, &archetypes, rng));
                }
                expanded_count = needed;
            }
        }

        debug!(pool = pool.len(), jury_size, "Sampling jury");
        Ok(JuryDraw {
            personas: stratified_sample(&pool, jury_size, skeptic_minimum, rng),
            source,
            generated_file,
            seed_count: seeds.len(),
            expanded_count,
        })
    }

    /// Resolve and read the latest generated batch. Read failures are logged
    /// and treated as if no batch existed.
    fn load_generated(&self) -> Option<(PathBuf, Vec<Persona>)> {
        let file = self.paths.latest_generated_file()?;
        match read_persona_file(&file) {
            Ok(personas) => {
                debug!(file = %file.display(), count = personas.len(), "Read generated batch");
                Some((file, personas))
            }
            Err(e) => {
                warn!(file = %file.display(), error = %e, "Could not load generated batch, ignoring");
                None
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
