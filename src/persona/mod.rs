//! Persona pool for jury evaluation.
//!
//! Personas come from the newest generated batch, committed seed files, or
//! synthetic variations of the seeds, in that order of preference. A jury is
//! a stratified sample that keeps a minimum share of AI skeptics.

pub mod expand;
pub mod loader;
pub mod registry;
pub mod sample;
pub mod source;
pub mod stats;
pub mod types;

pub use expand::expand_persona;
pub use loader::{JuryDraw, JurySource, PersonaLoader};
pub use registry::ArchetypeRegistry;
pub use sample::{stratified_sample, DEFAULT_SKEPTIC_MINIMUM};
pub use source::{read_persona_file, PersonaPaths};
pub use stats::{get_persona_stats, PersonaStats};
pub use types::{AdoptionStage, Archetype, Persona};
