//! Persona loading and stratified jury sampling for jury evaluations.
//!
//! ```no_run
//! use jury_personas::persona::{get_persona_stats, PersonaLoader, DEFAULT_SKEPTIC_MINIMUM};
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let loader = PersonaLoader::new("personas");
//! let mut rng = SmallRng::seed_from_u64(42);
//! let jury = loader.load_personas_for_jury(100, DEFAULT_SKEPTIC_MINIMUM, &mut rng)?;
//! println!("{}", get_persona_stats(&jury));
//! # Ok::<(), jury_personas::error::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod persona;
pub mod version;

pub use error::{Error, Result};
