//! Synthetic expansion: light variations of seed personas.

use rand::Rng;
use serde_json::{Number, Value};

use super::registry::ArchetypeRegistry;
use super::types::{AdoptionStage, Persona};

/// Numeric psychographic traits that get perturbed.
pub const PERTURBED_TRAITS: [&str; 5] = [
    "trust_in_ai",
    "tool_fatigue",
    "patience_for_learning",
    "complexity_tolerance",
    "migration_sensitivity",
];

/// Maximum absolute delta applied to a trait.
pub const TRAIT_VARIANCE: f64 = 0.15;

/// Chance that the adoption stage moves one step.
pub const STAGE_NUDGE_PROBABILITY: f64 = 0.10;

/// Id given to the `index`-th expansion of `seed_id`.
pub fn expanded_id(seed_id: &str, index: usize) -> String {
    format!("expanded_{}_{}", seed_id, index)
}

/// Create a light variation of a seed persona.
///
/// The result is an independent copy with a new id, each of
/// [`PERTURBED_TRAITS`] shifted by up to ±[`TRAIT_VARIANCE`] (clamped to
/// `[0, 1]`, two decimals) and, with probability
/// [`STAGE_NUDGE_PROBABILITY`], the adoption stage moved to a neighbor.
///
/// Draw order is fixed (one delta per present numeric trait, then the nudge
/// roll, then the direction roll for interior stages), so identically seeded
/// generators give identical personas.
pub fn expand_persona<R: Rng>(
    seed: &Persona,
    index: usize,
    _archetypes: &ArchetypeRegistry,
    rng: &mut R,
) -> Persona {
    let mut persona = seed.clone();
    persona.id = expanded_id(&seed.id, index);

    for name in PERTURBED_TRAITS {
        let Some(current) = persona.trait_value(name) else {
            continue;
        };
        let delta = rng.random_range(-TRAIT_VARIANCE..=TRAIT_VARIANCE);
        if let Some(number) = Number::from_f64(perturb(current, delta)) {
            persona
                .psychographics
                .insert(name.to_string(), Value::Number(number));
        }
    }

    if rng.random::<f64>() < STAGE_NUDGE_PROBABILITY {
        // A missing stage counts as curious; present but unknown values stay put.
        let current = match persona.adoption_stage_value() {
            None => Some(AdoptionStage::Curious),
            Some(value) => AdoptionStage::from_value(value),
        };
        if let Some(stage) = current {
            persona.set_adoption_stage(nudge_stage(stage, rng));
        }
    }

    persona
}

/// Apply `delta`, clamp to `[0, 1]` and round to two decimals.
pub fn perturb(value: f64, delta: f64) -> f64 {
    round2((value + delta).clamp(0.0, 1.0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Move one step along the adoption order.
///
/// The end stages can only move inward; interior stages pick a side with
/// equal probability.
pub fn nudge_stage<R: Rng>(stage: AdoptionStage, rng: &mut R) -> AdoptionStage {
    let last = AdoptionStage::all().len() - 1;
    let ordinal = stage.ordinal();
    let next = if ordinal == 0 {
        1
    } else if ordinal == last {
        last - 1
    } else if rng.random_bool(0.5) {
        ordinal - 1
    } else {
        ordinal + 1
    };
    AdoptionStage::from_ordinal(next).unwrap_or(stage)
}
