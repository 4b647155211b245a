//! Core types for the persona system.
//!
//! Persona records are semi-structured: a handful of known fields are typed,
//! everything else rides along verbatim in a side map so that records written
//! by the generation step survive load, expansion and sampling unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Psychographic key holding the categorical adoption stage.
pub const ADOPTION_STAGE_KEY: &str = "ai_adoption_stage";

// ─────────────────────────────────────────────────────────────────
// Adoption Stage
// ─────────────────────────────────────────────────────────────────

/// The four ordered AI-adoption stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdoptionStage {
    /// Distrusts AI tooling; quota-protected in sampling.
    Skeptic,
    /// Open to trying AI tooling. Also the fallback stratum.
    Curious,
    /// Already uses AI tooling regularly.
    EarlyAdopter,
    /// Builds workflows around AI tooling.
    PowerUser,
}

impl AdoptionStage {
    /// Wire name as it appears in persona JSON.
    pub fn slug(&self) -> &'static str {
        match self {
            AdoptionStage::Skeptic => "skeptic",
            AdoptionStage::Curious => "curious",
            AdoptionStage::EarlyAdopter => "early-adopter",
            AdoptionStage::PowerUser => "power-user",
        }
    }

    /// All stages in adoption order.
    pub fn all() -> &'static [AdoptionStage] {
        &[
            AdoptionStage::Skeptic,
            AdoptionStage::Curious,
            AdoptionStage::EarlyAdopter,
            AdoptionStage::PowerUser,
        ]
    }

    /// Position in adoption order.
    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    /// Stage at the given position, if any.
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::all().get(ordinal).copied()
    }

    /// Stage a missing or unrecognized value is bucketed under.
    pub fn fallback() -> Self {
        AdoptionStage::Curious
    }

    /// Parse a raw psychographics value. Only exact slugs are recognized.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_str().and_then(|s| s.parse().ok())
    }
}

impl fmt::Display for AdoptionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for AdoptionStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skeptic" => Ok(AdoptionStage::Skeptic),
            "curious" => Ok(AdoptionStage::Curious),
            "early-adopter" => Ok(AdoptionStage::EarlyAdopter),
            "power-user" => Ok(AdoptionStage::PowerUser),
            _ => Err(format!(
                "Unknown adoption stage '{}'. Valid: skeptic, curious, early-adopter, power-user",
                s
            )),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Persona
// ─────────────────────────────────────────────────────────────────

/// A synthetic jury member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Unique identifier within a collection.
    pub id: String,

    /// Archetype template this persona was derived from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archetype_id: Option<String>,

    /// Named traits, numeric and categorical, kept in file order.
    #[serde(default)]
    pub psychographics: Map<String, Value>,

    /// Every other field, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Persona {
    /// Create a bare persona with no traits.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            archetype_id: None,
            psychographics: Map::new(),
            extra: Map::new(),
        }
    }

    /// Raw adoption stage value, whatever its shape.
    pub fn adoption_stage_value(&self) -> Option<&Value> {
        self.psychographics.get(ADOPTION_STAGE_KEY)
    }

    /// Recognized adoption stage, `None` when missing or unrecognized.
    pub fn adoption_stage(&self) -> Option<AdoptionStage> {
        self.adoption_stage_value().and_then(AdoptionStage::from_value)
    }

    /// Stratum used for sampling; unrecognized values fall back to curious.
    pub fn stratum(&self) -> AdoptionStage {
        self.adoption_stage().unwrap_or_else(AdoptionStage::fallback)
    }

    /// Overwrite the adoption stage.
    pub fn set_adoption_stage(&mut self, stage: AdoptionStage) {
        self.psychographics.insert(
            ADOPTION_STAGE_KEY.to_string(),
            Value::String(stage.slug().to_string()),
        );
    }

    /// Numeric trait value, `None` when absent or not a number.
    pub fn trait_value(&self, name: &str) -> Option<f64> {
        self.psychographics.get(name).and_then(Value::as_f64)
    }

    /// Builder-style trait setter, used mostly by fixtures.
    pub fn with_trait(mut self, name: &str, value: f64) -> Self {
        if let Some(number) = serde_json::Number::from_f64(value) {
            self.psychographics
                .insert(name.to_string(), Value::Number(number));
        }
        self
    }

    /// Builder-style stage setter.
    pub fn with_stage(mut self, stage: AdoptionStage) -> Self {
        self.set_adoption_stage(stage);
        self
    }

    /// Builder-style archetype setter.
    pub fn with_archetype(mut self, archetype_id: impl Into<String>) -> Self {
        self.archetype_id = Some(archetype_id.into());
        self
    }
}

// ─────────────────────────────────────────────────────────────────
// Archetype
// ─────────────────────────────────────────────────────────────────

/// A template category personas may reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    /// Registry key.
    pub archetype_id: String,

    /// Template payload.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
