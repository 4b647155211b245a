//! Distribution summaries over a persona collection.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::Persona;

/// Key used when a grouping field is missing.
pub const UNKNOWN_KEY: &str = "unknown";

/// Count and share of one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatBucket {
    pub count: usize,
    /// Percentage of the total, one decimal.
    pub percent: f64,
}

/// Summary of a persona collection.
///
/// An empty collection carries only `total`, so it serializes as
/// `{"total":0}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonaStats {
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_archetype: Option<BTreeMap<String, StatBucket>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_adoption: Option<BTreeMap<String, StatBucket>>,
}

/// Compute counts and percentages by archetype and adoption stage.
pub fn get_persona_stats(personas: &[Persona]) -> PersonaStats {
    let total = personas.len();
    if total == 0 {
        return PersonaStats::default();
    }

    let mut by_archetype: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_adoption: BTreeMap<String, usize> = BTreeMap::new();

    for persona in personas {
        let archetype = persona
            .archetype_id
            .clone()
            .unwrap_or_else(|| UNKNOWN_KEY.to_string());
        *by_archetype.entry(archetype).or_default() += 1;

        let adoption = persona
            .adoption_stage_value()
            .map(stage_key)
            .unwrap_or_else(|| UNKNOWN_KEY.to_string());
        *by_adoption.entry(adoption).or_default() += 1;
    }

    PersonaStats {
        total,
        by_archetype: Some(to_buckets(by_archetype, total)),
        by_adoption: Some(to_buckets(by_adoption, total)),
    }
}

/// Strings are used as-is; anything else is keyed by its JSON text.
fn stage_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn to_buckets(counts: BTreeMap<String, usize>, total: usize) -> BTreeMap<String, StatBucket> {
    counts
        .into_iter()
        .map(|(key, count)| {
            let percent = round1(count as f64 / total as f64 * 100.0);
            (key, StatBucket { count, percent })
        })
        .collect()
}

/// One decimal, exact halves to even.
fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

impl fmt::Display for PersonaStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Loaded {} personas", self.total)?;

        let groups = [
            ("By archetype", &self.by_archetype),
            ("By AI adoption", &self.by_adoption),
        ];
        for (title, group) in groups {
            let Some(buckets) = group else { continue };
            writeln!(f)?;
            writeln!(f, "{}:", title)?;
            for (key, bucket) in buckets {
                writeln!(f, "  - {}: {} ({:.1}%)", key, bucket.count, bucket.percent)?;
            }
        }

        Ok(())
    }
}
