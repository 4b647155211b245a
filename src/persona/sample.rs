//! Stratified jury sampling with a protected skeptic quota.

use rand::seq::{index, SliceRandom};
use rand::Rng;

use super::types::{AdoptionStage, Persona};

/// Default minimum share of skeptics in a sampled jury.
pub const DEFAULT_SKEPTIC_MINIMUM: f64 = 0.15;

/// Pool positions grouped by adoption stratum, in adoption order.
#[derive(Debug, Default, Clone)]
pub struct Strata {
    buckets: [Vec<usize>; 4],
}

impl Strata {
    /// Partition a pool; missing or unrecognized stages land with curious.
    pub fn partition(pool: &[Persona]) -> Self {
        let mut strata = Self::default();
        for (position, persona) in pool.iter().enumerate() {
            strata.buckets[persona.stratum().ordinal()].push(position);
        }
        strata
    }

    /// Pool positions in the given stratum.
    pub fn positions(&self, stage: AdoptionStage) -> &[usize] {
        &self.buckets[stage.ordinal()]
    }
}

/// Number of skeptic seats a jury of `size` must try to fill.
pub fn required_skeptics(size: usize, skeptic_minimum: f64) -> usize {
    let floor = (size as f64 * skeptic_minimum).floor();
    (floor.max(0.0) as usize).max(1)
}

/// Sample `size` personas, guaranteeing skeptic representation.
///
/// When the pool is no larger than `size` it is returned whole. Otherwise up
/// to [`required_skeptics`] are drawn from the skeptic stratum, the remaining
/// seats are filled from everyone not yet chosen (unchosen skeptics
/// included), and the jury order is shuffled. Exclusion is by pool position,
/// so duplicate records are treated as distinct members.
///
/// An empty skeptic stratum leaves the quota unmet without error.
pub fn stratified_sample<R: Rng>(
    pool: &[Persona],
    size: usize,
    skeptic_minimum: f64,
    rng: &mut R,
) -> Vec<Persona> {
    if pool.len() <= size {
        return pool.to_vec();
    }

    let strata = Strata::partition(pool);
    let skeptics = strata.positions(AdoptionStage::Skeptic);

    let mut chosen = vec![false; pool.len()];
    let mut jury: Vec<usize> = Vec::with_capacity(size);

    let skeptic_seats = required_skeptics(size, skeptic_minimum).min(skeptics.len());
    for pick in index::sample(rng, skeptics.len(), skeptic_seats).into_iter() {
        let position = skeptics[pick];
        chosen[position] = true;
        jury.push(position);
    }

    let remaining = size.saturating_sub(jury.len());
    let others: Vec<usize> = (0..pool.len()).filter(|&p| !chosen[p]).collect();
    if remaining > 0 && !others.is_empty() {
        let amount = remaining.min(others.len());
        jury.extend(index::sample(rng, others.len(), amount).into_iter().map(|i| others[i]));
    }

    jury.shuffle(rng);
    jury.truncate(size);
    jury.into_iter().map(|position| pool[position].clone()).collect()
}
