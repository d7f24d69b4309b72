use crate::bitset::BitSet;
use crate::score::Scorer;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

/// Picks the bit to flip next, favoring flips that lower the error.
///
/// Each bit is weighted by how much its flip would reduce the score; bits
/// whose flip would not help get zero weight. When nothing helps, the pick is
/// uniform over all bits so the search can still wander off a local optimum.
#[derive(Debug, Default)]
pub struct FlipSelector {
    weights: Vec<u32>,
}

impl FlipSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses a bit of `state`. The state must have at least one bit.
    pub fn select<R: Rng + ?Sized>(
        &mut self,
        scorer: &Scorer,
        state: &BitSet,
        rng: &mut R,
    ) -> usize {
        self.weights.clear();
        self.weights.extend((0..state.len()).map(|bit| {
            let delta = scorer.delta(state, bit);
            if delta < 0 { delta.unsigned_abs() } else { 0 }
        }));

        // An all-zero weight vector is rejected by `WeightedIndex`, which is
        // exactly the case that falls back to a uniform pick.
        match WeightedIndex::<u32>::new(&self.weights) {
            Ok(dist) => dist.sample(rng),
            Err(_) => rng.random_range(0..state.len()),
        }
    }

    /// Weights computed by the last call to [`FlipSelector::select`].
    pub fn weights(&self) -> &[u32] {
        &self.weights
    }
}
