use crate::bitset::BitSet;
use crate::graph::Graph;
use crate::index::AdjacencyIndex;

/// Scores bit states against the clues of one graph.
///
/// [`Scorer::delta`] only looks at the (at most eight) clues around the
/// flipped bit, and always agrees with rescoring the whole state.
#[derive(Debug, Clone)]
pub struct Scorer {
    index: AdjacencyIndex,
    targets: Vec<u8>,
}

impl Scorer {
    pub fn new(graph: &Graph) -> Self {
        Scorer {
            index: AdjacencyIndex::new(graph),
            targets: graph.clues.iter().map(|c| c.target).collect(),
        }
    }

    pub fn index(&self) -> &AdjacencyIndex {
        &self.index
    }

    pub fn bit_count(&self) -> usize {
        self.index.bit_count()
    }

    #[inline]
    fn armed_around(&self, clue: usize, state: &BitSet) -> u32 {
        self.index.clue_to_bits[clue]
            .iter()
            .flatten()
            .filter(|&&bit| state.at(bit as usize))
            .count() as u32
    }

    /// Full error of `state`: the graph's error score as if its optimized
    /// cells carried these bits.
    pub fn score(&self, state: &BitSet) -> u32 {
        self.targets
            .iter()
            .enumerate()
            .map(|(clue, &target)| (target as u32).abs_diff(self.armed_around(clue, state)))
            .sum()
    }

    /// Change in [`Scorer::score`] if `bit` were toggled. `state` is untouched.
    pub fn delta(&self, state: &BitSet, bit: usize) -> i32 {
        let armed = state.at(bit);
        let mut delta = 0i32;
        for &clue in self.index.bit_to_clues[bit].iter().flatten() {
            let clue = clue as usize;
            let target = self.targets[clue] as i32;
            let before = self.armed_around(clue, state) as i32;
            let after = if armed { before - 1 } else { before + 1 };
            delta += (target - after).abs() - (target - before).abs();
        }
        delta
    }
}
