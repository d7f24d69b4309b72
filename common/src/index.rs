use crate::bitset::BitSet;
use crate::graph::Graph;

/// Both directions of the clue/cell adjacency, expressed in bit indices.
///
/// Every cell adjacent to at least one clue gets a bit index, in order of first
/// appearance while walking the clues' neighbor slots. Cells no clue can see
/// (standalone `X` tiles) get none and are never touched by the search.
#[derive(Debug, Clone)]
pub struct AdjacencyIndex {
    /// Per clue, the bit index behind each of its eight neighbor slots.
    pub clue_to_bits: Vec<[Option<u32>; 8]>,
    /// Per bit, the clues that count it. A cell has at most eight.
    pub bit_to_clues: Vec<[Option<u32>; 8]>,
    /// Per bit, the index of the owning cell in [`Graph::cells`].
    pub bit_to_cell: Vec<usize>,
}

impl AdjacencyIndex {
    pub fn new(graph: &Graph) -> Self {
        let mut cell_to_bit: Vec<Option<u32>> = vec![None; graph.cells.len()];
        let mut bit_to_cell = Vec::new();
        let mut clue_to_bits = Vec::with_capacity(graph.clues.len());

        for clue in &graph.clues {
            let mut slots = [None; 8];
            for (slot, neighbor) in slots.iter_mut().zip(clue.neighbors) {
                if let Some(cell) = neighbor {
                    let bit = *cell_to_bit[cell].get_or_insert_with(|| {
                        bit_to_cell.push(cell);
                        (bit_to_cell.len() - 1) as u32
                    });
                    *slot = Some(bit);
                }
            }
            clue_to_bits.push(slots);
        }

        let mut bit_to_clues = vec![[None; 8]; bit_to_cell.len()];
        for (clue, bits) in clue_to_bits.iter().enumerate() {
            for &bit in bits.iter().flatten() {
                let free = bit_to_clues[bit as usize]
                    .iter_mut()
                    .find(|slot| slot.is_none())
                    .unwrap_or_else(|| panic!("bit {} is adjacent to more than 8 clues", bit));
                *free = Some(clue as u32);
            }
        }

        AdjacencyIndex {
            clue_to_bits,
            bit_to_clues,
            bit_to_cell,
        }
    }

    /// Number of optimized cells.
    pub fn bit_count(&self) -> usize {
        self.bit_to_cell.len()
    }

    /// Snapshot of the graph's current flags, one bit per optimized cell.
    pub fn read_state(&self, graph: &Graph) -> BitSet {
        let mut state = BitSet::new(self.bit_count());
        for (bit, &cell) in self.bit_to_cell.iter().enumerate() {
            state.set(bit, graph.cells[cell].armed);
        }
        state
    }

    /// Copies `state` back onto the owning cells' flags.
    pub fn write_state(&self, state: &BitSet, graph: &mut Graph) {
        for (bit, &cell) in self.bit_to_cell.iter().enumerate() {
            graph.cells[cell].armed = state.at(bit);
        }
    }
}
