use crate::board::{Board, Point, Tile};
use std::collections::HashMap;
use std::fmt;

/// A grid position whose armed state is either given or up for optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub at: Point,
    pub armed: bool,
}

/// A revealed number and the cells it counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    pub at: Point,
    /// How many of the neighbors should be armed.
    pub target: u8,
    /// Indices into [`Graph::cells`], one slot per position of the 3x3
    /// neighborhood. Out-of-bounds positions and other clues stay `None`.
    pub neighbors: [Option<usize>; 8],
}

impl Clue {
    /// Counts armed neighbors using the graph's cell flags.
    pub fn armed_neighbors(&self, cells: &[Cell]) -> u32 {
        self.neighbors
            .iter()
            .flatten()
            .filter(|&&idx| cells[idx].armed)
            .count() as u32
    }

    /// Absolute deviation between the target and `armed`.
    #[inline]
    pub fn error(&self, armed: u32) -> u32 {
        (self.target as u32).abs_diff(armed)
    }
}

/// The constraint graph: clues in scan order plus every cell that is either
/// adjacent to a clue or known to be armed.
///
/// Cells live in an append-only vector and clues refer to them by index, so
/// the topology never changes after [`Graph::from_board`] returns. Only the
/// `armed` flags are mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    pub width: usize,
    pub height: usize,
    pub clues: Vec<Clue>,
    pub cells: Vec<Cell>,
}

impl Graph {
    /// Scans the board row by row and links each clue to its non-clue neighbors.
    pub fn from_board(board: &Board) -> Self {
        let mut clues = Vec::new();
        let mut cells: Vec<Cell> = Vec::new();
        let mut lookup: HashMap<Point, usize> = HashMap::new();

        // Registers the cell at `at`, refreshing its flag from the board if it
        // was seen before. Returns its index.
        let mut ensure_cell = |at: Point, armed: bool| -> usize {
            let idx = *lookup.entry(at).or_insert_with(|| {
                cells.push(Cell { at, armed });
                cells.len() - 1
            });
            cells[idx].armed = armed;
            idx
        };

        for y in 0..board.height {
            for x in 0..board.width {
                let at = Point { x, y };
                match board.tile(at) {
                    Tile::Armed => {
                        ensure_cell(at, true);
                    }
                    Tile::Clue(target) => {
                        let mut neighbors = [None; 8];
                        for (slot, n) in board.neighbors(at) {
                            if board.is_clue(n) {
                                continue;
                            }
                            let armed = board.tile(n) == Tile::Armed;
                            neighbors[slot] = Some(ensure_cell(n, armed));
                        }
                        clues.push(Clue {
                            at,
                            target,
                            neighbors,
                        });
                    }
                    Tile::Unknown => {}
                }
            }
        }

        Graph {
            width: board.width,
            height: board.height,
            clues,
            cells,
        }
    }

    /// Sum over all clues of `|target - armed neighbors|`. Zero means every
    /// clue is satisfied.
    pub fn error_score(&self) -> u32 {
        self.clues
            .iter()
            .map(|clue| clue.error(clue.armed_neighbors(&self.cells)))
            .sum()
    }

    /// Resolves every position: clues keep their digit, armed cells become
    /// `Armed` and everything else `Unknown`.
    pub fn to_board(&self) -> Board {
        let mut board = Board {
            width: self.width,
            height: self.height,
            tiles: vec![Tile::Unknown; self.width * self.height],
        };
        for cell in self.cells.iter().filter(|c| c.armed) {
            board.set_tile(cell.at, Tile::Armed);
        }
        for clue in &self.clues {
            board.set_tile(clue.at, Tile::Clue(clue.target));
        }
        board
    }

    pub fn armed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.armed).count()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_board(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated(clue: &Clue) -> usize {
        clue.neighbors.iter().flatten().count()
    }

    #[test]
    fn test_number_board() {
        let graph = Graph::from_board(&Board::from_rows(&[".11", "...", "..."]));
        assert_eq!(graph.width, 3);
        assert_eq!(graph.height, 3);
        assert_eq!(graph.clues.len(), 2);
        assert_eq!(graph.cells.len(), 4);

        // The left clue sees four cells, the right one is boxed in by the
        // other clue and the board edge.
        assert_eq!(populated(&graph.clues[0]), 4);
        assert_eq!(populated(&graph.clues[1]), 2);
    }

    #[test]
    fn test_all_armed() {
        let graph = Graph::from_board(&Board::from_rows(&["XX", "XX"]));
        assert_eq!(graph.cells.len(), 4);
        assert!(graph.cells.iter().all(|c| c.armed));
        assert!(graph.clues.is_empty());
        assert_eq!(graph.error_score(), 0);
    }

    #[test]
    fn test_clues_only() {
        let graph = Graph::from_board(&Board::from_rows(&["123"]));
        let targets: Vec<u8> = graph.clues.iter().map(|c| c.target).collect();
        assert_eq!(targets, vec![1, 2, 3]);
        assert!(graph.cells.is_empty());
        assert_eq!(graph.error_score(), 6);
    }

    #[test]
    fn test_neighbor_linking() {
        let graph = Graph::from_board(&Board::from_rows(&["X.X", ".3.", "..."]));
        assert_eq!(graph.clues.len(), 1);
        let clue = &graph.clues[0];
        assert_eq!(clue.at, Point { x: 1, y: 1 });
        assert_eq!(clue.target, 3);
        assert_eq!(populated(clue), 8);
        assert_eq!(clue.armed_neighbors(&graph.cells), 2);
        assert_eq!(graph.error_score(), 1);
    }

    #[test]
    fn test_shared_cells_are_deduplicated() {
        // Both clues see the middle column; each position is one cell.
        let graph = Graph::from_board(&Board::from_rows(&["1.1", "..."]));
        assert_eq!(graph.clues.len(), 2);
        assert_eq!(graph.cells.len(), 4);
        assert_eq!(
            graph.clues[0].neighbors[4], graph.clues[1].neighbors[3],
            "the top-middle cell is shared"
        );
        let mut seen: Vec<Point> = graph.cells.iter().map(|c| c.at).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), graph.cells.len());
    }

    #[test]
    fn test_standalone_armed_cell() {
        let graph = Graph::from_board(&Board::from_rows(&["1..", "..X"]));
        assert_eq!(graph.cells.len(), 4);
        let lone = graph
            .cells
            .iter()
            .find(|c| c.at == Point { x: 2, y: 1 })
            .unwrap();
        assert!(lone.armed);
        assert!(
            graph.clues[0]
                .neighbors
                .iter()
                .flatten()
                .all(|&i| graph.cells[i].at != lone.at)
        );
    }

    #[test]
    fn test_revisited_cell_keeps_board_flag() {
        let graph = Graph::from_board(&Board::from_rows(&["1X1"]));
        assert_eq!(graph.cells.len(), 1);
        assert!(graph.cells[0].armed);
        assert_eq!(graph.error_score(), 0);
    }

    #[test]
    fn test_dump() {
        let graph = Graph::from_board(&Board::from_rows(&["X1", "1."]));
        assert_eq!(graph.to_string(), "X1\n1.\n");
    }

    #[test]
    fn test_empty_board() {
        let board = Board::from_rows(&["..", ".."]);
        let graph = Graph::from_board(&board);
        assert!(graph.cells.is_empty());
        assert!(graph.clues.is_empty());
        assert_eq!(graph.to_string(), "..\n..\n");
    }

    #[test]
    fn test_dump_reflects_flag_changes() {
        let mut graph = Graph::from_board(&Board::from_rows(&["1.", ".."]));
        assert_eq!(graph.armed_count(), 0);
        let idx = graph.clues[0].neighbors[7].unwrap();
        graph.cells[idx].armed = true;
        assert_eq!(graph.to_string(), "1.\n.X\n");
        assert_eq!(graph.error_score(), 0);
    }
}
