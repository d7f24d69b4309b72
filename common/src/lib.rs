pub mod bitset;
pub mod board;
pub mod error;
pub mod generate;
pub mod graph;
pub mod index;
pub mod lahc;
pub mod score;
pub mod select;

pub use bitset::BitSet;
pub use board::{Board, Point, Tile};
pub use error::{BoardError, ConfigError};
pub use generate::{Puzzle, random_puzzle};
pub use graph::{Cell, Clue, Graph};
pub use index::AdjacencyIndex;
pub use lahc::{Lahc, SolveOptions, SolveReport, Termination, solve};
pub use score::Scorer;
pub use select::FlipSelector;
