use crate::error::BoardError;
use std::fmt;

/// Represents a 2D coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

/// What a single board position says about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Tile {
    /// A revealed number: how many of the eight neighbors are armed.
    Clue(u8),
    /// A cell known to be armed (`X`).
    Armed,
    /// Anything else. Unarmed until the solver says otherwise.
    Unknown,
}

impl Tile {
    pub fn from_char(c: char) -> Self {
        match c {
            '0'..='9' => Tile::Clue(c as u8 - b'0'),
            'X' => Tile::Armed,
            _ => Tile::Unknown,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Tile::Clue(n) => char::from(b'0' + n),
            Tile::Armed => 'X',
            Tile::Unknown => '.',
        }
    }
}

/// A rectangular grid of tiles, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
}

impl Board {
    /// Builds a board from rows that are already known to be rectangular.
    ///
    /// Panics if the rows disagree on width; use [`Board::parse`] for untrusted text.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let text = rows.iter().map(|r| r.as_ref()).collect::<Vec<&str>>().join("\n");
        match Self::parse(&text) {
            Ok(board) => board,
            Err(e) => panic!("{}", e),
        }
    }

    /// Parses one row per line. Empty lines are skipped, and every remaining
    /// line must be as wide (in characters) as the first one.
    pub fn parse(text: &str) -> Result<Self, BoardError> {
        let mut width = None;
        let mut height = 0;
        let mut tiles = Vec::new();

        for (i, line) in text.lines().filter(|l| !l.is_empty()).enumerate() {
            let found = line.chars().count();
            let expected = *width.get_or_insert(found);
            if found != expected {
                return Err(BoardError::RaggedRow {
                    line: i + 1,
                    expected,
                    found,
                });
            }
            tiles.extend(line.chars().map(Tile::from_char));
            height += 1;
        }

        Ok(Board {
            width: width.unwrap_or(0),
            height,
            tiles,
        })
    }

    #[inline]
    pub fn tile(&self, at: Point) -> Tile {
        self.tiles[at.y * self.width + at.x]
    }

    #[inline]
    pub fn set_tile(&mut self, at: Point, tile: Tile) {
        self.tiles[at.y * self.width + at.x] = tile;
    }

    pub fn is_clue(&self, at: Point) -> bool {
        matches!(self.tile(at), Tile::Clue(_))
    }

    /// All in-bounds neighbors of `at`, paired with their slot in the
    /// linearized 3x3 neighborhood (row-major, center skipped).
    pub fn neighbors(&self, at: Point) -> impl Iterator<Item = (usize, Point)> + use<> {
        let width = self.width;
        let height = self.height;

        itertools::iproduct!(-1isize..=1, -1isize..=1).filter_map(move |(dy, dx)| {
            if dx == 0 && dy == 0 {
                return None;
            }
            let nx = at.x as isize + dx;
            let ny = at.y as isize + dy;
            if nx < 0 || nx >= width as isize || ny < 0 || ny >= height as isize {
                return None;
            }
            let idx = ((dy + 1) * 3 + (dx + 1)) as usize;
            let slot = if idx > 4 { idx - 1 } else { idx };
            Some((
                slot,
                Point {
                    x: nx as usize,
                    y: ny as usize,
                },
            ))
        })
    }

    /// Deserializes a board from bytes.
    pub fn deserialize(bts: &[u8]) -> anyhow::Result<Self> {
        let board: Board = bcs::from_bytes(bts)?;
        let Some(area) = board.width.checked_mul(board.height) else {
            anyhow::bail!("board_shape: {}x{} overflows", board.width, board.height);
        };
        if board.tiles.len() != area {
            anyhow::bail!(
                "board_shape: {}x{} with {} tiles",
                board.width,
                board.height,
                board.tiles.len()
            );
        }
        if let Some(n) = board.tiles.iter().find_map(|t| match t {
            Tile::Clue(n) if *n > 9 => Some(*n),
            _ => None,
        }) {
            anyhow::bail!("board_clue: {} is not a digit", n);
        }
        Ok(board)
    }

    /// Serializes the board to bytes.
    pub fn serialize(&self) -> anyhow::Result<Vec<u8>> {
        Ok(bcs::to_bytes(self)?)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.width.max(1)) {
            for tile in row {
                write!(f, "{}", tile.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tiles() {
        let board = Board::parse("X1?\n.9 \n").unwrap();
        assert_eq!(board.width, 3);
        assert_eq!(board.height, 2);
        assert_eq!(
            board.tiles,
            vec![
                Tile::Armed,
                Tile::Clue(1),
                Tile::Unknown,
                Tile::Unknown,
                Tile::Clue(9),
                Tile::Unknown,
            ]
        );
    }

    #[test]
    fn test_parse_skips_empty_lines() {
        let board = Board::parse("\n..\n\n1.\n").unwrap();
        assert_eq!(board.height, 2);
        assert_eq!(board.tile(Point { x: 0, y: 1 }), Tile::Clue(1));
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let err = Board::parse("...\n..\n").unwrap_err();
        assert_eq!(
            err,
            BoardError::RaggedRow {
                line: 2,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_parse_empty_input() {
        let board = Board::parse("").unwrap();
        assert_eq!((board.width, board.height), (0, 0));
        assert_eq!(board.to_string(), "");
    }

    #[test]
    fn test_display_normalizes_unknowns() {
        let board = Board::from_rows(&["a1", "X "]);
        assert_eq!(board.to_string(), ".1\nX.\n");
    }

    #[test]
    fn test_neighbors() {
        // Corner, edge and center positions on a 3x3 board.
        let board = Board::from_rows(&["...", "...", "..."]);
        assert_eq!(board.neighbors(Point { x: 0, y: 0 }).count(), 3);
        assert_eq!(board.neighbors(Point { x: 1, y: 0 }).count(), 5);

        let center: Vec<(usize, Point)> = board.neighbors(Point { x: 1, y: 1 }).collect();
        assert_eq!(center.len(), 8);
        let slots: Vec<usize> = center.iter().map(|&(slot, _)| slot).collect();
        assert_eq!(slots, (0..8).collect::<Vec<_>>());
        assert_eq!(center[0].1, Point { x: 0, y: 0 });
        assert_eq!(center[3].1, Point { x: 0, y: 1 });
        assert_eq!(center[4].1, Point { x: 2, y: 1 });
        assert_eq!(center[7].1, Point { x: 2, y: 2 });
    }

    #[test]
    fn test_bytes_roundtrip() {
        let board = Board::from_rows(&["X1", "1."]);
        let bts = board.serialize().unwrap();
        assert_eq!(Board::deserialize(&bts).unwrap(), board);
    }

    #[test]
    fn test_deserialize_rejects_bad_shape() {
        let board = Board {
            width: 3,
            height: 3,
            tiles: vec![Tile::Unknown; 2],
        };
        let bts = board.serialize().unwrap();
        assert!(Board::deserialize(&bts).is_err());
    }

    #[test]
    fn test_deserialize_rejects_non_digit_clue() {
        let board = Board {
            width: 1,
            height: 1,
            tiles: vec![Tile::Clue(250)],
        };
        let bts = board.serialize().unwrap();
        let err = Board::deserialize(&bts).unwrap_err();
        assert!(err.to_string().contains("250"), "{}", err);

        let nine = Board {
            width: 1,
            height: 1,
            tiles: vec![Tile::Clue(9)],
        };
        let bts = nine.serialize().unwrap();
        assert_eq!(Board::deserialize(&bts).unwrap().to_string(), "9\n");
    }

    #[test]
    fn test_deserialize_rejects_overflowing_shape() {
        let board = Board {
            width: usize::MAX,
            height: 2,
            tiles: vec![Tile::Unknown; 2],
        };
        let bts = board.serialize().unwrap();
        assert!(Board::deserialize(&bts).is_err());
    }
}
