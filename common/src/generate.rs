use crate::board::{Board, Point, Tile};
use rand::Rng;

/// A generated board together with the mine layout it was derived from.
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub board: Board,
    /// Row-major, `true` where a mine was placed. Always a zero-error answer
    /// for `board`.
    pub mines: Vec<bool>,
}

impl Puzzle {
    pub fn mine_count(&self) -> usize {
        self.mines.iter().filter(|&&m| m).count()
    }

    /// The board with every mine shown as an armed tile.
    pub fn solution(&self) -> Board {
        let mut board = self.board.clone();
        for (tile, &mine) in board.tiles.iter_mut().zip(&self.mines) {
            if mine {
                *tile = Tile::Armed;
            }
        }
        board
    }
}

/// Places a mine on each position with probability `density`, then hides the
/// mines and numbers every other position by its adjacent mine count. Zeroes
/// are left blank. `density` is clamped to `[0, 1]`; NaN places no mines.
pub fn random_puzzle<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    density: f64,
    rng: &mut R,
) -> Puzzle {
    let p = if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, 1.0)
    };
    let mines: Vec<bool> = (0..width * height)
        .map(|_| rng.random_bool(p))
        .collect();

    let mut board = Board {
        width,
        height,
        tiles: vec![Tile::Unknown; width * height],
    };

    for y in 0..height {
        for x in 0..width {
            let at = Point { x, y };
            if mines[y * width + x] {
                continue;
            }
            let count = board
                .neighbors(at)
                .filter(|&(_, n)| mines[n.y * width + n.x])
                .count() as u8;
            if count > 0 {
                board.set_tile(at, Tile::Clue(count));
            }
        }
    }

    Puzzle { board, mines }
}
