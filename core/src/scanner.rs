use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Cell indices of a match, in the order the word is read.
pub type Pattern = SmallVec<[CellIndex; 4]>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub start: CellIndex,
    pub direction: Direction,
    pub cells: Pattern,
}

/// Finds the first occurrence of `word` on the board.
///
/// Start cells are visited in row-major order and from each one the directions are tried in
/// [`Direction::ALL`] order, so when several matches exist the result is always the same one.
pub fn find_pattern(board: &Board, word: &[Letter]) -> Option<PatternMatch> {
    if word.is_empty() {
        return None;
    }

    let (rows, cols) = board.size();
    for row in 0..rows {
        for col in 0..cols {
            for direction in Direction::ALL {
                if let Some(cells) = match_at(board, word, (row, col), direction) {
                    return Some(PatternMatch {
                        start: board.linear_index((row, col)),
                        direction,
                        cells,
                    });
                }
            }
        }
    }

    None
}

fn match_at(
    board: &Board,
    word: &[Letter],
    start: Coord2,
    direction: Direction,
) -> Option<Pattern> {
    let mut ray = RayIter::new(start, direction, board.size());
    let mut cells = Pattern::new();

    for &expected in word {
        let coords = ray.next()?;
        if board[coords] != Cell::Filled(expected) {
            return None;
        }
        cells.push(board.linear_index(coords));
    }

    Some(cells)
}
