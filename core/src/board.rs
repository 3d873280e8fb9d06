use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Grid contents. Cells are addressed either by `(row, col)` or by their row-major [`CellIndex`].
///
/// A filled cell is never overwritten; only [`Board::reset`] empties it again.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    size: Coord2,
    cells: Array2<Cell>,
    filled_count: CellCount,
}

impl Board {
    pub fn new(size: Coord2) -> Self {
        Self {
            size,
            cells: Array2::default(size.to_nd_index()),
            filled_count: 0,
        }
    }

    /// Builds a board from one string per row, `F`/`O`/`X` for letters and `.` for empty cells.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let row_count: Coord = rows.len().try_into().map_err(|_| GameError::InvalidConfig)?;
        let col_count: Coord = rows
            .first()
            .map_or(0, |row| row.chars().count())
            .try_into()
            .map_err(|_| GameError::InvalidConfig)?;
        if row_count == 0 || col_count == 0 {
            return Err(GameError::InvalidConfig);
        }

        let mut board = Self::new((row_count, col_count));
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != usize::from(col_count) {
                return Err(GameError::InvalidConfig);
            }
            for (col, c) in line.chars().enumerate() {
                if c == '.' {
                    continue;
                }
                let letter = Letter::try_from(c)?;
                let index = board.linear_index((row as Coord, col as Coord));
                board.place_letter(index, letter)?;
            }
        }
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn filled_count(&self) -> CellCount {
        self.filled_count
    }

    pub fn is_full(&self) -> bool {
        self.filled_count >= self.total_cells()
    }

    pub fn coords_of(&self, index: CellIndex) -> Result<Coord2> {
        if index >= self.total_cells() {
            return Err(GameError::IndexOutOfRange);
        }
        let cols = CellCount::from(self.size.1);
        Ok(((index / cols) as Coord, (index % cols) as Coord))
    }

    pub(crate) fn linear_index(&self, (row, col): Coord2) -> CellIndex {
        CellIndex::from(row) * CellIndex::from(self.size.1) + CellIndex::from(col)
    }

    pub fn cell_at(&self, index: CellIndex) -> Result<Cell> {
        let coords = self.coords_of(index)?;
        Ok(self[coords])
    }

    /// Writes `letter` into an empty cell.
    pub fn place_letter(&mut self, index: CellIndex, letter: Letter) -> Result<&Self> {
        let coords = self.coords_of(index)?;
        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.is_empty() {
            return Err(GameError::CellOccupied);
        }
        *cell = Cell::Filled(letter);
        self.filled_count += 1;
        Ok(self)
    }

    /// Lowest-index empty cell.
    pub fn first_empty(&self) -> Option<CellIndex> {
        self.first_empty_from(0)
    }

    /// Lowest-index empty cell at or after `start`.
    pub fn first_empty_from(&self, start: CellIndex) -> Option<CellIndex> {
        self.cells
            .iter()
            .enumerate()
            .skip(start.into())
            .find(|(_, cell)| cell.is_empty())
            .and_then(|(index, _)| index.try_into().ok())
    }

    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.filled_count = 0;
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placing_fills_exactly_one_cell() {
        let mut board = Board::new((5, 5));

        board.place_letter(7, Letter::O).unwrap();

        assert_eq!(board.cell_at(7).unwrap(), Cell::Filled(Letter::O));
        assert_eq!(board[(1, 2)], Cell::Filled(Letter::O));
        assert_eq!(board.filled_count(), 1);
        assert_eq!(board.iter().filter(|cell| !cell.is_empty()).count(), 1);
    }

    #[test]
    fn occupied_cell_is_never_overwritten() {
        let mut board = Board::new((3, 3));
        board.place_letter(4, Letter::F).unwrap();

        assert_eq!(board.place_letter(4, Letter::X).unwrap_err(), GameError::CellOccupied);
        assert_eq!(board.cell_at(4).unwrap(), Cell::Filled(Letter::F));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut board = Board::new((3, 3));

        assert_eq!(board.place_letter(9, Letter::F).unwrap_err(), GameError::IndexOutOfRange);
        assert_eq!(board.cell_at(9).unwrap_err(), GameError::IndexOutOfRange);
    }

    #[test]
    fn distinct_placements_fill_the_board() {
        let mut board = Board::new((2, 4));
        for index in (0..8).rev() {
            assert!(!board.is_full());
            board.place_letter(index, Letter::F).unwrap();
        }
        assert!(board.is_full());
        assert_eq!(board.first_empty(), None);
    }

    #[test]
    fn first_empty_from_skips_filled_and_earlier_cells() {
        let board = Board::from_rows(&["F.O", "XX.", "..."]).unwrap();

        assert_eq!(board.first_empty(), Some(1));
        assert_eq!(board.first_empty_from(2), Some(5));
        assert_eq!(board.first_empty_from(9), None);
    }

    #[test]
    fn coords_and_index_agree_on_rectangular_boards() {
        let board = Board::new((2, 4));
        for index in 0..board.total_cells() {
            let coords = board.coords_of(index).unwrap();
            assert_eq!(board.linear_index(coords), index);
        }
        assert_eq!(board.coords_of(5).unwrap(), (1, 1));
    }

    #[test]
    fn reset_empties_everything() {
        let mut board = Board::from_rows(&["FOX", "OXF", "XFO"]).unwrap();
        assert!(board.is_full());

        board.reset();

        assert_eq!(board.filled_count(), 0);
        assert!(board.iter().all(Cell::is_empty));
    }

    #[test]
    fn from_rows_rejects_ragged_rows_and_unknown_letters() {
        assert_eq!(Board::from_rows(&["FO", "X"]).unwrap_err(), GameError::InvalidConfig);
        assert_eq!(Board::from_rows(&["FQ"]).unwrap_err(), GameError::InvalidLetter);
        assert_eq!(Board::from_rows(&[]).unwrap_err(), GameError::InvalidConfig);
    }
}
