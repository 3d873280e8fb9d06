use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for cell counts.
pub type CellCount = u16;

/// Row-major position of a cell, `row * cols + col`.
pub type CellIndex = CellCount;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// One of the 8 directions a word can be read in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
    DownRight,
    DownLeft,
    UpRight,
    UpLeft,
}

impl Direction {
    /// Order in which directions are tried from each start cell. The first hit wins, so this decides which
    /// cells get highlighted when several matches exist at once.
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
        Direction::DownRight,
        Direction::DownLeft,
        Direction::UpRight,
        Direction::UpLeft,
    ];

    /// `(d_row, d_col)` step for this direction.
    pub const fn delta(self) -> (isize, isize) {
        use Direction::*;
        match self {
            Right => (0, 1),
            Left => (0, -1),
            Down => (1, 0),
            Up => (-1, 0),
            DownRight => (1, 1),
            DownLeft => (1, -1),
            UpRight => (-1, 1),
            UpLeft => (-1, -1),
        }
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// Walks from a start cell along a direction, yielding the start first and stopping at the board edge.
#[derive(Debug)]
pub struct RayIter {
    next: Option<Coord2>,
    delta: (isize, isize),
    bounds: Coord2,
}

impl RayIter {
    pub fn new(start: Coord2, direction: Direction, bounds: Coord2) -> Self {
        let in_bounds = start.0 < bounds.0 && start.1 < bounds.1;
        Self {
            next: in_bounds.then_some(start),
            delta: direction.delta(),
            bounds,
        }
    }
}

impl Iterator for RayIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = apply_delta(current, self.delta, self.bounds);
        Some(current)
    }
}
