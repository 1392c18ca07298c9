//! Grid geometry primitives.
//!
//! Positions are zero-based `(row, col)` pairs. Cells are ordered and
//! indexed in row-major order, and neighbor enumeration always runs
//! up, right, down, left so that every scan over the grid is
//! deterministic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Zero-based cell position on the grid.
///
/// The derived `Ord` is row-major: all of row 0 sorts before row 1,
/// which is the scan order used for tie-breaking throughout the crate.
///
/// # Examples
///
/// ```
/// use gridseer::CellPos;
///
/// let a = CellPos::new(0, 0);
/// let b = CellPos::new(2, 1);
/// assert_eq!(a.manhattan(b), 3);
/// assert!(a < b);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CellPos {
    /// Row index, counted from the top.
    pub row: usize,
    /// Column index, counted from the left.
    pub col: usize,
}

impl CellPos {
    /// Creates a position from row and column indices.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another position.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Returns true if `other` is orthogonally adjacent to this cell.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl From<(usize, usize)> for CellPos {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Grid dimensions, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    rows: usize,
    cols: usize,
}

impl GridDims {
    /// Creates validated grid dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDimensions`] if either side is zero.
    pub fn new(rows: usize, cols: usize) -> Result<Self, ValidationError> {
        if rows == 0 || cols == 0 {
            return Err(ValidationError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.rows * self.cols
    }

    /// Returns true if `pos` lies inside the grid.
    #[must_use]
    pub const fn contains(self, pos: CellPos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Row-major index of an in-grid position.
    ///
    /// Callers must have bounds-checked `pos` via [`Self::contains`].
    #[must_use]
    pub const fn index_of(self, pos: CellPos) -> usize {
        pos.row * self.cols + pos.col
    }

    /// Existing orthogonal neighbors of `pos`, in up, right, down,
    /// left order. Border cells yield two or three neighbors.
    pub fn neighbors(self, pos: CellPos) -> impl Iterator<Item = CellPos> {
        let up = (pos.row > 0).then(|| CellPos::new(pos.row - 1, pos.col));
        let right = (pos.col + 1 < self.cols).then(|| CellPos::new(pos.row, pos.col + 1));
        let down = (pos.row + 1 < self.rows).then(|| CellPos::new(pos.row + 1, pos.col));
        let left = (pos.col > 0).then(|| CellPos::new(pos.row, pos.col - 1));
        [up, right, down, left].into_iter().flatten()
    }

    /// All positions in row-major order.
    pub fn positions(self) -> impl Iterator<Item = CellPos> {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| CellPos::new(row, col)))
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A single-step move between orthogonally adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    /// Decrease row by one.
    Up,
    /// Increase row by one.
    Down,
    /// Decrease column by one.
    Left,
    /// Increase column by one.
    Right,
}

impl Move {
    /// All moves, in the order the navigator emits them.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The move that steps from `from` onto the adjacent cell `to`,
    /// or `None` if the cells are not orthogonally adjacent.
    #[must_use]
    pub fn toward(from: CellPos, to: CellPos) -> Option<Self> {
        if !from.is_adjacent(to) {
            return None;
        }
        if to.row < from.row {
            Some(Self::Up)
        } else if to.row > from.row {
            Some(Self::Down)
        } else if to.col > from.col {
            Some(Self::Right)
        } else {
            Some(Self::Left)
        }
    }

    /// Applies the move to `from`, returning the destination if it
    /// stays inside the grid.
    #[must_use]
    pub fn apply(self, from: CellPos, dims: GridDims) -> Option<CellPos> {
        let to = match self {
            Self::Up => CellPos::new(from.row.checked_sub(1)?, from.col),
            Self::Down => CellPos::new(from.row + 1, from.col),
            Self::Left => CellPos::new(from.row, from.col.checked_sub(1)?),
            Self::Right => CellPos::new(from.row, from.col + 1),
        };
        dims.contains(to).then_some(to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}
