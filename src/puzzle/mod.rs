//! Word search puzzle core.
//!
//! Everything in here is plain Rust with no browser dependency so it can be
//! exercised by native `cargo test`. The browser binding in `crate::board`
//! drives these types from DOM events.
//!
//! - `generator`: places words on a square grid along 8 directions
//! - `selection`: turns a drag gesture into a straight line of cells
//! - `matcher`: checks a selected line against the target words
//! - `clock`: elapsed time from puzzle load to completion

use std::fmt;

mod clock;
mod generator;
mod matcher;
mod selection;

pub use clock::{SessionClock, format_elapsed};
pub use generator::{MAX_GRID_SIZE, PlacementPolicy, PuzzleConfig, generate, normalize_words};
pub use matcher::{FoundWords, MIN_SELECTION_LEN, MatchOutcome, check_selection};
pub use selection::{SelectionTracker, cells_between};

/// Filler alphabet; every grid cell holds one of these.
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// --- Coordinates & Directions ------------------------------------------------

/// A grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step `n` times along `dir`. Returns `None` if the result leaves a
    /// `size`x`size` grid.
    pub fn offset(self, dir: Direction, n: usize, size: usize) -> Option<Cell> {
        let (dr, dc) = dir.delta();
        let row = self.row as i64 + dr as i64 * n as i64;
        let col = self.col as i64 + dc as i64 * n as i64;
        if row < 0 || col < 0 || row >= size as i64 || col >= size as i64 {
            return None;
        }
        Some(Cell::new(row as usize, col as usize))
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell::new(row, col)
    }
}

/// One of the 8 unit steps used for placement and selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Right,
    Down,
    DownRight,
    DownLeft,
    Left,
    Up,
    UpLeft,
    UpRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::Down,
        Direction::DownRight,
        Direction::DownLeft,
        Direction::Left,
        Direction::Up,
        Direction::UpLeft,
        Direction::UpRight,
    ];

    /// (row step, col step)
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::DownRight => (1, 1),
            Direction::DownLeft => (1, -1),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (-1, 1),
        }
    }

    /// Direction of a straight (horizontal, vertical or 45°) displacement.
    pub fn from_delta(dr: i32, dc: i32) -> Option<Direction> {
        if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
            return None;
        }
        Direction::ALL
            .into_iter()
            .find(|d| d.delta() == (dr.signum(), dc.signum()))
    }
}

// --- Grid --------------------------------------------------------------------

/// Square letter matrix, row-major. Read-only once generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    letters: Vec<char>, // length = size * size
}

impl Grid {
    /// Build a grid from complete rows. Returns `None` unless `rows` is a
    /// non-empty square of uppercase ASCII letters.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Option<Grid> {
        let size = rows.len();
        if size == 0 {
            return None;
        }
        let mut letters = Vec::with_capacity(size * size);
        for row in rows {
            let row = row.as_ref();
            if row.chars().count() != size || !row.chars().all(|c| c.is_ascii_uppercase()) {
                return None;
            }
            letters.extend(row.chars());
        }
        Some(Grid { size, letters })
    }

    pub(crate) fn from_letters(size: usize, letters: Vec<char>) -> Grid {
        debug_assert_eq!(letters.len(), size * size);
        Grid { size, letters }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, cell: Cell) -> Option<char> {
        if cell.row >= self.size || cell.col >= self.size {
            return None;
        }
        Some(self.letters[cell.row * self.size + cell.col])
    }

    /// Letters read along `cells` in order. Out-of-range cells are skipped.
    pub fn letters_along(&self, cells: &[Cell]) -> String {
        cells.iter().filter_map(|&c| self.get(c)).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.letters.chunks(self.size)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &c in row {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

// --- Generator output --------------------------------------------------------

/// A target word and where the generator wrote it. Matching never relies on
/// this; it re-reads letters from the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordEntry {
    pub word: String,
    pub origin: Cell,
    pub direction: Direction,
}

impl WordEntry {
    /// Cells occupied by the word, first letter first.
    pub fn cells(&self) -> Vec<Cell> {
        let (dr, dc) = self.direction.delta();
        (0..self.word.len() as i64)
            .map(|i| {
                Cell::new(
                    (self.origin.row as i64 + dr as i64 * i) as usize,
                    (self.origin.col as i64 + dc as i64 * i) as usize,
                )
            })
            .collect()
    }
}

/// Result of a generation run.
#[derive(Clone, Debug)]
pub struct Puzzle {
    pub grid: Grid,
    pub entries: Vec<WordEntry>,
    /// Words the `Skip` policy dropped. They are absent from the grid.
    pub unplaced: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_deltas_are_distinct_unit_steps() {
        let mut seen = std::collections::HashSet::new();
        for d in Direction::ALL {
            let (dr, dc) = d.delta();
            assert!((-1..=1).contains(&dr) && (-1..=1).contains(&dc));
            assert_ne!((dr, dc), (0, 0));
            assert!(seen.insert((dr, dc)), "duplicate delta for {d:?}");
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn from_delta_normalizes_length() {
        assert_eq!(Direction::from_delta(0, 4), Some(Direction::Right));
        assert_eq!(Direction::from_delta(-3, -3), Some(Direction::UpLeft));
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(3, 1), None);
    }

    #[test]
    fn cell_offset_respects_bounds() {
        let c = Cell::new(0, 0);
        assert_eq!(c.offset(Direction::DownRight, 2, 3), Some(Cell::new(2, 2)));
        assert_eq!(c.offset(Direction::Up, 1, 3), None);
        assert_eq!(c.offset(Direction::Right, 3, 3), None);
    }

    #[test]
    fn grid_from_rows_and_reading() {
        let g = Grid::from_rows(&["ABC", "DEF", "GHI"]).unwrap();
        assert_eq!(g.size(), 3);
        assert_eq!(g.get(Cell::new(1, 2)), Some('F'));
        assert_eq!(g.get(Cell::new(3, 0)), None);
        let diag = [Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 2)];
        assert_eq!(g.letters_along(&diag), "AEI");
        assert_eq!(g.to_string(), "ABC\nDEF\nGHI");
    }

    #[test]
    fn grid_from_rows_rejects_ragged_or_lowercase() {
        assert!(Grid::from_rows(&["AB", "C"]).is_none());
        assert!(Grid::from_rows(&["ab", "cd"]).is_none());
        assert!(Grid::from_rows::<&str>(&[]).is_none());
    }

    #[test]
    fn word_entry_cells_follow_direction() {
        let e = WordEntry { word: "BILL".into(), origin: Cell::new(3, 3), direction: Direction::UpLeft };
        assert_eq!(
            e.cells(),
            vec![Cell::new(3, 3), Cell::new(2, 2), Cell::new(1, 1), Cell::new(0, 0)]
        );
    }
}
