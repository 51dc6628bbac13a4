use super::Cell;

/// Straight line of cells from `start` to `end`, both inclusive.
///
/// The line has `max(|dr|, |dc|) + 1` cells; the i-th one is the start offset
/// by `round(dr * i / steps)` rows and `round(dc * i / steps)` columns, so a
/// drag that wanders off a perfect diagonal still snaps to the nearest line.
pub fn cells_between(start: Cell, end: Cell) -> Vec<Cell> {
    let dr = end.row as i64 - start.row as i64;
    let dc = end.col as i64 - start.col as i64;
    let steps = dr.abs().max(dc.abs());
    if steps == 0 {
        return vec![start];
    }
    (0..=steps)
        .map(|i| {
            let row = start.row as i64 + round_div(dr * i, steps);
            let col = start.col as i64 + round_div(dc * i, steps);
            Cell::new(row as usize, col as usize)
        })
        .collect()
}

/// `num / den` rounded half-up (towards +inf). `den` must be positive.
fn round_div(num: i64, den: i64) -> i64 {
    (2 * num + den).div_euclid(2 * den)
}

/// Tracks the one in-progress drag gesture.
///
/// `begin` / `extend` / `end` are input-agnostic: the browser binding maps
/// both mouse and touch events onto them.
#[derive(Clone, Debug, Default)]
pub struct SelectionTracker {
    start: Option<Cell>,
    cells: Vec<Cell>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new gesture. Any selection already in progress is discarded.
    pub fn begin(&mut self, cell: Cell) {
        self.start = Some(cell);
        self.cells.clear();
        self.cells.push(cell);
    }

    /// Recompute the line from the gesture's start cell to `cell`. Ignored
    /// when no gesture is active.
    pub fn extend(&mut self, cell: Cell) -> &[Cell] {
        if let Some(start) = self.start {
            self.cells = cells_between(start, cell);
        }
        &self.cells
    }

    /// Finish the gesture and hand back its cells. `None` if nothing was in
    /// progress.
    pub fn end(&mut self) -> Option<Vec<Cell>> {
        self.start.take()?;
        Some(std::mem::take(&mut self.cells))
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(pairs: &[(usize, usize)]) -> Vec<Cell> {
        pairs.iter().map(|&p| Cell::from(p)).collect()
    }

    #[test]
    fn horizontal_line() {
        assert_eq!(
            cells_between(Cell::new(2, 2), Cell::new(2, 6)),
            cells(&[(2, 2), (2, 3), (2, 4), (2, 5), (2, 6)])
        );
    }

    #[test]
    fn diagonal_line() {
        assert_eq!(
            cells_between(Cell::new(0, 0), Cell::new(4, 4)),
            cells(&[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)])
        );
    }

    #[test]
    fn single_cell() {
        assert_eq!(cells_between(Cell::new(5, 5), Cell::new(5, 5)), cells(&[(5, 5)]));
    }

    #[test]
    fn reverse_direction() {
        assert_eq!(
            cells_between(Cell::new(4, 4), Cell::new(1, 1)),
            cells(&[(4, 4), (3, 3), (2, 2), (1, 1)])
        );
    }

    #[test]
    fn off_axis_drag_snaps_with_half_up_rounding() {
        // dr = 1 over 2 steps: 0.5 rounds up, -0.5 rounds to 0.
        assert_eq!(cells_between(Cell::new(0, 0), Cell::new(1, 2)), cells(&[(0, 0), (1, 1), (1, 2)]));
        assert_eq!(cells_between(Cell::new(1, 2), Cell::new(0, 0)), cells(&[(1, 2), (1, 1), (0, 0)]));
    }

    #[test]
    fn tracker_lifecycle() {
        let mut t = SelectionTracker::new();
        assert!(!t.is_active());
        assert!(t.extend(Cell::new(3, 3)).is_empty());
        assert_eq!(t.end(), None);

        t.begin(Cell::new(0, 0));
        assert!(t.is_active());
        assert_eq!(t.cells(), &[Cell::new(0, 0)]);
        t.extend(Cell::new(0, 3));
        // recomputed from the start cell, not appended
        let line = t.extend(Cell::new(2, 0)).to_vec();
        assert_eq!(line, cells(&[(0, 0), (1, 0), (2, 0)]));

        assert_eq!(t.end(), Some(line));
        assert!(!t.is_active());
        assert!(t.cells().is_empty());
    }

    #[test]
    fn begin_overwrites_previous_gesture() {
        let mut t = SelectionTracker::new();
        t.begin(Cell::new(0, 0));
        t.extend(Cell::new(0, 4));
        t.begin(Cell::new(7, 7));
        assert_eq!(t.cells(), &[Cell::new(7, 7)]);
        assert_eq!(t.extend(Cell::new(7, 9)), cells(&[(7, 7), (7, 8), (7, 9)]).as_slice());
    }
}
