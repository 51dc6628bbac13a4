//! One word search game: grid, target words, finds, the active drag and the
//! clock. The browser binding holds exactly one of these; tests drive it
//! directly with a seeded RNG and hand-picked timestamps.

use rand::Rng;

use crate::errors::PuzzleError;
use crate::puzzle::{
    Cell, FoundWords, Grid, MatchOutcome, PuzzleConfig, SelectionTracker, SessionClock, WordEntry,
    check_selection, format_elapsed, generate, normalize_words,
};

pub const COMPLETION_TITLE: &str = "Congratulations!";
pub const COMPLETION_BODY: &str = "You found all the words!";

/// What a finished gesture amounted to, plus the cells it covered so the
/// presentation layer can mark or clear them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionOutcome {
    pub cells: Vec<Cell>,
    pub outcome: MatchOutcome,
}

impl SelectionOutcome {
    /// True when this selection found the last remaining word.
    pub fn completed(&self) -> bool {
        matches!(self.outcome, MatchOutcome::Found { completed: true, .. })
    }
}

#[derive(Debug)]
pub struct Session {
    config: PuzzleConfig,
    words: Vec<String>,
    grid: Grid,
    entries: Vec<WordEntry>,
    unplaced: Vec<String>,
    found: FoundWords,
    found_cells: Vec<Cell>,
    selection: SelectionTracker,
    clock: SessionClock,
}

impl Session {
    pub fn new<S, R>(words: &[S], config: PuzzleConfig, rng: &mut R, now_ms: f64) -> Result<Self, PuzzleError>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let words = normalize_words(words)?;
        let puzzle = generate(&words, &config, rng)?;
        log::info!("word search started with {} word(s)", words.len());
        Ok(Self {
            config,
            words,
            grid: puzzle.grid,
            entries: puzzle.entries,
            unplaced: puzzle.unplaced,
            found: FoundWords::new(),
            found_cells: Vec::new(),
            selection: SelectionTracker::new(),
            clock: SessionClock::start(now_ms),
        })
    }

    /// Build a session around an existing grid (hand-made puzzles, tests).
    /// Every word is treated as placed; no entries are recorded.
    pub fn from_grid<S: AsRef<str>>(grid: Grid, words: &[S], now_ms: f64) -> Result<Self, PuzzleError> {
        let words = normalize_words(words)?;
        Ok(Self {
            config: PuzzleConfig { size: grid.size(), ..PuzzleConfig::default() },
            words,
            grid,
            entries: Vec::new(),
            unplaced: Vec::new(),
            found: FoundWords::new(),
            found_cells: Vec::new(),
            selection: SelectionTracker::new(),
            clock: SessionClock::start(now_ms),
        })
    }

    /// Fresh grid for the same words; finds, selection and clock start over.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R, now_ms: f64) -> Result<(), PuzzleError> {
        let puzzle = generate(&self.words, &self.config, rng)?;
        self.grid = puzzle.grid;
        self.entries = puzzle.entries;
        self.unplaced = puzzle.unplaced;
        self.found.clear();
        self.found_cells.clear();
        self.selection = SelectionTracker::new();
        self.clock = SessionClock::start(now_ms);
        log::info!("word search restarted");
        Ok(())
    }

    // --- Gesture protocol ----------------------------------------------------

    pub fn begin(&mut self, cell: Cell) {
        self.selection.begin(cell);
    }

    pub fn extend(&mut self, cell: Cell) -> &[Cell] {
        self.selection.extend(cell)
    }

    /// Finish the active gesture and check it. `None` when no gesture was in
    /// progress.
    pub fn end(&mut self, now_ms: f64) -> Option<SelectionOutcome> {
        let cells = self.selection.end()?;
        let outcome = check_selection(&self.grid, &self.words, &mut self.found, &cells);
        if let MatchOutcome::Found { word, completed } = &outcome {
            log::debug!("found {word:?} ({}/{})", self.found.len(), self.words.len());
            for &c in &cells {
                if !self.found_cells.contains(&c) {
                    self.found_cells.push(c);
                }
            }
            if *completed {
                self.clock.stop(now_ms);
                log::info!("all words found in {}", format_elapsed(self.clock.elapsed_seconds(now_ms)));
            }
        }
        Some(SelectionOutcome { cells, outcome })
    }

    // --- Queries -------------------------------------------------------------

    pub fn is_complete(&self) -> bool {
        self.found.len() == self.words.len()
    }

    pub fn elapsed_seconds(&self, now_ms: f64) -> u64 {
        self.clock.elapsed_seconds(now_ms)
    }

    pub fn timer_text(&self, now_ms: f64) -> String {
        format_elapsed(self.elapsed_seconds(now_ms))
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    /// Words left off the grid by `PlacementPolicy::Skip`.
    pub fn unplaced(&self) -> &[String] {
        &self.unplaced
    }

    pub fn found(&self) -> &FoundWords {
        &self.found
    }

    pub fn found_cells(&self) -> &[Cell] {
        &self.found_cells
    }

    pub fn selection(&self) -> &[Cell] {
        self.selection.cells()
    }

    pub fn is_selecting(&self) -> bool {
        self.selection.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_grid() -> Grid {
        Grid::from_rows(&["ORDERQ", "ZZZZZZ", "ZZZZZZ", "ZZZZZZ", "ZZZZZZ", "ZZZZZZ"]).unwrap()
    }

    #[test]
    fn end_without_begin_is_none() {
        let mut s = Session::from_grid(order_grid(), &["ORDER"], 0.0).unwrap();
        assert_eq!(s.end(0.0), None);
    }

    #[test]
    fn found_cells_accumulate() {
        let mut s = Session::from_grid(order_grid(), &["ORDER", "QZZ"], 0.0).unwrap();
        s.begin(Cell::new(0, 0));
        s.extend(Cell::new(0, 4));
        let out = s.end(1_000.0).unwrap();
        assert_eq!(out.outcome, MatchOutcome::Found { word: "ORDER".into(), completed: false });
        assert_eq!(s.found_cells().len(), 5);
        assert!(!s.is_selecting());
        assert!(s.selection().is_empty());
    }

    #[test]
    fn timer_text_runs_until_completion() {
        let mut s = Session::from_grid(order_grid(), &["ORDER"], 0.0).unwrap();
        assert_eq!(s.timer_text(61_000.0), "01:01");
        s.begin(Cell::new(0, 4));
        s.extend(Cell::new(0, 0));
        let out = s.end(62_400.0).unwrap();
        assert!(out.completed());
        assert!(s.is_complete());
        assert!(!s.clock().is_running());
        assert_eq!(s.timer_text(500_000.0), "01:02");
    }

    #[test]
    fn restart_failure_keeps_current_puzzle() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        // CUSTOMERS is longer than the 6x6 grid, so regenerating cannot succeed.
        let mut s = Session::from_grid(order_grid(), &["ORDER", "CUSTOMERS"], 0.0).unwrap();
        s.begin(Cell::new(0, 0));
        s.extend(Cell::new(0, 4));
        s.end(3_000.0);
        let grid = s.grid().clone();

        let err = s.restart(&mut SmallRng::seed_from_u64(1), 9_000.0).unwrap_err();
        assert_eq!(err, PuzzleError::Unplaceable { word: "CUSTOMERS".into() });
        assert_eq!(s.grid(), &grid);
        assert!(s.found().contains("ORDER"));
        assert_eq!(s.found_cells().len(), 5);
        assert!(s.clock().is_running());
        assert_eq!(s.elapsed_seconds(10_000.0), 10);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn huge_grid_size_is_an_error() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let config = PuzzleConfig { size: 1 << 33, ..PuzzleConfig::default() };
        let err = Session::new(&["ORDER"], config, &mut SmallRng::seed_from_u64(0), 0.0).unwrap_err();
        assert_eq!(err, PuzzleError::GridTooLarge { size: 1 << 33, max: crate::puzzle::MAX_GRID_SIZE });
    }
}
