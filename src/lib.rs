//! Word search core crate.
//!
//! The puzzle engine (`puzzle`, `session`) is plain Rust and runs natively;
//! `board` binds one session to the page when compiled for the browser via
//! `start_word_search()`.

use wasm_bindgen::prelude::*;

mod board;
pub mod errors;
pub mod logging;
pub mod puzzle;
pub mod session;

pub use errors::PuzzleError;
pub use puzzle::{
    Cell, Direction, FoundWords, Grid, MAX_GRID_SIZE, MatchOutcome, PlacementPolicy, Puzzle, PuzzleConfig,
    SelectionTracker, SessionClock, WordEntry,
};
pub use session::{COMPLETION_BODY, COMPLETION_TITLE, SelectionOutcome, Session};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init_logger(false);
}

// -----------------------------------------------------------------------------
// Vocabulary
// All entries uppercase A-Z, no spaces, at least 4 letters.
// -----------------------------------------------------------------------------

/// Restaurant unit vocabulary; the default puzzle.
pub const RESTAURANT_WORDS: &[&str] = &["WAITER", "CUSTOMER", "ORDER", "DRINK", "BILL", "PRICE"];

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_word_search() -> Result<(), JsValue> {
    board::start_board_mode(RESTAURANT_WORDS, PuzzleConfig::default())
}

/// `config_json` is a `PuzzleConfig` (missing fields take defaults), e.g.
/// `{"size": 12, "policy": {"kind": "skip"}}`. An empty `words` array uses the
/// restaurant list.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_word_search_with_config(config_json: &str, words: Vec<String>) -> Result<(), JsValue> {
    let config = PuzzleConfig::from_json(config_json)?;
    if words.is_empty() {
        board::start_board_mode(RESTAURANT_WORDS, config)
    } else {
        board::start_board_mode(&words, config)
    }
}
