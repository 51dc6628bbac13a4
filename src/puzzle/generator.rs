use rand::Rng;

use super::{ALPHABET, Cell, Direction, Grid, Puzzle, WordEntry};
use crate::errors::PuzzleError;

/// What to do when a word finds no spot within `max_attempts` tries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum PlacementPolicy {
    /// Leave the word out of the grid and report it in `Puzzle::unplaced`.
    Skip,
    /// Throw the whole grid away and start over, up to `max_rounds` times.
    Regenerate { max_rounds: u32 },
    /// Give up with `PuzzleError::Unplaceable`.
    Fail,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        PlacementPolicy::Regenerate { max_rounds: 10 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PuzzleConfig {
    pub size: usize,
    /// Random (origin, direction) picks per word per round.
    pub max_attempts: u32,
    pub policy: PlacementPolicy,
}

/// Largest accepted grid side. Keeps `size * size` cell buffers small for
/// sizes that arrive from JSON.
pub const MAX_GRID_SIZE: usize = 100;

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self { size: 15, max_attempts: 100, policy: PlacementPolicy::default() }
    }
}

impl PuzzleConfig {
    /// Checks the grid size: at least 1, at most `MAX_GRID_SIZE`.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.size == 0 {
            return Err(PuzzleError::ZeroSize);
        }
        if self.size > MAX_GRID_SIZE || self.size.checked_mul(self.size).is_none() {
            return Err(PuzzleError::GridTooLarge { size: self.size, max: MAX_GRID_SIZE });
        }
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, PuzzleError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PuzzleError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Trim and uppercase each word, dropping repeats. Fails on an empty list or
/// on any character outside A-Z.
pub fn normalize_words<S: AsRef<str>>(words: &[S]) -> Result<Vec<String>, PuzzleError> {
    let mut out: Vec<String> = Vec::with_capacity(words.len());
    for w in words {
        let word = w.as_ref().trim().to_uppercase();
        if let Some(bad) = word.chars().find(|c| !c.is_ascii_uppercase()) {
            return Err(PuzzleError::InvalidWord { word, invalid_char: bad });
        }
        if word.is_empty() || out.contains(&word) {
            continue;
        }
        out.push(word);
    }
    if out.is_empty() {
        return Err(PuzzleError::EmptyWordList);
    }
    Ok(out)
}

/// Place `words` on a fresh `config.size` square grid and fill the rest with
/// random letters.
pub fn generate<S, R>(words: &[S], config: &PuzzleConfig, rng: &mut R) -> Result<Puzzle, PuzzleError>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    config.validate()?;
    let words = normalize_words(words)?;
    let rounds = match config.policy {
        PlacementPolicy::Regenerate { max_rounds } => max_rounds.max(1),
        PlacementPolicy::Skip | PlacementPolicy::Fail => 1,
    };

    let mut last_failure = String::new();
    for round in 0..rounds {
        match place_all(&words, config, rng) {
            Ok((slots, entries, unplaced)) => {
                for w in &unplaced {
                    log::warn!("word {w:?} could not be placed and will not appear in the grid");
                }
                let letters = slots
                    .into_iter()
                    .map(|s| s.unwrap_or_else(|| random_letter(rng)))
                    .collect();
                log::debug!(
                    "generated {0}x{0} grid with {1} word(s) in round {2}",
                    config.size,
                    entries.len(),
                    round + 1
                );
                return Ok(Puzzle { grid: Grid::from_letters(config.size, letters), entries, unplaced });
            }
            Err(word) => {
                log::debug!("round {} failed on {word:?}", round + 1);
                last_failure = word;
            }
        }
    }
    Err(PuzzleError::Unplaceable { word: last_failure })
}

type Placement = (Vec<Option<char>>, Vec<WordEntry>, Vec<String>);

/// One placement round. `Err` carries the first word that could not be
/// placed under a non-skipping policy.
fn place_all<R: Rng + ?Sized>(
    words: &[String],
    config: &PuzzleConfig,
    rng: &mut R,
) -> Result<Placement, String> {
    let size = config.size;
    let mut slots: Vec<Option<char>> = vec![None; size * size];
    let mut entries = Vec::with_capacity(words.len());
    let mut unplaced = Vec::new();

    for word in words {
        let letters: Vec<char> = word.chars().collect();
        let mut placed = false;
        for _ in 0..config.max_attempts {
            let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
            let origin = Cell::new(rng.gen_range(0..size), rng.gen_range(0..size));
            if let Some(cells) = fit(&slots, size, &letters, origin, direction) {
                for (cell, &ch) in cells.iter().zip(&letters) {
                    slots[cell.row * size + cell.col] = Some(ch);
                }
                entries.push(WordEntry { word: word.clone(), origin, direction });
                placed = true;
                break;
            }
        }
        if !placed {
            match config.policy {
                PlacementPolicy::Skip => unplaced.push(word.clone()),
                PlacementPolicy::Regenerate { .. } | PlacementPolicy::Fail => return Err(word.clone()),
            }
        }
    }
    Ok((slots, entries, unplaced))
}

/// Cells `letters` would occupy from `origin` along `dir`, if every one is in
/// bounds and either empty or already holding the same letter.
fn fit(
    slots: &[Option<char>],
    size: usize,
    letters: &[char],
    origin: Cell,
    dir: Direction,
) -> Option<Vec<Cell>> {
    letters
        .iter()
        .enumerate()
        .map(|(i, &ch)| {
            let cell = origin.offset(dir, i, size)?;
            match slots[cell.row * size + cell.col] {
                Some(existing) if existing != ch => None,
                _ => Some(cell),
            }
        })
        .collect()
}

fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> char {
    ALPHABET[rng.gen_range(0..ALPHABET.len())] as char
}
