use super::{Cell, Grid};

/// Selections shorter than this are dropped without looking at the words.
pub const MIN_SELECTION_LEN: usize = 3;

/// Words located so far, in the order they were found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FoundWords {
    words: Vec<String>,
}

impl FoundWords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Returns false if `word` was already present.
    pub fn insert(&mut self, word: &str) -> bool {
        if self.contains(word) {
            return false;
        }
        self.words.push(word.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Fewer than `MIN_SELECTION_LEN` cells; not checked.
    TooShort,
    /// Letters spell no target word in either direction.
    Miss,
    /// Letters spell a word that was already found.
    AlreadyFound(String),
    /// A new word. `completed` is set only on the find that completes the list.
    Found { word: String, completed: bool },
}

/// Compare the letters under `cells` (forward and reversed) against `words`.
///
/// The first unfound word in list order wins. `found` only changes on
/// `MatchOutcome::Found`.
pub fn check_selection(
    grid: &Grid,
    words: &[String],
    found: &mut FoundWords,
    cells: &[Cell],
) -> MatchOutcome {
    if cells.len() < MIN_SELECTION_LEN {
        return MatchOutcome::TooShort;
    }
    let forward = grid.letters_along(cells);
    if forward.chars().count() != cells.len() {
        return MatchOutcome::Miss;
    }
    let reversed: String = forward.chars().rev().collect();

    let mut already = None;
    for word in words {
        if *word != forward && *word != reversed {
            continue;
        }
        if found.contains(word) {
            already.get_or_insert_with(|| word.clone());
            continue;
        }
        found.insert(word);
        let completed = words.iter().all(|w| found.contains(w));
        return MatchOutcome::Found { word: word.clone(), completed };
    }
    match already {
        Some(word) => MatchOutcome::AlreadyFound(word),
        None => MatchOutcome::Miss,
    }
}
