//! Error type for puzzle generation and configuration.
//!
//! Each variant carries a stable code for lookup from the browser console:
//!
//! - W001: `EmptyWordList`
//! - W002: `ZeroSize`
//! - W003: `InvalidWord`
//! - W004: `Unplaceable`
//! - W005: `InvalidConfig`
//! - W006: `GridTooLarge`

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    #[error("word list is empty")]
    EmptyWordList,
    #[error("grid size must be at least 1")]
    ZeroSize,
    #[error("word {word:?} contains {invalid_char:?}; only letters A-Z are allowed")]
    InvalidWord { word: String, invalid_char: char },
    #[error("could not place {word:?} on the grid")]
    Unplaceable { word: String },
    #[error("invalid puzzle configuration: {0}")]
    InvalidConfig(String),
    #[error("grid size {size} is larger than the maximum of {max}")]
    GridTooLarge { size: usize, max: usize },
}

impl PuzzleError {
    pub const fn code(&self) -> &'static str {
        match self {
            PuzzleError::EmptyWordList => "W001",
            PuzzleError::ZeroSize => "W002",
            PuzzleError::InvalidWord { .. } => "W003",
            PuzzleError::Unplaceable { .. } => "W004",
            PuzzleError::InvalidConfig(_) => "W005",
            PuzzleError::GridTooLarge { .. } => "W006",
        }
    }

    /// Optional suggestion shown alongside the message.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            PuzzleError::Unplaceable { .. } => {
                Some("use a larger grid, a shorter word, or fewer crossing words")
            }
            PuzzleError::InvalidWord { .. } => Some("remove spaces, digits and accents"),
            PuzzleError::GridTooLarge { .. } => Some("pick a size a child can scan, such as 10 to 20"),
            _ => None,
        }
    }
}

impl From<PuzzleError> for wasm_bindgen::JsValue {
    fn from(e: PuzzleError) -> Self {
        let mut msg = format!("Error {}: {}", e.code(), e);
        if let Some(help) = e.help() {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }
        wasm_bindgen::JsValue::from_str(&msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_unique() {
        let all = [
            PuzzleError::EmptyWordList,
            PuzzleError::ZeroSize,
            PuzzleError::InvalidWord { word: "A1".into(), invalid_char: '1' },
            PuzzleError::Unplaceable { word: "X".into() },
            PuzzleError::InvalidConfig("bad".into()),
            PuzzleError::GridTooLarge { size: 1_000, max: 100 },
        ];
        let codes: std::collections::HashSet<_> = all.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn display_mentions_word() {
        let e = PuzzleError::Unplaceable { word: "CUSTOMER".into() };
        assert!(e.to_string().contains("CUSTOMER"));
        assert!(e.help().is_some());
    }
}
