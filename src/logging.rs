//! Logger setup for the word search.
//!
//! In the browser, records go to the devtools console through `console_log`.
//! Native builds (tests, tooling) print through `env_logger` without
//! timestamps so test output stays short.

use log::LevelFilter;

/// `Debug` shows per-round generation detail; `Info` keeps only game events
/// (start, restart, completion) and skipped-word warnings.
fn level_for(verbose: bool) -> LevelFilter {
    if verbose { LevelFilter::Debug } else { LevelFilter::Info }
}

/// Route `log` records for this game. Called from the wasm start hook; a
/// second call keeps the first logger.
pub fn init_logger(verbose: bool) {
    let level = level_for(verbose);

    #[cfg(target_arch = "wasm32")]
    {
        let console_level = level.to_level().unwrap_or(log::Level::Info);
        if let Err(e) = console_log::init_with_level(console_level) {
            web_sys::console::warn_1(&format!("wordsearch: console logging not set up ({e})").into());
            return;
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(level).format_timestamp(None).format_target(false);
        // RUST_LOG=wordsearch=debug and friends take precedence.
        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }
        if builder.try_init().is_err() {
            return;
        }
    }

    log::debug!("wordsearch logging at {level}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_flag_selects_debug() {
        assert_eq!(level_for(true), LevelFilter::Debug);
        assert_eq!(level_for(false), LevelFilter::Info);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn second_init_keeps_first_logger() {
        init_logger(true);
        init_logger(false);
        assert!(log::max_level() >= LevelFilter::Info);
    }
}
