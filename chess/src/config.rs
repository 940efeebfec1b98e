//! Configuration for PGN parsing.
//!
//! Every option has a compile-time default and can be overridden at runtime
//! via a dedicated environment variable:
//! - `CHESS_NOTATION_STRICT_MOVETEXT`: hand move text to the SAN parser
//!   untouched (comments and result markers become syntax errors)
//! - `CHESS_NOTATION_IGNORE_FEN_TAG`: always start from the standard position

/// Default for [`PgnConfig::prefilter_movetext`].
const DEFAULT_PREFILTER_MOVETEXT: bool = true;

/// Default for [`PgnConfig::seed_from_fen_tag`].
const DEFAULT_SEED_FROM_FEN_TAG: bool = true;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PgnConfig {
    /// Strip comments, variations, NAGs and the result marker before SAN
    /// parsing.
    pub prefilter_movetext: bool,
    /// Use the `FEN` tag, when present, as the start position.
    pub seed_from_fen_tag: bool,
}

impl Default for PgnConfig {
    fn default() -> Self {
        Self {
            prefilter_movetext: DEFAULT_PREFILTER_MOVETEXT,
            seed_from_fen_tag: DEFAULT_SEED_FROM_FEN_TAG,
        }
    }
}

impl PgnConfig {
    /// Build a config from the environment.
    ///
    /// Priority:
    /// 1. `CHESS_NOTATION_STRICT_MOVETEXT` / `CHESS_NOTATION_IGNORE_FEN_TAG`
    ///    if set to a truthy value (`1`, `true`, `yes`, `on`)
    /// 2. compile-time defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| lookup(key).is_some_and(|v| is_truthy(&v));
        Self {
            prefilter_movetext: !flag("CHESS_NOTATION_STRICT_MOVETEXT"),
            seed_from_fen_tag: !flag("CHESS_NOTATION_IGNORE_FEN_TAG"),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
