//! PGN records: tag pairs, move-text clean-up and SAN move resolution.

pub mod movetext;
pub mod parser;
mod resolve;
pub mod san;
pub mod tags;

pub use movetext::strip_annotations;
pub use parser::{parse_pgn, ParseResult, PgnError, PgnParser};
pub use san::{parse_san_moves, SanError, SanParser};
pub use tags::{read_tags, TagError};
