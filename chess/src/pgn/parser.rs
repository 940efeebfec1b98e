use std::collections::HashMap;

use super::movetext::strip_annotations;
use super::san::{SanError, SanParser};
use super::tags::{read_tag_block, TagError};
use crate::config::PgnConfig;
use crate::fen::{FenError, FenParser};
use crate::parsers::{MoveParser, PositionParser};
use crate::position::{Move, Position};
use crate::replay::{replay, Replay};
use crate::scan::Scanner;

/// A parsed PGN game
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// Position the moves are played from: the `FEN` tag when present,
    /// otherwise the standard starting position.
    pub start: Position,
    pub moves: Vec<Move>,
    pub tags: HashMap<String, String>,
}

impl ParseResult {
    /// Every position of the game, starting with `start`.
    pub fn positions(&self) -> Vec<Position> {
        replay(self.start, &self.moves)
    }

    /// Lazy counterpart of [`ParseResult::positions`].
    pub fn replay(&self) -> Replay<'_> {
        Replay::new(self.start, &self.moves)
    }

    /// Position after the last move.
    pub fn final_position(&self) -> Position {
        self.moves.iter().fold(self.start, |pos, mv| pos.apply(*mv))
    }
}

/// Parse a PGN record with the default configuration.
pub fn parse_pgn(input: &str) -> Result<ParseResult, PgnError> {
    PgnParser::default().parse(input.chars())
}

/// Reader for a single PGN record: tag pairs followed by move text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgnParser {
    config: PgnConfig,
}

impl PgnParser {
    pub fn new(config: PgnConfig) -> Self {
        Self { config }
    }

    pub fn parse<I>(&self, input: I) -> Result<ParseResult, PgnError>
    where
        I: IntoIterator<Item = char>,
    {
        let mut scanner = Scanner::new(input.into_iter());
        let block = read_tag_block(&mut scanner)?;

        let start = match block.tags.get("FEN") {
            Some(fen) if self.config.seed_from_fen_tag => {
                tracing::debug!(fen = %fen, "Seeding start position from FEN tag");
                // report bad runes at their place in the whole record
                let offsets = block.value_offsets.get("FEN");
                FenParser.parse_position(fen.chars()).map_err(|e| {
                    e.map_offset(|at| {
                        offsets
                            .and_then(|o| o.get(at))
                            .copied()
                            .unwrap_or(at)
                    })
                })?
            }
            _ => Position::starting(),
        };
        let tags = block.tags;

        let base = scanner.offset();
        let mut movetext = scanner.rest();
        if self.config.prefilter_movetext {
            movetext = strip_annotations(&movetext).map_err(|e| e.offset_by(base))?;
        }

        let moves = SanParser
            .parse_moves(start, movetext.chars())
            .map_err(|e| e.offset_by(base))?;

        tracing::debug!(
            tags = tags.len(),
            moves = moves.len(),
            movetext_at = base,
            "Parsed PGN record"
        );

        Ok(ParseResult { start, moves, tags })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PgnError {
    #[error("Invalid tag: {0}")]
    Tag(#[from] TagError),
    #[error("Invalid FEN tag: {0}")]
    Fen(#[from] FenError),
    #[error("SAN parse error: {0}")]
    San(#[from] SanError),
}
