use crate::parsers::PositionParser;
use crate::position::Position;
use crate::types::{Piece, Square};

/// Decoder for the piece-placement field of a FEN record.
///
/// Reading stops at the first space, so side-to-move, castling rights and
/// the move counters are accepted but ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct FenParser;

/// Parse a FEN string into a Position
pub fn parse_fen(fen: &str) -> Result<Position, FenError> {
    FenParser.parse_position(fen.chars())
}

impl PositionParser for FenParser {
    type Error = FenError;

    fn parse_position<I>(&self, input: I) -> Result<Position, FenError>
    where
        I: IntoIterator<Item = char>,
    {
        let mut pos = Position::empty();
        let mut file: u8 = 0;
        let mut rank: i8 = 7;

        for (at, c) in input.into_iter().enumerate() {
            // metadata follows
            if c == ' ' {
                break;
            }

            if rank < 0 {
                return Err(FenError::TooManyRanks);
            }

            if c == '/' {
                if file != 8 {
                    return Err(FenError::TooShortRank);
                }
                file = 0;
                rank -= 1;
                continue;
            }

            if let Some(run) = c.to_digit(10).filter(|n| (1..=8).contains(n)) {
                if u32::from(file) + run > 8 {
                    return Err(FenError::TooLongRank);
                }
                file += run as u8;
                continue;
            }

            if let Some(piece) = Piece::from_fen_char(c) {
                if file > 7 {
                    return Err(FenError::TooLongRank);
                }
                pos = pos.set(Square::at(file, rank as u8), Some(piece));
                file += 1;
                continue;
            }

            return Err(FenError::InvalidRune { at, rune: c });
        }

        match (rank, file) {
            (0, 8) => Ok(pos),
            (rank, _) if rank > 0 => Err(FenError::TooFewRanks),
            _ => Err(FenError::TooShortRank),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("Too many ranks")]
    TooManyRanks,
    #[error("Too few ranks")]
    TooFewRanks,
    #[error("Too long rank")]
    TooLongRank,
    #[error("Too short rank")]
    TooShortRank,
    #[error("Invalid character {rune:?} at position {at}")]
    InvalidRune { at: usize, rune: char },
}

impl FenError {
    /// Translate a rune offset into the placement text into an offset in
    /// the enclosing input.
    pub(crate) fn map_offset(self, f: impl FnOnce(usize) -> usize) -> Self {
        match self {
            Self::InvalidRune { at, rune } => Self::InvalidRune { at: f(at), rune },
            other => other,
        }
    }
}
