//! Standard Algebraic Notation move-stream parser.

use super::resolve::{resolve_sources, Disambiguation};
use crate::parsers::MoveParser;
use crate::position::{Move, Position};
use crate::types::{Piece, PieceColor, PieceKind, Square};

const NUMBER_RUNES: &str = "1234567890.";
const MOVE_RUNES: &str = "RNBQKabcdefgh12345678x+#=O-";

/// Parse SAN move text played from `start`.
pub fn parse_san_moves(start: Position, text: &str) -> Result<Vec<Move>, SanError> {
    SanParser.parse_moves(start, text.chars())
}

/// Parser for numbered SAN move text such as `1. e4 e5 2. Nf3`.
///
/// The parser itself holds no state; every call works on its own scratch
/// copy of the tracked position, so one value can serve any number of
/// parses.
#[derive(Debug, Clone, Copy, Default)]
pub struct SanParser;

impl MoveParser for SanParser {
    type Error = SanError;

    fn parse_moves<I>(&self, start: Position, input: I) -> Result<Vec<Move>, SanError>
    where
        I: IntoIterator<Item = char>,
    {
        let mut state = SanState::new(start);
        let mut token = String::new();
        let mut token_at = 0;

        for (at, c) in input.into_iter().enumerate() {
            if c.is_whitespace() {
                if !token.is_empty() {
                    state.handle(&token, token_at)?;
                    token.clear();
                }
                continue;
            }

            if !state.expect.allows(c) {
                return Err(SanError::InvalidSyntax {
                    at,
                    reason: format!("unexpected {c:?} in this context"),
                });
            }
            if token.is_empty() {
                token_at = at;
            }
            token.push(c);
        }

        if !token.is_empty() {
            state.handle(&token, token_at)?;
        }

        tracing::trace!(moves = state.moves.len(), "SAN move text parsed");
        Ok(state.moves)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Number,
    WhiteMove,
    BlackMove,
}

impl Expect {
    fn allows(self, c: char) -> bool {
        match self {
            Self::Number => NUMBER_RUNES.contains(c),
            Self::WhiteMove | Self::BlackMove => MOVE_RUNES.contains(c),
        }
    }
}

/// Scratch state of a single parse.
struct SanState {
    expect: Expect,
    last_number: Option<u32>,
    position: Position,
    moves: Vec<Move>,
}

impl SanState {
    fn new(start: Position) -> Self {
        Self {
            expect: Expect::Number,
            last_number: None,
            position: start,
            moves: Vec::new(),
        }
    }

    fn handle(&mut self, token: &str, at: usize) -> Result<(), SanError> {
        match self.expect {
            Expect::Number => self.handle_number(token, at),
            Expect::WhiteMove => self.handle_move(token, PieceColor::White),
            Expect::BlackMove => self.handle_move(token, PieceColor::Black),
        }
    }

    fn handle_number(&mut self, token: &str, at: usize) -> Result<(), SanError> {
        let invalid = || SanError::InvalidSyntax {
            at,
            reason: format!("invalid move number notation: {token:?}"),
        };

        let (digits, next) = if let Some(digits) = token.strip_suffix("...") {
            if self.last_number.is_some() {
                return Err(SanError::InvalidSyntax {
                    at,
                    reason: "unexpected \"...\" in this context".to_string(),
                });
            }
            (digits, Expect::BlackMove)
        } else if let Some(digits) = token.strip_suffix('.') {
            (digits, Expect::WhiteMove)
        } else {
            return Err(invalid());
        };

        let number: u32 = digits
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(invalid)?;

        if let Some(last) = self.last_number {
            if last.checked_add(1) != Some(number) {
                return Err(SanError::InvalidSyntax {
                    at,
                    reason: format!("expected move #{}, got #{number}", u64::from(last) + 1),
                });
            }
        }

        self.last_number = Some(number);
        self.expect = next;
        Ok(())
    }

    fn handle_move(&mut self, token: &str, color: PieceColor) -> Result<(), SanError> {
        self.expect = match color {
            PieceColor::White => Expect::BlackMove,
            PieceColor::Black => Expect::Number,
        };

        let mv = self.read_move(token, color)?;
        tracing::trace!(
            fullmove = self.fullmove(),
            %color,
            notation = token,
            from = %mv.from,
            to = %mv.to,
            "Resolved SAN move"
        );
        self.position = self.position.apply(mv);
        self.moves.push(mv);
        Ok(())
    }

    fn fullmove(&self) -> u32 {
        self.last_number.unwrap_or(0)
    }

    fn illegal(&self, token: &str, color: PieceColor, reason: &str) -> SanError {
        tracing::debug!(
            fullmove = self.fullmove(),
            %color,
            notation = token,
            reason,
            "Rejected SAN move"
        );
        SanError::IllegalMove {
            fullmove: self.fullmove(),
            color,
            notation: token.to_string(),
        }
    }

    /// Turn one move token into a fully resolved [`Move`] against the tracked
    /// position.
    fn read_move(&self, token: &str, color: PieceColor) -> Result<Move, SanError> {
        let illegal = |reason: &str| self.illegal(token, color, reason);

        let body = token
            .strip_suffix(|c: char| c == '+' || c == '#')
            .unwrap_or(token);
        match body {
            "O-O" => return self.castle(token, color, false),
            "O-O-O" => return self.castle(token, color, true),
            _ => {}
        }

        let chars: Vec<char> = body.chars().collect();
        if chars.len() < 2 {
            return Err(illegal("too short"));
        }

        let mut rest = &chars[..];
        let kind = match PieceKind::from_san_letter(rest[0]) {
            Some(kind) => {
                rest = &rest[1..];
                kind
            }
            None => PieceKind::Pawn,
        };
        let piece = Piece::new(kind, color);

        let mut promotion = None;
        if let [head @ .., '=', letter] = rest {
            if kind != PieceKind::Pawn {
                return Err(illegal("only pawns promote"));
            }
            let target = PieceKind::from_san_letter(*letter)
                .filter(|k| *k != PieceKind::King)
                .ok_or_else(|| illegal("invalid promotion piece"))?;
            promotion = Some(Piece::new(target, color));
            rest = head;
        }

        let [head @ .., file, rank] = rest else {
            return Err(illegal("missing destination square"));
        };
        let to: Square = [*file, *rank]
            .iter()
            .collect::<String>()
            .parse()
            .map_err(|_| illegal("invalid destination square"))?;
        rest = head;

        if kind == PieceKind::Pawn && (to.rank() == color.last_rank()) != promotion.is_some() {
            return Err(illegal("promotion must happen exactly on the last rank"));
        }

        let capture = rest.last() == Some(&'x');
        if capture {
            rest = &rest[..rest.len() - 1];
        }

        let mut en_passant = false;
        match (capture, self.position.get(to)) {
            (false, None) => {}
            (false, Some(_)) => return Err(illegal("destination is occupied")),
            (true, Some(target)) if target.color != color => {}
            (true, Some(_)) => return Err(illegal("cannot capture own piece")),
            (true, None) if kind == PieceKind::Pawn => {
                let victim = Piece::new(PieceKind::Pawn, color.opposite());
                let behind = to
                    .offset(0, -color.forward())
                    .and_then(|sq| self.position.get(sq));
                if to.rank() != color.relative_rank(5) || behind != Some(victim) {
                    return Err(illegal("nothing to capture en passant"));
                }
                en_passant = true;
            }
            (true, None) => return Err(illegal("capture on an empty square")),
        }

        let hint = Disambiguation::parse(rest).ok_or_else(|| illegal("malformed disambiguation"))?;

        let sources = resolve_sources(&self.position, piece, to, capture, hint)?;
        let from = match sources.as_slice() {
            [from] => *from,
            [] => return Err(illegal("no piece can make this move")),
            _ => return Err(illegal("ambiguous move")),
        };

        Ok(Move {
            from,
            to,
            en_passant,
            castle: false,
            promotion,
        })
    }

    /// Castling needs the king and rook on their home squares and every
    /// square between them empty.
    fn castle(&self, token: &str, color: PieceColor, long: bool) -> Result<Move, SanError> {
        let rank = color.home_rank();
        let (rook_file, king_to) = if long { (0u8, 2u8) } else { (7, 6) };
        let king_sq = Square::at(4, rank);
        let rook_sq = Square::at(rook_file, rank);

        let king_home = self.position.get(king_sq) == Some(Piece::new(PieceKind::King, color));
        let rook_home = self.position.get(rook_sq) == Some(Piece::new(PieceKind::Rook, color));
        let path_clear = (rook_file.min(4) + 1..rook_file.max(4))
            .all(|file| self.position.is_empty(Square::at(file, rank)));

        if !(king_home && rook_home && path_clear) {
            return Err(self.illegal(token, color, "castling preconditions not met"));
        }

        Ok(Move {
            castle: true,
            ..Move::new(king_sq, Square::at(king_to, rank))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SanError {
    #[error("Invalid SAN syntax at {at}: {reason}")]
    InvalidSyntax { at: usize, reason: String },
    #[error("Illegal move #{fullmove} for {color}: {notation:?}")]
    IllegalMove {
        fullmove: u32,
        color: PieceColor,
        notation: String,
    },
    #[error("Expected exactly one {color} king on the board, found {found}")]
    KingCount { color: PieceColor, found: usize },
}

impl SanError {
    /// Shift a syntax error position by `base` runes, for move text that was
    /// cut out of a larger input.
    pub(crate) fn offset_by(self, base: usize) -> Self {
        match self {
            Self::InvalidSyntax { at, reason } => Self::InvalidSyntax {
                at: at + base,
                reason,
            },
            other => other,
        }
    }
}
