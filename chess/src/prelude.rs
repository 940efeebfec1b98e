// Board model
pub use crate::position::{Move, Position};
pub use crate::types::{Piece, PieceColor, PieceKind, Square, SquareError};

// Readers and their errors
pub use crate::fen::{parse_fen, FenError, FenParser};
pub use crate::parsers::{MoveParser, PositionParser};
pub use crate::pgn::{
    parse_pgn, parse_san_moves, ParseResult, PgnError, PgnParser, SanError, SanParser, TagError,
};

pub use crate::config::PgnConfig;
pub use crate::replay::{replay, Replay};
