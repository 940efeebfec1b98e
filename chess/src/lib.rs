pub mod config;
pub mod fen;
pub mod parsers;
pub mod pgn;
pub mod position;
pub mod prelude;
pub mod replay;
pub mod scan;
pub mod types;

pub use config::PgnConfig;
pub use fen::{parse_fen, FenError, FenParser};
pub use parsers::{MoveParser, PositionParser};
pub use pgn::{
    parse_pgn, parse_san_moves, ParseResult, PgnError, PgnParser, SanError, SanParser, TagError,
};
pub use position::{Move, Position};
pub use replay::{replay, Replay};
pub use scan::Scanner;
pub use types::{Piece, PieceColor, PieceKind, Square, SquareError};
