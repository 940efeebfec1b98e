//! Parser seams shared by the notation readers.

use crate::position::{Move, Position};

/// Reads a board placement from a stream of code points.
pub trait PositionParser {
    type Error: std::error::Error;

    fn parse_position<I>(&self, input: I) -> Result<Position, Self::Error>
    where
        I: IntoIterator<Item = char>;
}

/// Reads a series of moves played from `start`.
pub trait MoveParser {
    type Error: std::error::Error;

    fn parse_moves<I>(&self, start: Position, input: I) -> Result<Vec<Move>, Self::Error>
    where
        I: IntoIterator<Item = char>;
}
