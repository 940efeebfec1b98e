//! Step-by-step replay of a move list.

use crate::position::{Move, Position};

/// Iterator over the positions of a game: the start position, then the
/// position after each move in turn.
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    current: Option<Position>,
    moves: std::slice::Iter<'a, Move>,
}

impl<'a> Replay<'a> {
    pub fn new(start: Position, moves: &'a [Move]) -> Self {
        Self {
            current: Some(start),
            moves: moves.iter(),
        }
    }
}

impl Iterator for Replay<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let pos = self.current.take()?;
        self.current = self.moves.next().map(|mv| {
            tracing::trace!(%mv, "Replaying move");
            pos.apply(*mv)
        });
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::from(self.current.is_some()) + self.moves.len();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Replay<'_> {}

/// Every position of the game, `moves.len() + 1` in total.
pub fn replay(start: Position, moves: &[Move]) -> Vec<Position> {
    Replay::new(start, moves).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Piece, PieceColor, PieceKind, Square};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_no_moves_yields_start() {
        let start = Position::starting();
        assert_eq!(replay(start, &[]), vec![start]);
    }

    #[test]
    fn test_positions_follow_moves() {
        let start = Position::starting();
        let moves = [Move::new(sq("e2"), sq("e4")), Move::new(sq("e7"), sq("e5"))];
        let positions = replay(start, &moves);

        assert_eq!(positions.len(), 3);
        assert_eq!(positions[0], start);
        assert!(positions[1].is_empty(sq("e2")));
        assert_eq!(
            positions[1].get(sq("e4")),
            Some(Piece::new(PieceKind::Pawn, PieceColor::White))
        );
        assert_eq!(
            positions[2].get(sq("e5")),
            Some(Piece::new(PieceKind::Pawn, PieceColor::Black))
        );
        // start position untouched
        assert_eq!(start, Position::starting());
    }

    #[test]
    fn test_exact_size() {
        let moves = [Move::new(sq("g1"), sq("f3"))];
        let mut it = Replay::new(Position::starting(), &moves);
        assert_eq!(it.len(), 2);
        it.next();
        assert_eq!(it.len(), 1);
        it.next();
        assert_eq!(it.len(), 0);
        assert_eq!(it.next(), None);
    }
}
