//! Board placement and the move transition function.

use serde::{Deserialize, Serialize};

use crate::types::{Piece, PieceColor, PieceKind, Square};

/// A single ply.
///
/// Castling moves carry only the king's squares; the rook's displacement is
/// derived by [`Position::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub en_passant: bool,
    pub castle: bool,
    pub promotion: Option<Piece>,
}

impl Move {
    /// A plain move with no special flags.
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            en_passant: false,
            castle: false,
            promotion: None,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "={}", promo.kind)?;
        }
        if self.en_passant {
            write!(f, " e.p.")?;
        }
        if self.castle {
            write!(f, " (castle)")?;
        }
        Ok(())
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement on an 8x8 board.
///
/// `Position` is `Copy`: every update returns a new value and never touches
/// the receiver, so earlier positions of a game stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    squares: [Option<Piece>; 64],
}

impl Position {
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    /// The standard initial setup.
    pub fn starting() -> Self {
        let mut squares = [None; 64];
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            squares[Square::at(file, 0).index()] = Some(Piece::new(*kind, PieceColor::White));
            squares[Square::at(file, 1).index()] =
                Some(Piece::new(PieceKind::Pawn, PieceColor::White));
            squares[Square::at(file, 6).index()] =
                Some(Piece::new(PieceKind::Pawn, PieceColor::Black));
            squares[Square::at(file, 7).index()] = Some(Piece::new(*kind, PieceColor::Black));
        }
        Self { squares }
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Returns a copy with `sq` holding `piece`.
    #[must_use]
    pub fn set(&self, sq: Square, piece: Option<Piece>) -> Position {
        let mut next = *self;
        next.squares[sq.index()] = piece;
        next
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Occupied squares with their pieces, a1, a2, ... h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Squares holding `color`'s king.
    pub fn kings(&self, color: PieceColor) -> impl Iterator<Item = Square> + '_ {
        let king = Piece::new(PieceKind::King, color);
        self.pieces()
            .filter(move |(_, p)| *p == king)
            .map(|(sq, _)| sq)
    }

    /// Position after `mv`. The receiver is left untouched.
    ///
    /// No legality checks are made: the moving piece is whatever stands on
    /// `mv.from`.
    #[must_use]
    pub fn apply(&self, mv: Move) -> Position {
        let mut next = *self;
        let moving = next.squares[mv.from.index()].take();
        next.squares[mv.to.index()] = mv.promotion.or(moving);

        if mv.en_passant {
            // captured pawn sits beside the origin, on the destination file
            let captured = Square::at(mv.to.file(), mv.from.rank());
            next.squares[captured.index()] = None;
        }

        if mv.castle {
            let rank = mv.from.rank();
            let rook_files = match mv.to.file() {
                6 => Some((7, 5)),
                2 => Some((0, 3)),
                _ => None,
            };
            if let Some((rook_from, rook_to)) = rook_files {
                let rook = next.squares[Square::at(rook_from, rank).index()].take();
                next.squares[Square::at(rook_to, rank).index()] = rook;
            }
        }

        next
    }
}

impl std::fmt::Display for Position {
    /// One line per rank, rank 8 first; FEN letters for pieces and `.` for
    /// empty squares.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let c = self
                    .get(Square::at(file, rank))
                    .map_or('.', Piece::to_fen_char);
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn white(kind: PieceKind) -> Option<Piece> {
        Some(Piece::new(kind, PieceColor::White))
    }

    fn black(kind: PieceKind) -> Option<Piece> {
        Some(Piece::new(kind, PieceColor::Black))
    }

    fn build(pieces: &[(&str, Option<Piece>)]) -> Position {
        pieces
            .iter()
            .fold(Position::empty(), |pos, (s, p)| pos.set(sq(s), *p))
    }

    #[test]
    fn test_starting_position() {
        let pos = Position::starting();
        assert_eq!(
            pos.to_string(),
            "rnbqkbnr\npppppppp\n........\n........\n........\n........\nPPPPPPPP\nRNBQKBNR\n"
        );
        assert_eq!(pos.get(sq("e1")), white(PieceKind::King));
        assert_eq!(pos.get(sq("d8")), black(PieceKind::Queen));
        assert_eq!(pos.pieces().count(), 32);
    }

    #[test]
    fn test_set_returns_new_value() {
        let empty = Position::empty();
        let one = empty.set(sq("e4"), white(PieceKind::Pawn));
        assert!(empty.is_empty(sq("e4")));
        assert_eq!(one.get(sq("e4")), white(PieceKind::Pawn));
    }

    #[test]
    fn test_apply_simple_move() {
        let start = build(&[("e2", white(PieceKind::Pawn))]);
        let got = start.apply(Move::new(sq("e2"), sq("e4")));
        assert_eq!(got, build(&[("e4", white(PieceKind::Pawn))]));
    }

    #[test]
    fn test_apply_capture() {
        let start = build(&[
            ("e2", white(PieceKind::Pawn)),
            ("d3", black(PieceKind::Pawn)),
        ]);
        let got = start.apply(Move::new(sq("e2"), sq("d3")));
        assert_eq!(got, build(&[("d3", white(PieceKind::Pawn))]));
    }

    #[test]
    fn test_apply_en_passant() {
        let start = build(&[
            ("e5", white(PieceKind::Pawn)),
            ("f5", black(PieceKind::Pawn)),
        ]);
        let mv = Move {
            en_passant: true,
            ..Move::new(sq("e5"), sq("f6"))
        };
        assert_eq!(start.apply(mv), build(&[("f6", white(PieceKind::Pawn))]));
    }

    #[test]
    fn test_apply_short_castle() {
        let start = build(&[
            ("e1", white(PieceKind::King)),
            ("h1", white(PieceKind::Rook)),
        ]);
        let mv = Move {
            castle: true,
            ..Move::new(sq("e1"), sq("g1"))
        };
        assert_eq!(
            start.apply(mv),
            build(&[
                ("g1", white(PieceKind::King)),
                ("f1", white(PieceKind::Rook))
            ])
        );
    }

    #[test]
    fn test_apply_long_castle_black() {
        let start = build(&[
            ("e8", black(PieceKind::King)),
            ("a8", black(PieceKind::Rook)),
        ]);
        let mv = Move {
            castle: true,
            ..Move::new(sq("e8"), sq("c8"))
        };
        assert_eq!(
            start.apply(mv),
            build(&[
                ("c8", black(PieceKind::King)),
                ("d8", black(PieceKind::Rook))
            ])
        );
    }

    #[test]
    fn test_apply_promotion() {
        let start = build(&[("e7", white(PieceKind::Pawn))]);
        let mv = Move {
            promotion: white(PieceKind::Queen),
            ..Move::new(sq("e7"), sq("e8"))
        };
        assert_eq!(start.apply(mv), build(&[("e8", white(PieceKind::Queen))]));
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let start = Position::starting();
        let snapshot = start;
        let _ = start.apply(Move::new(sq("e2"), sq("e4")));
        assert_eq!(start, snapshot);
        assert_eq!(start.get(sq("e2")), white(PieceKind::Pawn));
        assert!(start.is_empty(sq("e4")));
    }

    #[test]
    fn test_kings_lookup() {
        let pos = Position::starting();
        assert_eq!(pos.kings(PieceColor::White).collect::<Vec<_>>(), vec![sq("e1")]);
        assert_eq!(Position::empty().kings(PieceColor::Black).count(), 0);
    }
}
