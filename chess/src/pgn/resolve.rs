//! Finds the square a SAN move starts from.
//!
//! Candidates are traced outward from the destination square following the
//! moving piece's geometry, narrowed by any disambiguation hint, and then
//! filtered so that no piece pinned to its own king is allowed to step off
//! the pin line.

use smallvec::SmallVec;

use super::san::SanError;
use crate::position::Position;
use crate::types::{Piece, PieceColor, PieceKind, Square};

pub(crate) type Sources = SmallVec<[Square; 8]>;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, -2),
    (1, -2),
    (-1, 2),
    (1, 2),
    (-2, -1),
    (2, -1),
    (-2, 1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// File and/or rank hint written between the piece letter and the
/// destination (`Rae2`, `R8a7`, `Qf1d3`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Disambiguation {
    file: Option<u8>,
    rank: Option<u8>,
}

impl Disambiguation {
    /// Accepts nothing, a file letter, a rank digit, or a file followed by a
    /// rank. Anything else is rejected.
    pub(crate) fn parse(hint: &[char]) -> Option<Self> {
        match hint {
            [] => Some(Self::default()),
            [c] if is_file(*c) => Some(Self {
                file: Some(*c as u8 - b'a'),
                rank: None,
            }),
            [c] if is_rank(*c) => Some(Self {
                file: None,
                rank: Some(*c as u8 - b'1'),
            }),
            [f, r] if is_file(*f) && is_rank(*r) => Some(Self {
                file: Some(*f as u8 - b'a'),
                rank: Some(*r as u8 - b'1'),
            }),
            _ => None,
        }
    }

    fn matches(self, sq: Square) -> bool {
        self.file.map_or(true, |f| f == sq.file()) && self.rank.map_or(true, |r| r == sq.rank())
    }
}

fn is_file(c: char) -> bool {
    ('a'..='h').contains(&c)
}

fn is_rank(c: char) -> bool {
    ('1'..='8').contains(&c)
}

/// Every square `piece` could legally have come from to reach `to`.
///
/// The caller must already have validated the destination: empty for quiet
/// moves, enemy-occupied for captures (or the en-passant square).
pub(crate) fn resolve_sources(
    pos: &Position,
    piece: Piece,
    to: Square,
    capture: bool,
    hint: Disambiguation,
) -> Result<Sources, SanError> {
    let mut sources = candidates(pos, piece, to, capture);
    sources.retain(|sq| hint.matches(*sq));

    if piece.kind == PieceKind::King || sources.is_empty() {
        return Ok(sources);
    }

    let king = find_king(pos, piece.color)?;
    sources.retain(|sq| !is_pinned(pos, piece.color, *sq, to, king));
    Ok(sources)
}

/// Squares holding `piece` that reach `to` by the piece's movement rules,
/// ignoring pins.
pub(crate) fn candidates(pos: &Position, piece: Piece, to: Square, capture: bool) -> Sources {
    let mut sources = Sources::new();

    match piece.kind {
        PieceKind::Pawn => {
            let back = -piece.color.forward();
            if capture {
                add_if_holds(pos, piece, to.offset(-1, back), &mut sources);
                add_if_holds(pos, piece, to.offset(1, back), &mut sources);
            } else if let Some(one) = to.offset(0, back) {
                if pos.is_empty(one) && to.rank() == piece.color.relative_rank(3) {
                    // double step from the starting rank
                    add_if_holds(pos, piece, one.offset(0, back), &mut sources);
                } else {
                    add_if_holds(pos, piece, Some(one), &mut sources);
                }
            }
        }
        PieceKind::Knight => {
            for (df, dr) in KNIGHT_OFFSETS {
                add_if_holds(pos, piece, to.offset(df, dr), &mut sources);
            }
        }
        PieceKind::King => {
            for (df, dr) in KING_OFFSETS {
                add_if_holds(pos, piece, to.offset(df, dr), &mut sources);
            }
        }
        PieceKind::Bishop => trace_rays(pos, piece, to, &DIAGONALS, &mut sources),
        PieceKind::Rook => trace_rays(pos, piece, to, &ORTHOGONALS, &mut sources),
        PieceKind::Queen => {
            trace_rays(pos, piece, to, &DIAGONALS, &mut sources);
            trace_rays(pos, piece, to, &ORTHOGONALS, &mut sources);
        }
    }

    sources
}

fn add_if_holds(pos: &Position, piece: Piece, sq: Option<Square>, sources: &mut Sources) {
    if let Some(sq) = sq.filter(|sq| pos.get(*sq) == Some(piece)) {
        sources.push(sq);
    }
}

/// Walk each ray away from `to`; the first occupied square blocks the ray
/// and is a source only if it holds `piece`.
fn trace_rays(
    pos: &Position,
    piece: Piece,
    to: Square,
    directions: &[(i8, i8)],
    sources: &mut Sources,
) {
    for &(df, dr) in directions {
        if let Some((sq, found)) = first_piece(pos, to, df, dr) {
            if found == piece {
                sources.push(sq);
            }
        }
    }
}

/// First occupied square strictly beyond `from` in direction `(df, dr)`.
fn first_piece(pos: &Position, from: Square, df: i8, dr: i8) -> Option<(Square, Piece)> {
    let mut sq = from;
    while let Some(next) = sq.offset(df, dr) {
        if let Some(piece) = pos.get(next) {
            return Some((next, piece));
        }
        sq = next;
    }
    None
}

fn find_king(pos: &Position, color: PieceColor) -> Result<Square, SanError> {
    let mut kings = pos.kings(color);
    match (kings.next(), kings.next()) {
        (Some(king), None) => Ok(king),
        _ => Err(SanError::KingCount {
            color,
            found: pos.kings(color).count(),
        }),
    }
}

/// Whether moving the piece on `from` to `to` would uncover an enemy slider
/// aimed at `king`.
///
/// A piece is only pinned if nothing stands between it and its king, an
/// enemy slider of the right kind is the first piece behind it on the same
/// line, and the move actually leaves that line.
pub(crate) fn is_pinned(
    pos: &Position,
    color: PieceColor,
    from: Square,
    to: Square,
    king: Square,
) -> bool {
    let df = (from.file() as i8 - king.file() as i8).signum();
    let dr = (from.rank() as i8 - king.rank() as i8).signum();

    let attackers: &[PieceKind] = if king.file() == from.file() {
        if to.file() == king.file() {
            return false;
        }
        &[PieceKind::Rook, PieceKind::Queen]
    } else if king.rank() == from.rank() {
        if to.rank() == king.rank() {
            return false;
        }
        &[PieceKind::Rook, PieceKind::Queen]
    } else if king.shares_diagonal(from) {
        let to_df = (to.file() as i8 - king.file() as i8).signum();
        let to_dr = (to.rank() as i8 - king.rank() as i8).signum();
        if king.shares_diagonal(to) && to_df * to_dr == df * dr {
            return false;
        }
        &[PieceKind::Bishop, PieceKind::Queen]
    } else {
        return false;
    };

    let shielded = first_piece(pos, king, df, dr).map(|(sq, _)| sq) != Some(from);
    if shielded {
        return false;
    }

    matches!(
        first_piece(pos, from, df, dr),
        Some((_, p)) if p.color != color && attackers.contains(&p.kind)
    )
}
