//! Board value types: squares, pieces and colors.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of a chess piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

/// Side a piece belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceKind {
    pub fn to_char_upper(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    pub fn to_char_lower(self) -> char {
        self.to_char_upper().to_ascii_lowercase()
    }

    /// Piece letter as written in SAN. Pawns have no letter, so `P` is not
    /// accepted here.
    pub fn from_san_letter(c: char) -> Option<Self> {
        match c {
            'R' => Some(Self::Rook),
            'N' => Some(Self::Knight),
            'B' => Some(Self::Bishop),
            'Q' => Some(Self::Queen),
            'K' => Some(Self::King),
            _ => None,
        }
    }
}

impl PieceColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Rank direction pawns of this color advance in.
    pub fn forward(self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Back rank (castling rank) index.
    pub fn home_rank(self) -> u8 {
        match self {
            Self::White => 0,
            Self::Black => 7,
        }
    }

    /// Rank index where this color's pawns promote.
    pub fn last_rank(self) -> u8 {
        self.opposite().home_rank()
    }

    /// Convert a rank counted from this color's side (0 = own back rank)
    /// into an absolute rank index.
    pub fn relative_rank(self, rank: u8) -> u8 {
        match self {
            Self::White => rank,
            Self::Black => 7 - rank,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char_upper())
    }
}

impl std::fmt::Display for PieceColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A colored piece standing on a square. Empty squares are `None` at the
/// [`Position`](crate::Position) level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self { kind, color }
    }

    /// FEN piece letter: uppercase is white, lowercase is black.
    pub fn from_fen_char(c: char) -> Option<Self> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        Some(Self { kind, color })
    }

    pub fn to_fen_char(self) -> char {
        match self.color {
            PieceColor::White => self.kind.to_char_upper(),
            PieceColor::Black => self.kind.to_char_lower(),
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?}", self.color, self.kind)
    }
}

/// A board square. Both coordinates are in `0..=7`; file 0 is the a-file and
/// rank 0 is the first rank. Serializes as algebraic text (`"e4"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Build a square from signed coordinates, rejecting anything off the board.
    pub fn new(file: i8, rank: i8) -> Result<Self, SquareError> {
        if !(0..8).contains(&file) || !(0..8).contains(&rank) {
            return Err(SquareError::OutOfRange { file, rank });
        }
        Ok(Self {
            file: file as u8,
            rank: rank as u8,
        })
    }

    /// Best-effort constructor for coordinates the caller has already
    /// range-checked. Falls back to a1 when they are off the board.
    pub(crate) fn at(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8, "square ({file}, {rank}) off board");
        if file < 8 && rank < 8 {
            Self { file, rank }
        } else {
            Self { file: 0, rank: 0 }
        }
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Index into a 64-entry board array (`file * 8 + rank`).
    pub fn index(self) -> usize {
        self.file as usize * 8 + self.rank as usize
    }

    /// Square displaced by `(df, dr)`, or `None` when that leaves the board.
    pub fn offset(self, df: i8, dr: i8) -> Option<Self> {
        Self::new(self.file as i8 + df, self.rank as i8 + dr).ok()
    }

    /// All 64 squares, a1, a2, ... h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|file| (0..8u8).map(move |rank| Square { file, rank }))
    }

    pub fn file_char(self) -> char {
        (b'a' + self.file) as char
    }

    pub fn rank_char(self) -> char {
        (b'1' + self.rank) as char
    }

    /// True when both squares lie on a common diagonal (and differ).
    pub fn shares_diagonal(self, other: Square) -> bool {
        let df = (self.file as i8 - other.file as i8).abs();
        let dr = (self.rank as i8 - other.rank as i8).abs();
        df == dr && df != 0
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = SquareError;

    /// Parse algebraic notation such as `e4`. The file letter may be upper case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(f), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(SquareError::InvalidNotation(s.to_string()));
        };
        let f = f.to_ascii_lowercase();
        if !('a'..='h').contains(&f) || !('1'..='8').contains(&r) {
            return Err(SquareError::InvalidNotation(s.to_string()));
        }
        Ok(Self {
            file: f as u8 - b'a',
            rank: r as u8 - b'1',
        })
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> String {
        sq.to_string()
    }
}

impl TryFrom<String> for Square {
    type Error = SquareError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SquareError {
    #[error("Square coordinates out of range: file {file}, rank {rank}")]
    OutOfRange { file: i8, rank: i8 },
    #[error("Invalid square notation: {0:?}")]
    InvalidNotation(String),
}
