use std::fmt::{self, Display};

use crate::geometry::Square;

pub const SLOT_COUNT: usize = 32;
pub const SLOTS_PER_SIDE: u8 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Turns are counted from 1 and White moves on odd turns.
    pub const fn from_turn(turn: u32) -> Side {
        if turn % 2 == 1 { Side::White } else { Side::Black }
    }

    pub const fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Rows a pawn of this side advances per step.
    pub const fn forward(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    const fn base(self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => SLOTS_PER_SIDE,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

impl PieceKind {
    pub const fn from_letter(letter: u8) -> Option<PieceKind> {
        match letter {
            b'K' => Some(PieceKind::King),
            b'Q' => Some(PieceKind::Queen),
            b'B' => Some(PieceKind::Bishop),
            b'N' => Some(PieceKind::Knight),
            b'R' => Some(PieceKind::Rook),
            b'P' => Some(PieceKind::Pawn),
            _ => None,
        }
    }

    pub const fn letter(self, side: Side) -> char {
        let upper = match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Rook => 'R',
            PieceKind::Pawn => 'P',
        };
        match side {
            Side::White => upper,
            Side::Black => upper.to_ascii_lowercase(),
        }
    }

    /// Value of the `promotion_type` argument of the ledger's move action.
    pub const fn promotion_id(self) -> Option<u8> {
        match self {
            PieceKind::Bishop => Some(0),
            PieceKind::Knight => Some(1),
            PieceKind::Rook => Some(2),
            PieceKind::Queen => Some(3),
            _ => None,
        }
    }

    pub const fn from_promotion_id(id: u8) -> PieceKind {
        match id & 0x03 {
            0 => PieceKind::Bishop,
            1 => PieceKind::Knight,
            2 => PieceKind::Rook,
            _ => PieceKind::Queen,
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::King => "king",
            PieceKind::Queen => "queen",
            PieceKind::Bishop => "bishop",
            PieceKind::Knight => "knight",
            PieceKind::Rook => "rook",
            PieceKind::Pawn => "pawn",
        };
        f.write_str(name)
    }
}

/// Permanent identity of one piece. The discriminant is the piece's index in the ledger's position array.
///
/// Bishops, knights, rooks and pawns are named after the file they start on.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Slot {
    WhiteKing, WhiteQueen, WhiteBishopF, WhiteBishopC, WhiteKnightG, WhiteKnightB, WhiteRookH, WhiteRookA,
    WhitePawnH, WhitePawnG, WhitePawnF, WhitePawnE, WhitePawnD, WhitePawnC, WhitePawnB, WhitePawnA,
    BlackKing, BlackQueen, BlackBishopF, BlackBishopC, BlackKnightG, BlackKnightB, BlackRookH, BlackRookA,
    BlackPawnH, BlackPawnG, BlackPawnF, BlackPawnE, BlackPawnD, BlackPawnC, BlackPawnB, BlackPawnA,
}

#[rustfmt::skip]
static ALL_SLOTS: [Slot; SLOT_COUNT] = [
    Slot::WhiteKing, Slot::WhiteQueen, Slot::WhiteBishopF, Slot::WhiteBishopC,
    Slot::WhiteKnightG, Slot::WhiteKnightB, Slot::WhiteRookH, Slot::WhiteRookA,
    Slot::WhitePawnH, Slot::WhitePawnG, Slot::WhitePawnF, Slot::WhitePawnE,
    Slot::WhitePawnD, Slot::WhitePawnC, Slot::WhitePawnB, Slot::WhitePawnA,
    Slot::BlackKing, Slot::BlackQueen, Slot::BlackBishopF, Slot::BlackBishopC,
    Slot::BlackKnightG, Slot::BlackKnightB, Slot::BlackRookH, Slot::BlackRookA,
    Slot::BlackPawnH, Slot::BlackPawnG, Slot::BlackPawnF, Slot::BlackPawnE,
    Slot::BlackPawnD, Slot::BlackPawnC, Slot::BlackPawnB, Slot::BlackPawnA,
];

#[rustfmt::skip]
static STARTING_SQUARES: [u8; SLOT_COUNT] = [
    4, 5, 3, 6, 2, 7, 1, 8, 9, 10, 11, 12, 13, 14, 15, 16,
    60, 61, 59, 62, 58, 63, 57, 64, 49, 50, 51, 52, 53, 54, 55, 56,
];

impl Slot {
    pub fn all() -> impl Iterator<Item = Slot> {
        ALL_SLOTS.iter().copied()
    }

    pub fn side_slots(side: Side) -> impl Iterator<Item = Slot> {
        let base = side.base() as usize;
        ALL_SLOTS[base..base + SLOTS_PER_SIDE as usize].iter().copied()
    }

    pub fn pawns(side: Side) -> impl Iterator<Item = Slot> {
        let base = side.base() as usize;
        ALL_SLOTS[base + 8..base + 16].iter().copied()
    }

    pub fn from_index(index: usize) -> Option<Slot> {
        ALL_SLOTS.get(index).copied()
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn king(side: Side) -> Slot {
        match side {
            Side::White => Slot::WhiteKing,
            Side::Black => Slot::BlackKing,
        }
    }

    pub const fn queen(side: Side) -> Slot {
        match side {
            Side::White => Slot::WhiteQueen,
            Side::Black => Slot::BlackQueen,
        }
    }

    pub const fn kingside_rook(side: Side) -> Slot {
        match side {
            Side::White => Slot::WhiteRookH,
            Side::Black => Slot::BlackRookH,
        }
    }

    pub const fn queenside_rook(side: Side) -> Slot {
        match side {
            Side::White => Slot::WhiteRookA,
            Side::Black => Slot::BlackRookA,
        }
    }

    pub const fn side(self) -> Side {
        if (self as u8) < SLOTS_PER_SIDE { Side::White } else { Side::Black }
    }

    /// The kind the piece starts the game as.
    pub const fn kind(self) -> PieceKind {
        match (self as u8) % SLOTS_PER_SIDE {
            0 => PieceKind::King,
            1 => PieceKind::Queen,
            2 | 3 => PieceKind::Bishop,
            4 | 5 => PieceKind::Knight,
            6 | 7 => PieceKind::Rook,
            _ => PieceKind::Pawn,
        }
    }

    pub const fn starting_square(self) -> Square {
        Square::from_const(STARTING_SQUARES[self as usize])
    }

    /// Bit of this pawn in the ledger's 16 bit promoted pawns mask.
    pub const fn pawn_offset(self) -> Option<u8> {
        match self.kind() {
            PieceKind::Pawn => Some(self as u8 - 8 - if (self as u8) < SLOTS_PER_SIDE { 0 } else { 8 }),
            _ => None,
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.index())
    }
}
