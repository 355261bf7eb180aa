use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::{
    error::DecodeError,
    geometry::{Square, file_to_col, rank_to_row},
    slot::PieceKind,
};

static CASTLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[O0]-[O0](?P<long>-[O0])?[+#]?[!?]*$").expect("castle pattern"));

static MOVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<piece>[KQRBN])?(?P<file>[a-h])?(?P<rank>[1-8])?(?P<capture>x)?(?P<dest>[a-h][1-8])(?:=?(?P<promo>[QRBN]))?[+#]?[!?]*$",
    )
    .expect("move pattern")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

/// Origin information written between the piece letter and the destination, e.g. the `b` of `Nbd7`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hint {
    File(u8),
    Rank(u8),
    Square(Square),
}

impl Hint {
    pub fn matches(self, square: Square) -> bool {
        match self {
            Hint::File(col) => square.col() == col,
            Hint::Rank(row) => square.row() == row,
            Hint::Square(s) => s == square,
        }
    }
}

impl Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::File(col) => write!(f, "{}", (b'a' + 7 - col) as char),
            Hint::Rank(row) => write!(f, "{}", row + 1),
            Hint::Square(square) => write!(f, "{square}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceMove {
    pub kind: PieceKind,
    pub capture: bool,
    pub hint: Option<Hint>,
    pub destination: Square,
    pub promotion: Option<PieceKind>,
}

/// One decoded move token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notation {
    Castle(CastleSide),
    Piece(PieceMove),
}

impl Notation {
    pub fn decode(token: &str) -> Result<Notation, DecodeError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(DecodeError::Empty);
        }

        if let Some(captures) = CASTLE_PATTERN.captures(token) {
            let side = if captures.name("long").is_some() {
                CastleSide::Queenside
            } else {
                CastleSide::Kingside
            };
            return Ok(Notation::Castle(side));
        }

        let Some(captures) = MOVE_PATTERN.captures(token) else {
            return Err(DecodeError::Malformed(token.to_string()));
        };

        let first_byte = |name: &str| captures.name(name).map(|m| m.as_str().as_bytes()[0]);

        let kind = match first_byte("piece") {
            Some(letter) => PieceKind::from_letter(letter).ok_or_else(|| DecodeError::Malformed(token.to_string()))?,
            None => PieceKind::Pawn,
        };

        let hint = match (first_byte("file"), first_byte("rank")) {
            (Some(file), Some(rank)) => Square::from_algebraic(file, rank).map(Hint::Square),
            (Some(file), None) => file_to_col(file).map(Hint::File),
            (None, Some(rank)) => rank_to_row(rank).map(Hint::Rank),
            (None, None) => None,
        };

        let dest = captures["dest"].as_bytes();
        let destination =
            Square::from_algebraic(dest[0], dest[1]).ok_or_else(|| DecodeError::Malformed(token.to_string()))?;

        let promotion = first_byte("promo").and_then(PieceKind::from_letter);
        if promotion.is_some() {
            if kind != PieceKind::Pawn {
                return Err(DecodeError::PromotionNotPawn(token.to_string()));
            }
            if destination.row() != 0 && destination.row() != 7 {
                return Err(DecodeError::PromotionRank(token.to_string()));
            }
        }

        Ok(Notation::Piece(PieceMove {
            kind,
            capture: captures.name("capture").is_some(),
            hint,
            destination,
            promotion,
        }))
    }
}

impl FromStr for Notation {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Notation::decode(s)
    }
}
