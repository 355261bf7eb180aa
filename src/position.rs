use std::fmt::{self, Display};

use serde::Deserialize;
use serde_json::Value;

use crate::{
    board::Board,
    error::RecordError,
    notation::CastleSide,
    slot::{SLOT_COUNT, Side, Slot},
};

pub const WHITE_QUEENSIDE: u8 = 0x01;
pub const WHITE_KINGSIDE: u8 = 0x02;
pub const BLACK_QUEENSIDE: u8 = 0x04;
pub const BLACK_KINGSIDE: u8 = 0x08;

/// Ledger value of `en_passant_idx` when no pawn can be taken en passant.
pub const NO_EN_PASSANT: u8 = SLOT_COUNT as u8;

/// Castling rights in the ledger's layout: a set bit means the right has been lost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights(0);
    pub const NONE: CastlingRights = CastlingRights(0x0F);

    pub const fn from_mask(mask: u8) -> CastlingRights {
        CastlingRights(mask)
    }

    pub const fn mask(self) -> u8 {
        self.0
    }

    pub const fn bit(side: Side, castle: CastleSide) -> u8 {
        match (side, castle) {
            (Side::White, CastleSide::Queenside) => WHITE_QUEENSIDE,
            (Side::White, CastleSide::Kingside) => WHITE_KINGSIDE,
            (Side::Black, CastleSide::Queenside) => BLACK_QUEENSIDE,
            (Side::Black, CastleSide::Kingside) => BLACK_KINGSIDE,
        }
    }

    pub const fn can_castle(self, side: Side, castle: CastleSide) -> bool {
        self.0 & Self::bit(side, castle) == 0
    }

    pub fn lose(&mut self, side: Side, castle: CastleSide) {
        self.0 |= Self::bit(side, castle);
    }

    pub fn lose_all(&mut self, side: Side) {
        self.lose(side, CastleSide::Kingside);
        self.lose(side, CastleSide::Queenside);
    }
}

/// Editor letters for the rights still held, or `-` when every right is gone.
impl Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 & 0x0F == 0x0F {
            return f.write_str("-");
        }

        for (bit, letter) in [
            (WHITE_KINGSIDE, 'K'),
            (WHITE_QUEENSIDE, 'Q'),
            (BLACK_KINGSIDE, 'k'),
            (BLACK_QUEENSIDE, 'q'),
        ] {
            if self.0 & bit == 0 {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

/// One row of the ledger's `games` table. Unknown columns are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct StoredGame {
    pub piece_positions: Vec<i64>,
    #[serde(default)]
    pub move_count: u32,
    #[serde(default)]
    pub castle: u8,
    #[serde(default = "no_en_passant")]
    pub en_passant_idx: u8,
    #[serde(default)]
    pub promoted_pawns: u16,
    #[serde(default)]
    pub promoted_pawn_types: u32,
}

fn no_en_passant() -> u8 {
    NO_EN_PASSANT
}

/// A board plus the bookkeeping needed to render it for an editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GamePosition {
    pub board: Board,
    /// Half-moves played so far.
    pub move_count: u32,
    pub castling: CastlingRights,
    /// The pawn that just made a double step, if any.
    pub en_passant: Option<Slot>,
}

impl GamePosition {
    pub fn starting() -> GamePosition {
        GamePosition {
            board: Board::starting(),
            move_count: 0,
            castling: CastlingRights::ALL,
            en_passant: None,
        }
    }

    pub fn side_to_move(&self) -> Side {
        Side::from_turn(self.move_count + 1)
    }

    pub fn from_stored(game: &StoredGame) -> Result<GamePosition, RecordError> {
        let board =
            Board::from_raw(&game.piece_positions)?.with_promotions(game.promoted_pawns, game.promoted_pawn_types);

        Ok(GamePosition {
            board,
            move_count: game.move_count,
            castling: CastlingRights::from_mask(game.castle),
            en_passant: Slot::from_index(game.en_passant_idx as usize),
        })
    }

    pub fn to_stored(&self) -> StoredGame {
        let (promoted_pawns, promoted_pawn_types) = self.board.promotion_masks();

        StoredGame {
            piece_positions: self.board.to_raw().iter().map(|square| *square as i64).collect(),
            move_count: self.move_count,
            castle: self.castling.mask(),
            en_passant_idx: self.en_passant.map_or(NO_EN_PASSANT, |slot| slot.index() as u8),
            promoted_pawns,
            promoted_pawn_types,
        }
    }

    /// Reads the first game of a `get_table_rows` response, or a bare row.
    pub fn from_json(text: &str) -> Result<GamePosition, RecordError> {
        let mut value: Value = serde_json::from_str(text)?;
        let game = match value.get_mut("rows").map(Value::take) {
            Some(rows) => serde_json::from_value::<Vec<StoredGame>>(rows)?
                .into_iter()
                .next()
                .ok_or(RecordError::NoRows)?,
            None => serde_json::from_value::<StoredGame>(value)?,
        };

        GamePosition::from_stored(&game)
    }
}

impl Default for GamePosition {
    fn default() -> Self {
        GamePosition::starting()
    }
}
