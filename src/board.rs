use std::fmt::{self, Debug};

use crate::{
    error::RecordError,
    geometry::Square,
    slot::{PieceKind, SLOT_COUNT, Side, Slot},
};

/// Where every piece is, keyed by piece identity rather than by square.
///
/// A slot holding `None` has been captured. No two slots ever share a square.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Square>; SLOT_COUNT],
    promotions: [Option<PieceKind>; SLOT_COUNT],
}

impl Board {
    pub fn starting() -> Board {
        let mut squares = [None; SLOT_COUNT];
        for slot in Slot::all() {
            squares[slot.index()] = Some(slot.starting_square());
        }

        Board {
            squares,
            promotions: [None; SLOT_COUNT],
        }
    }

    /// Builds a board from the ledger's raw position array, where 0 marks a captured piece.
    pub fn from_raw(raw: &[i64]) -> Result<Board, RecordError> {
        if raw.len() != SLOT_COUNT {
            return Err(RecordError::SlotCount {
                expected: SLOT_COUNT,
                found: raw.len(),
            });
        }

        let mut board = Board {
            squares: [None; SLOT_COUNT],
            promotions: [None; SLOT_COUNT],
        };

        for (i, value) in raw.iter().enumerate() {
            if *value == 0 {
                continue;
            }

            let square = u8::try_from(*value)
                .ok()
                .and_then(Square::new)
                .ok_or(RecordError::SquareOutOfRange { slot: i, value: *value })?;

            if let Some(first) = board.slot_at(square) {
                return Err(RecordError::DuplicateSquare {
                    first: first.index(),
                    second: i,
                    square: square.get(),
                });
            }

            board.squares[i] = Some(square);
        }

        Ok(board)
    }

    pub fn to_raw(&self) -> [u8; SLOT_COUNT] {
        self.squares.map(|s| s.map_or(0, Square::get))
    }

    /// Applies the ledger's promotion bookkeeping: one bit per pawn in `promoted` and two bits of promotion id per
    /// pawn in `types`, both ordered White h-pawn first.
    pub fn with_promotions(mut self, promoted: u16, types: u32) -> Board {
        for slot in Slot::pawns(Side::White).chain(Slot::pawns(Side::Black)) {
            let Some(offset) = slot.pawn_offset() else {
                continue;
            };

            if promoted & (1 << offset) != 0 {
                let id = ((types >> (offset * 2)) & 0x03) as u8;
                self.promotions[slot.index()] = Some(PieceKind::from_promotion_id(id));
            }
        }

        self
    }

    pub fn promotion_masks(&self) -> (u16, u32) {
        let mut promoted = 0;
        let mut types = 0;

        for slot in Slot::pawns(Side::White).chain(Slot::pawns(Side::Black)) {
            if let (Some(offset), Some(kind)) = (slot.pawn_offset(), self.promotions[slot.index()]) {
                promoted |= 1 << offset;
                types |= (kind.promotion_id().unwrap_or(0) as u32) << (offset * 2);
            }
        }

        (promoted, types)
    }

    pub fn square(&self, slot: Slot) -> Option<Square> {
        self.squares[slot.index()]
    }

    pub fn slot_at(&self, square: Square) -> Option<Slot> {
        Slot::all().find(|slot| self.squares[slot.index()] == Some(square))
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.squares.contains(&Some(square))
    }

    /// The kind the piece currently moves as, which differs from the slot's own kind once a pawn has promoted.
    pub fn kind(&self, slot: Slot) -> PieceKind {
        self.promotions[slot.index()].unwrap_or(slot.kind())
    }

    pub fn occupied(&self) -> impl Iterator<Item = Square> + '_ {
        self.squares.iter().flatten().copied()
    }

    /// Pieces of `side` still on the board that currently move as `kind`.
    pub fn pieces(&self, side: Side, kind: PieceKind) -> impl Iterator<Item = (Slot, Square)> + '_ {
        Slot::side_slots(side)
            .filter(move |slot| self.kind(*slot) == kind)
            .filter_map(|slot| self.square(slot).map(|square| (slot, square)))
    }

    pub(crate) fn place(&mut self, slot: Slot, square: Square) {
        debug_assert!(
            self.slot_at(square).is_none_or(|occupant| occupant == slot),
            "{square} already holds a piece"
        );
        self.squares[slot.index()] = Some(square);
    }

    pub(crate) fn remove(&mut self, slot: Slot) {
        self.squares[slot.index()] = None;
    }

    pub(crate) fn promote(&mut self, slot: Slot, kind: PieceKind) {
        self.promotions[slot.index()] = Some(kind);
    }

    #[cfg(test)]
    pub(crate) fn from_pieces(pieces: &[(Slot, u8)]) -> Board {
        let mut raw = [0i64; SLOT_COUNT];
        for (slot, square) in pieces {
            raw[slot.index()] = *square as i64;
        }
        Board::from_raw(&raw).unwrap()
    }

    /// Piece letters by grid cell, rank 8 first and the a-file first within a rank.
    pub fn grid(&self) -> [[Option<char>; 8]; 8] {
        let mut grid = [[None; 8]; 8];

        for slot in Slot::all() {
            if let Some(square) = self.square(slot) {
                let row = 7 - square.row() as usize;
                let col = 7 - square.col() as usize;
                grid[row][col] = Some(self.kind(slot).letter(slot.side()));
            }
        }

        grid
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting()
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("raw", &self.to_raw())
            .field("promotions", &self.promotion_masks())
            .finish()?;

        let pretty = self
            .grid()
            .iter()
            .map(|row| row.iter().map(|cell| cell.unwrap_or('.')).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");

        writeln!(f, "\n{pretty}")
    }
}
