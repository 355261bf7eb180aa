use std::fmt::{self, Display};

use log::trace;

use crate::{
    board::Board,
    error::MoveError,
    geometry::{Square, blocked},
    notation::{CastleSide, PieceMove},
    slot::{PieceKind, Side, Slot},
};

/// What the ledger's move action receives: which piece moves, where, and what it promotes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedMove {
    pub slot: Slot,
    pub destination: Square,
    pub promotion: Option<PieceKind>,
}

impl ResolvedMove {
    /// The action's `promotion_type` argument; 0 when the move is not a promotion.
    pub fn promotion_id(&self) -> u8 {
        self.promotion.and_then(PieceKind::promotion_id).unwrap_or(0)
    }
}

impl Display for ResolvedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.slot.index(), self.destination.get(), self.promotion_id())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub resolved: ResolvedMove,
    pub from: Square,
    /// What the piece moved as, before any promotion on this move.
    pub kind: PieceKind,
    pub captured: Option<Slot>,
    pub en_passant: bool,
    /// The rook that moved alongside the king when castling.
    pub castled_rook: Option<Slot>,
}

impl MoveOutcome {
    pub fn is_double_step(&self) -> bool {
        self.kind == PieceKind::Pawn
            && self.resolved.promotion.is_none()
            && (self.resolved.destination.row() as i8 - self.from.row() as i8).abs() == 2
    }
}

/// (king home, king target, rook target) for each castling move.
const fn castle_squares(side: Side, castle: CastleSide) -> (Square, Square, Square) {
    let (home, king, rook) = match (side, castle) {
        (Side::White, CastleSide::Kingside) => (4, 2, 3),
        (Side::White, CastleSide::Queenside) => (4, 6, 5),
        (Side::Black, CastleSide::Kingside) => (60, 58, 59),
        (Side::Black, CastleSide::Queenside) => (60, 62, 61),
    };
    (Square::from_const(home), Square::from_const(king), Square::from_const(rook))
}

pub const fn castle_rook(side: Side, castle: CastleSide) -> Slot {
    match castle {
        CastleSide::Kingside => Slot::kingside_rook(side),
        CastleSide::Queenside => Slot::queenside_rook(side),
    }
}

impl Board {
    /// Moves the king and the matching corner rook. Nothing else on the board changes.
    pub fn castle(&mut self, side: Side, castle: CastleSide) -> Result<MoveOutcome, MoveError> {
        let king = Slot::king(side);
        let rook = castle_rook(side, castle);
        let (home, king_target, rook_target) = castle_squares(side, castle);
        let rook_home = rook.starting_square();

        if self.square(king) != Some(home) || self.square(rook) != Some(rook_home) {
            return Err(MoveError::CastlingUnavailable { king, rook });
        }

        if let Some(square) = self.occupied().find(|square| blocked(home, rook_home, *square)) {
            return Err(MoveError::CastlingBlocked(square));
        }

        self.place(king, king_target);
        self.place(rook, rook_target);
        trace!("{side} castled {castle:?}: {:?}", self);

        Ok(MoveOutcome {
            resolved: ResolvedMove {
                slot: king,
                destination: king_target,
                promotion: None,
            },
            from: home,
            kind: PieceKind::King,
            captured: None,
            en_passant: false,
            castled_rook: Some(rook),
        })
    }

    /// Moves `slot` as described by `m`, removing whatever it captures and recording a promotion on the pawn's slot.
    pub fn make_move(&mut self, slot: Slot, m: &PieceMove) -> Result<MoveOutcome, MoveError> {
        let from = self.square(slot).ok_or(MoveError::NotOnBoard(slot))?;
        let side = slot.side();
        let kind = self.kind(slot);
        let destination = m.destination;
        let mut en_passant = false;

        let captured = match self.slot_at(destination) {
            Some(occupant) if !m.capture => {
                return Err(MoveError::DestinationOccupied { destination, occupant });
            }
            Some(occupant) if occupant.side() == side => return Err(MoveError::CaptureOwnPiece(slot, occupant)),
            Some(occupant) => Some(occupant),
            None if !m.capture => None,
            None if kind == PieceKind::Pawn => {
                let victim = destination
                    .offset(-side.forward(), 0)
                    .and_then(|behind| self.slot_at(behind))
                    .filter(|victim| victim.side() != side && self.kind(*victim) == PieceKind::Pawn)
                    .ok_or(MoveError::NothingToCapture(destination))?;
                en_passant = true;
                Some(victim)
            }
            None => return Err(MoveError::NothingToCapture(destination)),
        };

        if let Some(victim) = captured {
            self.remove(victim);
        }
        self.place(slot, destination);
        if let Some(promoted) = m.promotion {
            self.promote(slot, promoted);
        }
        trace!("{slot} {from} -> {destination}: {:?}", self);

        Ok(MoveOutcome {
            resolved: ResolvedMove {
                slot,
                destination,
                promotion: m.promotion,
            },
            from,
            kind,
            captured,
            en_passant,
            castled_rook: None,
        })
    }
}
