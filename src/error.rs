use thiserror::Error;

use crate::{
    geometry::Square,
    notation::Hint,
    slot::{PieceKind, Slot},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("empty move token")]
    Empty,

    #[error("'{0}' is not a move in short algebraic notation")]
    Malformed(String),

    #[error("'{0}' promotes a piece that is not a pawn")]
    PromotionNotPawn(String),

    #[error("'{0}' promotes away from the last rank")]
    PromotionRank(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("no {kind} of the side to move can reach {destination}")]
    NoCandidate { kind: PieceKind, destination: Square },

    #[error("no {kind} matches the disambiguation '{hint}' for {destination}")]
    UnmatchedHint {
        kind: PieceKind,
        hint: Hint,
        destination: Square,
    },

    #[error("{count} pieces of kind {kind} can reach {destination}")]
    Ambiguous {
        kind: PieceKind,
        destination: Square,
        count: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("{destination} is occupied by {occupant} but the move is not a capture")]
    DestinationOccupied { destination: Square, occupant: Slot },

    #[error("nothing to capture on {0}")]
    NothingToCapture(Square),

    #[error("{0} would capture its own side's {1}")]
    CaptureOwnPiece(Slot, Slot),

    #[error("castling needs {king} and {rook} on their home squares")]
    CastlingUnavailable { king: Slot, rook: Slot },

    #[error("castling is blocked by the piece on {0}")]
    CastlingBlocked(Square),

    #[error("{0} has already lost the right to castle that way")]
    CastlingRightLost(Slot),

    #[error("{0} is not on the board")]
    NotOnBoard(Slot),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("ply {ply} '{token}': {source}")]
    Decode {
        ply: u32,
        token: String,
        #[source]
        source: DecodeError,
    },

    #[error("ply {ply} '{token}': {source}")]
    Resolution {
        ply: u32,
        token: String,
        #[source]
        source: ResolutionError,
    },

    #[error("ply {ply} '{token}': {source}")]
    Move {
        ply: u32,
        token: String,
        #[source]
        source: MoveError,
    },
}

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("expected {expected} piece positions but found {found}")]
    SlotCount { expected: usize, found: usize },

    #[error("piece position {value} of slot {slot} is outside 0..=64")]
    SquareOutOfRange { slot: usize, value: i64 },

    #[error("slots {first} and {second} share square {square}")]
    DuplicateSquare { first: usize, second: usize, square: u8 },

    #[error("the response holds no game rows")]
    NoRows,

    #[error("invalid game record JSON: {0}")]
    Json(#[from] serde_json::Error),
}
