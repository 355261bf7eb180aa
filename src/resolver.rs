use log::{debug, trace, warn};

use crate::{
    board::Board,
    error::ResolutionError,
    geometry::{Direction, Square, bishop_reach, blocked, knight_reach, ray, rook_reach},
    notation::{Hint, PieceMove},
    slot::{PieceKind, Side, Slot},
};

/// What to do when a disambiguation hint matches none of the candidate pieces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HintPolicy {
    /// Report [ResolutionError::UnmatchedHint].
    #[default]
    Strict,
    /// Take the first candidate if the hint matches it and the next one otherwise, as older transcripts expect.
    Lenient,
}

/// Finds which piece of `side` a decoded move refers to.
pub fn resolve(board: &Board, side: Side, m: &PieceMove, policy: HintPolicy) -> Result<Slot, ResolutionError> {
    let slot = match m.kind {
        PieceKind::King => resolve_king(board, side, m),
        PieceKind::Queen => resolve_queen(board, side, m, policy),
        PieceKind::Pawn => resolve_pawn(board, side, m),
        _ => resolve_piece(board, side, m, policy),
    }?;

    debug!("{side} {} to {} resolved to {slot}", m.kind, m.destination);
    Ok(slot)
}

fn no_candidate(m: &PieceMove) -> ResolutionError {
    ResolutionError::NoCandidate {
        kind: m.kind,
        destination: m.destination,
    }
}

fn resolve_king(board: &Board, side: Side, m: &PieceMove) -> Result<Slot, ResolutionError> {
    let king = Slot::king(side);
    match board.square(king) {
        Some(_) => Ok(king),
        None => Err(no_candidate(m)),
    }
}

fn resolve_queen(board: &Board, side: Side, m: &PieceMove, policy: HintPolicy) -> Result<Slot, ResolutionError> {
    let queen = Slot::queen(side);
    let promoted = board.pieces(side, PieceKind::Queen).any(|(slot, _)| slot != queen);

    if promoted {
        return resolve_piece(board, side, m, policy);
    }

    match board.square(queen) {
        Some(_) => Ok(queen),
        None => Err(no_candidate(m)),
    }
}

/// Rooks, bishops, knights, and queens once a pawn has promoted to one.
fn resolve_piece(board: &Board, side: Side, m: &PieceMove, policy: HintPolicy) -> Result<Slot, ResolutionError> {
    let candidates: Vec<(Slot, Square)> = board.pieces(side, m.kind).collect();
    trace!("{} candidates for {}: {candidates:?}", m.kind, m.destination);

    match candidates.as_slice() {
        [] => return Err(no_candidate(m)),
        [(slot, _)] => return Ok(*slot),
        _ => {}
    }

    let narrowed = match m.hint {
        Some(hint) => narrow_by_hint(candidates, hint, m, policy)?,
        None => candidates,
    };

    if let [(slot, _)] = narrowed.as_slice() {
        return Ok(*slot);
    }

    let reachable: Vec<(Slot, Square)> = narrowed
        .into_iter()
        .filter(|(_, from)| reaches(board, m.kind, *from, m.destination))
        .collect();

    match reachable.as_slice() {
        [] => Err(no_candidate(m)),
        [(slot, _)] => Ok(*slot),
        _ => {
            let free: Vec<Slot> = reachable
                .iter()
                .filter(|(_, from)| !is_pinned(board, side, *from, m.destination))
                .map(|(slot, _)| *slot)
                .collect();

            match free.as_slice() {
                [slot] => Ok(*slot),
                _ => Err(ResolutionError::Ambiguous {
                    kind: m.kind,
                    destination: m.destination,
                    count: reachable.len(),
                }),
            }
        }
    }
}

fn narrow_by_hint(
    candidates: Vec<(Slot, Square)>,
    hint: Hint,
    m: &PieceMove,
    policy: HintPolicy,
) -> Result<Vec<(Slot, Square)>, ResolutionError> {
    match policy {
        HintPolicy::Strict => {
            let matched: Vec<(Slot, Square)> = candidates.into_iter().filter(|(_, s)| hint.matches(*s)).collect();
            if matched.is_empty() {
                return Err(ResolutionError::UnmatchedHint {
                    kind: m.kind,
                    hint,
                    destination: m.destination,
                });
            }
            Ok(matched)
        }
        HintPolicy::Lenient => {
            if hint.matches(candidates[0].1) {
                return Ok(vec![candidates[0]]);
            }

            let rest = &candidates[1..];
            let matched: Vec<(Slot, Square)> = rest.iter().filter(|(_, s)| hint.matches(*s)).copied().collect();
            if matched.is_empty() {
                warn!(
                    "hint '{hint}' matches no {} for {}, falling back to {}",
                    m.kind, m.destination, rest[0].0
                );
                return Ok(rest.to_vec());
            }
            Ok(matched)
        }
    }
}

/// Whether a piece moving as `kind` can travel from `from` to `to` on this board.
pub fn reaches(board: &Board, kind: PieceKind, from: Square, to: Square) -> bool {
    let geometric = match kind {
        PieceKind::Rook => rook_reach(from, to),
        PieceKind::Bishop => bishop_reach(from, to),
        PieceKind::Queen => rook_reach(from, to) || bishop_reach(from, to),
        PieceKind::Knight => return knight_reach(from, to),
        PieceKind::King => {
            let rows = (to.row() as i8 - from.row() as i8).abs();
            let cols = (to.col() as i8 - from.col() as i8).abs();
            return from != to && rows <= 1 && cols <= 1;
        }
        PieceKind::Pawn => false,
    };

    geometric && !board.occupied().any(|square| blocked(from, to, square))
}

/// True when moving the piece on `from` to `to` would uncover an enemy slider aimed at its own king.
fn is_pinned(board: &Board, side: Side, from: Square, to: Square) -> bool {
    let Some(king) = board.square(Slot::king(side)) else {
        return false;
    };
    let Some(direction) = Direction::between(king, from) else {
        return false;
    };

    if board.occupied().any(|square| blocked(king, from, square)) {
        return false;
    }
    // sliding along the pin line keeps the king covered
    if Direction::between(king, to) == Some(direction) {
        return false;
    }

    for square in ray(from, direction) {
        let Some(occupant) = board.slot_at(square) else {
            continue;
        };
        if occupant.side() == side {
            return false;
        }

        return match board.kind(occupant) {
            PieceKind::Queen => true,
            PieceKind::Bishop => direction.is_diagonal(),
            PieceKind::Rook => !direction.is_diagonal(),
            _ => false,
        };
    }

    false
}

fn resolve_pawn(board: &Board, side: Side, m: &PieceMove) -> Result<Slot, ResolutionError> {
    let forward = side.forward();
    let destination = m.destination;
    let pawns: Vec<(Slot, Square)> = board.pieces(side, PieceKind::Pawn).collect();

    if !m.capture {
        let one_step = destination.offset(-forward, 0);
        if let Some(from) = one_step {
            if let Some((slot, _)) = pawns.iter().find(|(_, s)| *s == from) {
                return Ok(*slot);
            }
            if board.is_occupied(from) {
                return Err(no_candidate(m));
            }
        }

        let two_step = destination.offset(-2 * forward, 0);
        return match two_step.and_then(|from| pawns.iter().find(|(_, s)| *s == from)) {
            Some((slot, _)) => Ok(*slot),
            None => Err(no_candidate(m)),
        };
    }

    let attackers: Vec<(Slot, Square)> = pawns
        .into_iter()
        .filter(|(_, from)| {
            from.row() as i8 + forward == destination.row() as i8
                && (from.col() as i8 - destination.col() as i8).abs() == 1
        })
        .collect();

    if attackers.is_empty() {
        return Err(no_candidate(m));
    }

    let narrowed: Vec<(Slot, Square)> = match m.hint {
        Some(hint) => attackers.into_iter().filter(|(_, s)| hint.matches(*s)).collect(),
        None => attackers,
    };

    match narrowed.as_slice() {
        [(slot, _)] => Ok(*slot),
        [] => Err(ResolutionError::UnmatchedHint {
            kind: m.kind,
            // an empty result with attackers present means a hint was given
            hint: m.hint.unwrap_or(Hint::Square(destination)),
            destination,
        }),
        _ => Err(ResolutionError::Ambiguous {
            kind: m.kind,
            destination,
            count: narrowed.len(),
        }),
    }
}
