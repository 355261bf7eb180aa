use std::sync::LazyLock;

use log::{debug, trace};
use regex::Regex;

use crate::{
    error::{MoveError, ReplayError},
    moves::{MoveOutcome, ResolvedMove, castle_rook},
    notation::{CastleSide, Notation},
    position::GamePosition,
    resolver::{HintPolicy, resolve},
    slot::{Side, Slot},
};

static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").expect("header pattern"));
static COMMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]*\}|;[^\n]*|\$\d+").expect("comment pattern"));
static MOVE_NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.+").expect("move number pattern"));
static RESULT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:1-0|0-1|1/2-1/2|\*)$").expect("result pattern"));

/// Removes `(...)` side lines, which may nest.
fn strip_variations(text: &str) -> String {
    let mut depth = 0usize;
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }

    out
}

/// Splits PGN movetext into bare move tokens, dropping tags, comments, variations, NAGs, move numbers and the
/// result.
pub fn tokenize(transcript: &str) -> Vec<String> {
    let text = HEADER_PATTERN.replace_all(transcript, " ");
    let text = COMMENT_PATTERN.replace_all(&text, " ");
    let text = strip_variations(&text);

    text.split_ascii_whitespace()
        .filter(|token| !RESULT_PATTERN.is_match(token))
        .map(|token| MOVE_NUMBER_PATTERN.replace(token, "").into_owned())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Plays SAN tokens one at a time, keeping the board, castling rights and en passant pawn up to date.
#[derive(Clone, Debug)]
pub struct Replay {
    position: GamePosition,
    policy: HintPolicy,
}

impl Replay {
    pub fn new(policy: HintPolicy) -> Replay {
        Replay::from_position(GamePosition::starting(), policy)
    }

    pub fn from_position(position: GamePosition, policy: HintPolicy) -> Replay {
        Replay { position, policy }
    }

    pub fn position(&self) -> &GamePosition {
        &self.position
    }

    pub fn into_position(self) -> GamePosition {
        self.position
    }

    pub fn side_to_move(&self) -> Side {
        self.position.side_to_move()
    }

    pub fn play(&mut self, token: &str) -> Result<MoveOutcome, ReplayError> {
        let ply = self.position.move_count + 1;
        let side = self.side_to_move();

        let notation = Notation::decode(token).map_err(|source| ReplayError::Decode {
            ply,
            token: token.to_string(),
            source,
        })?;

        let board = &mut self.position.board;
        let outcome = match notation {
            Notation::Castle(castle) if !self.position.castling.can_castle(side, castle) => {
                Err(MoveError::CastlingRightLost(Slot::king(side)))
            }
            Notation::Castle(castle) => board.castle(side, castle),
            Notation::Piece(m) => {
                let slot = resolve(board, side, &m, self.policy).map_err(|source| ReplayError::Resolution {
                    ply,
                    token: token.to_string(),
                    source,
                })?;
                board.make_move(slot, &m)
            }
        }
        .map_err(|source| ReplayError::Move {
            ply,
            token: token.to_string(),
            source,
        })?;

        self.update_castling(side, &outcome);
        self.position.en_passant = outcome.is_double_step().then_some(outcome.resolved.slot);
        self.position.move_count += 1;

        debug!("ply {ply} {side} {token}: {}", outcome.resolved);
        trace!("{:?}", self.position.board);
        Ok(outcome)
    }

    fn update_castling(&mut self, side: Side, outcome: &MoveOutcome) {
        let rights = &mut self.position.castling;
        let moved = outcome.resolved.slot;

        if moved == Slot::king(side) {
            rights.lose_all(side);
        }

        for castle in [CastleSide::Kingside, CastleSide::Queenside] {
            if moved == castle_rook(side, castle) {
                rights.lose(side, castle);
            }
            if outcome.captured == Some(castle_rook(side.opponent(), castle)) {
                rights.lose(side.opponent(), castle);
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayedGame {
    pub moves: Vec<ResolvedMove>,
    pub position: GamePosition,
}

/// Replays a whole transcript from the starting position, stopping at the first move that cannot be played.
pub fn replay_transcript(transcript: &str, policy: HintPolicy) -> Result<ReplayedGame, ReplayError> {
    let mut replay = Replay::new(policy);
    let mut moves = Vec::new();

    for token in tokenize(transcript) {
        moves.push(replay.play(&token)?.resolved);
    }

    Ok(ReplayedGame {
        moves,
        position: replay.into_position(),
    })
}
