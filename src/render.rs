use crate::{geometry::Square, position::GamePosition, slot::Side};

pub const DEFAULT_EDITOR_URL: &str = "https://lichess.org/editor";

/// Which square the en passant field names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnPassantStyle {
    /// The square of the pawn that just double stepped, as the ledger tooling has always written it.
    #[default]
    PawnSquare,
    /// The square the pawn skipped over, as FEN defines it.
    TargetSquare,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub en_passant: EnPassantStyle,
}

/// The four leading fields of a FEN record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPosition {
    pub placement: String,
    pub side_to_move: char,
    pub castling: String,
    pub en_passant: String,
}

impl RenderedPosition {
    /// `<base>/<placement>_<side>_<castling>_<en passant>`, the form board editors accept in a URL path.
    pub fn editor_url(&self, base: &str) -> String {
        format!(
            "{}/{}_{}_{}_{}",
            base.trim_end_matches('/'),
            self.placement,
            self.side_to_move,
            self.castling,
            self.en_passant
        )
    }
}

/// Placement field: rank 8 first, empty runs collapsed to digits.
pub fn placement(position: &GamePosition) -> String {
    let mut out = String::with_capacity(72);

    for (i, row) in position.board.grid().iter().enumerate() {
        if i > 0 {
            out.push('/');
        }

        let mut empty = 0u8;
        for cell in row {
            match cell {
                Some(letter) => {
                    if empty > 0 {
                        out.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    out.push(*letter);
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push(char::from(b'0' + empty));
        }
    }

    out
}

fn en_passant_square(position: &GamePosition, style: EnPassantStyle) -> Option<Square> {
    let slot = position.en_passant?;
    let square = position.board.square(slot)?;

    match style {
        EnPassantStyle::PawnSquare => Some(square),
        EnPassantStyle::TargetSquare => square.offset(-slot.side().forward(), 0),
    }
}

pub fn render(position: &GamePosition, options: RenderOptions) -> RenderedPosition {
    let side_to_move = match position.side_to_move() {
        Side::White => 'w',
        Side::Black => 'b',
    };

    RenderedPosition {
        placement: placement(position),
        side_to_move,
        castling: position.castling.to_string(),
        en_passant: en_passant_square(position, options.en_passant).map_or_else(|| "-".to_string(), |s| s.to_string()),
    }
}

pub fn editor_url(position: &GamePosition, base: &str, options: RenderOptions) -> String {
    render(position, options).editor_url(base)
}

/// Full FEN. The halfmove clock is not tracked by the ledger and is always 0.
pub fn fen(position: &GamePosition, options: RenderOptions) -> String {
    let rendered = render(position, options);
    format!(
        "{} {} {} {} 0 {}",
        rendered.placement,
        rendered.side_to_move,
        rendered.castling,
        rendered.en_passant,
        position.move_count / 2 + 1
    )
}
