use crate::{moves::ResolvedMove, slot::Side};

/// Accounts and game the generated `move` actions are pushed for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionConfig {
    pub contract: String,
    pub white: String,
    pub black: String,
    pub game_id: u64,
}

impl Default for ActionConfig {
    fn default() -> Self {
        ActionConfig {
            contract: "chess".to_string(),
            white: "alice".to_string(),
            black: "bob".to_string(),
            game_id: 0,
        }
    }
}

impl ActionConfig {
    pub fn player(&self, side: Side) -> &str {
        match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }

    /// One `cleos` invocation of the contract's `move` action, signed by the moving side's account.
    pub fn format_action(&self, m: &ResolvedMove) -> String {
        let player = self.player(m.slot.side());
        format!(
            "cleos push action {} move '[\"{player}\", \"{}\", \"{}\", \"{}\", \"{}\"]' -p {player}@active",
            self.contract,
            self.game_id,
            m.slot.index(),
            m.destination.get(),
            m.promotion_id()
        )
    }

    /// A shell script body with one action per line.
    pub fn format_script(&self, moves: &[ResolvedMove]) -> String {
        moves.iter().map(|m| self.format_action(m) + "\n").collect()
    }
}

#[cfg(test)]
mod action_tests {
    use crate::{
        geometry::Square,
        slot::{PieceKind, Slot},
    };

    use super::*;

    fn resolved(slot: Slot, square: u8, promotion: Option<PieceKind>) -> ResolvedMove {
        ResolvedMove {
            slot,
            destination: Square::new(square).unwrap(),
            promotion,
        }
    }

    #[test]
    pub fn default_accounts() {
        let config = ActionConfig::default();
        assert_eq!(
            r#"cleos push action chess move '["alice", "0", "11", "28", "0"]' -p alice@active"#,
            config.format_action(&resolved(Slot::WhitePawnE, 28, None))
        );
        assert_eq!(
            r#"cleos push action chess move '["bob", "0", "27", "36", "0"]' -p bob@active"#,
            config.format_action(&resolved(Slot::BlackPawnE, 36, None))
        );
    }

    #[test]
    pub fn custom_accounts_and_promotion() {
        let config = ActionConfig {
            contract: "chessgame".to_string(),
            white: "carol".to_string(),
            black: "dave".to_string(),
            game_id: 12,
        };
        let script = config.format_script(&[
            resolved(Slot::WhitePawnB, 64, Some(PieceKind::Knight)),
            resolved(Slot::BlackPawnH, 1, Some(PieceKind::Queen)),
        ]);
        assert_eq!(
            "cleos push action chessgame move '[\"carol\", \"12\", \"14\", \"64\", \"1\"]' -p carol@active\n\
             cleos push action chessgame move '[\"dave\", \"12\", \"24\", \"1\", \"3\"]' -p dave@active\n",
            script
        );
    }
}
