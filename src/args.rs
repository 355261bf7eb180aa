use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::{
    action::ActionConfig,
    render::{DEFAULT_EDITOR_URL, EnPassantStyle, RenderOptions},
    resolver::HintPolicy,
};

#[derive(Parser, Debug)]
#[command(name = "slotchess")]
#[command(version, about = "Translate chess transcripts into slot-indexed ledger moves and back into editor positions")]
pub struct Args {
    /// Also write log output to this file
    #[arg(long, global = true, env = "SLOTCHESS_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, env = "SLOTCHESS_LOG_LEVEL", default_value = "info")]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay SAN transcripts and write one move action per ply
    Replay(ReplayArgs),
    /// Render a stored game row as a board editor URL or FEN
    Render(RenderArgs),
}

#[derive(clap::Args, Debug)]
pub struct ReplayArgs {
    /// PGN or bare movetext files
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Write every script to this file instead of next to each transcript as `<FILE>.sh`
    #[arg(short, long, value_name = "PATH", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the scripts instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// When a disambiguation hint matches nothing, fall back to the other candidate instead of failing
    #[arg(long)]
    pub lenient_hints: bool,

    #[arg(long, default_value = "chess")]
    pub contract: String,

    /// Account that plays White
    #[arg(long, default_value = "alice")]
    pub white: String,

    /// Account that plays Black
    #[arg(long, default_value = "bob")]
    pub black: String,

    #[arg(long, default_value_t = 0)]
    pub game_id: u64,

    /// Log the FEN of the final position of each transcript
    #[arg(long)]
    pub fen: bool,
}

impl ReplayArgs {
    pub fn policy(&self) -> HintPolicy {
        if self.lenient_hints { HintPolicy::Lenient } else { HintPolicy::Strict }
    }

    pub fn action_config(&self) -> ActionConfig {
        ActionConfig {
            contract: self.contract.clone(),
            white: self.white.clone(),
            black: self.black.clone(),
            game_id: self.game_id,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Stored game row or `get_table_rows` response; `-` or nothing reads stdin
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    #[arg(long, env = "SLOTCHESS_EDITOR_URL", default_value = DEFAULT_EDITOR_URL)]
    pub base_url: String,

    /// Print a FEN record instead of an editor URL
    #[arg(long)]
    pub fen: bool,

    /// Name the square the pawn skipped in the en passant field
    #[arg(long)]
    pub ep_target: bool,
}

impl RenderArgs {
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            en_passant: if self.ep_target {
                EnPassantStyle::TargetSquare
            } else {
                EnPassantStyle::PawnSquare
            },
        }
    }
}

#[cfg(test)]
mod args_tests {
    use super::*;

    #[test]
    pub fn replay_defaults() {
        let args = Args::try_parse_from(["slotchess", "replay", "game.pgn"]).unwrap();
        assert_eq!(LevelFilter::Info, args.log_level);

        let Command::Replay(replay) = args.command else {
            panic!("expected the replay subcommand");
        };
        assert_eq!(vec![PathBuf::from("game.pgn")], replay.files);
        assert_eq!(HintPolicy::Strict, replay.policy());
        assert_eq!(ActionConfig::default(), replay.action_config());
    }

    #[test]
    pub fn replay_options() {
        let args = Args::try_parse_from([
            "slotchess",
            "replay",
            "a.pgn",
            "b.pgn",
            "--lenient-hints",
            "--white",
            "carol",
            "--game-id",
            "3",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(LevelFilter::Debug, args.log_level);

        let Command::Replay(replay) = args.command else {
            panic!("expected the replay subcommand");
        };
        assert_eq!(2, replay.files.len());
        assert_eq!(HintPolicy::Lenient, replay.policy());
        assert_eq!("carol", replay.action_config().white);
        assert_eq!(3, replay.action_config().game_id);

        assert!(Args::try_parse_from(["slotchess", "replay"]).is_err());
        assert!(Args::try_parse_from(["slotchess", "replay", "a.pgn", "--stdout", "-o", "out.sh"]).is_err());
    }

    #[test]
    pub fn render_options() {
        let args = Args::try_parse_from(["slotchess", "render", "--ep-target", "--fen"]).unwrap();
        let Command::Render(render) = args.command else {
            panic!("expected the render subcommand");
        };
        assert_eq!(None, render.file);
        assert!(render.fen);
        assert_eq!(EnPassantStyle::TargetSquare, render.options().en_passant);
    }
}
