use std::{
    error::Error,
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use clap::Parser;
use log::{error, info};
use slotchess::{
    args::{Args, Command, RenderArgs, ReplayArgs},
    logging,
    position::GamePosition,
    render::{self, RenderOptions},
    replay::{ReplayedGame, replay_transcript},
    resolver::HintPolicy,
};

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.log_level, args.log_file.as_deref())?;

    match &args.command {
        Command::Replay(replay) => run_replay(replay),
        Command::Render(render) => run_render(render),
    }
}

fn script_path(transcript: &Path) -> PathBuf {
    let mut path = transcript.as_os_str().to_owned();
    path.push(".sh");
    PathBuf::from(path)
}

fn replay_file(path: &Path, policy: HintPolicy) -> Result<ReplayedGame, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    Ok(replay_transcript(&text, policy)?)
}

/// Replays every transcript, carrying on past failures so each bad file gets reported.
fn run_replay(args: &ReplayArgs) -> Result<(), Box<dyn Error>> {
    let config = args.action_config();
    let mut combined = String::new();
    let mut failed = 0;

    for file in &args.files {
        let game = match replay_file(file, args.policy()) {
            Ok(game) => game,
            Err(e) => {
                error!("{}: {e}", file.display());
                failed += 1;
                continue;
            }
        };

        info!("{}: {} moves", file.display(), game.moves.len());
        if args.fen {
            info!("{}: {}", file.display(), render::fen(&game.position, RenderOptions::default()));
        }

        let script = config.format_script(&game.moves);
        if args.stdout {
            print!("{script}");
        } else if args.output.is_some() {
            combined.push_str(&script);
        } else {
            let path = script_path(file);
            if let Err(e) = fs::write(&path, script) {
                error!("{}: {e}", path.display());
                failed += 1;
                continue;
            }
            info!("wrote {}", path.display());
        }
    }

    if let Some(path) = &args.output {
        fs::write(path, combined)?;
        info!("wrote {}", path.display());
    }

    if failed > 0 {
        return Err(format!("{failed} of {} transcripts failed", args.files.len()).into());
    }
    Ok(())
}

fn run_render(args: &RenderArgs) -> Result<(), Box<dyn Error>> {
    let text = match args.file.as_deref() {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)?,
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let position = GamePosition::from_json(&text).inspect_err(|e| error!("{e}"))?;
    let rendered = if args.fen {
        render::fen(&position, args.options())
    } else {
        render::editor_url(&position, &args.base_url, args.options())
    };

    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod main_tests {
    use std::env;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("slotchess-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    pub fn unwritable_script_does_not_stop_later_files() {
        let dir = scratch_dir("unwritable");
        let first = dir.join("first.pgn");
        let second = dir.join("second.pgn");
        fs::write(&first, "1. e4 e5").unwrap();
        fs::write(&second, "1. d4 d5").unwrap();
        // a directory where the first script should go makes that write fail
        fs::create_dir(script_path(&first)).unwrap();

        let args = Args::try_parse_from(["slotchess", "replay", first.to_str().unwrap(), second.to_str().unwrap()])
            .unwrap();
        let Command::Replay(replay) = &args.command else {
            panic!("expected the replay subcommand");
        };

        let err = run_replay(replay).unwrap_err();
        assert_eq!("1 of 2 transcripts failed", err.to_string());
        assert_eq!(
            "cleos push action chess move '[\"alice\", \"0\", \"12\", \"29\", \"0\"]' -p alice@active\n\
             cleos push action chess move '[\"bob\", \"0\", \"28\", \"37\", \"0\"]' -p bob@active\n",
            fs::read_to_string(script_path(&second)).unwrap()
        );

        fs::remove_dir_all(&dir).unwrap();
    }
}
