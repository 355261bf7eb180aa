use slotchess::{
    action::ActionConfig,
    error::{ReplayError, ResolutionError},
    position::{CastlingRights, GamePosition},
    render::{self, RenderOptions},
    replay::{ReplayedGame, replay_transcript},
    resolver::HintPolicy,
    slot::{PieceKind, Slot},
};

const SCANDINAVIAN: &str = r#"[Event "Ledger test game"]
[White "alice"]
[Black "bob"]
[Result "*"]

1. e4 d5 2. exd5 Qxd5 3. Nc3 Qa5 4. d4 Nf6 5. Nf3 Bf5 6. Bd2 e6 7. Bc4 Bb4
8. O-O O-O 9. Re1 Nbd7 {both sides developed} 10. a3 Bxc3 11. Bxc3 Qb6 12. Qd3 *
"#;

const PAWN_RACE: &str = "1. h4 a5 2. h5 a4 3. h6 a3 4. hxg7 axb2 5. gxh8=Q bxa1=Q 6. Qxg8 Qxb1 7. Qxf8+ Kxf8";

fn triples(game: &ReplayedGame) -> Vec<String> {
    game.moves.iter().map(|m| m.to_string()).collect()
}

#[test]
fn scandinavian_defence() {
    let game = replay_transcript(SCANDINAVIAN, HintPolicy::Strict).unwrap();

    assert_eq!(
        vec![
            "11 28 0", "28 37 0", "11 37 0", "17 37 0", "5 22 0", "17 40 0", "12 29 0", "20 43 0", "4 19 0",
            "19 35 0", "3 13 0", "27 44 0", "2 30 0", "18 31 0", "0 2 0", "16 58 0", "6 4 0", "21 53 0", "15 24 0",
            "18 22 0", "3 22 0", "17 47 0", "1 21 0",
        ],
        triples(&game)
    );

    let expected_raw = [
        2, 21, 30, 22, 19, 0, 4, 8, 9, 10, 11, 0, 29, 14, 15, 24, 58, 47, 0, 35, 43, 53, 59, 64, 49, 50, 51, 44, 0, 54,
        55, 56,
    ];
    assert_eq!(expected_raw, game.position.board.to_raw());
    assert_eq!(CastlingRights::NONE, game.position.castling);
    assert_eq!(
        "r4rk1/pppn1ppp/1q2pn2/5b2/2BP4/P1BQ1N2/1PP2PPP/R3R1K1 b - - 0 12",
        render::fen(&game.position, RenderOptions::default())
    );
}

#[test]
fn missing_hint_is_ambiguous() {
    let transcript = SCANDINAVIAN.replace("Nbd7", "Nd7");
    let err = replay_transcript(&transcript, HintPolicy::Strict).unwrap_err();

    assert!(matches!(
        err,
        ReplayError::Resolution {
            ply: 18,
            source: ResolutionError::Ambiguous {
                kind: PieceKind::Knight,
                count: 2,
                ..
            },
            ..
        }
    ));
}

#[test]
fn promotions_race() {
    let game = replay_transcript(PAWN_RACE, HintPolicy::Strict).unwrap();

    assert_eq!(
        vec![
            "8 25 0", "31 40 0", "8 33 0", "31 32 0", "8 41 0", "31 24 0", "8 50 0", "31 15 0", "8 57 3", "31 8 3",
            "8 58 0", "31 7 0", "8 59 0", "16 59 0",
        ],
        triples(&game)
    );

    let position = &game.position;
    assert_eq!(None, position.board.square(Slot::WhitePawnH));
    assert_eq!(PieceKind::Queen, position.board.kind(Slot::BlackPawnA));
    assert_eq!(CastlingRights::from_mask(0x0D), position.castling);
    assert_eq!(
        "rnbq1k2/1ppppp1p/8/8/8/8/P1PPPPP1/1qBQKBNR w K - 0 8",
        render::fen(position, RenderOptions::default())
    );

    // the stored row keeps the promotion bookkeeping
    let stored = position.to_stored();
    assert_eq!(0x8001, stored.promoted_pawns);
    assert_eq!(GamePosition::from_stored(&stored).unwrap(), *position);
}

#[test]
fn en_passant_capture_and_recapture() {
    let game = replay_transcript("1. e4 Nf6 2. e5 d5 3. exd6 exd6", HintPolicy::Strict).unwrap();

    assert_eq!(vec!["11 28 0", "20 43 0", "11 36 0", "28 37 0", "11 45 0", "27 45 0"], triples(&game));
    assert_eq!(None, game.position.board.square(Slot::BlackPawnD));
    assert_eq!(None, game.position.board.square(Slot::WhitePawnE));
    assert_eq!(
        "rnbqkb1r/ppp2ppp/3p1n2/8/8/8/PPPP1PPP/RNBQKBNR w KQkq - 0 4",
        render::fen(&game.position, RenderOptions::default())
    );
}

#[test]
fn action_script_for_a_game() {
    let game = replay_transcript("1. h4 a5 2. h5", HintPolicy::Strict).unwrap();
    let script = ActionConfig::default().format_script(&game.moves);

    assert_eq!(
        "cleos push action chess move '[\"alice\", \"0\", \"8\", \"25\", \"0\"]' -p alice@active\n\
         cleos push action chess move '[\"bob\", \"0\", \"31\", \"40\", \"0\"]' -p bob@active\n\
         cleos push action chess move '[\"alice\", \"0\", \"8\", \"33\", \"0\"]' -p alice@active\n",
        script
    );
    assert_eq!(
        "https://lichess.org/editor/rnbqkbnr/1ppppppp/8/p6P/8/8/PPPPPPP1/RNBQKBNR_b_KQkq_-",
        render::editor_url(&game.position, render::DEFAULT_EDITOR_URL, RenderOptions::default())
    );
}
