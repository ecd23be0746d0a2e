use othellobot::board::{Board, Color};
use othellobot::config::EngineConfig;
use othellobot::game::MatchState;
use othellobot::search::eval::evaluate_for;
use othellobot::search::level::Difficulty;
use othellobot::search::noise::choose_fast;
use othellobot::search::player::ComputerPlayer;
use othellobot::GameError;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::str::FromStr;

fn best_static_moves(board: &Board, to_move: Color) -> Vec<othellobot::Coord> {
    let legal = board.legal_moves(to_move);
    let score = |at| {
        let mut b = *board;
        b.apply_move(at, to_move).unwrap();
        evaluate_for(&b, to_move)
    };
    let best = legal.iter().map(|&m| score(m)).max().unwrap();
    legal.into_iter().filter(|&m| score(m) == best).collect()
}

#[test]
fn greedy_choice_is_among_best_static_moves() {
    let mut s = MatchState::new();
    let mut rng = SmallRng::seed_from_u64(7);
    while !s.is_over() {
        let b = *s.board();
        let legal = b.legal_moves(s.to_move());
        let pick = choose_fast(&b, s.to_move(), &legal, &mut rng, 0.0).unwrap();
        assert!(best_static_moves(&b, s.to_move()).contains(&pick));
        s.play(pick).unwrap();
    }
}

#[test]
fn random_choice_is_always_legal() {
    let b = Board::new();
    let legal = b.legal_moves(Color::Dark);
    let mut rng = SmallRng::seed_from_u64(1);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        let pick = choose_fast(&b, Color::Dark, &legal, &mut rng, 1.0).unwrap();
        assert!(legal.contains(&pick));
        seen.insert(pick);
    }
    // Uniform over four moves: every one shows up
    assert_eq!(seen.len(), legal.len());
}

#[test]
fn no_legal_moves_yields_none() {
    let mut rng = SmallRng::seed_from_u64(1);
    assert_eq!(choose_fast(&Board::new(), Color::Dark, &[], &mut rng, 0.5), None);
}

#[test]
fn fast_player_same_seed_same_game() {
    let cfg = EngineConfig::default();
    let play = |seed| {
        let mut dark = ComputerPlayer::new(Difficulty::from_level(1), &cfg, Some(seed));
        let mut light = ComputerPlayer::new(Difficulty::from_level(1), &cfg, Some(seed + 1));
        let mut s = MatchState::new();
        let mut moves = Vec::new();
        while !s.is_over() {
            let p = if s.to_move() == Color::Dark { &mut dark } else { &mut light };
            let at = p.choose_move(s.board(), s.to_move()).unwrap();
            s.play(at).unwrap();
            moves.push(at);
        }
        moves
    };
    assert_eq!(play(11), play(11));
}

#[test]
fn player_without_moves_reports_no_legal_move() {
    // Dark has no stones that could close a run
    let b = Board::from_str(
        "OOO-----
         --------
         OX------
         --------
         --------
         --------
         --------
         --------",
    )
    .unwrap();
    assert!(!b.has_legal_move(Color::Dark));
    let cfg = EngineConfig::default();
    for level in [1u8, 2, 3] {
        let mut p = ComputerPlayer::new(Difficulty::from_level(level), &cfg, Some(3));
        assert_eq!(p.difficulty().level(), level);
        assert_eq!(p.choose_move(&b, Color::Dark), Err(GameError::NoLegalMove));
    }
}

#[test]
fn search_levels_always_play_legal_moves() {
    let cfg = EngineConfig { seed: Some(5), ..EngineConfig::default() };
    for level in [2u8, 3, 9] {
        let mut p = ComputerPlayer::new(Difficulty::from_level(level), &cfg, Some(5));
        let mut s = MatchState::new();
        for _ in 0..8 {
            if s.is_over() { break; }
            let at = p.choose_move(s.board(), s.to_move()).unwrap();
            assert!(s.board().legal_moves(s.to_move()).contains(&at));
            s.play(at).unwrap();
        }
    }
}
