use othellobot::board::{Board, Color, Coord, Score};
use othellobot::game::{MatchState, Status};
use othellobot::registry::{Occupant, Registry};
use othellobot::{Difficulty, EngineConfig, GameError};
use pretty_assertions::assert_eq;
use std::str::FromStr;
use uuid::Uuid;

fn c(row: usize, col: usize) -> Coord { Coord::new(row, col).unwrap() }

fn seeded() -> Registry {
    Registry::new(EngineConfig { seed: Some(17), ..EngineConfig::default() })
}

fn board(s: &str) -> Board { Board::from_str(s).unwrap() }

// Dark plays (0,2) and Light is left without a reply
const PASS_BOARD: &str = "
    XO------
    --------
    XO------
    --------
    --------
    --------
    --------
    --------";

#[test]
fn seats_fill_dark_then_light() {
    let reg = seeded();
    let id = reg.create_match();
    assert_eq!(reg.seat(id, "alice", "Alice"), Ok(Color::Dark));
    assert_eq!(reg.seat(id, "bob", "Bob"), Ok(Color::Light));
    assert_eq!(reg.seat(id, "carol", "Carol"), Err(GameError::Full));
    // Idempotent for a seated identity
    assert_eq!(reg.seat(id, "bob", "Bob"), Ok(Color::Light));

    let snap = reg.snapshot(id).unwrap();
    assert_eq!(snap.seats.len(), 2);
    assert_eq!(snap.seats[0].occupant, Occupant::Human { identity: "alice".into(), name: "Alice".into() });
    assert_eq!(snap.status, Status::Ongoing);
    assert_eq!(snap.to_move, Color::Dark);
}

#[test]
fn unknown_match_is_reported() {
    let reg = seeded();
    let id = Uuid::new_v4();
    assert_eq!(reg.seat(id, "a", "A"), Err(GameError::UnknownMatch));
    assert_eq!(reg.submit_move(id, "a", c(2, 3)), Err(GameError::UnknownMatch));
    assert!(reg.snapshot(id).is_err());
    assert_eq!(reg.remove_match(id), Err(GameError::UnknownMatch));
}

#[test]
fn human_move_reports_one_ply() {
    let reg = seeded();
    let id = reg.create_match();
    reg.seat(id, "a", "A").unwrap();
    reg.seat(id, "b", "B").unwrap();
    let report = reg.submit_move(id, "a", c(2, 3)).unwrap();
    assert_eq!(report.plies.len(), 1);
    assert_eq!(report.plies[0].flipped, vec![c(3, 3)]);
    assert_eq!(report.to_move, Color::Light);
    assert_eq!(report.status, Status::Ongoing);
    assert_eq!(report.score, None);
    assert_eq!(report.board.count(Color::Dark), 4);
}

#[test]
fn submission_errors() {
    let reg = seeded();
    let id = reg.create_match();
    reg.seat(id, "a", "A").unwrap();
    reg.seat(id, "b", "B").unwrap();
    assert_eq!(reg.submit_move(id, "nobody", c(2, 3)), Err(GameError::NotSeated));
    assert_eq!(reg.submit_move(id, "b", c(2, 4)), Err(GameError::OutOfTurn));
    assert_eq!(reg.submit_move(id, "a", c(3, 3)), Err(GameError::CellOccupied));
    assert_eq!(reg.submit_move(id, "a", c(0, 0)), Err(GameError::NoCapture));
    assert_eq!(reg.submit_move_at(id, "a", 8, 0), Err(GameError::OutOfBounds { row: 8, col: 0 }));
    assert_eq!(reg.snapshot(id).unwrap().board, Board::new());
}

#[test]
fn out_of_turn_when_only_light_can_move() {
    // Light to move and Dark has nothing
    let b = board(
        "OOO-----
         --------
         OX------
         --------
         --------
         --------
         --------
         --------",
    );
    let reg = seeded();
    let id = reg.create_match_from(MatchState::from_position(b, Color::Light));
    reg.seat(id, "dark", "D").unwrap();
    reg.seat(id, "light", "L").unwrap();
    assert_eq!(reg.submit_move(id, "dark", c(2, 2)), Err(GameError::OutOfTurn));
    assert_eq!(reg.snapshot(id).unwrap().to_move, Color::Light);
}

#[test]
fn computer_replies_in_the_same_report() {
    let reg = seeded();
    let id = reg.create_match();
    assert_eq!(reg.seat(id, "a", "A"), Ok(Color::Dark));
    let attached = reg.attach_computer_opponent(id, Difficulty::from_level(2)).unwrap();
    assert_eq!(attached.color, Color::Light);
    assert!(attached.report.plies.is_empty());

    let report = reg.submit_move(id, "a", c(2, 3)).unwrap();
    assert_eq!(report.plies.len(), 2);
    assert_eq!(report.plies[1].color, Color::Light);
    assert_eq!(report.to_move, Color::Dark);
    assert_eq!(report.board.stone_count(), 6);
}

#[test]
fn computer_moving_first_plays_on_attach() {
    let reg = seeded();
    let id = reg.create_match();
    let attached = reg.attach_computer_opponent_as(id, Difficulty::from_level(3), Color::Dark).unwrap();
    assert_eq!(attached.color, Color::Dark);
    assert_eq!(attached.report.plies.len(), 1);
    assert_eq!(attached.report.to_move, Color::Light);
    assert!(Board::new().legal_moves(Color::Dark).contains(&attached.report.plies[0].at));
    assert_eq!(reg.seat(id, "a", "A"), Ok(Color::Light));
}

#[test]
fn second_attach_replaces_the_computer() {
    let reg = seeded();
    let id = reg.create_match();
    reg.seat(id, "a", "A").unwrap();
    reg.attach_computer_opponent(id, Difficulty::from_level(2)).unwrap();
    let again = reg.attach_computer_opponent(id, Difficulty::from_level(4)).unwrap();
    assert_eq!(again.color, Color::Light);
    let snap = reg.snapshot(id).unwrap();
    assert_eq!(snap.seats.len(), 2);
    assert_eq!(snap.seats[1].occupant, Occupant::Computer { level: Difficulty::from_level(4) });
}

#[test]
fn attach_to_full_match_fails() {
    let reg = seeded();
    let id = reg.create_match();
    reg.seat(id, "a", "A").unwrap();
    reg.seat(id, "b", "B").unwrap();
    assert!(matches!(reg.attach_computer_opponent(id, Difficulty::from_level(2)), Err(GameError::Full)));
    assert!(matches!(reg.attach_computer_opponent_as(id, Difficulty::from_level(2), Color::Dark), Err(GameError::Full)));
}

#[test]
fn pass_then_game_over_through_registry() {
    let reg = seeded();
    let id = reg.create_match_from(MatchState::from_position(board(PASS_BOARD), Color::Dark));
    reg.seat(id, "a", "A").unwrap();
    reg.attach_computer_opponent(id, Difficulty::from_level(2)).unwrap();

    let report = reg.submit_move(id, "a", c(0, 2)).unwrap();
    assert_eq!(report.plies.len(), 1);
    assert_eq!(report.status, Status::Pass);
    assert_eq!(report.to_move, Color::Dark);
    // A resync right after the pass still shows it
    assert_eq!(reg.snapshot(id).unwrap().status, Status::Pass);

    let report = reg.submit_move(id, "a", c(2, 2)).unwrap();
    assert_eq!(report.status, Status::GameOver);
    assert_eq!(report.score, Some(Score { light: 0, dark: 6 }));
    assert_eq!(reg.submit_move(id, "a", c(0, 3)), Err(GameError::MatchOver));
    assert_eq!(reg.snapshot(id).unwrap().status, Status::GameOver);
}

#[test]
fn computer_keeps_moving_while_human_must_pass() {
    // Light computer to move; after either capture Dark has no reply
    let b = board(
        "OX------
         --------
         OX------
         --------
         --------
         --------
         --------
         --------",
    );
    let reg = seeded();
    let id = reg.create_match_from(MatchState::from_position(b, Color::Light));
    reg.seat(id, "a", "A").unwrap();
    let attached = reg.attach_computer_opponent(id, Difficulty::from_level(2)).unwrap();
    assert_eq!(attached.report.plies.len(), 2);
    assert_eq!(attached.report.plies[0].status, Status::Pass);
    assert_eq!(attached.report.status, Status::GameOver);
    assert_eq!(attached.report.score, Some(Score { light: 6, dark: 0 }));
}

#[test]
fn remove_seat_keeps_the_game() {
    let reg = seeded();
    let id = reg.create_match();
    reg.seat(id, "a", "A").unwrap();
    reg.seat(id, "b", "B").unwrap();
    reg.submit_move(id, "a", c(2, 3)).unwrap();
    assert_eq!(reg.remove_seat(id, "a"), Ok(Color::Dark));
    assert_eq!(reg.remove_seat(id, "a"), Err(GameError::NotSeated));
    let snap = reg.snapshot(id).unwrap();
    assert_eq!(snap.seats.len(), 1);
    assert_eq!(snap.board.stone_count(), 5);
    // The free seat goes to the next identity
    assert_eq!(reg.seat(id, "c", "C"), Ok(Color::Dark));
}

#[test]
fn off_board_wire_coordinates_are_rejected() {
    assert!(serde_json::from_str::<Coord>(r#"{"row":9,"col":200}"#).is_err());
    assert!(serde_json::from_str::<Coord>(r#"{"row":8,"col":0}"#).is_err());
    let at: Coord = serde_json::from_str(r#"{"row":2,"col":3}"#).unwrap();

    let reg = seeded();
    let id = reg.create_match();
    reg.seat(id, "a", "A").unwrap();
    assert_eq!(reg.submit_move_at(id, "a", 9, 200), Err(GameError::OutOfBounds { row: 9, col: 200 }));
    assert_eq!(reg.snapshot(id).unwrap().board, Board::new());
    assert!(reg.submit_move(id, "a", at).is_ok());
}

#[test]
fn report_keeps_every_applied_ply() {
    let reg = seeded();
    let id = reg.create_match();
    reg.seat(id, "a", "A").unwrap();
    reg.attach_computer_opponent(id, Difficulty::from_level(2)).unwrap();
    let report = reg.submit_move(id, "a", c(2, 3)).unwrap();
    // Replaying the reported plies reproduces the stored board
    let mut replay = MatchState::new();
    for p in &report.plies {
        assert_eq!(replay.to_move(), p.color);
        replay.play(p.at).unwrap();
    }
    assert_eq!(*replay.board(), report.board);
    assert_eq!(reg.snapshot(id).unwrap().board, report.board);
}

#[test]
fn registry_uses_its_config() {
    let reg = seeded();
    assert_eq!(reg.config().seed, Some(17));
}

#[test]
fn match_bookkeeping() {
    let reg = seeded();
    assert!(reg.is_empty());
    let a = reg.create_match();
    let b = reg.create_match();
    assert_ne!(a, b);
    assert_eq!(reg.len(), 2);
    let mut ids = reg.match_ids();
    ids.sort();
    let mut expected = vec![a, b];
    expected.sort();
    assert_eq!(ids, expected);
    reg.remove_match(a).unwrap();
    assert_eq!(reg.len(), 1);
}

#[test]
fn report_serializes_for_broadcast() {
    let reg = seeded();
    let id = reg.create_match();
    reg.seat(id, "a", "A").unwrap();
    reg.seat(id, "b", "B").unwrap();
    let report = reg.submit_move(id, "a", c(2, 3)).unwrap();
    let v = serde_json::to_value(&report).unwrap();
    assert_eq!(v["to_move"], "light");
    assert_eq!(v["status"], "ongoing");
    assert_eq!(v["plies"][0]["at"]["row"], 2);
    assert_eq!(v["plies"][0]["at"]["col"], 3);
}
