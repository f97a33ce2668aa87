use super::{send, session};
use crate::core::{Color, Point};
use crate::input::connection::{GtpConnection, SessionConfig, SessionStatus};
use crate::input::command::Command;

#[test]
fn boardsize_then_play_places_the_stone() {
    let mut conn = session(3);
    assert_eq!(send(&mut conn, "boardsize 5"), "= \n\n");
    assert_eq!(send(&mut conn, "play b c3"), "= \n\n");
    assert_eq!(
        conn.board().stone_at(Point { row: 2, col: 2 }),
        Some(Color::Black)
    );
}

#[test]
fn playing_an_occupied_point_fails_and_changes_nothing() {
    let mut conn = session(5);
    send(&mut conn, "play b c3");
    let before = conn.board().clone();
    assert_eq!(
        send(&mut conn, "play w c3"),
        "? illegal move: w c3 occupied\n\n"
    );
    assert_eq!(conn.board(), &before);
}

#[test]
fn final_score_reflects_the_stored_komi() {
    let mut conn = session(5);
    assert_eq!(send(&mut conn, "komi 6.5"), "= \n\n");
    assert_eq!(send(&mut conn, "final_score"), "= W+6.5\n\n");
}

#[test]
fn known_command_is_a_membership_test() {
    let mut conn = session(5);
    assert_eq!(send(&mut conn, "known_command foo"), "= false\n\n");
    assert_eq!(send(&mut conn, "known_command play"), "= true\n\n");
}

#[test]
fn unknown_commands_get_a_generic_error() {
    let mut conn = session(5);
    assert_eq!(send(&mut conn, "bogus"), "? Unknown command\n\n");
    // The session keeps serving afterwards.
    assert_eq!(send(&mut conn, "protocol_version"), "= 2\n\n");
}

#[test]
fn arity_gate_never_reaches_the_handler() {
    for command in Command::ALL {
        if command.min_args() == 0 {
            continue;
        }
        let mut conn = session(5);
        let before = conn.board().clone();
        let mut line = command.name().to_string();
        for _ in 0..command.min_args() - 1 {
            line.push_str(" x");
        }
        assert_eq!(
            send(&mut conn, &line),
            format!("? {}\n\n", command.usage()),
            "command {:?}",
            command
        );
        assert_eq!(conn.board(), &before, "command {:?}", command);
    }
}

#[test]
fn silent_lines_produce_no_frame() {
    let mut conn = session(5);
    assert_eq!(send(&mut conn, ""), "");
    assert_eq!(send(&mut conn, "   \t "), "");
    assert_eq!(send(&mut conn, "# a comment line"), "");
    assert_eq!(send(&mut conn, "42"), "");
}

#[test]
fn leading_transaction_ids_are_stripped_not_echoed() {
    let mut conn = session(5);
    assert_eq!(send(&mut conn, "10 protocol_version"), "= 2\n\n");
    assert_eq!(send(&mut conn, "11 play b a1"), "= \n\n");
    assert_eq!(
        conn.board().stone_at(Point { row: 0, col: 0 }),
        Some(Color::Black)
    );
}

#[test]
fn queries_are_idempotent() {
    let mut conn = session(5);
    send(&mut conn, "play b c3");
    send(&mut conn, "komi 2.5");
    let before = conn.board().clone();

    let first = send(&mut conn, "legal_moves w");
    let second = send(&mut conn, "legal_moves w");
    assert_eq!(first, second);
    assert_eq!(send(&mut conn, "final_score"), send(&mut conn, "final_score"));
    assert_eq!(conn.board(), &before);
}

#[test]
fn list_commands_is_stable_and_complete() {
    let mut conn = session(5);
    let expected = "= protocol_version quit name boardsize showboard clear_board komi \
                    version known_command set_free_handicap genmove list_commands play \
                    final_score legal_moves\n\n";
    assert_eq!(send(&mut conn, "list_commands"), expected);
    assert_eq!(send(&mut conn, "list_commands"), expected);
}

#[test]
fn name_and_version_come_from_the_agent() {
    let mut conn = session(5);
    assert_eq!(send(&mut conn, "name"), "= tenuki-random\n\n");
    assert_eq!(
        send(&mut conn, "version"),
        format!("= {}\n\n", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn showboard_renders_the_grid() {
    let mut conn = session(2);
    send(&mut conn, "play b a1");
    assert_eq!(send(&mut conn, "showboard"), "= \n. .\nX .\n\n");
}

#[test]
fn bad_komi_is_reported_and_ignored() {
    let mut conn = session(5);
    assert_eq!(send(&mut conn, "komi abc"), "? komi must be a float\n\n");
    assert_eq!(conn.komi(), 0.0);
}

#[test]
fn bad_boardsize_is_reported_and_ignored() {
    let mut conn = session(5);
    assert_eq!(send(&mut conn, "boardsize foo"), "? unacceptable size\n\n");
    assert_eq!(send(&mut conn, "boardsize 100"), "? unacceptable size\n\n");
    assert_eq!(send(&mut conn, "boardsize 0"), "? unacceptable size\n\n");
    assert_eq!(conn.board().size(), 5);
}

#[test]
fn clear_board_keeps_the_size() {
    let mut conn = session(3);
    send(&mut conn, "boardsize 5");
    send(&mut conn, "play b c3");
    assert_eq!(send(&mut conn, "clear_board"), "= \n\n");
    assert_eq!(conn.board().size(), 5);
    assert_eq!(conn.board().stone_count(Color::Black), 0);
}

#[test]
fn quit_acknowledges_and_ends_the_session() {
    let mut conn = session(5);
    let status = conn.handle_line("quit").unwrap();
    assert_eq!(status, SessionStatus::Quit);
    assert_eq!(String::from_utf8(conn.output().clone()).unwrap(), "= \n\n");
}

#[test]
fn play_rejects_pass() {
    let mut conn = session(5);
    assert_eq!(
        send(&mut conn, "play b pass"),
        "? illegal move: b pass no passing\n\n"
    );
    assert_eq!(conn.board().stone_count(Color::Black), 0);
}

#[test]
fn play_rejects_bad_color_and_bad_coordinate() {
    let mut conn = session(5);
    assert_eq!(
        send(&mut conn, "play q c3"),
        "? illegal move: q c3 wrong color\n\n"
    );
    assert_eq!(
        send(&mut conn, "play b z9"),
        "? illegal move: b z9 wrong coordinate\n\n"
    );
    assert_eq!(
        send(&mut conn, "play b i3"),
        "? illegal move: b i3 wrong coordinate\n\n"
    );
}

#[test]
fn replies_are_duplicated_into_the_log_file() {
    use crate::core::agent::RandomAgent;

    let path = std::env::temp_dir().join(format!("tenuki-log-{}.gtp", std::process::id()));
    let mut conn = GtpConnection::new(SessionConfig {
        out: Vec::new(),
        log: Some(std::fs::File::create(&path).unwrap()),
        size: 5,
        komi: 0.0,
        agent: Box::new(RandomAgent::new(1)),
    });

    send(&mut conn, "protocol_version");
    send(&mut conn, "bogus");

    let logged = std::fs::read_to_string(&path).unwrap();
    assert_eq!(logged, "= 2\n\n? Unknown command\n\n");
    assert_eq!(conn.output().as_slice(), logged.as_bytes());
    let _ = std::fs::remove_file(&path);
}
