/// The command grammar: every command the session understands, with its
/// arity requirement and usage text attached. An exhaustive enum instead of
/// a name-to-handler map, so a forgotten dispatch arm is a compile error
/// rather than a runtime lookup miss.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Command {
    ProtocolVersion,
    Quit,
    Name,
    Boardsize,
    Showboard,
    ClearBoard,
    Komi,
    Version,
    KnownCommand,
    SetFreeHandicap,
    Genmove,
    ListCommands,
    Play,
    FinalScore,
    LegalMoves,
}

impl Command {
    /// Registration order of the original engine; `list_commands` reports in
    /// this order, stable for the whole process run.
    pub const ALL: [Command; 15] = [
        Command::ProtocolVersion,
        Command::Quit,
        Command::Name,
        Command::Boardsize,
        Command::Showboard,
        Command::ClearBoard,
        Command::Komi,
        Command::Version,
        Command::KnownCommand,
        Command::SetFreeHandicap,
        Command::Genmove,
        Command::ListCommands,
        Command::Play,
        Command::FinalScore,
        Command::LegalMoves,
    ];

    pub fn from_name(name: &str) -> Option<Command> {
        match name {
            "protocol_version" => Some(Command::ProtocolVersion),
            "quit" => Some(Command::Quit),
            "name" => Some(Command::Name),
            "boardsize" => Some(Command::Boardsize),
            "showboard" => Some(Command::Showboard),
            "clear_board" => Some(Command::ClearBoard),
            "komi" => Some(Command::Komi),
            "version" => Some(Command::Version),
            "known_command" => Some(Command::KnownCommand),
            "set_free_handicap" => Some(Command::SetFreeHandicap),
            "genmove" => Some(Command::Genmove),
            "list_commands" => Some(Command::ListCommands),
            "play" => Some(Command::Play),
            "final_score" => Some(Command::FinalScore),
            "legal_moves" => Some(Command::LegalMoves),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::ProtocolVersion => "protocol_version",
            Command::Quit => "quit",
            Command::Name => "name",
            Command::Boardsize => "boardsize",
            Command::Showboard => "showboard",
            Command::ClearBoard => "clear_board",
            Command::Komi => "komi",
            Command::Version => "version",
            Command::KnownCommand => "known_command",
            Command::SetFreeHandicap => "set_free_handicap",
            Command::Genmove => "genmove",
            Command::ListCommands => "list_commands",
            Command::Play => "play",
            Command::FinalScore => "final_score",
            Command::LegalMoves => "legal_moves",
        }
    }

    /// Minimum positional argument count; the handler is never invoked with
    /// fewer.
    pub fn min_args(self) -> usize {
        match self {
            Command::Boardsize
            | Command::Komi
            | Command::KnownCommand
            | Command::SetFreeHandicap
            | Command::Genmove
            | Command::LegalMoves => 1,
            Command::Play => 2,
            _ => 0,
        }
    }

    /// Error text for the arity gate.
    pub fn usage(self) -> &'static str {
        match self {
            Command::Boardsize => "Usage: boardsize INT",
            Command::Komi => "Usage: komi FLOAT",
            Command::KnownCommand => "Usage: known_command CMD_NAME",
            Command::SetFreeHandicap => "Usage: set_free_handicap MOVE (e.g. A4)",
            Command::Genmove => "Usage: genmove {w,b}",
            Command::LegalMoves => "Usage: legal_moves {w,b}",
            Command::Play => "Usage: play {b,w} MOVE",
            // Zero-arg commands cannot fail the arity gate.
            _ => "",
        }
    }
}

#[test]
fn every_name_round_trips() {
    for command in Command::ALL {
        assert_eq!(Command::from_name(command.name()), Some(command));
    }
}

#[test]
fn unknown_names_are_rejected() {
    assert_eq!(Command::from_name("bogus"), None);
    assert_eq!(Command::from_name("PLAY"), None);
    assert_eq!(Command::from_name(""), None);
}

#[test]
fn arity_metadata_matches_the_surface() {
    assert_eq!(Command::Play.min_args(), 2);
    assert_eq!(Command::Genmove.min_args(), 1);
    assert_eq!(Command::ProtocolVersion.min_args(), 0);
    for command in Command::ALL {
        if command.min_args() > 0 {
            assert!(!command.usage().is_empty(), "{:?} needs usage text", command);
        }
    }
}

#[test]
fn listing_order_is_stable() {
    assert_eq!(Command::ALL[0], Command::ProtocolVersion);
    assert_eq!(Command::ALL[14], Command::LegalMoves);
    assert_eq!(Command::ALL.len(), 15);
}
