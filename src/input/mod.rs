use thiserror::Error;

pub mod command;
pub mod command_line;
pub mod connection;
pub mod coord;
pub mod stdin;

/// Protocol-layer failures, split by how the session must react.
///
/// Everything except `Io` is reported on the channel as a `?` frame. The
/// recoverable kinds end there; `EngineFault` additionally propagates out of
/// `handle_line` because an agent proposing an illegal move is a collaborator
/// contract violation, not user input. The read loop records it and keeps
/// going.
#[derive(Error, Debug)]
pub enum GtpError {
    #[error("Unknown command")]
    UnknownCommand,
    /// Too few arguments for a known command; the text is the command's
    /// usage string.
    #[error("{0}")]
    Usage(&'static str),
    /// Malformed argument token (bad integer, bad float, unacceptable size).
    #[error("{0}")]
    Parse(String),
    /// A well-formed move request the session refused; covers bad color
    /// tokens, bad coordinates, and board rejections.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// The agent proposed a move the board refuses.
    #[error("illegal move by engine: {0}")]
    EngineFault(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
