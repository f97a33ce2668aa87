use std::fs::File;
use std::io::{self, Write};

use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

use crate::core::agent::Agent;
use crate::core::board::{GoBoard, MAX_SIZE, MIN_SIZE};
use crate::core::Color;
use super::command::Command;
use super::coord::Vertex;
use super::GtpError;

lazy_static! {
    // Leading decimal transaction id some regression drivers prepend.
    static ref LEADING_ID: Regex = Regex::new(r"^\d+").unwrap();
}

/// Whether the driver should keep reading after this line.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SessionStatus {
    Continue,
    Quit,
}

/// Frames every reply as `= text\n\n` / `? text\n\n`, flushing after each
/// one, and duplicates the protocol stream into an optional log file. The
/// duplication is explicit here instead of a redirected global stream.
pub struct ResponseWriter<W: Write> {
    out: W,
    log: Option<File>,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(out: W, log: Option<File>) -> ResponseWriter<W> {
        ResponseWriter { out, log }
    }

    pub fn success(&mut self, text: &str) -> io::Result<()> {
        self.write_frame('=', text)
    }

    pub fn failure(&mut self, text: &str) -> io::Result<()> {
        self.write_frame('?', text)
    }

    fn write_frame(&mut self, prefix: char, text: &str) -> io::Result<()> {
        let block = format!("{} {}\n\n", prefix, text);
        self.out.write_all(block.as_bytes())?;
        self.out.flush()?;
        if let Some(log) = &mut self.log {
            log.write_all(block.as_bytes())?;
            log.flush()?;
        }
        Ok(())
    }

    /// The primary sink, mainly so tests can inspect what was framed.
    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

/// Everything the session needs at construction: the reply channel, the
/// board shape, and the agent. Nothing here is ambient or global.
pub struct SessionConfig<W: Write> {
    pub out: W,
    pub log: Option<File>,
    pub size: usize,
    pub komi: f32,
    pub agent: Box<dyn Agent>,
}

/// One protocol session: the board, the agent, the komi, and the reply
/// channel. Commands arrive one line at a time through `handle_line`.
pub struct GtpConnection<W: Write> {
    board: GoBoard,
    agent: Box<dyn Agent>,
    komi: f32,
    writer: ResponseWriter<W>,
}

impl<W: Write> GtpConnection<W> {
    pub fn new(config: SessionConfig<W>) -> GtpConnection<W> {
        GtpConnection {
            board: GoBoard::new(config.size),
            agent: config.agent,
            komi: config.komi,
            writer: ResponseWriter::new(config.out, config.log),
        }
    }

    pub fn board(&self) -> &GoBoard {
        &self.board
    }

    pub fn komi(&self) -> f32 {
        self.komi
    }

    pub fn output(&self) -> &W {
        self.writer.get_ref()
    }

    /// Processes one raw input line: strip decorations, look the command up,
    /// gate on arity, dispatch. Emits exactly one frame per accepted command
    /// and none for blank lines, comments, or id-only lines.
    ///
    /// User-level errors come back as a `?` frame and `Ok(Continue)`; an
    /// `EngineFault` is framed too but returned as `Err` so the driver can
    /// record the contract violation. `Io` errors are returned unframed.
    pub fn handle_line(&mut self, raw: &str) -> Result<SessionStatus, GtpError> {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(SessionStatus::Continue);
        }
        let line = LEADING_ID.replace(line, "");

        let mut tokens = line.split_whitespace();
        let word = match tokens.next() {
            Some(word) => word,
            // The line was nothing but a transaction id.
            None => return Ok(SessionStatus::Continue),
        };
        let args: Vec<&str> = tokens.collect();

        let result = match Command::from_name(word) {
            None => Err(GtpError::UnknownCommand),
            Some(cmd) if args.len() < cmd.min_args() => Err(GtpError::Usage(cmd.usage())),
            Some(cmd) => self.dispatch(cmd, &args),
        };

        match result {
            Ok(status) => Ok(status),
            Err(GtpError::Io(err)) => Err(GtpError::Io(err)),
            Err(err) => {
                tracing::debug!(command = word, error = %err, "command refused");
                self.writer.failure(&err.to_string())?;
                match err {
                    GtpError::EngineFault(_) => Err(err),
                    _ => Ok(SessionStatus::Continue),
                }
            }
        }
    }

    fn dispatch(&mut self, command: Command, args: &[&str]) -> Result<SessionStatus, GtpError> {
        match command {
            Command::ProtocolVersion => self.respond("2"),
            Command::Quit => {
                self.writer.success("")?;
                Ok(SessionStatus::Quit)
            }
            Command::Name => {
                let name = self.agent.name().to_string();
                self.respond(&name)
            }
            Command::Version => {
                let version = self.agent.version().to_string();
                self.respond(&version)
            }
            Command::Boardsize => self.cmd_boardsize(args),
            Command::Showboard => self.respond(&format!("\n{}", self.board)),
            Command::ClearBoard => {
                self.board.reset(self.board.size());
                self.respond("")
            }
            Command::Komi => self.cmd_komi(args),
            Command::KnownCommand => {
                let known = Command::from_name(args[0]).is_some();
                self.respond(if known { "true" } else { "false" })
            }
            Command::SetFreeHandicap => self.cmd_set_free_handicap(args),
            Command::Genmove => self.cmd_genmove(args),
            Command::ListCommands => {
                let names = Command::ALL.iter().map(|c| c.name()).join(" ");
                self.respond(&names)
            }
            Command::Play => self.cmd_play(args),
            Command::FinalScore => {
                let score = self.board.score(self.komi).to_string();
                self.respond(&score)
            }
            Command::LegalMoves => self.cmd_legal_moves(args),
        }
    }

    fn respond(&mut self, text: &str) -> Result<SessionStatus, GtpError> {
        self.writer.success(text)?;
        Ok(SessionStatus::Continue)
    }

    fn cmd_boardsize(&mut self, args: &[&str]) -> Result<SessionStatus, GtpError> {
        let size = args[0]
            .parse::<usize>()
            .ok()
            .filter(|s| (MIN_SIZE..=MAX_SIZE).contains(s))
            .ok_or_else(|| GtpError::Parse("unacceptable size".to_string()))?;
        self.board.reset(size);
        self.respond("")
    }

    fn cmd_komi(&mut self, args: &[&str]) -> Result<SessionStatus, GtpError> {
        self.komi = args[0]
            .parse::<f32>()
            .map_err(|_| GtpError::Parse("komi must be a float".to_string()))?;
        self.respond("")
    }

    /// Clears the board, then places a black stone at each given vertex. A
    /// vertex that fails to parse or to place is logged and skipped; the
    /// placements are independent of each other.
    fn cmd_set_free_handicap(&mut self, args: &[&str]) -> Result<SessionStatus, GtpError> {
        self.board.reset(self.board.size());
        for &token in args {
            match Vertex::from_token(token, self.board.size()) {
                Ok(Vertex::Point(point)) => {
                    if let Err(reason) = self.board.try_place(point, Color::Black) {
                        tracing::warn!(vertex = token, %reason, "skipping handicap stone");
                    }
                }
                Ok(Vertex::Pass) => {
                    tracing::warn!("pass is not a handicap vertex, skipping");
                }
                Err(err) => {
                    tracing::warn!(vertex = token, %err, "skipping handicap stone");
                }
            }
        }
        self.respond("")
    }

    fn cmd_legal_moves(&mut self, args: &[&str]) -> Result<SessionStatus, GtpError> {
        let color = Color::from_token(args[0])
            .ok_or_else(|| GtpError::IllegalMove(format!("{} wrong color", args[0])))?;
        let moves = self
            .board
            .legal_moves(color)
            .into_iter()
            .map(Vertex::Point)
            .join(" ");
        self.respond(&moves)
    }

    /// The move-legality pipeline: color token, coordinate decode, board
    /// submission, end-of-game check. Every rejection leaves the board
    /// exactly as it was.
    fn cmd_play(&mut self, args: &[&str]) -> Result<SessionStatus, GtpError> {
        let (color_tok, vertex_tok) = (args[0], args[1]);
        let color = Color::from_token(color_tok).ok_or_else(|| {
            GtpError::IllegalMove(format!("{} {} wrong color", color_tok, vertex_tok))
        })?;

        let point = match Vertex::from_token(vertex_tok, self.board.size()) {
            Ok(Vertex::Point(point)) => point,
            // Passing is not part of this rule set.
            Ok(Vertex::Pass) => {
                return Err(GtpError::IllegalMove(format!(
                    "{} {} no passing",
                    color_tok, vertex_tok
                )));
            }
            Err(err) => {
                tracing::debug!(vertex = vertex_tok, error = %err, "vertex rejected");
                return Err(GtpError::IllegalMove(format!(
                    "{} {} wrong coordinate",
                    color_tok, vertex_tok
                )));
            }
        };

        if let Err(reason) = self.board.try_place(point, color) {
            return Err(GtpError::IllegalMove(format!(
                "{} {} {}",
                color_tok, vertex_tok, reason
            )));
        }
        tracing::debug!(mv = %Vertex::Point(point), "played\n{}", self.board);
        self.respond_move_applied(color, None)
    }

    fn cmd_genmove(&mut self, args: &[&str]) -> Result<SessionStatus, GtpError> {
        let color = Color::from_token(args[0])
            .ok_or_else(|| GtpError::IllegalMove(format!("{} wrong color", args[0])))?;

        let point = match self.agent.get_move(&self.board, color) {
            Some(point) => point,
            // The agent is out of moves: the game is over, report the score.
            None => {
                let score = self.board.score(self.komi).to_string();
                return self.respond(&score);
            }
        };

        let vertex = Vertex::Point(point);
        if let Err(reason) = self.board.try_place(point, color) {
            tracing::error!(mv = %vertex, %reason, "agent proposed an illegal move");
            return Err(GtpError::EngineFault(format!("{} {}", vertex, reason)));
        }
        tracing::debug!(mv = %vertex, "generated\n{}", self.board);
        self.respond_move_applied(color, Some(vertex))
    }

    /// Shared tail of `play`/`genmove`: one reply frame, with the terminal
    /// score folded in once the opponent has no legal move left.
    fn respond_move_applied(
        &mut self,
        color: Color,
        played: Option<Vertex>,
    ) -> Result<SessionStatus, GtpError> {
        let game_over = self.board.legal_moves(color.opponent()).is_empty();
        let text = match (played, game_over) {
            (Some(vertex), true) => format!("{}\n{}", vertex, self.board.score(self.komi)),
            (Some(vertex), false) => vertex.to_string(),
            (None, true) => self.board.score(self.komi).to_string(),
            (None, false) => String::new(),
        };
        self.respond(&text)
    }
}
