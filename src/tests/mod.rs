use crate::core::agent::{Agent, RandomAgent};
use crate::core::board::GoBoard;
use crate::core::{Color, Point};
use crate::input::connection::{GtpConnection, SessionConfig};

mod protocol_scenarios;

/// Session writing into memory, so tests can assert on the exact frames.
fn session(size: usize) -> GtpConnection<Vec<u8>> {
    session_with_agent(size, Box::new(RandomAgent::new(1)))
}

fn session_with_agent(size: usize, agent: Box<dyn Agent>) -> GtpConnection<Vec<u8>> {
    GtpConnection::new(SessionConfig {
        out: Vec::new(),
        log: None,
        size,
        komi: 0.0,
        agent,
    })
}

/// Feeds one line and returns exactly what it wrote to the channel.
fn send(conn: &mut GtpConnection<Vec<u8>>, line: &str) -> String {
    let before = conn.output().len();
    let _ = conn.handle_line(line);
    String::from_utf8(conn.output()[before..].to_vec()).unwrap()
}

/// An agent that always proposes the same point, whatever the board says.
struct StuckAgent(Point);

impl Agent for StuckAgent {
    fn name(&self) -> &str {
        "stuck"
    }

    fn version(&self) -> &str {
        "0.0"
    }

    fn get_move(&mut self, _board: &GoBoard, _color: Color) -> Option<Point> {
        Some(self.0)
    }
}
