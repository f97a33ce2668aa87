pub mod rng;

use self::rng::SimpleRng;
use super::board::GoBoard;
use super::{Color, Point};

/// A move-proposing engine driven by the protocol session.
///
/// `get_move` returning `None` means the agent found no legal move for
/// `color`; the session treats that as end of game, it is never played.
pub trait Agent {
    fn name(&self) -> &str;
    fn version(&self) -> &str;
    fn get_move(&mut self, board: &GoBoard, color: Color) -> Option<Point>;
}

/// Uniform random choice over the current legal moves.
pub struct RandomAgent {
    rng: SimpleRng,
}

impl RandomAgent {
    pub fn new(seed: u32) -> RandomAgent {
        RandomAgent {
            rng: SimpleRng::new(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "tenuki-random"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn get_move(&mut self, board: &GoBoard, color: Color) -> Option<Point> {
        let moves = board.legal_moves(color);
        if moves.is_empty() {
            return None;
        }
        let pick = self.rng.next_range(moves.len() as u32) as usize;
        Some(moves[pick])
    }
}

#[test]
fn random_agent_only_proposes_legal_moves() {
    let mut board = GoBoard::new(3);
    let mut agent = RandomAgent::new(42);
    for _ in 0..6 {
        match agent.get_move(&board, Color::Black) {
            Some(p) => board.try_place(p, Color::Black).unwrap(),
            None => return,
        }
    }
}

#[test]
fn random_agent_reports_exhaustion() {
    // 2x2 with three black stones: the last point is suicide for white.
    let mut board = GoBoard::new(2);
    board.try_place(Point { row: 0, col: 0 }, Color::Black).unwrap();
    board.try_place(Point { row: 0, col: 1 }, Color::Black).unwrap();
    board.try_place(Point { row: 1, col: 0 }, Color::Black).unwrap();
    let mut agent = RandomAgent::new(1);
    assert_eq!(agent.get_move(&board, Color::White), None);
}

#[test]
fn random_agent_is_deterministic_per_seed() {
    let board = GoBoard::new(9);
    let mut a = RandomAgent::new(99);
    let mut b = RandomAgent::new(99);
    assert_eq!(a.get_move(&board, Color::Black), b.get_move(&board, Color::Black));
}
