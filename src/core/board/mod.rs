use std::fmt::{Display, Formatter};

use thiserror::Error;

use super::{Color, Point};

pub const MIN_SIZE: usize = 2;
// Bounded by the 24-letter column alphabet of the wire format.
pub const MAX_SIZE: usize = 24;

/// Why the board refused a placement.
///
/// This rule set is the no-capture teaching variant: a move that would take
/// the last liberty of any opposing group is itself illegal, so stones only
/// ever accumulate and the game ends once a side runs out of placements.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum IllegalReason {
    #[error("occupied")]
    Occupied,
    #[error("capture")]
    Capture,
    #[error("suicide")]
    Suicide,
}

/// Signed game result from black's perspective; white receives the komi.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Score {
    margin: f32,
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.margin > 0.0 {
            write!(f, "B+{}", self.margin)
        } else if self.margin < 0.0 {
            write!(f, "W+{}", -self.margin)
        } else {
            write!(f, "0")
        }
    }
}

/// Square board of intersections, row-major from the bottom-left corner.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GoBoard {
    size: usize,
    grid: Vec<Option<Color>>,
}

impl GoBoard {
    pub fn new(size: usize) -> GoBoard {
        debug_assert!((MIN_SIZE..=MAX_SIZE).contains(&size));
        GoBoard {
            size,
            grid: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Discards all stones and re-shapes the board to `size`.
    pub fn reset(&mut self, size: usize) {
        self.size = size;
        self.grid = vec![None; size * size];
    }

    fn index(&self, p: Point) -> usize {
        p.row * self.size + p.col
    }

    pub fn stone_at(&self, p: Point) -> Option<Color> {
        self.grid[self.index(p)]
    }

    pub fn stone_count(&self, color: Color) -> usize {
        self.grid.iter().filter(|&&c| c == Some(color)).count()
    }

    /// All intersections in canonical row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.size)
            .flat_map(move |row| (0..self.size).map(move |col| Point { row, col }))
    }

    fn neighbors(&self, p: Point) -> Vec<Point> {
        let mut out = Vec::with_capacity(4);
        if p.row > 0 {
            out.push(Point { row: p.row - 1, col: p.col });
        }
        if p.row + 1 < self.size {
            out.push(Point { row: p.row + 1, col: p.col });
        }
        if p.col > 0 {
            out.push(Point { row: p.row, col: p.col - 1 });
        }
        if p.col + 1 < self.size {
            out.push(Point { row: p.row, col: p.col + 1 });
        }
        out
    }

    /// Flood-fills the `group_color` group containing `start`, pretending the
    /// empty point `placed` already holds `placed_color`, and reports whether
    /// the group keeps at least one liberty.
    fn group_has_liberty(
        &self,
        start: Point,
        group_color: Color,
        placed: Point,
        placed_color: Color,
    ) -> bool {
        let occupant = |p: Point| {
            if p == placed {
                Some(placed_color)
            } else {
                self.stone_at(p)
            }
        };

        let mut visited = vec![false; self.grid.len()];
        visited[self.index(start)] = true;
        let mut stack = vec![start];

        while let Some(p) = stack.pop() {
            for n in self.neighbors(p) {
                match occupant(n) {
                    None => return true,
                    Some(c) if c == group_color => {
                        let i = self.index(n);
                        if !visited[i] {
                            visited[i] = true;
                            stack.push(n);
                        }
                    }
                    Some(_) => {}
                }
            }
        }
        false
    }

    /// The full legality check, without mutating anything. Checked in order:
    /// occupied, then would-capture, then suicide.
    pub fn legality(&self, p: Point, color: Color) -> Result<(), IllegalReason> {
        if self.stone_at(p).is_some() {
            return Err(IllegalReason::Occupied);
        }
        for n in self.neighbors(p) {
            if self.stone_at(n) == Some(color.opponent())
                && !self.group_has_liberty(n, color.opponent(), p, color)
            {
                return Err(IllegalReason::Capture);
            }
        }
        if !self.group_has_liberty(p, color, p, color) {
            return Err(IllegalReason::Suicide);
        }
        Ok(())
    }

    pub fn is_legal(&self, p: Point, color: Color) -> bool {
        self.legality(p, color).is_ok()
    }

    /// Places a stone, or reports why it cannot be placed. A rejected move
    /// leaves the board untouched; an accepted one never removes stones in
    /// this variant, so the mutation is a single cell write.
    pub fn try_place(&mut self, p: Point, color: Color) -> Result<(), IllegalReason> {
        self.legality(p, color)?;
        let i = self.index(p);
        self.grid[i] = Some(color);
        Ok(())
    }

    pub fn legal_moves(&self, color: Color) -> Vec<Point> {
        self.points().filter(|&p| self.is_legal(p, color)).collect()
    }

    /// Stone-counting score with komi compensation for white.
    pub fn score(&self, komi: f32) -> Score {
        let black = self.stone_count(Color::Black) as f32;
        let white = self.stone_count(Color::White) as f32;
        Score {
            margin: black - white - komi,
        }
    }
}

impl Display for GoBoard {
    /// Renders the grid top row first, `X` black / `O` white / `.` empty.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in (0..self.size).rev() {
            for col in 0..self.size {
                if col > 0 {
                    write!(f, " ")?;
                }
                let cell = match self.grid[row * self.size + col] {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{}", cell)?;
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
fn p(row: usize, col: usize) -> Point {
    Point { row, col }
}

#[test]
fn empty_board_is_fully_legal() {
    let board = GoBoard::new(5);
    assert_eq!(board.legal_moves(Color::Black).len(), 25);
    assert_eq!(board.legal_moves(Color::White).len(), 25);
}

#[test]
fn occupied_point_is_rejected() {
    let mut board = GoBoard::new(5);
    board.try_place(p(2, 2), Color::Black).unwrap();
    assert_eq!(
        board.try_place(p(2, 2), Color::White),
        Err(IllegalReason::Occupied)
    );
    assert_eq!(board.stone_at(p(2, 2)), Some(Color::Black));
}

#[test]
fn suicide_is_rejected() {
    // W B1 and W A2 smother the empty corner A1 for black.
    let mut board = GoBoard::new(3);
    board.try_place(p(0, 1), Color::White).unwrap();
    board.try_place(p(1, 0), Color::White).unwrap();
    assert_eq!(
        board.legality(p(0, 0), Color::Black),
        Err(IllegalReason::Suicide)
    );
}

#[test]
fn capturing_move_is_rejected() {
    // B in the corner at A1, W at B1; W A2 would take the last liberty.
    let mut board = GoBoard::new(3);
    board.try_place(p(0, 0), Color::Black).unwrap();
    board.try_place(p(0, 1), Color::White).unwrap();
    assert_eq!(
        board.legality(p(1, 0), Color::White),
        Err(IllegalReason::Capture)
    );
    // The same point is fine for black: it connects to its own group.
    assert!(board.is_legal(p(1, 0), Color::Black));
}

#[test]
fn rejected_move_leaves_board_unchanged() {
    let mut board = GoBoard::new(3);
    board.try_place(p(0, 0), Color::Black).unwrap();
    board.try_place(p(0, 1), Color::White).unwrap();
    let before = board.clone();
    assert!(board.try_place(p(1, 0), Color::White).is_err());
    assert_eq!(board, before);
}

#[test]
fn reset_clears_and_resizes() {
    let mut board = GoBoard::new(3);
    board.try_place(p(0, 0), Color::Black).unwrap();
    board.reset(5);
    assert_eq!(board.size(), 5);
    assert_eq!(board.stone_count(Color::Black), 0);
}

#[test]
fn legal_moves_are_row_major() {
    let board = GoBoard::new(2);
    assert_eq!(
        board.legal_moves(Color::Black),
        vec![p(0, 0), p(0, 1), p(1, 0), p(1, 1)]
    );
}

#[test]
fn score_applies_komi_to_white() {
    let mut board = GoBoard::new(3);
    assert_eq!(board.score(0.0).to_string(), "0");
    assert_eq!(board.score(6.5).to_string(), "W+6.5");

    board.try_place(p(0, 0), Color::Black).unwrap();
    board.try_place(p(2, 2), Color::Black).unwrap();
    board.try_place(p(0, 2), Color::White).unwrap();
    assert_eq!(board.score(0.0).to_string(), "B+1");
    assert_eq!(board.score(2.5).to_string(), "W+1.5");
}

#[test]
fn render_shows_top_row_first() {
    let mut board = GoBoard::new(2);
    board.try_place(p(0, 0), Color::Black).unwrap();
    board.try_place(p(1, 1), Color::White).unwrap();
    assert_eq!(board.to_string(), ". O\nX .");
}
