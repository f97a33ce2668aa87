use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::core::Point;

/// Column letters of the wire format. `I` is skipped by Go convention, which
/// is what caps boards at 24 columns.
pub const COLUMN_LETTERS: &str = "ABCDEFGHJKLMNOPQRSTUVWXY";

/// A protocol position: a board coordinate or the distinguished pass token.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Vertex {
    Pass,
    Point(Point),
}

/// `Bounds` is a first-class outcome, distinct from a malformed token, so
/// handlers can answer with a coordinate-specific message.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum CoordError {
    #[error("malformed coordinate")]
    Malformed,
    #[error("coordinate out of bounds")]
    Bounds,
}

impl Vertex {
    /// Decodes a token such as `c3` or `PASS` for a board of `size`.
    ///
    /// The letter is the column (case-insensitive, `i` excluded), the numeral
    /// is the 1-based row from the bottom. This is the only place raw text
    /// becomes a `Point`.
    pub fn from_token(token: &str, size: usize) -> Result<Vertex, CoordError> {
        if token.eq_ignore_ascii_case("pass") {
            return Ok(Vertex::Pass);
        }

        let mut chars = token.chars();
        let letter = chars
            .next()
            .ok_or(CoordError::Malformed)?
            .to_ascii_uppercase();
        let col = match letter {
            'I' => return Err(CoordError::Malformed),
            'A'..='H' => letter as usize - 'A' as usize,
            'J'..='Z' => letter as usize - 'A' as usize - 1,
            _ => return Err(CoordError::Malformed),
        };

        let row: usize = chars
            .as_str()
            .parse()
            .map_err(|_| CoordError::Malformed)?;
        if row == 0 {
            return Err(CoordError::Malformed);
        }
        let row = row - 1;

        if row >= size || col >= size {
            return Err(CoordError::Bounds);
        }
        Ok(Vertex::Point(Point { row, col }))
    }
}

impl Display for Vertex {
    /// Exact inverse of `from_token` for in-range coordinates.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Vertex::Pass => write!(f, "pass"),
            Vertex::Point(p) => {
                debug_assert!(p.col < COLUMN_LETTERS.len());
                let letter = COLUMN_LETTERS.as_bytes()[p.col] as char;
                write!(f, "{}{}", letter, p.row + 1)
            }
        }
    }
}

#[cfg(test)]
fn pt(row: usize, col: usize) -> Vertex {
    Vertex::Point(Point { row, col })
}

#[test]
fn decodes_simple_coordinates() {
    assert_eq!(Vertex::from_token("a1", 5), Ok(pt(0, 0)));
    assert_eq!(Vertex::from_token("C3", 5), Ok(pt(2, 2)));
    assert_eq!(Vertex::from_token("e5", 5), Ok(pt(4, 4)));
}

#[test]
fn decodes_pass_in_any_case() {
    assert_eq!(Vertex::from_token("pass", 2), Ok(Vertex::Pass));
    assert_eq!(Vertex::from_token("PASS", 19), Ok(Vertex::Pass));
}

#[test]
fn skips_the_letter_i() {
    // J is the ninth column.
    assert_eq!(Vertex::from_token("j1", 19), Ok(pt(0, 8)));
    assert_eq!(Vertex::from_token("i3", 19), Err(CoordError::Malformed));
    assert_eq!(pt(0, 8).to_string(), "J1");
}

#[test]
fn out_of_range_is_a_bounds_outcome() {
    assert_eq!(Vertex::from_token("e5", 4), Err(CoordError::Bounds));
    assert_eq!(Vertex::from_token("a9", 5), Err(CoordError::Bounds));
    assert_eq!(Vertex::from_token("z1", 9), Err(CoordError::Bounds));
}

#[test]
fn garbage_is_malformed() {
    for token in ["", "c", "3c", "c0", "cc", "c-1", "!!", "1"] {
        assert_eq!(
            Vertex::from_token(token, 9),
            Err(CoordError::Malformed),
            "token {:?}",
            token
        );
    }
}

#[test]
fn round_trips_every_point_on_every_size() {
    for size in [2usize, 5, 9, 13, 19, 24] {
        for row in 0..size {
            for col in 0..size {
                let v = pt(row, col);
                assert_eq!(Vertex::from_token(&v.to_string(), size), Ok(v));
            }
        }
    }
}
