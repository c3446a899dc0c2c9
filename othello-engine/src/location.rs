//! Coordinates on the Othello board: [`Position`], [`PositionList`] and [`Direction`].

use crate::{BACKING_EDGE, EDGE_LENGTH};
use derive_more::{BitOr, BitOrAssign, Display, Error};
use std::fmt::{self, Formatter, Write};

/// A playable square, with `row` and `col` both in `1..=8`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Position {
    row: u8,
    col: u8,
}

/// An ordered set of positions. Iterates in row-major order.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, BitOr, BitOrAssign)]
pub struct PositionList(u64);

/// One of the eight compass rays leaving a square.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl Position {
    /// Construct a position from 1-indexed row and column coordinates.
    /// Returns None outside of the playable `1..=8` range.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        let range = 1..=EDGE_LENGTH as u8;
        if range.contains(&row) && range.contains(&col) {
            Some(Self { row, col })
        } else {
            None
        }
    }

    #[inline]
    pub fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub fn col(self) -> u8 {
        self.col
    }

    /// All 64 playable positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..64u8).map(Self::from_bit)
    }

    /// Index of this position in the bordered backing grid.
    #[inline]
    pub(crate) fn backing_index(self) -> usize {
        self.row as usize * BACKING_EDGE + self.col as usize
    }

    /// Inverse of [`Position::backing_index`]. The index must be interior.
    #[inline]
    pub(crate) fn from_backing_index(index: usize) -> Self {
        Self {
            row: (index / BACKING_EDGE) as u8,
            col: (index % BACKING_EDGE) as u8,
        }
    }

    /// Row-major bit in a [`PositionList`], 0 for "A1" and 63 for "H8".
    #[inline]
    fn bit(self) -> u8 {
        (self.row - 1) * EDGE_LENGTH as u8 + (self.col - 1)
    }

    #[inline]
    fn from_bit(bit: u8) -> Self {
        Self {
            row: bit / EDGE_LENGTH as u8 + 1,
            col: bit % EDGE_LENGTH as u8 + 1,
        }
    }
}

/// Algebraic notation: column letter then row number ("D3").
impl fmt::Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char((b'A' + self.col - 1) as char)?;
        f.write_char((b'0' + self.row) as char)
    }
}

#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "invalid position (expected a column A-H followed by a row 1-8)")]
pub struct ParseLocationError;

/// Parse algebraic notation ("D3", case-insensitive).
impl std::str::FromStr for Position {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let col_char = chars.next().ok_or(ParseLocationError)?.to_ascii_uppercase();
        let col = "ABCDEFGH".find(col_char).ok_or(ParseLocationError)? as u8 + 1;
        let row = chars
            .next()
            .ok_or(ParseLocationError)?
            .to_digit(10)
            .ok_or(ParseLocationError)? as u8;

        if chars.next().is_some() {
            return Err(ParseLocationError);
        }

        Self::new(row, col).ok_or(ParseLocationError)
    }
}

impl PositionList {
    /// Returns whether `position` is in this list.
    #[inline]
    pub fn contains(self, position: Position) -> bool {
        self.0 & (1 << position.bit()) != 0
    }

    #[inline]
    pub fn insert(&mut self, position: Position) {
        self.0 |= 1 << position.bit();
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Iterator for PositionList {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.is_empty() {
            return None;
        }

        let bit = self.0.trailing_zeros() as u8;
        self.0 ^= 1 << bit;
        Some(Position::from_bit(bit))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for PositionList {}

impl std::iter::FromIterator<Position> for PositionList {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut list = Self::default();
        for position in iter {
            list.insert(position);
        }
        list
    }
}

impl fmt::Display for PositionList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let string = self
            .into_iter()
            .map(|position| position.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        write!(f, "[{}]", string)
    }
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::S,
        Direction::E,
        Direction::W,
        Direction::NE,
        Direction::NW,
        Direction::SE,
        Direction::SW,
    ];

    /// Unit step as `(d_row, d_col)`. Rows grow southward.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::N => (-1, 0),
            Direction::S => (1, 0),
            Direction::E => (0, 1),
            Direction::W => (0, -1),
            Direction::NE => (-1, 1),
            Direction::NW => (-1, -1),
            Direction::SE => (1, 1),
            Direction::SW => (1, -1),
        }
    }

    /// The same step expressed as an offset into the backing grid.
    #[inline]
    pub(crate) const fn offset(self) -> isize {
        let (d_row, d_col) = self.delta();
        d_row as isize * BACKING_EDGE as isize + d_col as isize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn position_new() {
        assert_eq!(Position::new(1, 1), Some(Position { row: 1, col: 1 }));
        assert_eq!(Position::new(8, 8), Some(Position { row: 8, col: 8 }));
        assert_eq!(Position::new(0, 4), None);
        assert_eq!(Position::new(4, 9), None);
    }

    #[test]
    fn position_backing_index() {
        assert_eq!(pos(1, 1).backing_index(), 11);
        assert_eq!(pos(8, 8).backing_index(), 88);
        assert_eq!(Position::from_backing_index(45), pos(4, 5));
    }

    #[test]
    fn position_all_row_major() {
        let all: Vec<Position> = Position::all().collect();
        assert_eq!(all.len(), 64);
        assert_eq!(all[0], pos(1, 1));
        assert_eq!(all[1], pos(1, 2));
        assert_eq!(all[8], pos(2, 1));
        assert_eq!(all[63], pos(8, 8));
    }

    #[test]
    fn position_from_str_success() {
        assert_eq!(Position::from_str("A1"), Ok(pos(1, 1)));
        assert_eq!(Position::from_str("h8"), Ok(pos(8, 8)));
        assert_eq!(Position::from_str("D3"), Ok(pos(3, 4)));
        assert_eq!(Position::from_str(" f5 "), Ok(pos(5, 6)));
    }

    #[test]
    fn position_from_str_fail() {
        assert_eq!(Position::from_str(""), Err(ParseLocationError));
        assert_eq!(Position::from_str("A12"), Err(ParseLocationError));
        assert_eq!(Position::from_str("AA"), Err(ParseLocationError));
        assert_eq!(Position::from_str("A9"), Err(ParseLocationError));
        assert_eq!(Position::from_str("A0"), Err(ParseLocationError));
        assert_eq!(Position::from_str("I5"), Err(ParseLocationError));
    }

    #[test]
    fn position_to_str() {
        assert_eq!(pos(1, 1).to_string(), "A1");
        assert_eq!(pos(8, 8).to_string(), "H8");
        assert_eq!(pos(3, 4).to_string(), "D3");
        assert_eq!(Position::from_str("E2").unwrap().to_string(), "E2");
    }

    #[test]
    fn position_list_is_a_row_major_set() {
        let list: PositionList = vec![pos(6, 5), pos(3, 4), pos(5, 6), pos(3, 4), pos(4, 3)]
            .into_iter()
            .collect();

        assert_eq!(list.len(), 4);
        assert!(list.contains(pos(5, 6)));
        assert!(!list.contains(pos(5, 5)));
        assert_eq!(
            list.collect::<Vec<_>>(),
            vec![pos(3, 4), pos(4, 3), pos(5, 6), pos(6, 5)]
        );
        assert_eq!(list.to_string(), "[D3, C4, F5, E6]");
    }

    #[test]
    fn position_list_union() {
        let mut a: PositionList = vec![pos(1, 1)].into_iter().collect();
        let b: PositionList = vec![pos(8, 8)].into_iter().collect();
        a |= b;
        assert_eq!(a.len(), 2);
        assert!(PositionList::default().is_empty());
    }

    #[test]
    fn direction_steps_are_distinct_units() {
        let offsets: Vec<isize> = Direction::ALL.iter().map(|d| d.offset()).collect();
        for (i, offset) in offsets.iter().enumerate() {
            assert_ne!(*offset, 0);
            assert!(!offsets[i + 1..].contains(offset));
            // Every ray has its reverse in the set.
            assert!(offsets.contains(&-offset));
        }
        assert_eq!(Direction::SE.offset(), 11);
        assert_eq!(Direction::NE.offset(), -9);
    }
}
