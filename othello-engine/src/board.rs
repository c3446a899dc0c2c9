//! The Othello rules on a bordered "mailbox" board.
//!
//! The 8x8 playable area sits inside a 10x10 backing grid whose outer ring is
//! [`Cell::Border`]. Every ray leaving a playable square reaches the ring before
//! it can leave the array, so walking a direction never needs a bounds check.

use crate::game::Side;
use crate::location::{Direction, Position, PositionList};
use crate::{BACKING_EDGE, BACKING_SPACES, EDGE_LENGTH, NUM_SPACES};
use derive_more::{Display, Error, Into};
use log::{debug, trace};
use std::fmt::{self, Write};

/// The contents of one square of the backing grid.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Cell {
    Empty,
    Border,
    Occupied(Side),
}

/// Piece counts for both sides.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Into)]
pub struct Score {
    pub black: u8,
    pub white: u8,
}

/// The result of a finished game.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Outcome {
    Black,
    White,
    Tie,
}

/// A rejected move. Carries the legal set so the caller can present it.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[display(fmt = "{} cannot play {}; legal moves: {}", side, position, legal)]
pub struct InvalidMove {
    pub position: Position,
    pub side: Side,
    pub legal: PositionList,
}

#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
pub enum ParseBoardError {
    #[display(fmt = "expected 64 cells, found {}", _0)]
    WrongLength(#[error(not(source))] usize),
    #[display(fmt = "unrecognized cell {:?}", _0)]
    InvalidCell(#[error(not(source))] char),
}

/// The complete board state, owned by a single game.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Board {
    cells: [Cell; BACKING_SPACES],
}

impl Default for Board {
    /// Gets the standard opening position.
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    /// Compare the counts. Meaningful as a result only once the game is over.
    pub fn outcome(self) -> Outcome {
        use std::cmp::Ordering;

        match self.black.cmp(&self.white) {
            Ordering::Greater => Outcome::Black,
            Ordering::Less => Outcome::White,
            Ordering::Equal => Outcome::Tie,
        }
    }
}

impl Board {
    /// The standard opening: White on D4 and E5, Black on E4 and D5.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for &(row, col, side) in &[
            (4, 4, Side::White),
            (4, 5, Side::Black),
            (5, 4, Side::Black),
            (5, 5, Side::White),
        ] {
            board.cells[row * BACKING_EDGE + col] = Cell::Occupied(side);
        }
        board
    }

    /// A board with an empty interior.
    pub fn empty() -> Self {
        let mut cells = [Cell::Border; BACKING_SPACES];
        for position in Position::all() {
            cells[position.backing_index()] = Cell::Empty;
        }
        Self { cells }
    }

    #[inline]
    pub fn cell(&self, position: Position) -> Cell {
        self.cells[position.backing_index()]
    }

    /// Look up a square by backing-grid coordinates (`0..=9`), border included.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<Cell> {
        if row < BACKING_EDGE && col < BACKING_EDGE {
            Some(self.cells[row * BACKING_EDGE + col])
        } else {
            None
        }
    }

    /// Every playable position with its contents, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        Position::all().map(move |position| (position, self.cell(position)))
    }

    /// Legal destinations for `side`.
    ///
    /// Walks outward from each of `side`'s pieces: a ray that starts on an
    /// opponent piece and crosses only opponent pieces ends on a legal
    /// destination if the first non-opponent square it reaches is empty.
    pub fn legal_moves(&self, side: Side) -> PositionList {
        let mut moves = PositionList::default();

        for start in self.indices_of(side) {
            for direction in Direction::ALL.iter() {
                if let Some(index) = self.ray_end(start, direction.offset(), side) {
                    if self.cells[index] == Cell::Empty {
                        moves.insert(Position::from_backing_index(index));
                    }
                }
            }
        }

        trace!("{} legal moves for {}: {}", moves.len(), side, moves);
        moves
    }

    /// Returns whether `side` has any legal move.
    #[inline]
    pub fn has_legal_move(&self, side: Side) -> bool {
        !self.legal_moves(side).is_empty()
    }

    /// The pieces `side` would flip by playing `position`.
    ///
    /// Walks inward from the destination: along each ray, a run of one or more
    /// opponent pieces closed by one of `side`'s pieces is captured.
    /// Empty if `position` is occupied or captures nothing.
    pub fn captures(&self, side: Side, position: Position) -> PositionList {
        let mut flips = PositionList::default();
        let start = position.backing_index();
        if self.cells[start] != Cell::Empty {
            return flips;
        }

        for direction in Direction::ALL.iter() {
            let offset = direction.offset();
            if let Some(end) = self.ray_end(start, offset, side) {
                if self.cells[end] == Cell::Occupied(side) {
                    let mut index = step(start, offset);
                    while index != end {
                        flips.insert(Position::from_backing_index(index));
                        index = step(index, offset);
                    }
                }
            }
        }

        flips
    }

    /// Returns whether `side` may play `position`.
    #[inline]
    pub fn is_legal(&self, side: Side, position: Position) -> bool {
        !self.captures(side, position).is_empty()
    }

    /// Play `position` for `side`, flipping every captured piece.
    /// Returns the flipped positions. On error the board is unchanged.
    pub fn apply_move(
        &mut self,
        side: Side,
        position: Position,
    ) -> Result<PositionList, InvalidMove> {
        let flips = self.captures(side, position);
        if flips.is_empty() {
            let err = InvalidMove {
                position,
                side,
                legal: self.legal_moves(side),
            };
            debug!("Rejected move: {}", err);
            return Err(err);
        }

        self.cells[position.backing_index()] = Cell::Occupied(side);
        for flipped in flips {
            self.cells[flipped.backing_index()] = Cell::Occupied(side);
        }

        debug!("{} played {}, flipping {}", side, position, flips);
        Ok(flips)
    }

    /// Value-returning form of [`Board::apply_move`].
    #[inline]
    pub fn play(mut self, side: Side, position: Position) -> Result<Self, InvalidMove> {
        self.apply_move(side, position)?;
        Ok(self)
    }

    /// True when neither side has a legal move.
    pub fn is_game_over(&self) -> bool {
        !self.has_legal_move(Side::Black) && !self.has_legal_move(Side::White)
    }

    pub fn score(&self) -> Score {
        self.cells().fold(Score::default(), |mut score, (_, cell)| {
            match cell {
                Cell::Occupied(Side::Black) => score.black += 1,
                Cell::Occupied(Side::White) => score.white += 1,
                _ => {}
            }
            score
        })
    }

    /// Count the number of empty playable squares.
    pub fn count_empty(&self) -> u8 {
        let score = self.score();
        NUM_SPACES as u8 - score.black - score.white
    }

    /// The outcome of a finished game, or None while either side can move.
    pub fn winner(&self) -> Option<Outcome> {
        if self.is_game_over() {
            Some(self.score().outcome())
        } else {
            None
        }
    }

    fn indices_of(&self, side: Side) -> impl Iterator<Item = usize> + '_ {
        Position::all()
            .map(Position::backing_index)
            .filter(move |&index| self.cells[index] == Cell::Occupied(side))
    }

    /// Walk from `start` along `offset` across a run of `side`'s opponent.
    /// Returns the first index past the run, or None if the run is empty.
    /// The border ring stops the walk within `EDGE_LENGTH` steps.
    fn ray_end(&self, start: usize, offset: isize, side: Side) -> Option<usize> {
        let opponent = Cell::Occupied(!side);
        let mut index = step(start, offset);
        if self.cells[index] != opponent {
            return None;
        }

        while self.cells[index] == opponent {
            index = step(index, offset);
        }
        Some(index)
    }
}

#[inline]
fn step(index: usize, offset: isize) -> usize {
    (index as isize + offset) as usize
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  A B C D E F G H")?;
        for (position, cell) in self.cells() {
            if position.col() == 1 {
                write!(f, "\n{} ", position.row())?;
            }
            f.write_char(match cell {
                Cell::Occupied(Side::Black) => 'X',
                Cell::Occupied(Side::White) => 'O',
                _ => '.',
            })?;
            if position.col() < EDGE_LENGTH as u8 {
                f.write_char(' ')?;
            }
        }
        writeln!(f)
    }
}

/// Parse 64 cells in row-major order, ignoring whitespace.
/// Black is `X` or `B`, White is `O` or `W`, empty is `.` or `-`.
impl std::str::FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c.to_ascii_uppercase() {
                'X' | 'B' => Ok(Cell::Occupied(Side::Black)),
                'O' | 'W' => Ok(Cell::Occupied(Side::White)),
                '.' | '-' => Ok(Cell::Empty),
                _ => Err(ParseBoardError::InvalidCell(c)),
            })
            .collect::<Result<Vec<Cell>, _>>()?;

        if cells.len() != NUM_SPACES {
            return Err(ParseBoardError::WrongLength(cells.len()));
        }

        let mut board = Self::empty();
        for (position, cell) in Position::all().zip(cells) {
            board.cells[position.backing_index()] = cell;
        }
        Ok(board)
    }
}
