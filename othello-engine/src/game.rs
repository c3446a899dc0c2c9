//! Turn management on top of a single [`Board`].
//!
//! [`Board`] knows nothing about whose turn it is. [`Game`] drives one session:
//! it applies moves for the side to move, skips a side that has no legal move,
//! and settles the [`Outcome`] once neither side can play.

use crate::board::{Board, InvalidMove, Outcome};
use crate::location::{Position, PositionList};
use derive_more::{Display, Error};
use log::info;
use std::fmt;

/// One of the two competing colors.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Side {
    Black,
    White,
}

impl Side {
    /// Gets the other side.
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }
}

impl Default for Side {
    /// Gets the side that moves first (black).
    fn default() -> Self {
        Self::Black
    }
}

impl std::ops::Not for Side {
    type Output = Self;

    fn not(self) -> Self {
        self.opponent()
    }
}

/// Where a session stands.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    ToMove(Side),
    Finished(Outcome),
}

/// What happened when a move was played.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Turn {
    pub flipped: PositionList,
    /// The side whose turn was skipped for lack of a legal move, if any.
    pub skipped: Option<Side>,
    pub status: Status,
}

#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
pub enum GameError {
    InvalidMove(InvalidMove),
    #[display(fmt = "the game is already over")]
    Finished,
}

impl From<InvalidMove> for GameError {
    fn from(err: InvalidMove) -> Self {
        GameError::InvalidMove(err)
    }
}

/// A single game session: the board plus whose turn it is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Game {
    board: Board,
    status: Status,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Start from the standard opening with Black to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Side::default())
    }

    /// Resume from an arbitrary position. If `to_move` cannot play, the turn
    /// passes immediately; if neither side can, the game is already finished.
    pub fn from_board(board: Board, to_move: Side) -> Self {
        let status = next_status(&board, to_move);
        Self { board, status }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// The side to move, or None once the game is over.
    pub fn to_move(&self) -> Option<Side> {
        match self.status {
            Status::ToMove(side) => Some(side),
            Status::Finished(_) => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, Status::Finished(_))
    }

    /// Legal moves for the side to move. Empty once the game is over.
    pub fn legal_moves(&self) -> PositionList {
        self.to_move()
            .map(|side| self.board.legal_moves(side))
            .unwrap_or_default()
    }

    /// Play `position` for the side to move. A failed call leaves the game untouched.
    pub fn play(&mut self, position: Position) -> Result<Turn, GameError> {
        let side = self.to_move().ok_or(GameError::Finished)?;
        let flipped = self.board.apply_move(side, position)?;

        self.status = next_status(&self.board, !side);
        let skipped = match self.status {
            Status::ToMove(next) if next == side => {
                info!("{} has no legal move; {} plays again", !side, side);
                Some(!side)
            }
            _ => None,
        };

        Ok(Turn {
            flipped,
            skipped,
            status: self.status,
        })
    }
}

/// Hand the turn to `candidate` if it can move, else back to its opponent,
/// else finish the game.
fn next_status(board: &Board, candidate: Side) -> Status {
    if board.has_legal_move(candidate) {
        return Status::ToMove(candidate);
    }
    if board.has_legal_move(!candidate) {
        return Status::ToMove(!candidate);
    }

    let score = board.score();
    let outcome = score.outcome();
    info!(
        "Game over: {} (Black {}, White {})",
        outcome, score.black, score.white
    );
    Status::Finished(outcome)
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        match self.status {
            Status::ToMove(side) => write!(f, "{} to move", side),
            Status::Finished(Outcome::Tie) => write!(f, "Game over: tie"),
            Status::Finished(outcome) => write!(f, "Game over: {} wins", outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    #[test]
    fn side_opponent() {
        assert_eq!(Side::Black.opponent(), Side::White);
        assert_eq!(!Side::White, Side::Black);
        assert_eq!(Side::default(), Side::Black);
        assert_eq!(Side::White.to_string(), "White");
    }

    #[test]
    fn turns_alternate() {
        let mut game = Game::new();
        assert_eq!(game.status(), Status::ToMove(Side::Black));

        let turn = game.play(pos("D3")).unwrap();
        assert_eq!(turn.flipped.collect::<Vec<_>>(), vec![pos("D4")]);
        assert_eq!(turn.skipped, None);
        assert_eq!(turn.status, Status::ToMove(Side::White));
        assert_eq!(game.to_move(), Some(Side::White));
    }

    #[test]
    fn invalid_move_leaves_game_untouched() {
        let mut game = Game::new();
        let before = game;

        match game.play(pos("A1")) {
            Err(GameError::InvalidMove(err)) => {
                assert_eq!(err.position, pos("A1"));
                assert_eq!(err.side, Side::Black);
                assert_eq!(err.legal, game.legal_moves());
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(game, before);
    }

    #[test]
    fn resuming_without_a_move_hands_over_the_turn() {
        let board: Board = "
            X O . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
        "
        .parse()
        .unwrap();
        let game = Game::from_board(board, Side::White);
        assert_eq!(game.to_move(), Some(Side::Black));
        assert_eq!(game.legal_moves().collect::<Vec<_>>(), vec![pos("C1")]);
    }

    #[test]
    fn side_without_moves_is_skipped() {
        let board: Board = "
            X O . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            X O . . . . . .
        "
        .parse()
        .unwrap();
        let mut game = Game::from_board(board, Side::Black);
        assert_eq!(
            game.legal_moves().collect::<Vec<_>>(),
            vec![pos("C1"), pos("C8")]
        );

        // White's last disc on B8 is pinned against the edge.
        let turn = game.play(pos("C1")).unwrap();
        assert_eq!(turn.flipped.collect::<Vec<_>>(), vec![pos("B1")]);
        assert_eq!(turn.skipped, Some(Side::White));
        assert_eq!(turn.status, Status::ToMove(Side::Black));

        let turn = game.play(pos("C8")).unwrap();
        assert_eq!(turn.skipped, None);
        assert_eq!(turn.status, Status::Finished(Outcome::Black));
        assert_eq!(<(u8, u8)>::from(game.board().score()), (6, 0));
    }

    #[test]
    fn game_finishes_when_nobody_can_move() {
        let board: Board = "
            . X O . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
        "
        .parse()
        .unwrap();
        let mut game = Game::from_board(board, Side::White);
        assert_eq!(game.legal_moves().collect::<Vec<_>>(), vec![pos("A1")]);

        let turn = game.play(pos("A1")).unwrap();
        assert_eq!(turn.flipped.collect::<Vec<_>>(), vec![pos("B1")]);
        assert_eq!(turn.status, Status::Finished(Outcome::White));
        assert!(game.is_finished());
        assert_eq!(game.play(pos("D1")), Err(GameError::Finished));
    }
}
