//! `othello-engine` implements the rules of Othello (Reversi) for UIs and tools.
//!
//! The crate is split into two levels:
//!
//!  - [`Board`] is the rule engine. It owns the grid, enumerates legal moves,
//!    applies moves with their flips, detects the end of the game and scores it.
//!    It has no notion of turns.
//!  - [`Game`] manages turns on top of one [`Board`], passing automatically for
//!    a side without a legal move and finishing when neither side can play.
//!
//! Neither level performs I/O. The [`play`] module is a terminal front end
//! built on [`Game`], used by the `othello` binary.

pub mod play;
pub mod test_utils;

mod board;
mod game;
mod location;

pub use board::*;
pub use game::*;
pub use location::*;

/// The number of playable spaces on one edge of an Othello board.
pub const EDGE_LENGTH: usize = 8;

/// The number of playable spaces on an Othello board.
pub const NUM_SPACES: usize = 64;

/// Edge length of the backing grid: the playable area plus a border ring.
pub const BACKING_EDGE: usize = EDGE_LENGTH + 2;

/// The number of cells in the backing grid.
pub const BACKING_SPACES: usize = BACKING_EDGE * BACKING_EDGE;
