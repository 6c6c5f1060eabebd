/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Detonation of captures.
mod blast;

/// Applying moves, and the outcome of a game.
mod game;

/// Precomputed destination tables for every piece on every square.
mod movegen;

/// Destination generation for pieces on a board.
mod moves;

/// Sides, piece kinds, and pieces.
mod piece;

/// Board state: both rosters, whose turn it is, and the outcome.
mod position;

/// Squares, ranks, and files.
mod square;

/// Per-square lookup tables.
mod table;

/// Misc constants.
mod utils;

pub use blast::*;
pub use game::*;
pub use movegen::*;
pub use moves::*;
pub use piece::*;
pub use position::*;
pub use square::*;
pub use table::*;
pub use utils::*;
