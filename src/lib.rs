/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Everything about the board and its rules: geometry, state, moves, and blasts.
mod board;

/// Command-line arguments, and the commands a session understands.
mod cli;

/// An interactive game driven by text commands.
mod session;

pub use board::*;
pub use cli::*;
pub use session::*;

/// A fresh game from the standard starting position. Same as [`Position::new_game`].
#[inline(always)]
pub fn new_game() -> Position {
    Position::new_game()
}

/// Applies `from -> to` to `position`. Same as [`Position::apply_move`].
///
/// # Example
/// ```
/// # use fission::{apply_move, new_game, occupant_at, outcome, Outcome, PieceKind, Side, Square};
/// let mut game = new_game();
/// apply_move(&mut game, Square::B1, Square::C3).unwrap();
///
/// assert_eq!(occupant_at(&game, Square::C3), Some((Side::White, PieceKind::Knight)));
/// assert_eq!(outcome(&game), Outcome::InProgress);
/// ```
#[inline(always)]
pub fn apply_move(
    position: &mut Position,
    from: Square,
    to: Square,
) -> Result<MoveReport, MoveRejected> {
    position.apply_move(from, to)
}

/// The outcome of `position`. Same as [`Position::outcome`].
#[inline(always)]
pub fn outcome(position: &Position) -> Outcome {
    position.outcome()
}

/// Who stands on `square`, if anyone. Same as [`Position::occupant_at`].
#[inline(always)]
pub fn occupant_at(position: &Position, square: Square) -> Option<(Side, PieceKind)> {
    position.occupant_at(square)
}
