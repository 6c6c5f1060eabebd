/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// FEN string for the starting position.
///
/// Only the placement and side-to-move fields are meaningful in atomic chess as played here.
pub const FEN_STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

/// Maximum number of destinations a single piece can have.
///
/// A Queen in the center of an otherwise empty board reaches 27 squares.
pub const MAX_NUM_DESTINATIONS: usize = 27;
