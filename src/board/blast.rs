/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{king_targets, Position, Square, SquareList};

/// The squares a detonation on `square` reaches: `square` itself, then its king neighbors.
///
/// # Example
/// ```
/// # use fission::{blast_radius, Square};
/// assert_eq!(blast_radius(Square::D4).len(), 9);
/// assert_eq!(blast_radius(Square::A1).as_slice(), &[Square::A1, Square::B1, Square::A2, Square::B2]);
/// ```
pub fn blast_radius(square: Square) -> SquareList<9> {
    king_targets(square)
        .iter()
        .fold(SquareList::EMPTY.with(square), |radius, &neighbor| {
            radius.with(neighbor)
        })
}

impl Position {
    /// Detonates on `square`, removing every non-pawn of either side within [`blast_radius`].
    ///
    /// Returns the squares that were emptied. The outcome is not re-derived here;
    /// [`Position::apply_move`] does that once the whole move has resolved.
    pub(crate) fn detonate(&mut self, square: Square) -> SquareList<9> {
        // Settle the radius before anything is removed
        let radius = blast_radius(square);
        let mut cleared = SquareList::EMPTY;

        for &target in &radius {
            let Some((side, kind)) = self.occupant_at(target) else {
                continue;
            };

            if !kind.is_blast_immune() {
                self.remove(side, target);
                cleared = cleared.with(target);
            }
        }

        tracing::debug!(%square, ?cleared, "detonation");
        cleared
    }
}
