/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};
use arrayvec::ArrayVec;

use super::{
    bishop_rays, king_targets, knight_targets, rook_rays, PieceKind, Position, Rank, Ray, Side,
    Square, SquareList, MAX_NUM_DESTINATIONS,
};

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_DESTINATIONS`] squares.
pub type MoveList = ArrayVec<Square, MAX_NUM_DESTINATIONS>;

/// A proposed move: a piece leaving `from` for `to`.
///
/// Whether it captures is decided by the [`Position`] it is applied to.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Parses a move written as two concatenated square labels, such as `"e2e4"`.
    ///
    /// # Example
    /// ```
    /// # use fission::{Move, Square};
    /// let mv = Move::from_uci("g1f3").unwrap();
    /// assert_eq!(mv, Move::new(Square::G1, Square::F3));
    ///
    /// assert!(Move::from_uci("g1").is_err());
    /// assert!(Move::from_uci("g1f9").is_err());
    /// ```
    pub fn from_uci(mv: &str) -> Result<Self> {
        let (Some(from), Some(to)) = (mv.get(0..2), mv.get(2..)) else {
            bail!("Invalid Move string: Must be two square labels, like \"e2e4\". Got {mv:?}");
        };

        let from = Square::from_uci(from).context(format!("Invalid source square in {mv:?}"))?;
        let to = Square::from_uci(to).context(format!("Invalid destination square in {mv:?}"))?;

        Ok(Self::new(from, to))
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl Position {
    /// Destinations for whichever piece stands on `square`.
    ///
    /// Returns an empty list if `square` is empty.
    /// Whose turn it is does not matter here.
    ///
    /// # Example
    /// ```
    /// # use fission::{Position, Square};
    /// let pos = Position::new_game();
    /// assert_eq!(pos.legal_destinations(Square::G1).as_slice(), &[Square::H3, Square::F3]);
    /// assert_eq!(pos.legal_destinations(Square::E2).as_slice(), &[Square::E3, Square::E4]);
    /// assert!(pos.legal_destinations(Square::E4).is_empty());
    /// ```
    pub fn legal_destinations(&self, square: Square) -> MoveList {
        match self.occupant_at(square) {
            Some((side, kind)) => self.destinations(square, side, kind),
            None => MoveList::new(),
        }
    }

    /// Destinations for a `side` piece of `kind` standing on `square`, in generation order.
    ///
    /// The caller guarantees that such a piece is actually there; this is not re-checked.
    ///
    /// Sliders list their rays nearest-first, stopping at the first occupied square,
    /// which is included only if it holds an enemy. A Queen lists its diagonal rays
    /// before its orthogonal ones.
    pub fn destinations(&self, square: Square, side: Side, kind: PieceKind) -> MoveList {
        let mut moves = MoveList::new();

        match kind {
            PieceKind::Pawn => self.push_pawn_destinations(&mut moves, square, side),
            PieceKind::Knight => {
                self.push_leaper_destinations(&mut moves, knight_targets(square), side)
            }
            PieceKind::Bishop => self.push_rider_destinations(&mut moves, bishop_rays(square), side),
            PieceKind::Rook => self.push_rider_destinations(&mut moves, rook_rays(square), side),
            PieceKind::Queen => {
                self.push_rider_destinations(&mut moves, bishop_rays(square), side);
                self.push_rider_destinations(&mut moves, rook_rays(square), side);
            }
            PieceKind::King => {
                self.push_leaper_destinations(&mut moves, king_targets(square), side)
            }
        }

        moves
    }

    /// Every target not occupied by a friendly piece.
    fn push_leaper_destinations(&self, moves: &mut MoveList, targets: &SquareList<8>, side: Side) {
        let friends = self.roster(side);
        moves.extend(targets.iter().copied().filter(|&to| !friends.contains(to)));
    }

    /// Walks each ray until the first occupied square.
    fn push_rider_destinations(&self, moves: &mut MoveList, rays: &[Ray; 4], side: Side) {
        for ray in rays {
            for &to in ray {
                match self.side_at(to) {
                    None => moves.push(to),
                    Some(occupant) => {
                        if occupant != side {
                            moves.push(to);
                        }
                        break;
                    }
                }
            }
        }
    }

    /// Single and double steps onto empty squares, then diagonal captures.
    fn push_pawn_destinations(&self, moves: &mut MoveList, square: Square, side: Side) {
        if let Some(single) = square.forward_by(side, 1) {
            if self.side_at(single).is_none() {
                moves.push(single);

                if square.rank() == Rank::second(side) {
                    if let Some(double) = square.forward_by(side, 2) {
                        if self.side_at(double).is_none() {
                            moves.push(double);
                        }
                    }
                }
            }
        }

        for file_delta in [-1, 1] {
            if let Some(target) = square.offset(file_delta, side.forward()) {
                if self.side_at(target) == Some(side.opponent()) {
                    moves.push(target);
                }
            }
        }
    }
}
