/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use thiserror::Error;

use super::{PieceKind, Position, Side, Square, SquareList};

/// Status of a game.
///
/// Once an outcome other than [`Outcome::InProgress`] is reached, it never changes.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub enum Outcome {
    #[default]
    InProgress,
    WhiteWon,
    BlackWon,

    /// Both kings were destroyed by the same move.
    Draw,
}

impl Outcome {
    /// The outcome implied by which kings are still standing.
    ///
    /// # Example
    /// ```
    /// # use fission::Outcome;
    /// assert_eq!(Outcome::from_kings(true, true), Outcome::InProgress);
    /// assert_eq!(Outcome::from_kings(true, false), Outcome::WhiteWon);
    /// assert_eq!(Outcome::from_kings(false, false), Outcome::Draw);
    /// ```
    #[inline(always)]
    pub const fn from_kings(white: bool, black: bool) -> Self {
        match (white, black) {
            (true, true) => Self::InProgress,
            (true, false) => Self::WhiteWon,
            (false, true) => Self::BlackWon,
            (false, false) => Self::Draw,
        }
    }

    /// Returns `true` if no more moves may be made.
    #[inline(always)]
    pub const fn is_over(&self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// The side that won, if any.
    #[inline(always)]
    pub const fn winner(&self) -> Option<Side> {
        match self {
            Self::WhiteWon => Some(Side::White),
            Self::BlackWon => Some(Side::Black),
            Self::InProgress | Self::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self {
            Self::InProgress => "in progress",
            Self::WhiteWon => "white won",
            Self::BlackWon => "black won",
            Self::Draw => "draw",
        };

        write!(f, "{outcome}")
    }
}

/// Reasons a move can be refused.
///
/// A refused move leaves the [`Position`] exactly as it was.
#[derive(Error, Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveRejected {
    #[error("the game is over ({outcome})")]
    GameOver { outcome: Outcome },

    #[error("there is no piece on {square}")]
    EmptySquare { square: Square },

    #[error("the piece on {square} belongs to {side}, who is not to move")]
    WrongSide { square: Square, side: Side },

    #[error("the piece on {from} cannot move to {to}")]
    IllegalDestination { from: Square, to: Square },

    #[error("the king on {from} cannot capture on {to}")]
    KingCapture { from: Square, to: Square },
}

/// What happened when a move was applied.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveReport {
    /// Side that made the move.
    pub side: Side,

    /// Kind of the piece that moved.
    pub kind: PieceKind,

    pub from: Square,
    pub to: Square,

    /// Whether the move captured, and therefore detonated.
    pub captured: bool,

    /// Squares emptied by the blast, excluding the capture square's original occupant.
    pub cleared: SquareList<9>,

    /// Outcome after the move.
    pub outcome: Outcome,
}

impl fmt::Display for MoveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}{}", self.side, self.kind, self.from, self.to)?;

        if self.captured {
            write!(f, " captures, blast clears [")?;
            for (i, square) in self.cleared.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{square}")?;
            }
            write!(f, "]")?;
        }

        if self.outcome.is_over() {
            write!(f, ", {}", self.outcome)?;
        }

        Ok(())
    }
}

impl Position {
    /// Applies the move `from -> to` for the side to move.
    ///
    /// A capture removes both the captured piece and the mover, then detonates on `to`,
    /// removing every non-pawn on `to` and the 8 squares around it. Kings may not capture.
    ///
    /// On success, the turn passes to the opponent unless the move ended the game.
    /// On failure, `self` is left untouched.
    ///
    /// # Example
    /// ```
    /// # use fission::{MoveRejected, Position, Side, Square};
    /// let mut pos = Position::new_game();
    /// let report = pos.apply_move(Square::E2, Square::E4).unwrap();
    /// assert!(!report.captured);
    /// assert_eq!(pos.side_to_move(), Side::Black);
    ///
    /// // White cannot move twice in a row
    /// let err = pos.apply_move(Square::D2, Square::D4).unwrap_err();
    /// assert_eq!(err, MoveRejected::WrongSide { square: Square::D2, side: Side::White });
    /// ```
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<MoveReport, MoveRejected> {
        let (side, kind) = self.validate_move(from, to).inspect_err(|reason| {
            tracing::trace!(%from, %to, %reason, "move rejected");
        })?;

        let captured = self.side_at(to) == Some(side.opponent());
        let cleared = if captured {
            let victim = self.remove(side.opponent(), to);
            self.remove(side, from);
            tracing::debug!(%side, %kind, %from, %to, victim = %victim.kind, "capture");

            self.detonate(to)
        } else {
            self.relocate(side, from, to);
            tracing::debug!(%side, %kind, %from, %to, "move");

            SquareList::EMPTY
        };

        let outcome = self.outcome_from_kings();
        self.set_outcome(outcome);

        if outcome.is_over() {
            tracing::info!(%outcome, "game over");
        } else {
            self.toggle_side_to_move();
        }

        Ok(MoveReport {
            side,
            kind,
            from,
            to,
            captured,
            cleared,
            outcome,
        })
    }

    /// Checks every precondition of [`Position::apply_move`] without changing anything.
    ///
    /// Returns the side and kind of the mover.
    fn validate_move(&self, from: Square, to: Square) -> Result<(Side, PieceKind), MoveRejected> {
        if self.outcome().is_over() {
            return Err(MoveRejected::GameOver {
                outcome: self.outcome(),
            });
        }

        let Some((side, kind)) = self.occupant_at(from) else {
            return Err(MoveRejected::EmptySquare { square: from });
        };

        if side != self.side_to_move() {
            return Err(MoveRejected::WrongSide { square: from, side });
        }

        if !self.destinations(from, side, kind).contains(&to) {
            return Err(MoveRejected::IllegalDestination { from, to });
        }

        if kind == PieceKind::King && self.side_at(to) == Some(side.opponent()) {
            return Err(MoveRejected::KingCapture { from, to });
        }

        Ok((side, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fen_pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn test_quiet_move_relocates_and_flips_turn() {
        let mut pos = Position::new_game();
        let report = pos.apply_move(Square::G1, Square::F3).unwrap();

        assert_eq!(report.side, Side::White);
        assert_eq!(report.kind, PieceKind::Knight);
        assert!(!report.captured);
        assert!(report.cleared.is_empty());
        assert_eq!(report.outcome, Outcome::InProgress);

        assert_eq!(pos.occupant_at(Square::G1), None);
        assert_eq!(pos.occupant_at(Square::F3), Some((Side::White, PieceKind::Knight)));
        assert_eq!(pos.side_to_move(), Side::Black);
        assert_eq!(pos.roster(Side::White).len(), 16);
    }

    #[test]
    fn test_capture_removes_mover_and_victim() {
        // White rook takes a lone black knight far from anything else
        let mut pos = fen_pos("4k3/8/8/8/n6R/8/8/4K3 w");
        let report = pos.apply_move(Square::H4, Square::A4).unwrap();

        assert!(report.captured);
        assert!(report.cleared.is_empty());
        assert_eq!(pos.occupant_at(Square::A4), None);
        assert_eq!(pos.occupant_at(Square::H4), None);
        assert_eq!(pos.roster(Side::White).len(), 1);
        assert_eq!(pos.roster(Side::Black).len(), 1);
        assert_eq!(pos.side_to_move(), Side::Black);
    }

    #[test]
    fn test_pawn_capture_removes_pawns_too() {
        // The capturing and captured pawns are removed by the capture, not the blast
        let mut pos = fen_pos("4k3/8/8/3p4/4P3/8/8/4K3 w");
        let report = pos.apply_move(Square::E4, Square::D5).unwrap();

        assert!(report.captured);
        assert_eq!(pos.roster(Side::White).len(), 1);
        assert_eq!(pos.roster(Side::Black).len(), 1);
    }

    #[test]
    fn test_rejections() {
        let mut pos = Position::new_game();

        assert_eq!(
            pos.apply_move(Square::E4, Square::E5),
            Err(MoveRejected::EmptySquare { square: Square::E4 })
        );
        assert_eq!(
            pos.apply_move(Square::E7, Square::E5),
            Err(MoveRejected::WrongSide {
                square: Square::E7,
                side: Side::Black
            })
        );
        assert_eq!(
            pos.apply_move(Square::E2, Square::E5),
            Err(MoveRejected::IllegalDestination {
                from: Square::E2,
                to: Square::E5
            })
        );
        assert_eq!(
            pos.apply_move(Square::A1, Square::A2),
            Err(MoveRejected::IllegalDestination {
                from: Square::A1,
                to: Square::A2
            })
        );

        assert_eq!(pos, Position::new_game());
    }

    #[test]
    fn test_king_cannot_capture() {
        let before = fen_pos("8/8/8/8/4p3/4K3/8/4k3 w");
        let mut pos = before.clone();

        assert_eq!(
            pos.apply_move(Square::E3, Square::E4),
            Err(MoveRejected::KingCapture {
                from: Square::E3,
                to: Square::E4
            })
        );
        assert_eq!(pos, before);

        // Quiet king moves are fine
        assert!(pos.apply_move(Square::E3, Square::D3).is_ok());
    }

    #[test]
    fn test_blast_kills_king_and_ends_game() {
        // Rook takes the pawn on d7, next to the black king on e8
        let mut pos = fen_pos("4k3/3p4/8/8/8/8/8/3RK3 w");
        let report = pos.apply_move(Square::D1, Square::D7).unwrap();

        assert_eq!(report.cleared.as_slice(), &[Square::E8]);
        assert_eq!(report.outcome, Outcome::WhiteWon);
        assert_eq!(pos.outcome(), Outcome::WhiteWon);

        // The turn does not pass once the game ends
        assert_eq!(pos.side_to_move(), Side::White);
        assert_eq!(
            pos.apply_move(Square::E1, Square::E2),
            Err(MoveRejected::GameOver {
                outcome: Outcome::WhiteWon
            })
        );
    }

    #[test]
    fn test_both_kings_in_blast_is_a_draw() {
        // Rook slides along the fifth rank onto the knight, beside both kings
        let mut pos = fen_pos("8/8/8/3kn2R/3K4/8/8/8 w");
        let report = pos.apply_move(Square::H5, Square::E5).unwrap();

        assert_eq!(report.cleared.len(), 2);
        assert_eq!(report.outcome, Outcome::Draw);
        assert_eq!(pos.outcome().winner(), None);
        assert!(pos.roster(Side::White).is_empty());
        assert!(pos.roster(Side::Black).is_empty());
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::InProgress.to_string(), "in progress");
        assert_eq!(Outcome::BlackWon.to_string(), "black won");
        assert_eq!(Outcome::BlackWon.winner(), Some(Side::Black));
    }

    #[test]
    fn test_rejection_messages() {
        let err = MoveRejected::KingCapture {
            from: Square::E1,
            to: Square::E2,
        };
        assert_eq!(err.to_string(), "the king on e1 cannot capture on e2");

        let err = MoveRejected::GameOver {
            outcome: Outcome::Draw,
        };
        assert_eq!(err.to_string(), "the game is over (draw)");
    }
}
