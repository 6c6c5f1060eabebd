/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt::{self, Write},
    ops::Index,
    str::FromStr,
};

use anyhow::{anyhow, bail, Result};

use super::{File, Outcome, Piece, PieceKind, Rank, Side, Square};

/// All live pieces of one side.
///
/// No two pieces in a [`Roster`] ever share a square. Once a game is underway,
/// pieces only ever leave a roster; none are added and none change kind.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    pieces: Vec<Piece>,
}

impl Roster {
    /// Number of pieces left.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Iterates the pieces in this roster, in no particular order.
    #[inline(always)]
    pub fn iter(&self) -> std::slice::Iter<'_, Piece> {
        self.pieces.iter()
    }

    /// The piece standing on `square`, if it belongs to this roster.
    #[inline(always)]
    pub fn get(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.square == square)
    }

    #[inline(always)]
    pub fn contains(&self, square: Square) -> bool {
        self.get(square).is_some()
    }

    /// Returns `true` if this roster still has a King.
    #[inline(always)]
    pub fn has_king(&self) -> bool {
        self.pieces.iter().any(Piece::is_king)
    }

    /// Number of pieces of `kind` left.
    pub fn count(&self, kind: PieceKind) -> usize {
        self.pieces.iter().filter(|piece| piece.kind == kind).count()
    }

    #[inline(always)]
    fn index_of(&self, square: Square) -> Option<usize> {
        self.pieces.iter().position(|piece| piece.square == square)
    }

    fn push(&mut self, piece: Piece) {
        self.pieces.push(piece);
    }

    fn take(&mut self, square: Square) -> Option<Piece> {
        let index = self.index_of(square)?;
        Some(self.pieces.remove(index))
    }
}

impl PartialEq for Roster {
    /// Two rosters are equal if they hold the same pieces on the same squares, in any order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|piece| other.get(piece.square) == Some(piece))
    }
}

impl Eq for Roster {}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Piece;
    type IntoIter = std::slice::Iter<'a, Piece>;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The whole state of an atomic chess game.
///
/// A [`Position`] holds one [`Roster`] per side, whose turn it is, and the game's [`Outcome`].
/// It is mutated in place by [`Position::apply_move`] for the life of the game, and by
/// nothing else, so a finished game can never be resumed:
///
/// ```compile_fail
/// # use fission::{PieceKind, Position, Side, Square};
/// let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w").unwrap();
/// pos.place(Side::Black, PieceKind::King, Square::H8).unwrap();
/// ```
///
/// ```compile_fail
/// # use fission::{Position, Square};
/// let mut pos = Position::new_game();
/// pos.detonate(Square::E1);
/// ```
///
/// It is deliberately not `Copy`: snapshots must be taken explicitly with [`Clone`].
///
/// The squares of the two rosters are always disjoint. Equality ignores the order
/// pieces were added in.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    /// Live pieces, indexed by [`Side`].
    rosters: [Roster; Side::COUNT],

    /// The [`Side`] of the current player.
    side_to_move: Side,

    /// Only ever leaves [`Outcome::InProgress`], never returns to it.
    outcome: Outcome,
}

impl Position {
    /// Creates a new, empty [`Position`] with White to move.
    ///
    /// With no kings on the board, this position is already drawn. Playable setups are
    /// built with [`Position::from_fen`].
    ///
    /// # Example
    /// ```
    /// # use fission::Position;
    /// let pos = Position::empty();
    /// assert_eq!(pos.to_fen(), "8/8/8/8/8/8/8/8 w");
    /// ```
    pub fn empty() -> Self {
        Self {
            rosters: [Roster::default(), Roster::default()],
            side_to_move: Side::White,
            outcome: Outcome::Draw,
        }
    }

    /// The standard 32-piece starting position, with White to move.
    ///
    /// # Example
    /// ```
    /// # use fission::{Outcome, Position, PieceKind, Side, Square};
    /// let pos = Position::new_game();
    /// assert_eq!(pos.occupant_at(Square::E1), Some((Side::White, PieceKind::King)));
    /// assert_eq!(pos.occupant_at(Square::D8), Some((Side::Black, PieceKind::Queen)));
    /// assert_eq!(pos.outcome(), Outcome::InProgress);
    /// ```
    pub fn new_game() -> Self {
        let mut pos = Self::empty();

        for side in Side::all() {
            let roster = &mut pos.rosters[side];
            for (file, kind) in File::iter().zip(PieceKind::BACK_RANK) {
                roster.push(Piece::new(kind, Square::new(file, Rank::first(side))));
            }
            for file in File::iter() {
                roster.push(Piece::new(PieceKind::Pawn, Square::new(file, Rank::second(side))));
            }
        }

        pos.outcome = pos.outcome_from_kings();
        pos
    }

    /// Creates a new [`Position`] from a FEN string.
    ///
    /// Only the piece placements and the (optional) side-to-move fields are read.
    /// Castling, en passant and move counters have no meaning here and are ignored.
    ///
    /// # Example
    /// ```
    /// # use fission::{Position, Side};
    /// let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b").unwrap();
    /// assert_eq!(pos.side_to_move(), Side::Black);
    /// assert_eq!(pos.roster(Side::White).len(), 1);
    ///
    /// assert!(Position::from_fen("4k3/8/8 w").is_err());
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut pos = Self::empty();
        let mut split = fen.split_ascii_whitespace();

        let placements = split
            .next()
            .ok_or(anyhow!("FEN string must have piece placements."))?;

        let ranks = placements.split('/').collect::<Vec<_>>();
        if ranks.len() != Rank::COUNT {
            bail!(
                "FEN placements must have {} ranks. Got {} in {placements:?}",
                Rank::COUNT,
                ranks.len()
            );
        }

        // Placements start with the 8th rank
        for (rank, pieces) in Rank::iter().rev().zip(ranks) {
            let mut file = 0u8;
            for c in pieces.chars() {
                if let Some(empty) = c.to_digit(10) {
                    file = file.saturating_add(empty as u8);
                    continue;
                }

                let side = if c.is_ascii_uppercase() {
                    Side::White
                } else {
                    Side::Black
                };
                let square = Square::new(File::new(file)?, rank);
                pos.place(side, PieceKind::from_uci(c)?, square)?;
                file += 1;
            }

            if file as usize != File::COUNT {
                bail!("FEN rank {rank} must span {} files. Got {file} in {pieces:?}", File::COUNT);
            }
        }

        if let Some(side) = split.next() {
            pos.side_to_move = side.parse()?;
        }

        pos.outcome = pos.outcome_from_kings();
        Ok(pos)
    }

    /// Generates a FEN string of the placements and side-to-move of this [`Position`].
    ///
    /// # Example
    /// ```
    /// # use fission::{Position, FEN_STARTPOS};
    /// assert_eq!(Position::new_game().to_fen(), FEN_STARTPOS);
    /// ```
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(72);

        for rank in Rank::iter().rev() {
            let mut empty = 0;
            for file in File::iter() {
                match self.occupant_at(Square::new(file, rank)) {
                    Some((side, kind)) => {
                        if empty > 0 {
                            _ = write!(fen, "{empty}");
                            empty = 0;
                        }
                        fen.push(kind.char_for(side));
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                _ = write!(fen, "{empty}");
            }
            if rank != Rank::ONE {
                fen.push('/');
            }
        }

        _ = write!(fen, " {}", self.side_to_move.to_uci());
        fen
    }

    /// Adds a piece of `kind` for `side` on `square`, while building a position.
    ///
    /// Games never gain pieces, so this is only reachable through [`Position::from_fen`],
    /// which derives the outcome once every piece is down.
    /// Fails if `square` is already occupied by either side.
    pub(crate) fn place(&mut self, side: Side, kind: PieceKind, square: Square) -> Result<()> {
        if let Some((other, occupant)) = self.occupant_at(square) {
            bail!("Cannot place {side} {kind} on {square}: it is occupied by {other} {occupant}");
        }

        self.rosters[side].push(Piece::new(kind, square));
        Ok(())
    }

    /// The [`Side`] whose turn it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// The current [`Outcome`] of the game.
    #[inline(always)]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The live pieces of `side`.
    #[inline(always)]
    pub const fn roster(&self, side: Side) -> &Roster {
        &self.rosters[side.index()]
    }

    #[inline(always)]
    pub fn has_king(&self, side: Side) -> bool {
        self.rosters[side].has_king()
    }

    /// Which side's piece, and what kind, stands on `square`, if any.
    ///
    /// # Example
    /// ```
    /// # use fission::{Position, PieceKind, Side, Square};
    /// let pos = Position::new_game();
    /// assert_eq!(pos.occupant_at(Square::G1), Some((Side::White, PieceKind::Knight)));
    /// assert_eq!(pos.occupant_at(Square::E4), None);
    /// ```
    pub fn occupant_at(&self, square: Square) -> Option<(Side, PieceKind)> {
        Side::all().into_iter().find_map(|side| {
            self.rosters[side]
                .get(square)
                .map(|piece| (side, piece.kind))
        })
    }

    /// The [`Side`] whose piece stands on `square`, if any.
    #[inline(always)]
    pub fn side_at(&self, square: Square) -> Option<Side> {
        self.occupant_at(square).map(|(side, _)| side)
    }

    /// Iterates every piece on the board along with its [`Side`], White's first.
    pub fn pieces(&self) -> impl Iterator<Item = (Side, &Piece)> {
        Side::all()
            .into_iter()
            .flat_map(move |side| self.rosters[side].iter().map(move |piece| (side, piece)))
    }

    /// Moves the piece of `side` on `from` onto the empty square `to`.
    ///
    /// No legality is checked here.
    ///
    /// # Panics
    ///
    /// If `side` has no piece on `from`, or if `to` is occupied by either side.
    pub(crate) fn relocate(&mut self, side: Side, from: Square, to: Square) {
        if let Some((other, kind)) = self.occupant_at(to) {
            panic!("Cannot relocate {side} piece from {from} to {to}: occupied by {other} {kind}");
        }

        let Some(index) = self.rosters[side].index_of(from) else {
            panic!("Cannot relocate {side} piece from {from}: {side} has no piece there");
        };

        self.rosters[side].pieces[index].square = to;
    }

    /// Removes and returns the piece of `side` on `square`.
    ///
    /// # Panics
    ///
    /// If `side` has no piece on `square`.
    pub(crate) fn remove(&mut self, side: Side, square: Square) -> Piece {
        match self.rosters[side].take(square) {
            Some(piece) => piece,
            None => panic!("Cannot remove {side} piece from {square}: {side} has no piece there"),
        }
    }

    #[inline(always)]
    pub(crate) fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    #[inline(always)]
    pub(crate) fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = outcome;
    }

    /// The [`Outcome`] implied by which kings are still on the board.
    #[inline(always)]
    pub(crate) fn outcome_from_kings(&self) -> Outcome {
        Outcome::from_kings(self.has_king(Side::White), self.has_king(Side::Black))
    }
}

impl Default for Position {
    /// The standard starting position.
    #[inline(always)]
    fn default() -> Self {
        Self::new_game()
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Index<Side> for Position {
    type Output = Roster;
    #[inline(always)]
    fn index(&self, index: Side) -> &Self::Output {
        &self.rosters[index]
    }
}

impl fmt::Display for Position {
    /// Draws the board with White at the bottom.
    ///
    /// White pieces are uppercase, Black pieces are lowercase, and empty squares are `.`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{rank}| ")?;

            for file in File::iter() {
                let occupant = match self.occupant_at(Square::new(file, rank)) {
                    Some((side, kind)) => kind.char_for(side),
                    None => '.',
                };
                write!(f, "{occupant} ")?;
            }

            writeln!(f)?;
        }

        write!(f, " +")?;
        for _ in File::iter() {
            write!(f, "--")?;
        }
        write!(f, "\n   ")?;
        for file in File::iter() {
            write!(f, "{file} ")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;
        writeln!(f, "FEN: {}", self.to_fen())?;
        write!(f, "Outcome: {}", self.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FEN_STARTPOS;

    #[test]
    fn test_startpos_layout() {
        let pos = Position::new_game();
        assert_eq!(pos.to_fen(), FEN_STARTPOS);

        for side in Side::all() {
            let roster = pos.roster(side);
            assert_eq!(roster.len(), 16);
            assert_eq!(roster.count(PieceKind::Pawn), 8);
            assert_eq!(roster.count(PieceKind::Knight), 2);
            assert_eq!(roster.count(PieceKind::Bishop), 2);
            assert_eq!(roster.count(PieceKind::Rook), 2);
            assert_eq!(roster.count(PieceKind::Queen), 1);
            assert_eq!(roster.count(PieceKind::King), 1);
        }

        assert_eq!(pos.side_to_move(), Side::White);
        assert_eq!(pos.outcome(), Outcome::InProgress);
        assert_eq!(pos, Position::from_fen(FEN_STARTPOS).unwrap());
    }

    #[test]
    fn test_fen_roundtrip() {
        let fens = [
            "8/8/3p4/2bpk3/8/2N5/8/4K3 w",
            "r3k2r/8/8/8/8/8/8/R3K2R b",
            "8/8/8/8/8/8/8/8 w",
        ];

        for fen in fens {
            assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
        }

        // Trailing fields are ignored
        let pos = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(pos.unwrap().to_fen(), FEN_STARTPOS);
    }

    #[test]
    fn test_bad_fens() {
        assert!(Position::from_fen("").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8 w").is_err());
        assert!(Position::from_fen("9/8/8/8/8/8/8/8 w").is_err());
        assert!(Position::from_fen("7/8/8/8/8/8/8/8 w").is_err());
        assert!(Position::from_fen("7x/8/8/8/8/8/8/8 w").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8/8 x").is_err());
    }

    #[test]
    fn test_outcome_from_present_kings() {
        let both = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w").unwrap();
        assert_eq!(both.outcome(), Outcome::InProgress);

        let white_only = Position::from_fen("8/8/8/8/8/8/8/4K3 w").unwrap();
        assert_eq!(white_only.outcome(), Outcome::WhiteWon);

        let black_only = Position::from_fen("4k3/8/8/8/8/8/8/8 w").unwrap();
        assert_eq!(black_only.outcome(), Outcome::BlackWon);

        assert_eq!(Position::empty().outcome(), Outcome::Draw);
    }

    #[test]
    fn test_place_rejects_occupied_squares() {
        let mut pos = Position::empty();
        pos.place(Side::White, PieceKind::King, Square::E1).unwrap();
        assert!(pos.place(Side::Black, PieceKind::Rook, Square::E1).is_err());
        assert!(pos.place(Side::White, PieceKind::Pawn, Square::E1).is_err());
        assert_eq!(pos.roster(Side::White).len(), 1);
        assert!(pos.roster(Side::Black).is_empty());

        // Placing never touches the outcome; only building from a FEN derives it
        pos.place(Side::Black, PieceKind::King, Square::E8).unwrap();
        assert_eq!(pos.outcome(), Outcome::Draw);
    }

    #[test]
    fn test_rosters_compare_regardless_of_order() {
        let mut forward = Roster::default();
        let mut backward = Roster::default();
        let pieces = [
            Piece::new(PieceKind::King, Square::E1),
            Piece::new(PieceKind::Rook, Square::A1),
            Piece::new(PieceKind::Pawn, Square::H2),
        ];

        for piece in pieces {
            forward.push(piece);
        }
        for piece in pieces.into_iter().rev() {
            backward.push(piece);
        }
        assert_eq!(forward, backward);

        // Same squares, different kinds
        let mut other = backward.clone();
        other.take(Square::H2);
        other.push(Piece::new(PieceKind::Knight, Square::H2));
        assert_ne!(forward, other);

        // A strict subset is not equal
        backward.take(Square::A1);
        assert_ne!(forward, backward);
        assert_ne!(backward, forward);
    }

    #[test]
    fn test_positions_built_differently_are_equal() {
        // new_game fills back ranks first, while FEN parsing goes rank by rank from the 8th
        assert_eq!(Position::new_game(), Position::from_fen(FEN_STARTPOS).unwrap());

        let mut played = Position::new_game();
        played.apply_move(Square::E2, Square::E4).unwrap();
        let parsed =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b").unwrap();
        assert_eq!(played, parsed);
        assert_ne!(played, Position::new_game());
    }

    #[test]
    fn test_relocate_and_remove() {
        let mut pos = Position::new_game();
        pos.relocate(Side::White, Square::G1, Square::F3);
        assert_eq!(pos.occupant_at(Square::G1), None);
        assert_eq!(pos.occupant_at(Square::F3), Some((Side::White, PieceKind::Knight)));

        let removed = pos.remove(Side::Black, Square::D8);
        assert_eq!(removed, Piece::new(PieceKind::Queen, Square::D8));
        assert_eq!(pos.roster(Side::Black).len(), 15);
        assert!(!pos[Side::Black].contains(Square::D8));
    }

    #[test]
    #[should_panic(expected = "occupied")]
    fn test_relocate_onto_occupied_square_panics() {
        let mut pos = Position::new_game();
        pos.relocate(Side::White, Square::D1, Square::D2);
    }

    #[test]
    #[should_panic(expected = "no piece there")]
    fn test_remove_missing_piece_panics() {
        let mut pos = Position::new_game();
        pos.remove(Side::White, Square::E8);
    }

    #[test]
    fn test_display() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K1N1 w").unwrap();
        let board = pos.to_string();
        let lines = board.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "8| . . . . k . . . ");
        assert_eq!(lines[7], "1| R . . . K . N . ");
        assert_eq!(lines[9], "   a b c d e f g h ");
    }

    #[test]
    fn test_pieces_iterates_both_sides() {
        let pos = Position::new_game();
        assert_eq!(pos.pieces().count(), 32);
        assert_eq!(pos.pieces().filter(|(side, _)| *side == Side::Black).count(), 16);
    }
}
