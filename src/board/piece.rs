/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut, Not},
    str::FromStr,
};

use anyhow::{bail, Result};

use super::Square;

/// One of the two players.
///
/// White moves first, and therefore [`Side`] defaults to [`Side::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Side {
    #[default]
    White,
    Black,
}

impl Side {
    /// Number of sides.
    pub const COUNT: usize = 2;

    /// Both sides, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Returns this [`Side`]'s opponent.
    ///
    /// # Example
    /// ```
    /// # use fission::Side;
    /// assert_eq!(Side::White.opponent(), Side::Black);
    /// assert_eq!(Side::Black.opponent(), Side::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Rank delta of a single pawn step for this side: `1` for White, `-1` for Black.
    #[inline(always)]
    pub const fn forward(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// `0` for White, `1` for Black. Useful for indexing into per-side arrays.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Parses a side-to-move field: `w` or `b`.
    pub fn from_uci(side: char) -> Result<Self> {
        match side {
            'w' | 'W' => Ok(Self::White),
            'b' | 'B' => Ok(Self::Black),
            _ => bail!("Invalid char for Side: Must be 'w' or 'b'. Got {side:?}"),
        }
    }

    #[inline(always)]
    pub const fn to_uci(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl Not for Side {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        self.opponent()
    }
}

/// The kind (or "role") of a piece. It carries no [`Side`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 6;

    /// All kinds, in the order `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    }

    /// The back rank layout, from the `a` file to the `h` file.
    pub const BACK_RANK: [Self; 8] = {
        use PieceKind::*;
        [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook]
    };

    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Pawns survive every blast.
    #[inline(always)]
    pub const fn is_blast_immune(&self) -> bool {
        matches!(self, Self::Pawn)
    }

    /// Parses a piece letter, ignoring case.
    ///
    /// # Example
    /// ```
    /// # use fission::PieceKind;
    /// assert_eq!(PieceKind::from_uci('Q').unwrap(), PieceKind::Queen);
    /// assert_eq!(PieceKind::from_uci('n').unwrap(), PieceKind::Knight);
    /// assert!(PieceKind::from_uci('x').is_err());
    /// ```
    pub fn from_uci(kind: char) -> Result<Self> {
        match kind.to_ascii_lowercase() {
            'p' => Ok(Self::Pawn),
            'n' => Ok(Self::Knight),
            'b' => Ok(Self::Bishop),
            'r' => Ok(Self::Rook),
            'q' => Ok(Self::Queen),
            'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: Got {kind:?}."),
        }
    }

    /// Lowercase piece letter. Knights are `n`.
    #[inline(always)]
    pub const fn to_uci(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Piece letter as drawn on the board: uppercase for White, lowercase for Black.
    #[inline(always)]
    pub const fn char_for(&self, side: Side) -> char {
        match side {
            Side::White => self.to_uci().to_ascii_uppercase(),
            Side::Black => self.to_uci(),
        }
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

/// A piece on the board: its kind and where it stands.
///
/// A [`Piece`] does not know its [`Side`]; it belongs to exactly one side's
/// [`crate::Roster`], and that roster is what gives it a side.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub square: Square,
}

impl Piece {
    #[inline(always)]
    pub const fn new(kind: PieceKind, square: Square) -> Self {
        Self { kind, square }
    }

    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.kind, self.square)
    }
}

macro_rules! impl_common_traits {
    ($type:ty) => {
        impl<T> Index<$type> for [T; <$type>::COUNT] {
            type Output = T;
            #[inline(always)]
            fn index(&self, index: $type) -> &Self::Output {
                &self[index.index()]
            }
        }

        impl<T> IndexMut<$type> for [T; <$type>::COUNT] {
            #[inline(always)]
            fn index_mut(&mut self, index: $type) -> &mut Self::Output {
                &mut self[index.index()]
            }
        }

        impl FromStr for $type {
            type Err = anyhow::Error;
            /// Does the same as [`Self::from_uci`], but only if `s` is one character in length.
            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_uci(c),
                    _ => bail!("Invalid str for {}: Must be a single char. Got {s:?}", stringify!($type)),
                }
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.name())
            }
        }

        impl fmt::Debug for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.name())
            }
        }
    };
}

impl_common_traits!(PieceKind);
impl_common_traits!(Side);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_indexing() {
        let mut counts = [0u8; Side::COUNT];
        counts[Side::Black] += 3;
        assert_eq!(counts, [0, 3]);
        assert_eq!(!Side::White, Side::Black);
    }

    #[test]
    fn test_piece_chars() {
        assert_eq!(PieceKind::Knight.char_for(Side::White), 'N');
        assert_eq!(PieceKind::Knight.char_for(Side::Black), 'n');
        assert_eq!(PieceKind::King.char_for(Side::White), 'K');

        for kind in PieceKind::all() {
            assert_eq!(PieceKind::from_uci(kind.to_uci()).unwrap(), kind);
        }
    }

    #[test]
    fn test_only_pawns_are_blast_immune() {
        let immune = PieceKind::all()
            .into_iter()
            .filter(PieceKind::is_blast_immune)
            .collect::<Vec<_>>();
        assert_eq!(immune, [PieceKind::Pawn]);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("b".parse::<Side>().unwrap(), Side::Black);
        assert_eq!("R".parse::<PieceKind>().unwrap(), PieceKind::Rook);
        assert!("rk".parse::<PieceKind>().is_err());
        assert!("".parse::<Side>().is_err());
    }
}
