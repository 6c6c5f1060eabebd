/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Context, Result};

use super::Side;

/// A single square on the `8x8` board.
///
/// Stored as `file + rank * 8`, so `a1` is `0`, `h1` is `7` and `h8` is `63`:
/// ```text
/// 8| 56 57 58 59 60 61 62 63
/// 7| 48 49 50 51 52 53 54 55
/// 6| 40 41 42 43 44 45 46 47
/// 5| 32 33 34 35 36 37 38 39
/// 4| 24 25 26 27 28 29 30 31
/// 3| 16 17 18 19 20 21 22 23
/// 2|  8  9 10 11 12 13 14 15
/// 1|  0  1  2  3  4  5  6  7
///  +------------------------
///    a  b  c  d  e  f  g  h
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

#[rustfmt::skip]
impl Square {
    pub const A1: Self = Self(0);  pub const B1: Self = Self(1);  pub const C1: Self = Self(2);  pub const D1: Self = Self(3);
    pub const E1: Self = Self(4);  pub const F1: Self = Self(5);  pub const G1: Self = Self(6);  pub const H1: Self = Self(7);
    pub const A2: Self = Self(8);  pub const B2: Self = Self(9);  pub const C2: Self = Self(10); pub const D2: Self = Self(11);
    pub const E2: Self = Self(12); pub const F2: Self = Self(13); pub const G2: Self = Self(14); pub const H2: Self = Self(15);
    pub const A3: Self = Self(16); pub const B3: Self = Self(17); pub const C3: Self = Self(18); pub const D3: Self = Self(19);
    pub const E3: Self = Self(20); pub const F3: Self = Self(21); pub const G3: Self = Self(22); pub const H3: Self = Self(23);
    pub const A4: Self = Self(24); pub const B4: Self = Self(25); pub const C4: Self = Self(26); pub const D4: Self = Self(27);
    pub const E4: Self = Self(28); pub const F4: Self = Self(29); pub const G4: Self = Self(30); pub const H4: Self = Self(31);
    pub const A5: Self = Self(32); pub const B5: Self = Self(33); pub const C5: Self = Self(34); pub const D5: Self = Self(35);
    pub const E5: Self = Self(36); pub const F5: Self = Self(37); pub const G5: Self = Self(38); pub const H5: Self = Self(39);
    pub const A6: Self = Self(40); pub const B6: Self = Self(41); pub const C6: Self = Self(42); pub const D6: Self = Self(43);
    pub const E6: Self = Self(44); pub const F6: Self = Self(45); pub const G6: Self = Self(46); pub const H6: Self = Self(47);
    pub const A7: Self = Self(48); pub const B7: Self = Self(49); pub const C7: Self = Self(50); pub const D7: Self = Self(51);
    pub const E7: Self = Self(52); pub const F7: Self = Self(53); pub const G7: Self = Self(54); pub const H7: Self = Self(55);
    pub const A8: Self = Self(56); pub const B8: Self = Self(57); pub const C8: Self = Self(58); pub const D8: Self = Self(59);
    pub const E8: Self = Self(60); pub const F8: Self = Self(61); pub const G8: Self = Self(62); pub const H8: Self = Self(63);
}

impl Square {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 63;
    pub const COUNT: usize = 64;

    const FILE_MASK: u8 = 0b0000_0111;

    /// Returns an iterator over all squares, from `a1` to `h8`.
    ///
    /// # Example
    /// ```
    /// # use fission::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap(), Square::A1);
    /// assert_eq!(iter.last().unwrap(), Square::H8);
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Creates a new [`Square`] from the provided [`File`] and [`Rank`].
    ///
    /// # Example
    /// ```
    /// # use fission::{Square, File, Rank};
    /// assert_eq!(Square::new(File::C, Rank::FOUR), Square::C4);
    /// ```
    #[inline(always)]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self(file.0 | rank.0 << 3)
    }

    /// Creates a new [`Square`] from zero-indexed `(file, rank)` coordinates.
    ///
    /// # Example
    /// ```
    /// # use fission::Square;
    /// assert_eq!(Square::from_coords(4, 1).unwrap(), Square::E2);
    /// assert!(Square::from_coords(8, 0).is_err());
    /// ```
    pub fn from_coords(file: u8, rank: u8) -> Result<Self> {
        Ok(Self::new(File::new(file)?, Rank::new(rank)?))
    }

    /// Creates a new [`Square`] from its index, without bounds checking outside of debug builds.
    #[inline(always)]
    pub const fn from_index_unchecked(index: usize) -> Self {
        debug_assert!(index < Self::COUNT, "Index must be between [0,64)");
        Self(index as u8)
    }

    /// Parses a square label such as `"e4"`: a file letter followed by a rank digit.
    ///
    /// # Example
    /// ```
    /// # use fission::Square;
    /// assert_eq!(Square::from_uci("c4").unwrap(), Square::C4);
    /// assert!(Square::from_uci("z0").is_err());
    /// assert!(Square::from_uci("e44").is_err());
    /// ```
    pub fn from_uci(square: &str) -> Result<Self> {
        let mut chars = square.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Invalid Square string: String must contain exactly 2 characters. Got {square:?}");
        };

        Ok(Self::new(File::from_char(file)?, Rank::from_char(rank)?))
    }

    /// Converts this [`Square`] back into its label, such as `"e4"`.
    #[inline(always)]
    pub fn to_uci(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    #[inline(always)]
    pub const fn file(&self) -> File {
        File(self.0 & Self::FILE_MASK)
    }

    #[inline(always)]
    pub const fn rank(&self) -> Rank {
        Rank(self.0 >> 3)
    }

    /// Zero-indexed `(file, rank)` coordinates of this [`Square`].
    ///
    /// # Example
    /// ```
    /// # use fission::Square;
    /// assert_eq!(Square::E4.coords(), (4, 3));
    /// ```
    #[inline(always)]
    pub const fn coords(&self) -> (u8, u8) {
        (self.file().0, self.rank().0)
    }

    /// The inner index, as a [`usize`], for indexing into per-square arrays.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Number of king steps between `self` and `other`.
    ///
    /// # Example
    /// ```
    /// # use fission::Square;
    /// assert_eq!(Square::C5.distance_chebyshev(Square::C5), 0);
    /// assert_eq!(Square::C5.distance_chebyshev(Square::B4), 1);
    /// assert_eq!(Square::A1.distance_chebyshev(Square::H8), 7);
    /// ```
    #[inline(always)]
    pub const fn distance_chebyshev(&self, other: Self) -> u8 {
        let files = self.file().0.abs_diff(other.file().0);
        let ranks = self.rank().0.abs_diff(other.rank().0);
        if files > ranks {
            files
        } else {
            ranks
        }
    }

    /// Attempt to shift this [`Square`] by the given file and rank deltas.
    ///
    /// Returns `None` if the result would fall off the board.
    ///
    /// # Example
    /// ```
    /// # use fission::Square;
    /// assert_eq!(Square::C4.offset(1, 1), Some(Square::D5));
    /// assert_eq!(Square::A1.offset(-1, 0), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let Some(file) = self.file().offset(file_delta) else {
            return None;
        };

        let Some(rank) = self.rank().offset(rank_delta) else {
            return None;
        };

        Some(Self::new(file, rank))
    }

    /// Moves `n` ranks toward the far side of the board, as seen by `side`.
    ///
    /// # Example
    /// ```
    /// # use fission::{Side, Square};
    /// assert_eq!(Square::C4.forward_by(Side::White, 1), Some(Square::C5));
    /// assert_eq!(Square::C4.forward_by(Side::Black, 2), Some(Square::C2));
    /// assert_eq!(Square::C8.forward_by(Side::White, 1), None);
    /// ```
    #[inline(always)]
    pub const fn forward_by(&self, side: Side, n: u8) -> Option<Self> {
        self.offset(0, n as i8 * side.forward())
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;
    #[inline(always)]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_uci(value)
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// One of the eight ranks (rows) of the board, `1` through `8`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Rank(pub(crate) u8);

impl Rank {
    pub const ONE: Self = Self(0);
    pub const TWO: Self = Self(1);
    pub const THREE: Self = Self(2);
    pub const FOUR: Self = Self(3);
    pub const FIVE: Self = Self(4);
    pub const SIX: Self = Self(5);
    pub const SEVEN: Self = Self(6);
    pub const EIGHT: Self = Self(7);

    pub const MAX: u8 = 7;
    pub const COUNT: usize = 8;

    /// Iterates ranks in ascending order, `1` through `8`.
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..=Self::MAX).map(Self)
    }

    /// Construct a new [`Rank`] from a zero-indexed value.
    pub fn new(rank: u8) -> Result<Self> {
        if rank > Self::MAX {
            bail!("Invalid int for Rank: Must be between [0, {}]. Got {rank}", Self::MAX);
        }

        Ok(Self(rank))
    }

    /// The first rank of `side` (its back rank).
    #[inline(always)]
    pub const fn first(side: Side) -> Self {
        [Self::ONE, Self::EIGHT][side.index()]
    }

    /// The rank on which the pawns of `side` start, and from which they may double step.
    #[inline(always)]
    pub const fn second(side: Side) -> Self {
        [Self::TWO, Self::SEVEN][side.index()]
    }

    pub fn from_char(rank: char) -> Result<Self> {
        let digit = rank
            .to_digit(10)
            .and_then(|d| d.checked_sub(1))
            .context(format!("Invalid char for Rank: Must be between [1, 8]. Got {rank:?}"))?;

        Self::new(digit as u8)
    }

    #[inline(always)]
    pub const fn inner(&self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn char(&self) -> char {
        (self.0 + b'1') as char
    }

    /// Attempt to shift this [`Rank`] by `delta`, returning `None` when off the board.
    #[inline(always)]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        match self.0.checked_add_signed(delta) {
            Some(bits) if bits <= Self::MAX => Some(Self(bits)),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rank({})", self.char())
    }
}

/// One of the eight files (columns) of the board, `a` through `h`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct File(pub(crate) u8);

impl File {
    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const D: Self = Self(3);
    pub const E: Self = Self(4);
    pub const F: Self = Self(5);
    pub const G: Self = Self(6);
    pub const H: Self = Self(7);

    pub const MAX: u8 = 7;
    pub const COUNT: usize = 8;

    /// Iterates files in ascending order, `a` through `h`.
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..=Self::MAX).map(Self)
    }

    /// Construct a new [`File`] from a zero-indexed value.
    pub fn new(file: u8) -> Result<Self> {
        if file > Self::MAX {
            bail!("Invalid int for File: Must be between [0, {}]. Got {file}", Self::MAX);
        }

        Ok(Self(file))
    }

    /// Parses a file letter. Uppercase letters are accepted as well.
    pub fn from_char(file: char) -> Result<Self> {
        if !file.is_ascii_alphabetic() {
            bail!("Invalid char for File: Must be between [a, h]. Got {file:?}");
        }

        Self::new((file.to_ascii_lowercase() as u8).wrapping_sub(b'a'))
            .context(format!("Invalid char for File: Must be between [a, h]. Got {file:?}"))
    }

    #[inline(always)]
    pub const fn inner(&self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn char(&self) -> char {
        (self.0 + b'a') as char
    }

    /// Attempt to shift this [`File`] by `delta`, returning `None` when off the board.
    #[inline(always)]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        match self.0.checked_add_signed(delta) {
            Some(bits) if bits <= Self::MAX => Some(Self(bits)),
            _ => None,
        }
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "File({})", self.char())
    }
}
