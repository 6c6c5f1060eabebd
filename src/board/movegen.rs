/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Deref};

use super::{Square, Table};

/// A single ray of a sliding piece: at most 7 squares, nearest first.
pub type Ray = SquareList<7>;

/// Raw king destinations from every square.
static KING_TARGETS: Table<SquareList<8>> = generate_leaper_targets(&KING_DELTAS);

/// Raw knight destinations from every square.
static KNIGHT_TARGETS: Table<SquareList<8>> = generate_leaper_targets(&KNIGHT_DELTAS);

/// Rook rays from every square, in the order of [`ROOK_DIRECTIONS`].
static ROOK_RAYS: Table<[Ray; 4]> = generate_rider_rays(&ROOK_DIRECTIONS);

/// Bishop rays from every square, in the order of [`BISHOP_DIRECTIONS`].
static BISHOP_RAYS: Table<[Ray; 4]> = generate_rider_rays(&BISHOP_DIRECTIONS);

/// Deltas for the movement of the King, clockwise from east.
const KING_DELTAS: [(i8, i8); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Deltas for the movement of the Knight.
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Rook directions: east (+file), west (-file), north (+rank), south (-rank).
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Bishop directions: northeast, northwest, southeast, southwest.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// A fixed-capacity, ordered list of squares that can be built in `const` context.
///
/// Dereferences to a slice of the squares it holds.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SquareList<const N: usize> {
    squares: [Square; N],
    len: u8,
}

impl<const N: usize> SquareList<N> {
    /// A list holding no squares.
    pub const EMPTY: Self = Self {
        squares: [Square::A1; N],
        len: 0,
    };

    /// Returns a copy of `self` with `square` appended.
    ///
    /// # Panics
    ///
    /// If the list is already holding `N` squares.
    #[inline(always)]
    pub const fn with(mut self, square: Square) -> Self {
        assert!((self.len as usize) < N, "SquareList is full");
        self.squares[self.len as usize] = square;
        self.len += 1;
        self
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len as usize]
    }
}

impl<const N: usize> Default for SquareList<N> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<const N: usize> Deref for SquareList<N> {
    type Target = [Square];
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<'a, const N: usize> IntoIterator for &'a SquareList<N> {
    type Item = &'a Square;
    type IntoIter = std::slice::Iter<'a, Square>;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<const N: usize> fmt::Debug for SquareList<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Fetch the raw, unblocked destinations for a King on `square`.
///
/// # Example
/// ```
/// # use fission::{king_targets, Square};
/// assert_eq!(king_targets(Square::A1).len(), 3);
/// assert_eq!(king_targets(Square::D4).len(), 8);
/// ```
#[inline(always)]
pub fn king_targets(square: Square) -> &'static SquareList<8> {
    KING_TARGETS.get(square)
}

/// Fetch the raw, unblocked destinations for a Knight on `square`.
///
/// # Example
/// ```
/// # use fission::{knight_targets, Square};
/// assert_eq!(knight_targets(Square::A1).as_slice(), &[Square::B3, Square::C2]);
/// ```
#[inline(always)]
pub fn knight_targets(square: Square) -> &'static SquareList<8> {
    KNIGHT_TARGETS.get(square)
}

/// Fetch the four rays of a Rook on `square`, ordered as in [`ROOK_DIRECTIONS`].
#[inline(always)]
pub fn rook_rays(square: Square) -> &'static [Ray; 4] {
    ROOK_RAYS.get(square)
}

/// Fetch the four rays of a Bishop on `square`, ordered as in [`BISHOP_DIRECTIONS`].
#[inline(always)]
pub fn bishop_rays(square: Square) -> &'static [Ray; 4] {
    BISHOP_RAYS.get(square)
}

/// Generates the destinations from every square for the "Leaper" pieces.
/// Leapers jump straight to a square a fixed offset away.
///
/// In standard chess, the Leapers are the King and Knight.
const fn generate_leaper_targets(deltas: &[(i8, i8); 8]) -> Table<SquareList<8>> {
    let mut targets = [SquareList::EMPTY; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let square = Square::from_index_unchecked(i);
        let mut j = 0;
        while j < deltas.len() {
            let (df, dr) = deltas[j];
            if let Some(shifted) = square.offset(df, dr) {
                targets[i] = targets[i].with(shifted);
            }
            j += 1;
        }
        i += 1;
    }

    Table::new(targets)
}

/// Generates the rays from every square for the "Rider" pieces.
/// Riders slide any number of squares in one direction.
///
/// In standard chess, the Riders are the Rook, Bishop, and Queen.
const fn generate_rider_rays(directions: &[(i8, i8); 4]) -> Table<[Ray; 4]> {
    let mut rays = [[Ray::EMPTY; 4]; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let square = Square::from_index_unchecked(i);
        let mut j = 0;
        while j < directions.len() {
            let (df, dr) = directions[j];
            let mut ray = square;

            // Walk until we fall off the edge of the board
            while let Some(shifted) = ray.offset(df, dr) {
                rays[i][j] = rays[i][j].with(shifted);
                ray = shifted;
            }
            j += 1;
        }
        i += 1;
    }

    Table::new(rays)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_king_targets_are_adjacent() {
        for square in Square::iter() {
            let targets = king_targets(square);
            let expected = Square::iter()
                .filter(|&other| square.distance_chebyshev(other) == 1)
                .count();

            assert_eq!(targets.len(), expected, "king on {square}");
            assert!(targets.iter().all(|t| square.distance_chebyshev(*t) == 1));
        }

        assert_eq!(king_targets(Square::H8).len(), 3);
        assert_eq!(king_targets(Square::A4).len(), 5);
    }

    #[test]
    fn test_knight_targets() {
        assert_eq!(knight_targets(Square::D4).len(), 8);
        assert_eq!(knight_targets(Square::H8).len(), 2);
        assert_eq!(knight_targets(Square::B1).len(), 3);

        for square in Square::iter() {
            for target in knight_targets(square) {
                let (df, dr) = (
                    square.file().inner().abs_diff(target.file().inner()),
                    square.rank().inner().abs_diff(target.rank().inner()),
                );
                assert!(matches!((df, dr), (1, 2) | (2, 1)), "{square} -> {target}");
            }
        }
    }

    #[test]
    fn test_rook_rays_are_ordered_by_distance() {
        let [east, west, north, south] = rook_rays(Square::D4);
        assert_eq!(east.as_slice(), &[Square::E4, Square::F4, Square::G4, Square::H4]);
        assert_eq!(west.as_slice(), &[Square::C4, Square::B4, Square::A4]);
        assert_eq!(north.as_slice(), &[Square::D5, Square::D6, Square::D7, Square::D8]);
        assert_eq!(south.as_slice(), &[Square::D3, Square::D2, Square::D1]);

        // A rook always sees 14 squares on an empty board
        for square in Square::iter() {
            let total: usize = rook_rays(square).iter().map(|ray| ray.len()).sum();
            assert_eq!(total, 14, "rook on {square}");
        }
    }

    #[test]
    fn test_bishop_rays() {
        let [ne, nw, se, sw] = bishop_rays(Square::A1);
        assert_eq!(ne.len(), 7);
        assert_eq!(ne[0], Square::B2);
        assert_eq!(ne[6], Square::H8);
        assert!(nw.is_empty() && se.is_empty() && sw.is_empty());

        let total: usize = bishop_rays(Square::D4).iter().map(|ray| ray.len()).sum();
        assert_eq!(total, 13);
        assert_eq!(bishop_rays(Square::D4)[2].as_slice(), &[Square::E3, Square::F2, Square::G1]);
    }

    #[test]
    fn test_tables_never_contain_origin() {
        for (square, targets) in KING_TARGETS.iter() {
            assert!(!targets.contains(&square));
            assert!(!knight_targets(square).contains(&square));
            for ray in rook_rays(square).iter().chain(bishop_rays(square)) {
                assert!(!ray.contains(&square));
            }
        }
    }
}
