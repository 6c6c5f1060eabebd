/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::ops::Index;

use super::Square;

/// A read-only container holding one value per [`Square`].
///
/// All of the geometry lookups are stored in these, and built in `const` context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Table<T>([T; Square::COUNT]);

impl<T> Table<T> {
    /// Create a new [`Table`] with the provided values, indexed by [`Square::index`].
    #[inline(always)]
    pub const fn new(values: [T; Square::COUNT]) -> Self {
        Self(values)
    }

    /// Get the value of this [`Table`] at the index of `square`.
    #[inline(always)]
    pub const fn get(&self, square: Square) -> &T {
        &self.0[square.index()]
    }

    /// Iterates over every `(square, value)` pair, from `a1` to `h8`.
    pub fn iter(&self) -> impl Iterator<Item = (Square, &T)> {
        Square::iter().zip(self.0.iter())
    }
}

impl<T, Idx> Index<Idx> for Table<T>
where
    [T; Square::COUNT]: Index<Idx, Output = T>,
{
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Idx) -> &Self::Output {
        &self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexing_by_square() {
        let mut values = [0u8; Square::COUNT];
        values[Square::G7] = 42;
        let table = Table::new(values);

        assert_eq!(table[Square::G7], 42);
        assert_eq!(*table.get(Square::G7), 42);
        assert_eq!(table[Square::A1], 0);
        assert_eq!(table.iter().filter(|(_, v)| **v != 0).count(), 1);
    }
}
