// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Fixed-size 2×2 integer matrices over ℤ/nℤ.

/// A 2×2 integer matrix, stored row-major.
///
/// Entries may be negative or unreduced; every `_mod` operation normalizes
/// its result into `[0, n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Matrix2(pub(crate) [[i64; 2]; 2]);

impl Matrix2 {
    pub const IDENTITY: Self = Self([[1, 0], [0, 1]]);

    /// Every entry reduced into `[0, n)`.
    pub fn reduce(self, n: u32) -> Self {
        let n = i64::from(n);
        Self(self.0.map(|row| row.map(|v| v.rem_euclid(n))))
    }

    /// `self · other mod n`.
    pub fn mul_mod(self, other: Self, n: u32) -> Self {
        let n = i128::from(n);
        let (a, b) = (self.0, other.0);
        let e = |r: usize, c: usize| {
            let v = i128::from(a[r][0]) * i128::from(b[0][c])
                + i128::from(a[r][1]) * i128::from(b[1][c]);
            v.rem_euclid(n) as i64
        };
        Self([[e(0, 0), e(0, 1)], [e(1, 0), e(1, 1)]])
    }

    /// `selfᵉ mod n` by square-and-multiply.
    ///
    /// `exp == 0` yields the identity (reduced, so `n == 1` gives zero).
    pub fn pow_mod(self, mut exp: u64, n: u32) -> Self {
        let mut base = self.reduce(n);
        let mut acc = Self::IDENTITY.reduce(n);
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc.mul_mod(base, n);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul_mod(base, n);
            }
        }
        acc
    }

    /// `self · (x, y)ᵀ mod n`, as `(x', y')`.
    #[inline]
    pub fn apply_mod(self, x: u64, y: u64, n: u32) -> (u64, u64) {
        let n = i128::from(n);
        let [[a, b], [c, d]] = self.0;
        let (x, y) = (i128::from(x), i128::from(y));
        let x_ = (i128::from(a) * x + i128::from(b) * y).rem_euclid(n);
        let y_ = (i128::from(c) * x + i128::from(d) * y).rem_euclid(n);
        (x_ as u64, y_ as u64)
    }

    pub fn is_identity_mod(self, n: u32) -> bool {
        self.reduce(n) == Self::IDENTITY.reduce(n)
    }
}
