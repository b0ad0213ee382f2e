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

use ndarray::prelude::*;

use crate::error::{Error, Result};
use crate::matrix::Matrix2;
use crate::raster::RasterBuffer;

/// Parameters of one scramble/unscramble call.
///
/// `p` and `q` select the generalized cat map `[[1, p], [q, pq + 1]]`;
/// `p = q = 1` is Arnold's map `[[1, 1], [1, 2]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatMapParams {
    pub p: i64,
    pub q: i64,
    pub iterations: u64,
}

impl CatMapParams {
    /// Arnold's map applied `iterations` times.
    pub fn new(iterations: u64) -> Self {
        Self {
            p: 1,
            q: 1,
            iterations,
        }
    }

    pub fn with_coefficients(self, p: i64, q: i64) -> Self {
        Self { p, q, ..self }
    }
}

impl Default for CatMapParams {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Cat map with fixed coefficients.
///
/// The generating matrix has determinant 1, so it is invertible modulo
/// every side length and the induced pixel remap is a bijection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatMap {
    p: i64,
    q: i64,
}

impl CatMap {
    pub fn new(p: i64, q: i64) -> Self {
        Self { p, q }
    }

    /// `[[1, 1], [1, 2]]`
    pub fn arnold() -> Self {
        Self::new(1, 1)
    }

    fn coefficients(&self, n: u32) -> (i64, i64, i64) {
        let m = i64::from(n);
        let (p, q) = (self.p.rem_euclid(m), self.q.rem_euclid(m));
        let d = ((i128::from(p) * i128::from(q) + 1) % i128::from(n)) as i64;
        (p, q, d)
    }

    /// Generating matrix reduced mod `n`.
    pub(crate) fn forward(&self, n: u32) -> Matrix2 {
        let (p, q, d) = self.coefficients(n);
        Matrix2([[1, p], [q, d]]).reduce(n)
    }

    /// Inverse of [`forward`](Self::forward) mod `n`.
    pub(crate) fn inverse(&self, n: u32) -> Matrix2 {
        let (p, q, d) = self.coefficients(n);
        Matrix2([[d, -p], [-q, 1]]).reduce(n)
    }

    /// Applies the map `iterations` times.
    ///
    /// An empty image is returned unchanged.
    pub fn scramble(&self, buffer: &RasterBuffer, iterations: u64) -> Result<RasterBuffer> {
        let n = square_side(buffer)?;
        if n == 0 {
            return Ok(buffer.clone());
        }
        Ok(remap(buffer, self.forward(n).pow_mod(iterations, n), n))
    }

    /// Undoes [`scramble`](Self::scramble) with the same `iterations`.
    pub fn unscramble(&self, buffer: &RasterBuffer, iterations: u64) -> Result<RasterBuffer> {
        let n = square_side(buffer)?;
        if n == 0 {
            return Ok(buffer.clone());
        }
        Ok(remap(buffer, self.inverse(n).pow_mod(iterations, n), n))
    }

    /// Smallest `k ≥ 1` such that applying the map `k` times to an
    /// `n × n` image is the identity.
    ///
    /// Runs in `O(k)` matrix products. For Arnold's map `k ≤ 3n`.
    /// An empty image has period 1.
    pub fn period(&self, n: u32) -> u64 {
        if n == 0 {
            return 1;
        }
        let t = self.forward(n);
        let mut acc = t;
        let mut k = 1;
        while !acc.is_identity_mod(n) {
            acc = acc.mul_mod(t, n);
            k += 1;
        }
        k
    }
}

impl Default for CatMap {
    fn default() -> Self {
        Self::arnold()
    }
}

impl From<&CatMapParams> for CatMap {
    fn from(params: &CatMapParams) -> Self {
        Self::new(params.p, params.q)
    }
}

fn square_side(buffer: &RasterBuffer) -> Result<u32> {
    if buffer.is_square() {
        Ok(buffer.width())
    } else {
        Err(Error::Shape {
            width: buffer.width(),
            height: buffer.height(),
        })
    }
}

/// Moves every pixel `(i, j)` of an `n × n` image to `(y, x) = m · (j, i) mod n`.
///
/// Reads from `buffer` and writes into a fresh array. `m` must be
/// invertible mod `n`, otherwise pixels collide.
fn remap(buffer: &RasterBuffer, m: Matrix2, n: u32) -> RasterBuffer {
    debug_assert!(buffer.is_square() && buffer.width() == n);
    log::debug!("remapping {n}x{n} raster with {:?}", m.0);

    let src = buffer.as_array();
    let mut out = Array3::<u8>::zeros(src.raw_dim());
    azip!((index (i, j), px in src.lanes(Axis(2))) {
        let (x, y) = m.apply_mod(j as u64, i as u64, n);
        out.slice_mut(s![y as usize, x as usize, ..]).assign(&px);
    });

    RasterBuffer::from_array(out)
}

/// Scrambles `buffer` with the map selected by `params`.
pub fn scramble(buffer: &RasterBuffer, params: &CatMapParams) -> Result<RasterBuffer> {
    CatMap::from(params).scramble(buffer, params.iterations)
}

/// Inverse of [`scramble`] for the same `params`.
pub fn unscramble(buffer: &RasterBuffer, params: &CatMapParams) -> Result<RasterBuffer> {
    CatMap::from(params).unscramble(buffer, params.iterations)
}

/// Decodes a container, scrambles it with Arnold's map and re-encodes it.
pub fn scramble_bytes(input: &[u8], iterations: u64) -> Result<Vec<u8>> {
    let buffer = RasterBuffer::decode(input)?;
    Ok(scramble(&buffer, &CatMapParams::new(iterations))?.encode())
}

/// Decodes a container, unscrambles it with Arnold's map and re-encodes it.
pub fn unscramble_bytes(input: &[u8], iterations: u64) -> Result<Vec<u8>> {
    let buffer = RasterBuffer::decode(input)?;
    Ok(unscramble(&buffer, &CatMapParams::new(iterations))?.encode())
}

/// Period of Arnold's map on an `n × n` image.
pub fn period(n: u32) -> u64 {
    CatMap::arnold().period(n)
}
