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

//! In-memory 24-bit RGB raster and its binary container codec.
//!
//! The container is the binary pixmap layout:
//!
//! ```text
//! P6\n
//! <width> <height>\n
//! 255\n
//! <width*height*3 bytes of row-major R,G,B samples>
//! ```

use std::io::{self, Write};

use ndarray::prelude::*;

use crate::error::{Error, FormatError, Result};

/// Tag opening every container.
pub const TAG: &[u8] = b"P6";
/// The only channel depth supported.
pub const MAXVAL: u64 = 255;

/// A single pixel, as `[r, g, b]`.
pub type Rgb = [u8; 3];

/// Owned RGB image.
///
/// Samples live in a standard-layout array of shape `(height, width, 3)`,
/// so pixel `(row, col)` starts at byte `(row * width + col) * 3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    pixels: Array3<u8>,
}

impl RasterBuffer {
    /// Allocates a black `width × height` image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: Array3::zeros((height as usize, width as usize, 3)),
        }
    }

    pub(crate) fn from_array(pixels: Array3<u8>) -> Self {
        debug_assert_eq!(pixels.shape()[2], 3);
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.shape()[1] as _
    }

    pub fn height(&self) -> u32 {
        self.pixels.shape()[0] as _
    }

    pub fn is_square(&self) -> bool {
        self.width() == self.height()
    }

    /// View of the samples, indexed `[[row, col, channel]]`.
    pub fn as_array(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row < self.height() as usize && col < self.width() as usize {
            Ok(())
        } else {
            Err(Error::Index {
                row,
                col,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    /// Reads the pixel at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<Rgb> {
        self.check_bounds(row, col)?;
        let p = self.pixels.slice(s![row, col, ..]);
        Ok([p[0], p[1], p[2]])
    }

    /// Overwrites the pixel at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: Rgb) -> Result<()> {
        self.check_bounds(row, col)?;
        self.pixels
            .slice_mut(s![row, col, ..])
            .assign(&aview1(&value));
        Ok(())
    }

    /// Parses a container.
    ///
    /// Header tokens may be separated by any run of ASCII whitespace, but
    /// exactly one whitespace byte separates the max value from the pixel
    /// data. Bytes past the last pixel are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut header = HeaderReader { rest: bytes };

        let tag = header
            .token()
            .ok_or(FormatError::BadHeader("missing tag"))?;
        if tag != TAG {
            let shown: Vec<u8> = tag.iter().copied().take(16).collect();
            return Err(FormatError::BadTag(String::from_utf8_lossy(&shown).into_owned()).into());
        }

        let width = header.number("width")?;
        let height = header.number("height")?;
        let maxval = header.number("max channel value")?;

        let bad_dims = FormatError::BadDimensions { width, height };
        if width == 0
            || height == 0
            || width > u32::MAX as u64
            || height > u32::MAX as u64
        {
            return Err(bad_dims.into());
        }
        if maxval != MAXVAL {
            return Err(FormatError::UnsupportedMaxval(maxval).into());
        }

        let data = header.separator()?;
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(3))
            .ok_or_else(|| bad_dims.clone())?;
        if data.len() < len {
            return Err(FormatError::Truncated {
                expected: len,
                actual: data.len(),
            }
            .into());
        }

        let pixels =
            Array3::from_shape_vec((height as usize, width as usize, 3), data[..len].to_vec())
                .map_err(|_| bad_dims)?;
        log::debug!("decoded {}x{} raster", width, height);
        Ok(Self { pixels })
    }

    /// Serializes into a container.
    pub fn encode(&self) -> Vec<u8> {
        let header = format!("P6\n{} {}\n{}\n", self.width(), self.height(), MAXVAL);
        let mut out = Vec::with_capacity(header.len() + self.pixels.len());
        out.extend_from_slice(header.as_bytes());
        out.extend(self.pixels.iter().copied());
        out
    }

    /// Writes [`encode`](Self::encode) output to `w`.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        w.write_all(&self.encode())?;
        w.flush()
    }
}

struct HeaderReader<'a> {
    rest: &'a [u8],
}

impl<'a> HeaderReader<'a> {
    fn token(&mut self) -> Option<&'a [u8]> {
        let start = self
            .rest
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(self.rest.len());
        let rest = &self.rest[start..];
        let end = rest
            .iter()
            .position(u8::is_ascii_whitespace)
            .unwrap_or(rest.len());
        let (token, rest) = rest.split_at(end);
        self.rest = rest;
        (!token.is_empty()).then_some(token)
    }

    fn number(&mut self, what: &'static str) -> Result<u64, FormatError> {
        let token = self.token().ok_or(FormatError::BadHeader(what))?;
        if !token.iter().all(u8::is_ascii_digit) {
            return Err(FormatError::BadHeader(what));
        }
        // Saturates, so oversized values fail the range checks in `decode`.
        Ok(token.iter().fold(0u64, |acc, d| {
            acc.saturating_mul(10).saturating_add(u64::from(d - b'0'))
        }))
    }

    fn separator(self) -> Result<&'a [u8], FormatError> {
        match self.rest.split_first() {
            Some((b, data)) if b.is_ascii_whitespace() => Ok(data),
            _ => Err(FormatError::BadHeader("missing separator before pixel data")),
        }
    }
}
