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

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced by decoding, transforming or indexing a raster.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("malformed raster: {0}")]
    Format(#[from] FormatError),

    #[error("cat map requires a square image, got {width}x{height}")]
    Shape { width: u32, height: u32 },

    #[error("pixel ({row}, {col}) out of range for {width}x{height} image")]
    Index {
        row: usize,
        col: usize,
        width: u32,
        height: u32,
    },
}

/// Reasons a byte stream is rejected as a raster container.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unsupported tag {0:?} (expected \"P6\")")]
    BadTag(String),

    #[error("bad header: {0}")]
    BadHeader(&'static str),

    #[error("invalid dimensions {width}x{height}")]
    BadDimensions { width: u64, height: u64 },

    #[error("unsupported max channel value {0} (expected 255)")]
    UnsupportedMaxval(u64),

    #[error("pixel data truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}
