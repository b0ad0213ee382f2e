//! Library to reversibly scramble square images with Arnold's cat map.
//!
//! The map sends pixel `(x, y)` of an `N × N` image to
//! `((x + y) mod N, (x + 2y) mod N)`. It is a bijection, so an image
//! scrambled `n` times can always be restored by applying the inverse
//! map `n` times:
//!
//! * [scramble] and [unscramble] work on a decoded [RasterBuffer].
//! * [scramble_bytes] and [unscramble_bytes] work directly on the
//!   binary `P6` container.
//!
//! Any number of iterations costs one pass over the image, as the map's
//! `n`-th power is computed by modular matrix exponentiation.

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
//

mod catmap;
mod error;
mod matrix;
pub mod raster;

#[doc(inline)]
pub use crate::catmap::{
    period, scramble, scramble_bytes, unscramble, unscramble_bytes, CatMap, CatMapParams,
};
#[doc(inline)]
pub use crate::error::{Error, FormatError, Result};
#[doc(inline)]
pub use crate::raster::{RasterBuffer, Rgb};
