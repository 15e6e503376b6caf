// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting shared by the text collaborators.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Rounds half toward positive infinity, like JavaScript's `Math.round`.
///
/// Negative zero comes back as positive zero.
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor() + 0.0
}

/// Rounds to one decimal place with [`round_half_up`].
pub(crate) fn round_tenth(x: f64) -> f64 {
    round_half_up(x * 10.0) / 10.0 + 0.0
}

/// Rounds to one decimal place with ties away from zero, like JavaScript's `toFixed(1)`.
pub(crate) fn round_tenth_away(x: f64) -> f64 {
    let magnitude = (x.abs() * 10.0 + 0.5).floor() / 10.0;
    if x < 0.0 { -magnitude + 0.0 } else { magnitude }
}
