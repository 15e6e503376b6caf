// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! PROJ definitions for the current view.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use globe_core::{ProjectionType, ViewState};

use crate::format::{round_half_up, round_tenth};

/// Equatorial radius of WGS84, in meters.
pub const WGS84_RADIUS_M: f64 = 6_378_137.0;

/// Satellite height used when no distance is known, in meters.
pub const FALLBACK_HEIGHT_M: f64 = 1_276_000.0;

/// Builds the PROJ string describing a view.
///
/// Longitude and latitude are rounded to one decimal. Satellite views carry the height above
/// the surface, `(distance - 1)` Earth radii in meters; a missing, zero or non-finite distance
/// falls back to [`FALLBACK_HEIGHT_M`].
#[must_use]
pub fn proj_string(
    projection_type: ProjectionType,
    longitude: f64,
    latitude: f64,
    distance: Option<f64>,
) -> String {
    let lat = round_tenth(latitude);
    let lon = round_tenth(longitude);
    match projection_type {
        ProjectionType::Orthographic => {
            format!("+proj=ortho +lat_0={lat} +lon_0={lon} +datum=WGS84 +units=m +no_defs")
        }
        ProjectionType::Satellite => {
            let height = match distance {
                Some(d) if d.is_finite() && d != 0.0 => round_half_up((d - 1.0) * WGS84_RADIUS_M),
                _ => FALLBACK_HEIGHT_M,
            };
            format!(
                "+proj=nsper +lat_0={lat} +lon_0={lon} +h={height} +datum=WGS84 +units=m +no_defs"
            )
        }
    }
}

/// [`proj_string`] for a view state.
#[must_use]
pub fn view_proj_string(view: &ViewState) -> String {
    proj_string(
        view.projection_type,
        view.central_meridian,
        view.central_parallel,
        Some(view.distance),
    )
}
