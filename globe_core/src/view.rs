// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller-owned view parameters.

extern crate alloc;

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Size};

use crate::config::{GlobeConfig, PARALLEL_LIMIT};
use crate::projection::Rotation;

/// Projection family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ProjectionType {
    /// View from infinite distance; exactly one hemisphere is visible.
    #[default]
    Orthographic,
    /// Perspective view from a finite distance (a "satellite" or near-side perspective view).
    #[cfg_attr(feature = "serde", serde(alias = "perspective"))]
    Satellite,
}

impl ProjectionType {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Orthographic => "orthographic",
            Self::Satellite => "satellite",
        }
    }
}

impl fmt::Display for ProjectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown projection name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown projection type `{0}` (expected `orthographic` or `satellite`)")]
pub struct ParseProjectionTypeError(pub String);

impl FromStr for ProjectionType {
    type Err = ParseProjectionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orthographic" => Ok(Self::Orthographic),
            "satellite" | "perspective" => Ok(Self::Satellite),
            other => Err(ParseProjectionTypeError(other.into())),
        }
    }
}

/// Square render extent in device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderExtent {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl RenderExtent {
    /// Creates a square extent.
    #[must_use]
    pub const fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// Returns `true` when either dimension is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The smaller dimension, used as the projection's base size.
    #[must_use]
    pub fn base_size(&self) -> f64 {
        f64::from(self.width.min(self.height))
    }

    /// The center point, used as the projection's translation.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// The extent as a `kurbo::Size`.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// The view parameters the engine consumes each cycle.
///
/// Angles are in degrees. The meridian and roll are stored as running values during a drag and
/// may exceed ±180 transiently; only their trigonometric projection matters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewState {
    /// Longitude centered in the view.
    pub central_meridian: f64,
    /// Latitude centered in the view, in `[-90, 90]`.
    pub central_parallel: f64,
    /// Roll around the viewing axis.
    pub z_rotation: f64,
    /// Zoom multiplier, in `[1, 8]` by default.
    pub zoom: f64,
    /// Projection family.
    pub projection_type: ProjectionType,
    /// Perspective viewing distance in Earth radii; ignored for orthographic views.
    pub distance: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            central_meridian: 0.0,
            central_parallel: 0.0,
            z_rotation: 0.0,
            zoom: 1.0,
            projection_type: ProjectionType::Orthographic,
            distance: 12.0,
        }
    }
}

impl ViewState {
    /// Sets the central parallel, clamped to `[-90, 90]`.
    pub fn set_central_parallel(&mut self, parallel: f64) {
        self.central_parallel = clamp_parallel(parallel);
    }

    /// Returns a copy with every bounded field clamped into range.
    ///
    /// Non-finite angles are replaced by `0`. Input that arrives from outside the UI (for example
    /// a shared link) may be out of range; the engine clamps rather than rejecting it.
    #[must_use]
    pub fn clamped(&self, config: &GlobeConfig) -> Self {
        Self {
            central_meridian: finite_or_zero(self.central_meridian),
            central_parallel: clamp_parallel(self.central_parallel),
            z_rotation: finite_or_zero(self.z_rotation),
            zoom: config.zoom.clamp(self.zoom),
            projection_type: self.projection_type,
            distance: config.distance.clamp(self.distance),
        }
    }

    /// The projection rotation for this view: `[-meridian, -parallel, roll]`.
    ///
    /// Longitude and latitude are negated because the rotation brings the chosen point to the
    /// front of the sphere, the inverse of moving the viewpoint to it.
    #[must_use]
    pub fn rotation(&self) -> Rotation {
        Rotation::new(-self.central_meridian, -self.central_parallel, self.z_rotation)
    }
}

/// Clamps a latitude into `[-90, 90]`, mapping NaN to `0`.
pub(crate) fn clamp_parallel(parallel: f64) -> f64 {
    if parallel.is_nan() {
        return 0.0;
    }
    parallel.clamp(-PARALLEL_LIMIT, PARALLEL_LIMIT)
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
