// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Limits and tuning constants.
//!
//! The scale ratios are visual-tuning values: they make the two projection families render at a
//! comparable apparent globe size. They have no derivation from projection theory, so they are
//! configurable rather than hard-coded.

use crate::view::ProjectionType;

/// Latitude bound for the central parallel, in degrees.
pub const PARALLEL_LIMIT: f64 = 90.0;

/// Fraction of the smaller container dimension used for the render extent.
pub const CONTAINER_FILL_RATIO: f64 = 0.8;

/// Zoom bounds and wheel sensitivity.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomLimits {
    /// Smallest zoom factor.
    pub min: f64,
    /// Largest zoom factor.
    pub max: f64,
    /// Slider step.
    pub step: f64,
    /// Zoom change per unit of wheel delta.
    pub wheel_sensitivity: f64,
}

impl ZoomLimits {
    /// Clamps a zoom factor into `[min, max]`.
    ///
    /// Non-finite input falls back to `min`. When `min > max`, `min` wins.
    #[must_use]
    pub fn clamp(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.min;
        }
        zoom.min(self.max).max(self.min)
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: 1.0,
            max: 8.0,
            step: 0.1,
            wheel_sensitivity: 0.001,
        }
    }
}

/// Perspective viewing-distance bounds, in Earth radii.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceLimits {
    /// Closest allowed distance. Must stay above 1 so the horizon angle is defined.
    pub min: f64,
    /// Farthest allowed distance.
    pub max: f64,
    /// Slider step.
    pub step: f64,
    /// Distance used when the caller has no preference.
    pub default: f64,
}

impl DistanceLimits {
    /// Clamps a distance into `[min, max]`.
    ///
    /// Non-finite input falls back to `default`. When `min > max`, `min` wins.
    #[must_use]
    pub fn clamp(&self, distance: f64) -> f64 {
        if distance.is_nan() {
            return self.default;
        }
        distance.min(self.max).max(self.min)
    }
}

impl Default for DistanceLimits {
    fn default() -> Self {
        Self {
            min: 2.0,
            max: 22.0,
            step: 0.1,
            default: 12.0,
        }
    }
}

/// Per-family scale ratios.
///
/// `scale = min(width, height) / ratio * zoom`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectionConfig {
    /// Ratio for the orthographic family.
    pub orthographic_scale_ratio: f64,
    /// Ratio for the satellite family.
    pub satellite_scale_ratio: f64,
}

impl ProjectionConfig {
    /// Returns the scale ratio for a projection family.
    #[must_use]
    pub fn scale_ratio(&self, projection_type: ProjectionType) -> f64 {
        match projection_type {
            ProjectionType::Orthographic => self.orthographic_scale_ratio,
            ProjectionType::Satellite => self.satellite_scale_ratio,
        }
    }

    /// Sets the orthographic scale ratio.
    #[must_use]
    pub fn with_orthographic_scale_ratio(mut self, ratio: f64) -> Self {
        self.orthographic_scale_ratio = ratio;
        self
    }

    /// Sets the satellite scale ratio.
    #[must_use]
    pub fn with_satellite_scale_ratio(mut self, ratio: f64) -> Self {
        self.satellite_scale_ratio = ratio;
        self
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            orthographic_scale_ratio: 2.15,
            satellite_scale_ratio: 1.95,
        }
    }
}

/// Engine-wide configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GlobeConfig {
    /// Scale ratios per projection family.
    pub projection: ProjectionConfig,
    /// Zoom bounds and wheel sensitivity.
    pub zoom: ZoomLimits,
    /// Perspective distance bounds.
    pub distance: DistanceLimits,
    /// Fraction of the container used for the render extent.
    pub fill_ratio: f64,
    /// Flattening tolerance for the sphere outline, in pixels.
    pub sphere_tolerance: f64,
}

impl GlobeConfig {
    /// Sets the projection scale ratios.
    #[must_use]
    pub fn with_projection(mut self, projection: ProjectionConfig) -> Self {
        self.projection = projection;
        self
    }

    /// Sets the zoom limits.
    #[must_use]
    pub fn with_zoom(mut self, zoom: ZoomLimits) -> Self {
        self.zoom = zoom;
        self
    }

    /// Sets the distance limits.
    #[must_use]
    pub fn with_distance(mut self, distance: DistanceLimits) -> Self {
        self.distance = distance;
        self
    }

    /// Sets the container fill ratio.
    #[must_use]
    pub fn with_fill_ratio(mut self, fill_ratio: f64) -> Self {
        self.fill_ratio = fill_ratio;
        self
    }

    /// Sets the sphere outline tolerance.
    #[must_use]
    pub fn with_sphere_tolerance(mut self, tolerance: f64) -> Self {
        self.sphere_tolerance = tolerance;
        self
    }
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionConfig::default(),
            zoom: ZoomLimits::default(),
            distance: DistanceLimits::default(),
            fill_ratio: CONTAINER_FILL_RATIO,
            sphere_tolerance: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_clamp_handles_nan_and_bounds() {
        let limits = ZoomLimits::default();
        assert_eq!(limits.clamp(f64::NAN), 1.0);
        assert_eq!(limits.clamp(0.2), 1.0);
        assert_eq!(limits.clamp(12.0), 8.0);
        assert_eq!(limits.clamp(3.5), 3.5);
    }

    #[test]
    fn distance_clamp_keeps_horizon_defined() {
        let limits = DistanceLimits::default();
        assert_eq!(limits.clamp(0.5), 2.0);
        assert_eq!(limits.clamp(f64::INFINITY), 22.0);
        assert_eq!(limits.clamp(f64::NAN), 12.0);
    }

    #[test]
    fn inverted_limits_do_not_panic() {
        let zoom = ZoomLimits {
            min: 4.0,
            max: 2.0,
            ..ZoomLimits::default()
        };
        assert_eq!(zoom.clamp(3.0), 4.0);
        assert_eq!(zoom.clamp(9.0), 4.0);
        let distance = DistanceLimits {
            min: 10.0,
            max: 5.0,
            ..DistanceLimits::default()
        };
        assert_eq!(distance.clamp(7.0), 10.0);
        assert_eq!(distance.clamp(1.0), 10.0);
    }

    #[test]
    fn orthographic_ratio_is_larger_than_satellite() {
        let config = ProjectionConfig::default();
        assert!(
            config.scale_ratio(ProjectionType::Orthographic)
                > config.scale_ratio(ProjectionType::Satellite)
        );
    }
}
