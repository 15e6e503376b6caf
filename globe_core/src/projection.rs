// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Azimuthal projections of the unit sphere.
//!
//! Both families share one pipeline: a three-axis rotation brings the view center to `(0, 0)`,
//! points beyond the clip angle are rejected, the raw projection maps the rotated point into the
//! unit plane, and scale/translate place it on screen (y down).
//!
//! Internally the rotated point is kept as a unit vector whose `x` axis points at the viewer, so
//! the clip test is a single comparison against `cos(clip_angle)`.

use core::f64::consts::PI;

use kurbo::Point;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::config::{DistanceLimits, GlobeConfig, ProjectionConfig};
use crate::geometry::LonLat;
use crate::vec3::Vec3;
use crate::view::{ProjectionType, RenderExtent, ViewState};

/// Three-axis rotation `[λ, φ, γ]`, in degrees.
///
/// `λ` spins around the polar axis, `φ` tilts north/south and `γ` rolls around the viewing axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    angles: [f64; 3],
    delta_lambda: f64,
    cos_phi: f64,
    sin_phi: f64,
    cos_gamma: f64,
    sin_gamma: f64,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl Rotation {
    /// Creates a rotation from degrees.
    #[must_use]
    pub fn new(lambda: f64, phi: f64, gamma: f64) -> Self {
        let phi_r = phi.to_radians();
        let gamma_r = gamma.to_radians();
        Self {
            angles: [lambda, phi, gamma],
            delta_lambda: wrap_pi(lambda.to_radians()),
            cos_phi: phi_r.cos(),
            sin_phi: phi_r.sin(),
            cos_gamma: gamma_r.cos(),
            sin_gamma: gamma_r.sin(),
        }
    }

    /// The `[λ, φ, γ]` angles in degrees, as given.
    #[must_use]
    pub fn angles(&self) -> [f64; 3] {
        self.angles
    }

    /// Rotates a position.
    #[must_use]
    pub fn rotate(&self, p: LonLat) -> LonLat {
        to_lon_lat(self.rotate_vec(p))
    }

    /// Applies the inverse rotation to a position.
    #[must_use]
    pub fn invert(&self, p: LonLat) -> LonLat {
        self.invert_vec(from_lon_lat(p))
    }

    pub(crate) fn rotate_vec(&self, p: LonLat) -> Vec3 {
        let lambda = wrap_pi(p.lon.to_radians() + self.delta_lambda);
        let phi = p.lat.to_radians();
        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * self.cos_phi + x * self.sin_phi;
        Vec3::new(
            x * self.cos_phi - z * self.sin_phi,
            y * self.cos_gamma - k * self.sin_gamma,
            k * self.cos_gamma + y * self.sin_gamma,
        )
    }

    pub(crate) fn invert_vec(&self, v: Vec3) -> LonLat {
        let y = v.y * self.cos_gamma + v.z * self.sin_gamma;
        let k = v.z * self.cos_gamma - v.y * self.sin_gamma;
        let x = v.x * self.cos_phi + k * self.sin_phi;
        let z = k * self.cos_phi - v.x * self.sin_phi;
        let lambda = wrap_pi(y.atan2(x) - self.delta_lambda);
        LonLat::new(lambda.to_degrees(), z.clamp(-1.0, 1.0).asin().to_degrees())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Family {
    Orthographic,
    Satellite { distance: f64 },
}

/// A configured projection: family, scale, translation, rotation and clip angle.
///
/// The render pipeline owns one of these per full render and mutates it in place for fast
/// updates (rotation) and zoom (scale).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    family: Family,
    scale: f64,
    translate: Point,
    rotation: Rotation,
    clip_angle: f64,
    cos_clip: f64,
    sin_clip: f64,
}

impl Projection {
    /// An orthographic projection with unit scale, no translation and no rotation.
    #[must_use]
    pub fn orthographic() -> Self {
        Self::with_family(Family::Orthographic, 90.0)
    }

    /// A perspective projection viewed from `distance` Earth radii.
    ///
    /// The distance is clamped to the default [`DistanceLimits`] so the horizon stays defined.
    #[must_use]
    pub fn satellite(distance: f64) -> Self {
        Self::satellite_within(distance, &DistanceLimits::default())
    }

    fn satellite_within(distance: f64, limits: &DistanceLimits) -> Self {
        let distance = limits.clamp(distance);
        Self::with_family(
            Family::Satellite { distance },
            satellite_clip_angle(distance),
        )
    }

    fn with_family(family: Family, clip_angle: f64) -> Self {
        let clip = clip_angle.to_radians();
        Self {
            family,
            scale: 1.0,
            translate: Point::ZERO,
            rotation: Rotation::default(),
            clip_angle,
            cos_clip: clip.cos(),
            sin_clip: clip.sin(),
        }
    }

    /// Builds the projection for a view rendered into `extent`.
    ///
    /// Out-of-range view fields are clamped with the limits from `config`.
    #[must_use]
    pub fn from_view(view: &ViewState, extent: RenderExtent, config: &GlobeConfig) -> Self {
        let view = view.clamped(config);
        let mut projection = match view.projection_type {
            ProjectionType::Orthographic => Self::orthographic(),
            ProjectionType::Satellite => Self::satellite_within(view.distance, &config.distance),
        };
        projection.set_scale(calculate_scale(
            view.projection_type,
            extent.base_size(),
            view.zoom,
            &config.projection,
        ));
        projection.set_translate(extent.center());
        projection.set_rotation(view.rotation());
        projection
    }

    /// The projection family.
    #[must_use]
    pub fn projection_type(&self) -> ProjectionType {
        match self.family {
            Family::Orthographic => ProjectionType::Orthographic,
            Family::Satellite { .. } => ProjectionType::Satellite,
        }
    }

    /// The perspective distance, for satellite projections.
    #[must_use]
    pub fn distance(&self) -> Option<f64> {
        match self.family {
            Family::Orthographic => None,
            Family::Satellite { distance } => Some(distance),
        }
    }

    /// Pixels per unit of the raw projection.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Sets the scale.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// Screen position of the projected view center.
    #[must_use]
    pub fn translate(&self) -> Point {
        self.translate
    }

    /// Sets the translation.
    pub fn set_translate(&mut self, translate: Point) {
        self.translate = translate;
    }

    /// The current rotation.
    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Sets the rotation.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Angular radius of the visible region around the view center, in degrees.
    #[must_use]
    pub fn clip_angle(&self) -> f64 {
        self.clip_angle
    }

    /// Screen radius of the visible region's outline.
    #[must_use]
    pub fn sphere_radius(&self) -> f64 {
        let boundary = Vec3::new(self.cos_clip, self.sin_clip, 0.0);
        self.raw(boundary).x * self.scale
    }

    /// Projects a position, or returns `None` if it lies beyond the clip angle.
    #[must_use]
    pub fn project(&self, p: LonLat) -> Option<Point> {
        let v = self.rotation.rotate_vec(p);
        self.is_visible(v).then(|| self.project_rotated(v))
    }

    /// Maps a screen point back to a position, or `None` outside the projected sphere.
    #[must_use]
    pub fn invert(&self, p: Point) -> Option<LonLat> {
        let x = (p.x - self.translate.x) / self.scale;
        let y = (self.translate.y - p.y) / self.scale;
        let rho = x.hypot(y);
        if !rho.is_finite() {
            return None;
        }
        let (lambda, phi) = if rho == 0.0 {
            (0.0, 0.0)
        } else {
            let sin_c = match self.family {
                Family::Orthographic => {
                    if rho > 1.0 {
                        return None;
                    }
                    rho
                }
                Family::Satellite { distance: p } => {
                    let disc = 1.0 - rho * rho * (p + 1.0) / (p - 1.0);
                    if disc < 0.0 {
                        return None;
                    }
                    (p - disc.sqrt()) / ((p - 1.0) / rho + rho / (p - 1.0))
                }
            };
            let cos_c = (1.0 - sin_c * sin_c).max(0.0).sqrt();
            (
                (x * sin_c).atan2(rho * cos_c),
                (y * sin_c / rho).clamp(-1.0, 1.0).asin(),
            )
        };
        let v = Vec3::new(phi.cos() * lambda.cos(), phi.cos() * lambda.sin(), phi.sin());
        Some(self.rotation.invert_vec(v))
    }

    pub(crate) fn cos_clip(&self) -> f64 {
        self.cos_clip
    }

    pub(crate) fn sin_clip(&self) -> f64 {
        self.sin_clip
    }

    pub(crate) fn is_visible(&self, v: Vec3) -> bool {
        v.x > self.cos_clip
    }

    /// Projects an already rotated unit vector to screen space, without clipping.
    pub(crate) fn project_rotated(&self, v: Vec3) -> Point {
        let raw = self.raw(v);
        Point::new(
            self.translate.x + self.scale * raw.x,
            self.translate.y - self.scale * raw.y,
        )
    }

    fn raw(&self, v: Vec3) -> Point {
        match self.family {
            Family::Orthographic => Point::new(v.y, v.z),
            Family::Satellite { distance: p } => {
                let k = (p - 1.0) / (p - v.x);
                Point::new(k * v.y, k * v.z)
            }
        }
    }
}

/// Projection scale for a render base size and zoom: `base / ratio × zoom`.
#[must_use]
pub fn calculate_scale(
    projection_type: ProjectionType,
    base_size: f64,
    zoom: f64,
    config: &ProjectionConfig,
) -> f64 {
    base_size / config.scale_ratio(projection_type) * zoom
}

/// Horizon angle for a perspective view from `distance` Earth radii, in degrees.
#[must_use]
pub fn satellite_clip_angle(distance: f64) -> f64 {
    (1.0 / distance).clamp(-1.0, 1.0).acos().to_degrees()
}

fn wrap_pi(lambda: f64) -> f64 {
    if lambda > PI {
        lambda - 2.0 * PI
    } else if lambda < -PI {
        lambda + 2.0 * PI
    } else {
        lambda
    }
}

fn from_lon_lat(p: LonLat) -> Vec3 {
    let lambda = p.lon.to_radians();
    let phi = p.lat.to_radians();
    Vec3::new(phi.cos() * lambda.cos(), phi.cos() * lambda.sin(), phi.sin())
}

fn to_lon_lat(v: Vec3) -> LonLat {
    LonLat::new(
        v.y.atan2(v.x).to_degrees(),
        v.z.clamp(-1.0, 1.0).asin().to_degrees(),
    )
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn close_point(a: Point, b: Point) -> bool {
        close(a.x, b.x) && close(a.y, b.y)
    }

    #[test]
    fn view_center_projects_to_translate() {
        let view = ViewState {
            central_meridian: 30.0,
            central_parallel: 45.0,
            z_rotation: 12.0,
            ..ViewState::default()
        };
        let extent = RenderExtent::square(400);
        let projection = Projection::from_view(&view, extent, &GlobeConfig::default());
        let center = projection.project(LonLat::new(30.0, 45.0)).unwrap();
        assert!(close_point(center, Point::new(200.0, 200.0)));
    }

    #[test]
    fn north_is_up_and_east_is_right() {
        let mut projection = Projection::orthographic();
        projection.set_scale(100.0);
        let north = projection.project(LonLat::new(0.0, 10.0)).unwrap();
        let east = projection.project(LonLat::new(10.0, 0.0)).unwrap();
        assert!(north.y < 0.0);
        assert!(east.x > 0.0);
    }

    #[test]
    fn far_side_is_clipped() {
        let projection = Projection::orthographic();
        assert!(projection.project(LonLat::new(180.0, 0.0)).is_none());
        assert!(projection.project(LonLat::new(95.0, 0.0)).is_none());
        assert!(projection.project(LonLat::new(85.0, 0.0)).is_some());
    }

    #[test]
    fn satellite_horizon_is_closer_than_orthographic() {
        let projection = Projection::satellite(2.0);
        assert!(close(projection.clip_angle(), 60.0));
        assert!(projection.project(LonLat::new(55.0, 0.0)).is_some());
        assert!(projection.project(LonLat::new(65.0, 0.0)).is_none());
    }

    #[test]
    fn satellite_distance_is_clamped() {
        assert_eq!(Projection::satellite(0.5).distance(), Some(2.0));
        assert_eq!(Projection::orthographic().distance(), None);
    }

    #[test]
    fn rotation_round_trips() {
        let rotation = Rotation::new(-40.0, 25.0, 70.0);
        let p = LonLat::new(12.5, -33.0);
        let back = rotation.invert(rotation.rotate(p));
        assert!(close(back.lon, p.lon) && close(back.lat, p.lat));
    }

    #[test]
    fn invert_recovers_projected_points() {
        for projection in [Projection::orthographic(), Projection::satellite(3.0)] {
            let mut projection = projection;
            projection.set_scale(250.0);
            projection.set_translate(Point::new(300.0, 300.0));
            projection.set_rotation(Rotation::new(-20.0, -35.0, 15.0));
            let p = LonLat::new(35.0, 20.0);
            let screen = projection.project(p).unwrap();
            let back = projection.invert(screen).unwrap();
            assert!(close(back.lon, p.lon), "lon {} vs {}", back.lon, p.lon);
            assert!(close(back.lat, p.lat), "lat {} vs {}", back.lat, p.lat);
        }
    }

    #[test]
    fn invert_rejects_points_off_the_disk() {
        let mut projection = Projection::orthographic();
        projection.set_scale(100.0);
        assert!(projection.invert(Point::new(150.0, 0.0)).is_none());
    }

    #[test]
    fn sphere_radius_matches_family() {
        let mut ortho = Projection::orthographic();
        ortho.set_scale(100.0);
        assert!(close(ortho.sphere_radius(), 100.0));

        let mut satellite = Projection::satellite(3.0);
        satellite.set_scale(100.0);
        assert!(close(satellite.sphere_radius(), 100.0 * (2.0_f64 / 4.0).sqrt()));
    }

    #[test]
    fn scale_is_linear_in_zoom() {
        let config = ProjectionConfig::default();
        let one = calculate_scale(ProjectionType::Satellite, 600.0, 1.7, &config);
        let two = calculate_scale(ProjectionType::Satellite, 600.0, 3.4, &config);
        assert_eq!(two, 2.0 * one);
    }
}
