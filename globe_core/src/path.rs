// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry to path conversion.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

use kurbo::{BezPath, Circle, PathEl, Point, Shape};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::clip::Cap;
use crate::geometry::{Geometry, Polygon};
use crate::projection::Projection;
use crate::vec3::Vec3;

/// Squared resampling precision, in square pixels.
const PRECISION_SQ: f64 = 0.5;
const MAX_DEPTH: u32 = 16;
/// `cos(30°)`: edges longer than this are always split at least once.
const COS_MIN_DISTANCE: f64 = 0.866_025_403_784_438_6;

/// Turns geometry into screen-space paths through a [`Projection`].
///
/// The generator owns its projection. Fast updates mutate the rotation through
/// [`PathGenerator::projection_mut`] and regenerate paths without rebuilding anything.
#[derive(Clone, Debug)]
pub struct PathGenerator {
    projection: Projection,
    sphere_tolerance: f64,
}

impl PathGenerator {
    /// Creates a generator for `projection`.
    #[must_use]
    pub fn new(projection: Projection) -> Self {
        Self {
            projection,
            sphere_tolerance: 0.1,
        }
    }

    /// Sets the flattening tolerance for the sphere outline.
    #[must_use]
    pub fn with_sphere_tolerance(mut self, tolerance: f64) -> Self {
        self.sphere_tolerance = tolerance;
        self
    }

    /// The projection in use.
    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Mutable access to the projection, for in-place rotation and scale changes.
    pub fn projection_mut(&mut self) -> &mut Projection {
        &mut self.projection
    }

    /// Builds the path for `geometry`, or `None` when nothing of it is visible.
    #[must_use]
    pub fn path(&self, geometry: &Geometry) -> Option<BezPath> {
        let path = match geometry {
            Geometry::Sphere => self.sphere()?,
            _ => {
                let mut path = BezPath::new();
                for polygon in geometry.polygons() {
                    self.polygon(polygon, &mut path);
                }
                path
            }
        };
        (!path.elements().is_empty()).then_some(path)
    }

    /// Builds SVG path data for `geometry`, or `None` when nothing of it is visible.
    #[must_use]
    pub fn path_string(&self, geometry: &Geometry) -> Option<String> {
        let path = self.path(geometry)?;
        let mut out = String::new();
        write_svg_path(&path, &mut out).ok()?;
        Some(out)
    }

    fn sphere(&self) -> Option<BezPath> {
        let radius = self.projection.sphere_radius();
        if !radius.is_finite() || radius <= 0.0 {
            return None;
        }
        let circle = Circle::new(self.projection.translate(), radius);
        Some(circle.to_path(self.sphere_tolerance))
    }

    fn polygon(&self, polygon: &Polygon, path: &mut BezPath) {
        let rotation = self.projection.rotation();
        let rings: Vec<Vec<Vec3>> = polygon
            .rings()
            .iter()
            .map(|ring| ring.iter().map(|p| rotation.rotate_vec(*p)).collect())
            .collect();
        let cap = Cap::new(self.projection.cos_clip(), self.projection.sin_clip());
        for ring in cap.clip_polygon(&rings) {
            self.ring(&ring, path);
        }
    }

    fn ring(&self, ring: &[Vec3], path: &mut BezPath) {
        let Some(&first) = ring.first() else {
            return;
        };
        let first_point = self.projection.project_rotated(first);
        path.move_to(first_point);
        let mut prev = (first, first_point);
        for &v in &ring[1..] {
            let p = self.projection.project_rotated(v);
            self.resample(prev, (v, p), MAX_DEPTH, path);
            path.line_to(p);
            prev = (v, p);
        }
        self.resample(prev, (first, first_point), MAX_DEPTH, path);
        path.close_path();
    }

    /// Adds intermediate points along the great circle `a → b` until the projected polyline is
    /// within the precision of the true curve.
    fn resample(&self, a: (Vec3, Point), b: (Vec3, Point), depth: u32, path: &mut BezPath) {
        let (va, pa) = a;
        let (vb, pb) = b;
        let dx = pb.x - pa.x;
        let dy = pb.y - pa.y;
        let d2 = dx * dx + dy * dy;
        if d2 <= 4.0 * PRECISION_SQ || depth == 0 {
            return;
        }
        let Some(vm) = (va + vb).normalize() else {
            return;
        };
        let pm = self.projection.project_rotated(vm);
        let dx2 = pm.x - pa.x;
        let dy2 = pm.y - pa.y;
        let dz = dy * dx2 - dx * dy2;
        if dz * dz / d2 > PRECISION_SQ
            || ((dx * dx2 + dy * dy2) / d2 - 0.5).abs() > 0.3
            || va.dot(vb) < COS_MIN_DISTANCE
        {
            self.resample(a, (vm, pm), depth - 1, path);
            path.line_to(pm);
            self.resample((vm, pm), b, depth - 1, path);
        }
    }
}

/// Writes `path` as SVG path data.
///
/// Coordinates are rounded to three decimals; negative zero prints as `0`.
pub fn write_svg_path(path: &BezPath, out: &mut impl Write) -> fmt::Result {
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                out.write_char('M')?;
                write_point(out, p)?;
            }
            PathEl::LineTo(p) => {
                out.write_char('L')?;
                write_point(out, p)?;
            }
            PathEl::QuadTo(p1, p2) => {
                out.write_char('Q')?;
                write_point(out, p1)?;
                out.write_char(',')?;
                write_point(out, p2)?;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                out.write_char('C')?;
                write_point(out, p1)?;
                out.write_char(',')?;
                write_point(out, p2)?;
                out.write_char(',')?;
                write_point(out, p3)?;
            }
            PathEl::ClosePath => out.write_char('Z')?,
        }
    }
    Ok(())
}

fn write_point(out: &mut impl Write, p: Point) -> fmt::Result {
    write!(out, "{},{}", round3(p.x), round3(p.y))
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0 + 0.0
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::geometry::{LonLat, Ring};
    use crate::projection::Rotation;
    use alloc::vec;

    fn generator() -> PathGenerator {
        let mut projection = Projection::orthographic();
        projection.set_scale(100.0);
        projection.set_translate(Point::new(150.0, 150.0));
        PathGenerator::new(projection)
    }

    fn square(lon0: f64, lat0: f64, lon1: f64, lat1: f64) -> Ring {
        vec![
            LonLat::new(lon0, lat0),
            LonLat::new(lon1, lat0),
            LonLat::new(lon1, lat1),
            LonLat::new(lon0, lat1),
        ]
    }

    fn points(path: &BezPath) -> Vec<Point> {
        path.elements()
            .iter()
            .filter_map(|el| match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn sphere_is_a_circle_around_translate() {
        let path = generator().path(&Geometry::Sphere).unwrap();
        let bbox = path.bounding_box();
        assert!((bbox.width() - 200.0).abs() < 0.5);
        assert!((bbox.center().x - 150.0).abs() < 1e-6);
        assert!((bbox.center().y - 150.0).abs() < 1e-6);
    }

    #[test]
    fn visible_polygon_is_one_closed_subpath() {
        let geometry = Geometry::Polygon(Polygon::new([square(-10.0, -10.0, 10.0, 10.0)]));
        let path = generator().path(&geometry).unwrap();
        let elements = path.elements();
        assert!(matches!(elements.first(), Some(PathEl::MoveTo(_))));
        assert!(matches!(elements.last(), Some(PathEl::ClosePath)));
        let moves = elements
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count();
        assert_eq!(moves, 1);
    }

    #[test]
    fn far_side_polygon_has_no_path() {
        let geometry = Geometry::Polygon(Polygon::new([square(170.0, -10.0, 179.0, 10.0)]));
        assert!(generator().path(&geometry).is_none());
        assert!(generator().path_string(&geometry).is_none());
    }

    #[test]
    fn rotation_brings_far_side_into_view() {
        let geometry = Geometry::Polygon(Polygon::new([square(170.0, -10.0, 179.0, 10.0)]));
        let mut generator = generator();
        generator
            .projection_mut()
            .set_rotation(Rotation::new(-175.0, 0.0, 0.0));
        assert!(generator.path(&geometry).is_some());
    }

    #[test]
    fn clipped_polygon_stays_on_the_disk() {
        let geometry = Geometry::Polygon(Polygon::new([square(45.0, -30.0, 135.0, 30.0)]));
        let path = generator().path(&geometry).unwrap();
        let center = Point::new(150.0, 150.0);
        for p in points(&path) {
            assert!(p.distance(center) <= 100.0 + 1e-6, "{p:?} lies off the disk");
        }
    }

    #[test]
    fn hidden_polygon_around_the_center_fills_the_disk() {
        let mut projection = Projection::satellite(2.0);
        projection.set_scale(100.0);
        let generator = PathGenerator::new(projection);
        let geometry = Geometry::Polygon(Polygon::new([square(-170.0, -80.0, 170.0, 80.0)]));
        let path = generator.path(&geometry).unwrap();
        let radius = generator.projection().sphere_radius();
        let bbox = path.bounding_box();
        assert!((bbox.width() - 2.0 * radius).abs() < 0.5);
    }

    #[test]
    fn long_edges_are_resampled() {
        let geometry = Geometry::Polygon(Polygon::new([square(-60.0, -60.0, 60.0, 60.0)]));
        let path = generator().path(&geometry).unwrap();
        assert!(points(&path).len() > 4);
    }

    fn to_lon_lat(v: Vec3) -> LonLat {
        LonLat::new(v.y.atan2(v.x).to_degrees(), v.z.asin().to_degrees())
    }

    fn degrees_between(a: LonLat, b: LonLat) -> f64 {
        let identity = Rotation::default();
        let d = identity.rotate_vec(a).dot(identity.rotate_vec(b));
        d.clamp(-1.0, 1.0).acos().to_degrees()
    }

    /// `n` positions at `radius` degrees around `center`, counter-clockwise.
    fn circle(center: LonLat, radius: f64, n: u32) -> Ring {
        let back = Rotation::new(-center.lon, -center.lat, 0.0);
        let r = radius.to_radians();
        (0..n)
            .map(|i| {
                let t = core::f64::consts::TAU * f64::from(i) / f64::from(n);
                back.invert(to_lon_lat(Vec3::new(
                    r.cos(),
                    r.sin() * t.cos(),
                    r.sin() * t.sin(),
                )))
            })
            .collect()
    }

    /// Everything south of `lat`, closed along the antimeridian through the pole the way world
    /// datasets close polar rings.
    fn south_polar_cap(lat: f64) -> Ring {
        let mut ring = vec![LonLat::new(-180.0, -90.0), LonLat::new(180.0, -90.0)];
        ring.extend((0..=72).map(|i| LonLat::new(180.0 - 5.0 * f64::from(i), lat)));
        ring
    }

    /// Positions within two degrees of an outline are not judged.
    fn judged(distance_to_outline: f64, inside: bool) -> Option<bool> {
        (distance_to_outline.abs() > 2.0).then_some(inside)
    }

    fn orthographic(rotation: Rotation) -> PathGenerator {
        let mut projection = Projection::orthographic();
        projection.set_scale(300.0);
        projection.set_translate(Point::new(300.0, 300.0));
        projection.set_rotation(rotation);
        PathGenerator::new(projection)
    }

    fn satellite(rotation: Rotation) -> PathGenerator {
        let mut projection = Projection::satellite(2.0);
        projection.set_scale(300.0);
        projection.set_translate(Point::new(300.0, 300.0));
        projection.set_rotation(rotation);
        PathGenerator::new(projection)
    }

    /// Samples the visible disk and checks that the path fills exactly the positions `inside`
    /// accepts. `inside` returns `None` where it declines to judge.
    fn assert_fill_matches(
        generator: &PathGenerator,
        geometry: &Geometry,
        inside: impl Fn(LonLat) -> Option<bool>,
    ) {
        let path = generator.path(geometry).unwrap_or_default();
        let projection = generator.projection();
        let center = projection.translate();
        let radius = projection.sphere_radius();
        let steps = (2.0 * radius / 5.0) as u32;
        let mut checked = 0;
        for row in 0..steps {
            for col in 0..steps {
                // Offset so no sample sits on a meridian through the center.
                let p = Point::new(
                    center.x - radius + 1.3 + 5.0 * f64::from(col),
                    center.y - radius + 1.3 + 5.0 * f64::from(row),
                );
                if p.distance(center) > 0.99 * radius {
                    continue;
                }
                let Some(position) = projection.invert(p) else {
                    continue;
                };
                let Some(expected) = inside(position) else {
                    continue;
                };
                assert_eq!(
                    path.winding(p) != 0,
                    expected,
                    "fill at {p:?}, which inverts to {position:?}"
                );
                checked += 1;
            }
        }
        assert!(checked > 1000, "only {checked} samples were judged");
    }

    #[test]
    fn country_under_the_view_center_fills_only_itself() {
        let origin = LonLat::new(0.0, 0.0);
        let geometry = Geometry::Polygon(Polygon::new([circle(origin, 15.0, 72)]));
        let inside = |p: LonLat| {
            let d = degrees_between(p, origin);
            judged(d - 15.0, d < 15.0)
        };
        assert_fill_matches(&orthographic(Rotation::default()), &geometry, inside);
        assert_fill_matches(&satellite(Rotation::default()), &geometry, inside);
    }

    #[test]
    fn holes_stay_empty() {
        let center = LonLat::new(20.0, 10.0);
        let geometry = Geometry::Polygon(Polygon::new([
            circle(center, 25.0, 90),
            circle(center, 8.0, 36),
        ]));
        let inside = |p: LonLat| {
            let d = degrees_between(p, center);
            judged((d - 25.0).abs().min((d - 8.0).abs()), d > 8.0 && d < 25.0)
        };
        assert_fill_matches(&orthographic(Rotation::default()), &geometry, inside);
        assert_fill_matches(&satellite(Rotation::default()), &geometry, inside);
    }

    #[test]
    fn country_across_the_horizon_fills_its_visible_part() {
        let center = LonLat::new(80.0, 0.0);
        let geometry = Geometry::Polygon(Polygon::new([circle(center, 20.0, 72)]));
        assert_fill_matches(&orthographic(Rotation::default()), &geometry, |p| {
            let d = degrees_between(p, center);
            judged(d - 20.0, d < 20.0)
        });
    }

    #[test]
    fn polar_cap_seen_from_its_pole() {
        let geometry = Geometry::Polygon(Polygon::new([south_polar_cap(-60.0)]));
        let below_the_south_pole = Rotation::new(0.0, 90.0, 0.0);
        let inside = |p: LonLat| judged(p.lat + 60.0, p.lat < -60.0);
        assert_fill_matches(&orthographic(below_the_south_pole), &geometry, inside);
        assert_fill_matches(&satellite(below_the_south_pole), &geometry, inside);
    }

    #[test]
    fn polygon_wrapping_the_far_side_fills_the_whole_disk() {
        // Interior is everything outside a thin lune around the antimeridian.
        let geometry = Geometry::Polygon(Polygon::new([square(-170.0, -80.0, 170.0, 80.0)]));
        assert_fill_matches(&satellite(Rotation::default()), &geometry, |_| Some(true));
    }

    #[test]
    fn svg_path_data_is_compact() {
        let mut path = BezPath::new();
        path.move_to((1.0, 2.0));
        path.line_to((3.25, -0.0));
        path.line_to((0.123_456, 10.0));
        path.close_path();
        let mut out = String::new();
        write_svg_path(&path, &mut out).unwrap();
        assert_eq!(out, "M1,2L3.25,0L0.123,10Z");
    }
}
