// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small-circle clipping of rotated polygons.
//!
//! Rings arrive as unit vectors in the rotated frame, where the view center is `+x`. The visible
//! region is the cap `x > cos r`. Each ring is cut into fragments that enter the cap, run through
//! it, and leave again; fragments are then stitched back together by walking the cap boundary
//! counter-clockwise from each exit to the next entry.
//!
//! Boundary positions are measured by the angle `t = atan2(z, y)`, which increases
//! counter-clockwise on screen.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::{PI, TAU};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::vec3::Vec3;

/// Angular step used when walking the cap boundary.
const BOUNDARY_STEP: f64 = 6.0 * PI / 180.0;

/// The visible cap of a projection.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cap {
    cos_r: f64,
    sin_r: f64,
}

#[derive(Debug)]
struct Fragment {
    points: Vec<Vec3>,
    entry: f64,
    exit: f64,
}

/// A great-circle arc `a cos θ + w sin θ` for `θ ∈ [0, omega]`.
struct Arc {
    a: Vec3,
    w: Vec3,
    omega: f64,
}

impl Arc {
    fn new(a: Vec3, b: Vec3) -> Option<Self> {
        let d = a.dot(b).clamp(-1.0, 1.0);
        let w = (b - a * d).normalize()?;
        Some(Self {
            a,
            w,
            omega: d.acos(),
        })
    }

    fn at(&self, theta: f64) -> Vec3 {
        self.a * theta.cos() + self.w * theta.sin()
    }

    /// `x(θ) = amplitude · cos(θ − peak)`.
    fn peak(&self) -> (f64, f64) {
        (self.a.x.hypot(self.w.x), self.w.x.atan2(self.a.x))
    }
}

impl Cap {
    pub(crate) fn new(cos_r: f64, sin_r: f64) -> Self {
        Self { cos_r, sin_r }
    }

    fn visible(&self, v: Vec3) -> bool {
        v.x > self.cos_r
    }

    /// Clips the rings of one polygon, returning closed rings ready to project.
    ///
    /// Rings run with the interior on their left, seen from outside the sphere. When no ring
    /// crosses the boundary, the whole cap is added as an extra ring if the boundary lies inside
    /// the polygon; fully visible rings then cut holes into it.
    pub(crate) fn clip_polygon(&self, rings: &[Vec<Vec3>]) -> Vec<Vec<Vec3>> {
        let mut closed = Vec::new();
        let mut fragments = Vec::new();
        let mut hidden = Vec::new();
        for ring in rings.iter().filter(|r| r.len() >= 3) {
            let before = (closed.len(), fragments.len());
            self.clip_ring(ring, &mut closed, &mut fragments);
            if before == (closed.len(), fragments.len()) {
                hidden.push(ring.as_slice());
            }
        }
        if fragments.is_empty() {
            if boundary_inside(&closed, &hidden) {
                closed.insert(0, self.disk());
            }
            return closed;
        }
        self.rejoin(&fragments, &mut closed);
        closed
    }

    fn clip_ring(&self, ring: &[Vec3], closed: &mut Vec<Vec<Vec3>>, fragments: &mut Vec<Fragment>) {
        let n = ring.len();
        let Some(start) = ring.iter().position(|v| !self.visible(*v)) else {
            closed.push(ring.to_vec());
            return;
        };
        // Starting on a hidden vertex means every fragment opens and closes inside the loop.
        let mut current: Option<Vec<Vec3>> = None;
        for step in 0..n {
            let a = ring[(start + step) % n];
            let b = ring[(start + step + 1) % n];
            match (self.visible(a), self.visible(b)) {
                (true, true) => {
                    if let Some(points) = current.as_mut() {
                        points.push(b);
                    }
                }
                (false, true) => {
                    current = Some(vec![self.entry(a, b), b]);
                }
                (true, false) => {
                    if let Some(mut points) = current.take() {
                        points.push(self.exit(a, b));
                        fragments.push(self.fragment(points));
                    }
                }
                (false, false) => {
                    if let Some((entry, exit)) = self.dip(a, b) {
                        fragments.push(self.fragment(vec![entry, exit]));
                    }
                }
            }
        }
    }

    fn fragment(&self, points: Vec<Vec3>) -> Fragment {
        let entry = points.first().map_or(0.0, |v| boundary_angle(*v));
        let exit = points.last().map_or(0.0, |v| boundary_angle(*v));
        Fragment {
            points,
            entry,
            exit,
        }
    }

    /// Crossing where the edge `a → b` enters the cap.
    fn entry(&self, a: Vec3, b: Vec3) -> Vec3 {
        let Some(arc) = Arc::new(a, b) else {
            return self.snap(b);
        };
        let (amplitude, peak) = arc.peak();
        let half = (self.cos_r / amplitude).clamp(-1.0, 1.0).acos();
        let theta = wrap(peak - half).clamp(0.0, arc.omega);
        self.snap(arc.at(theta))
    }

    /// Crossing where the edge `a → b` leaves the cap.
    fn exit(&self, a: Vec3, b: Vec3) -> Vec3 {
        let Some(arc) = Arc::new(a, b) else {
            return self.snap(a);
        };
        let (amplitude, peak) = arc.peak();
        let half = (self.cos_r / amplitude).clamp(-1.0, 1.0).acos();
        let theta = wrap(peak + half).clamp(0.0, arc.omega);
        self.snap(arc.at(theta))
    }

    /// For an edge whose endpoints are both hidden, the pair of crossings if it dips into the cap.
    fn dip(&self, a: Vec3, b: Vec3) -> Option<(Vec3, Vec3)> {
        let arc = Arc::new(a, b)?;
        let (amplitude, peak) = arc.peak();
        if amplitude <= self.cos_r || peak <= 0.0 || peak >= arc.omega {
            return None;
        }
        let half = (self.cos_r / amplitude).acos();
        let entry = (peak - half).clamp(0.0, arc.omega);
        let exit = (peak + half).clamp(0.0, arc.omega);
        Some((self.snap(arc.at(entry)), self.snap(arc.at(exit))))
    }

    /// Moves a point radially onto the cap boundary.
    fn snap(&self, v: Vec3) -> Vec3 {
        self.boundary_point(boundary_angle(v))
    }

    fn boundary_point(&self, t: f64) -> Vec3 {
        Vec3::new(self.cos_r, self.sin_r * t.cos(), self.sin_r * t.sin())
    }

    /// The whole cap boundary, counter-clockwise.
    fn disk(&self) -> Vec<Vec3> {
        let mut ring = vec![self.boundary_point(0.0)];
        self.interpolate(0.0, TAU, &mut ring);
        ring
    }

    /// Appends boundary points strictly between `from` and `from + sweep`.
    fn interpolate(&self, from: f64, sweep: f64, ring: &mut Vec<Vec3>) {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "sweep is in [0, 2π], so the step count is small and non-negative"
        )]
        let steps = (sweep / BOUNDARY_STEP).ceil() as usize;
        for i in 1..steps {
            let t = from + sweep * (i as f64) / (steps as f64);
            ring.push(self.boundary_point(t));
        }
    }

    fn rejoin(&self, fragments: &[Fragment], out: &mut Vec<Vec<Vec3>>) {
        let mut used = vec![false; fragments.len()];
        for first in 0..fragments.len() {
            if used[first] {
                continue;
            }
            used[first] = true;
            let mut ring = fragments[first].points.clone();
            let mut current = first;
            loop {
                let exit = fragments[current].exit;
                let mut best: Option<(usize, f64)> = None;
                for (index, fragment) in fragments.iter().enumerate() {
                    if used[index] && index != first {
                        continue;
                    }
                    let sweep = ccw_sweep(exit, fragment.entry);
                    if best.is_none_or(|(_, d)| sweep < d) {
                        best = Some((index, sweep));
                    }
                }
                let Some((next, sweep)) = best else {
                    break;
                };
                self.interpolate(exit, sweep, &mut ring);
                if next == first {
                    break;
                }
                used[next] = true;
                ring.extend_from_slice(&fragments[next].points);
                current = next;
            }
            out.push(ring);
        }
    }
}

/// Decides whether the cap boundary lies inside a polygon none of whose rings cross it.
///
/// Walking inward from the boundary, the outermost ring on either side is crossed first. It
/// winds clockwise exactly when the polygon was already entered at the boundary.
fn boundary_inside(visible: &[Vec<Vec3>], hidden: &[&[Vec3]]) -> bool {
    let areas: Vec<f64> = if visible.is_empty() {
        hidden.iter().map(|r| projected_area(r, 1.0)).collect()
    } else {
        visible.iter().map(|r| projected_area(r, -1.0)).collect()
    };
    areas
        .into_iter()
        .max_by(|a, b| a.abs().total_cmp(&b.abs()))
        .is_some_and(|area| area < 0.0)
}

/// Signed area of `ring` after stereographic projection from the pole `(pole, 0, 0)`, positive
/// when the ring runs counter-clockwise seen from outside the sphere.
///
/// Edges are subdivided along their great circles first, so long edges keep their shape.
fn projected_area(ring: &[Vec3], pole: f64) -> f64 {
    let project = |v: Vec3| {
        let k = 1.0 / (1.0 - pole * v.x);
        (v.y * k, v.z * k)
    };
    let n = ring.len();
    let mut points = Vec::with_capacity(n);
    for (i, &a) in ring.iter().enumerate() {
        points.push(project(a));
        let Some(arc) = Arc::new(a, ring[(i + 1) % n]) else {
            continue;
        };
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "omega is in [0, π], so the step count is small and non-negative"
        )]
        let steps = (arc.omega / BOUNDARY_STEP).ceil() as usize;
        for j in 1..steps {
            points.push(project(arc.at(arc.omega * (j as f64) / (steps as f64))));
        }
    }
    let m = points.len();
    let mut sum = 0.0;
    for (i, &(x0, y0)) in points.iter().enumerate() {
        let (x1, y1) = points[(i + 1) % m];
        sum += x0 * y1 - x1 * y0;
    }
    // Projecting from `-x` keeps the orientation seen from outside; projecting from `+x` flips it.
    -pole * sum * 0.5
}

fn boundary_angle(v: Vec3) -> f64 {
    if v.y == 0.0 && v.z == 0.0 {
        return 0.0;
    }
    v.z.atan2(v.y)
}

/// Counter-clockwise angle from `from` to `to`, in `[0, 2π)`.
fn ccw_sweep(from: f64, to: f64) -> f64 {
    let mut d = to - from;
    if d < 0.0 {
        d += TAU;
    }
    if d >= TAU {
        d -= TAU;
    }
    d
}

fn wrap(theta: f64) -> f64 {
    if theta > PI {
        theta - TAU
    } else if theta <= -PI {
        theta + TAU
    } else {
        theta
    }
}
