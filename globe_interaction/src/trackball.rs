// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trackball rotation.
//!
//! A 2D gesture point is lifted onto a virtual unit hemisphere facing the viewer. The rotation
//! carrying the gesture's start vector to its current vector is converted into longitude and
//! latitude deltas with a small-angle approximation: the axis components scaled by
//! `angle / sin(angle)`. The approximation is exact for pure yaw or pure pitch and drifts only
//! slightly for diagonal drags.

use core::f64::consts::PI;

use globe_core::{PARALLEL_LIMIT, RenderExtent, Vec3, ViewState};
use kurbo::Point;
use tracing::debug;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::input::{EventScope, InputResponse, PointerEvent, PointerKind, TouchEvent, TouchPhase};

/// Lifts a surface point onto the trackball sphere.
///
/// Coordinates are normalized by half the smaller dimension around the center, with y pointing
/// up. Points inside the inscribed circle land on the front hemisphere; points outside are
/// projected onto its rim (`z = 0`).
#[must_use]
pub fn point_to_sphere(x: f64, y: f64, width: f64, height: f64) -> Vec3 {
    let half = width.min(height) / 2.0;
    let nx = (x - width / 2.0) / half;
    let ny = -(y - height / 2.0) / half;
    let r2 = nx * nx + ny * ny;
    if r2 <= 1.0 {
        Vec3::new(nx, ny, (1.0 - r2).sqrt())
    } else {
        let r = r2.sqrt();
        Vec3::new(nx / r, ny / r, 0.0)
    }
}

/// Angular change produced by a trackball motion, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationDelta {
    /// Change of the central meridian.
    pub longitude: f64,
    /// Change of the central parallel.
    pub latitude: f64,
    /// Change of the roll. Always zero: the trackball does not roll.
    pub roll: f64,
}

/// The rotation carrying `v0` onto `v1`, as view-angle deltas.
///
/// Identical or degenerate vectors yield a zero delta.
#[must_use]
pub fn rotation_between(v0: Vec3, v1: Vec3) -> RotationDelta {
    let axis = v0.cross(v1);
    let angle = v0.dot(v1).clamp(-1.0, 1.0).acos();
    let k = angle / angle.sin();
    let k = if k.is_finite() { k } else { 0.0 };
    RotationDelta {
        longitude: -axis.y * k * 180.0 / PI + 0.0,
        latitude: axis.x * k * 180.0 / PI + 0.0,
        roll: 0.0,
    }
}

/// The state captured when a drag begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    /// Surface point where the gesture started.
    pub start: Point,
    /// Central meridian at the start.
    pub meridian: f64,
    /// Central parallel at the start.
    pub parallel: f64,
}

/// New view angles produced by a drag step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragUpdate {
    /// New central meridian; unbounded.
    pub meridian: f64,
    /// New central parallel, clamped to `[-90, 90]`.
    pub parallel: f64,
}

/// The result of routing an event through the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureOutcome {
    /// How the host should treat the native event.
    pub response: InputResponse,
    /// View angles to report upstream, if the event moved the globe.
    pub update: Option<DragUpdate>,
}

/// Turns drag gestures into view-angle updates.
///
/// Every step is computed relative to the session start, so accumulated error does not build up
/// over long drags.
#[derive(Clone, Debug, Default)]
pub struct TrackballController {
    session: Option<DragSession>,
}

impl TrackballController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a drag session is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Starts a session at `position`, snapshotting the current view angles.
    pub fn begin(&mut self, position: Point, view: &ViewState) {
        debug!(x = position.x, y = position.y, "drag start");
        self.session = Some(DragSession {
            start: position,
            meridian: view.central_meridian,
            parallel: view.central_parallel,
        });
    }

    /// Computes the view angles for the pointer at `position` within `extent`.
    ///
    /// Returns `None` when no session is active or the extent is empty.
    pub fn drag(&self, position: Point, extent: RenderExtent) -> Option<DragUpdate> {
        let session = self.session.as_ref()?;
        if extent.is_empty() {
            return None;
        }
        let size = extent.size();
        let v0 = point_to_sphere(session.start.x, session.start.y, size.width, size.height);
        let v1 = point_to_sphere(position.x, position.y, size.width, size.height);
        let delta = rotation_between(v0, v1);
        Some(DragUpdate {
            meridian: session.meridian + delta.longitude,
            parallel: (session.parallel + delta.latitude).clamp(-PARALLEL_LIMIT, PARALLEL_LIMIT),
        })
    }

    /// Ends the session. Returns `true` if one was active.
    pub fn end(&mut self) -> bool {
        let ended = self.session.take().is_some();
        if ended {
            debug!("drag end");
        }
        ended
    }

    /// Routes a pointer event.
    ///
    /// Presses start a session only on the surface and suppress text selection. While a session
    /// is active, moves and releases are accepted from any scope.
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        view: &ViewState,
        extent: RenderExtent,
    ) -> GestureOutcome {
        match event.kind {
            PointerKind::Down if event.scope == EventScope::Surface => {
                self.begin(event.position, view);
                GestureOutcome {
                    response: InputResponse::PREVENT_DEFAULT,
                    update: None,
                }
            }
            PointerKind::Down => GestureOutcome::default(),
            PointerKind::Move => GestureOutcome {
                response: InputResponse::PASS,
                update: self.drag(event.position, extent),
            },
            PointerKind::Up => {
                self.end();
                GestureOutcome::default()
            }
        }
    }

    /// Routes a touch event.
    ///
    /// Only single-finger gestures rotate; multi-touch starts and moves are ignored. Handled
    /// starts and moves suppress page scrolling.
    pub fn handle_touch(
        &mut self,
        event: &TouchEvent,
        view: &ViewState,
        extent: RenderExtent,
    ) -> GestureOutcome {
        match event.phase {
            TouchPhase::Start => match event.single() {
                Some(position) => {
                    self.begin(position, view);
                    GestureOutcome {
                        response: InputResponse::PREVENT_DEFAULT,
                        update: None,
                    }
                }
                None => GestureOutcome::default(),
            },
            TouchPhase::Move => match event.single() {
                Some(position) if self.is_dragging() => GestureOutcome {
                    response: InputResponse::PREVENT_DEFAULT,
                    update: self.drag(position, extent),
                },
                _ => GestureOutcome::default(),
            },
            TouchPhase::End | TouchPhase::Cancel => {
                self.end();
                GestureOutcome::default()
            }
        }
    }
}
