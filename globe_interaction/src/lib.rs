// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture and sizing controllers for an interactive vector globe.
//!
//! - [`TrackballController`] turns pointer and touch drags into new central meridian/parallel
//!   values using trackball mechanics ([`point_to_sphere`], [`rotation_between`]).
//! - [`ZoomController`] turns wheel deltas into a bounded zoom factor.
//! - [`ResponsiveSizer`] derives a square render extent from the container size.
//!
//! The controllers only compute values. Applying them to a projection and reporting them to the
//! view-state owner is the engine's job.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

#[cfg(not(feature = "std"))]
mod float;
mod input;
mod sizing;
mod trackball;
mod zoom;

pub use input::{
    EventScope, InputResponse, PointerEvent, PointerKind, TouchEvent, TouchPhase, WheelEvent,
};
pub use sizing::{ResponsiveSizer, square_extent};
pub use trackball::{
    DragSession, DragUpdate, GestureOutcome, RotationDelta, TrackballController, point_to_sphere,
    rotation_between,
};
pub use zoom::ZoomController;
