// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Toolkit-neutral input events.
//!
//! Positions are in surface-local pixels (the render extent's coordinate space). Hosts translate
//! their native events into these before handing them to the engine.

use kurbo::Point;
use smallvec::SmallVec;

/// What a pointer did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    /// Button pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
}

/// Where an event was observed.
///
/// Gestures start only on the surface, but once a drag is active, moves and releases anywhere
/// in the document still belong to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventScope {
    /// On the globe surface.
    #[default]
    Surface,
    /// Anywhere in the hosting document or window.
    Document,
}

/// A mouse or pen event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Event kind.
    pub kind: PointerKind,
    /// Surface-local position.
    pub position: Point,
    /// Where the event was observed.
    pub scope: EventScope,
}

impl PointerEvent {
    /// A surface-scoped event.
    #[must_use]
    pub fn new(kind: PointerKind, position: impl Into<Point>) -> Self {
        Self {
            kind,
            position: position.into(),
            scope: EventScope::Surface,
        }
    }

    /// Sets the scope.
    #[must_use]
    pub fn with_scope(mut self, scope: EventScope) -> Self {
        self.scope = scope;
        self
    }
}

/// Touch lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    /// One or more touches began.
    Start,
    /// Touches moved.
    Move,
    /// Touches lifted.
    End,
    /// The platform cancelled the touches.
    Cancel,
}

/// A touch event with every active touch point.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// Event phase.
    pub phase: TouchPhase,
    /// Active touch points, surface-local.
    pub touches: SmallVec<[Point; 4]>,
}

impl TouchEvent {
    /// Creates a touch event.
    #[must_use]
    pub fn new(phase: TouchPhase, touches: impl IntoIterator<Item = Point>) -> Self {
        Self {
            phase,
            touches: touches.into_iter().collect(),
        }
    }

    /// The touch point, if exactly one finger is down.
    #[must_use]
    pub fn single(&self) -> Option<Point> {
        match self.touches.as_slice() {
            [p] => Some(*p),
            _ => None,
        }
    }
}

/// A scroll-wheel event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    /// Vertical delta; positive scrolls down (zooms out).
    pub delta_y: f64,
}

impl WheelEvent {
    /// Creates a wheel event.
    #[must_use]
    pub const fn new(delta_y: f64) -> Self {
        Self { delta_y }
    }
}

/// What the host should do with the native event after the engine saw it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputResponse {
    /// Suppress the platform's default action (text selection, page scroll).
    pub prevent_default: bool,
}

impl InputResponse {
    /// Leave the default action alone.
    pub const PASS: Self = Self {
        prevent_default: false,
    };

    /// Suppress the default action.
    pub const PREVENT_DEFAULT: Self = Self {
        prevent_default: true,
    };
}
