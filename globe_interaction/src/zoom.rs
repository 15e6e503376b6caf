// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wheel zoom.

use globe_core::ZoomLimits;
use tracing::trace;

use crate::input::WheelEvent;

/// Maps wheel deltas onto a bounded zoom factor.
///
/// The controller keeps its own copy of the current zoom so consecutive wheel events within one
/// frame accumulate before the caller's view state catches up. [`ZoomController::sync`] re-aligns
/// it with the caller each cycle.
#[derive(Clone, Debug)]
pub struct ZoomController {
    current: f64,
    limits: ZoomLimits,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}

impl ZoomController {
    /// Creates a controller at the minimum zoom.
    #[must_use]
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            current: limits.min,
            limits,
        }
    }

    /// The cached zoom factor.
    #[must_use]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// The limits in use.
    #[must_use]
    pub fn limits(&self) -> &ZoomLimits {
        &self.limits
    }

    /// Replaces the cached zoom with the caller's value, clamped.
    pub fn sync(&mut self, zoom: f64) {
        self.current = self.limits.clamp(zoom);
    }

    /// Applies one wheel event and returns the new zoom factor.
    ///
    /// Scrolling up (negative delta) zooms in. Non-finite deltas leave the zoom unchanged.
    pub fn apply_wheel(&mut self, event: &WheelEvent) -> f64 {
        if !event.delta_y.is_finite() {
            return self.current;
        }
        let next = self
            .limits
            .clamp(self.current - event.delta_y * self.limits.wheel_sensitivity);
        trace!(delta = event.delta_y, zoom = next, "wheel");
        self.current = next;
        next
    }
}
