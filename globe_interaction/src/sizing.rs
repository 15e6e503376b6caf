// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container-driven render extent.

use globe_core::{CONTAINER_FILL_RATIO, RenderExtent};
use kurbo::Size;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// The square extent that fits `container` at `fill_ratio`.
///
/// Returns `None` while the container is not measurable (a zero, negative or non-finite
/// dimension).
#[must_use]
pub fn square_extent(container: Size, fill_ratio: f64) -> Option<RenderExtent> {
    let min = container.width.min(container.height);
    if !min.is_finite() || min <= 0.0 {
        return None;
    }
    let side = (min * fill_ratio).floor();
    if !side.is_finite() || side <= 0.0 {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to the u32 range"
    )]
    let side = side.min(f64::from(u32::MAX)) as u32;
    Some(RenderExtent::square(side))
}

/// Observes container size changes and derives the render extent.
#[derive(Clone, Debug)]
pub struct ResponsiveSizer {
    fill_ratio: f64,
    attached: bool,
    extent: Option<RenderExtent>,
}

impl Default for ResponsiveSizer {
    fn default() -> Self {
        Self::new(CONTAINER_FILL_RATIO)
    }
}

impl ResponsiveSizer {
    /// Creates an attached sizer.
    #[must_use]
    pub fn new(fill_ratio: f64) -> Self {
        Self {
            fill_ratio,
            attached: true,
            extent: None,
        }
    }

    /// The most recently derived extent.
    #[must_use]
    pub fn extent(&self) -> Option<RenderExtent> {
        self.extent
    }

    /// Returns `true` while observing.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Handles a container size observation (including the first one after attaching).
    ///
    /// Returns the derived extent, or `None` when detached or the container is not measurable.
    pub fn observe(&mut self, container: Size) -> Option<RenderExtent> {
        if !self.attached {
            return None;
        }
        let extent = square_extent(container, self.fill_ratio)?;
        self.extent = Some(extent);
        Some(extent)
    }

    /// Resumes observation.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stops observation; later observations are ignored.
    pub fn detach(&mut self) {
        self.attached = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_is_square_and_floored() {
        assert_eq!(
            square_extent(Size::new(1000.0, 751.0), 0.8),
            Some(RenderExtent::square(600))
        );
        assert_eq!(
            square_extent(Size::new(333.0, 999.0), 0.8),
            Some(RenderExtent::square(266))
        );
    }

    #[test]
    fn zero_sized_container_is_not_measurable() {
        assert_eq!(square_extent(Size::new(0.0, 500.0), 0.8), None);
        let mut sizer = ResponsiveSizer::default();
        assert_eq!(sizer.observe(Size::new(500.0, 0.0)), None);
        assert_eq!(sizer.extent(), None);
    }

    #[test]
    fn detached_sizer_ignores_observations() {
        let mut sizer = ResponsiveSizer::default();
        assert_eq!(sizer.observe(Size::new(100.0, 100.0)), Some(RenderExtent::square(80)));
        sizer.detach();
        assert_eq!(sizer.observe(Size::new(200.0, 200.0)), None);
        assert_eq!(sizer.extent(), Some(RenderExtent::square(80)));
        sizer.attach();
        assert_eq!(sizer.observe(Size::new(200.0, 200.0)), Some(RenderExtent::square(160)));
    }
}
