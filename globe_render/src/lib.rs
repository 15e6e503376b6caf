// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering for an interactive vector globe.
//!
//! The [`Globe`] engine ties the pieces together. It takes the caller's [`ViewState`] each
//! cycle, picks a render tier and drives the [`RenderPipeline`], which emits [`MarkDiff`]s for a
//! [`VectorSurface`] to apply:
//! - **Full renders** rebuild the projection and every mark when the shape of the scene
//!   changes (extent, theme, projection family, distance, zoom, geometry).
//! - **Fast updates** rotate the existing projection and rewrite paths in place.
//! - **Wheel zoom** rescales the existing projection in place.
//!
//! [`SvgSurface`] is a simple in-memory surface that can be exported as a standalone SVG
//! document. [`proj_string`] describes the current view as a PROJ definition.
//!
//! [`ViewState`]: globe_core::ViewState

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod export;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod globe;
mod mark;
mod pipeline;
mod proj_string;
mod surface;
mod theme;

pub use export::{SvgExport, export_filename, svg_document};
pub use globe::{Globe, GlobeStatus, RenderTier, ViewStateSink};
pub use mark::{MarkClass, MarkDiff, MarkId, MarkScene, PathMark};
pub use pipeline::RenderPipeline;
pub use proj_string::{FALLBACK_HEIGHT_M, WGS84_RADIUS_M, proj_string, view_proj_string};
pub use surface::{SvgSurface, VectorSurface};
pub use theme::{Theme, ThemeColors};
