// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core model for an interactive vector globe.
//!
//! This crate holds the pieces every other globe crate builds on:
//! - **View state**: the caller-owned orientation, zoom and projection family.
//! - **Projections**: orthographic and perspective ("satellite") transforms from
//!   longitude/latitude to screen coordinates, including small-circle clipping.
//! - **Path generation**: turning sphere, polygon and multipolygon geometry into
//!   `kurbo::BezPath`s and SVG path data.
//!
//! Rendering, input handling and data loading live in sibling crates.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod clip;
mod config;
#[cfg(not(feature = "std"))]
mod float;
mod geometry;
mod path;
mod projection;
mod vec3;
mod view;

pub use config::{
    CONTAINER_FILL_RATIO, DistanceLimits, GlobeConfig, PARALLEL_LIMIT, ProjectionConfig,
    ZoomLimits,
};
pub use geometry::{Feature, FeatureCollection, Geometry, LonLat, Polygon, Ring};
pub use path::{PathGenerator, write_svg_path};
pub use projection::{Projection, Rotation, calculate_scale, satellite_clip_angle};
pub use vec3::Vec3;
pub use view::{ParseProjectionTypeError, ProjectionType, RenderExtent, ViewState};
