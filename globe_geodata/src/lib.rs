// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry source boundary for an interactive vector globe.
//!
//! Country outlines arrive as GeoJSON `FeatureCollection`s in two detail tiers
//! ([`Resolution`]). This crate parses them into [`globe_core::FeatureCollection`]s, tracks the
//! one-shot load lifecycle ([`LoadState`]) and caches each tier once it has loaded.
//!
//! With the `std` feature, tiers can be read from a data directory ([`DirectorySource`]).

#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod error;
mod geojson;
mod resolution;
mod source;

pub use error::{GeoDataError, ParseResolutionError};
pub use geojson::parse_feature_collection;
pub use resolution::Resolution;
#[cfg(feature = "std")]
pub use source::{DirectorySource, load_from_dir};
pub use source::{GeometryCache, GeometrySource, InMemorySource, LoadState};
