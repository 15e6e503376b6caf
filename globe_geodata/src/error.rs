// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::string::String;

/// Errors from the geometry source boundary.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GeoDataError {
    /// The document is not valid JSON, or not shaped like GeoJSON.
    #[error("invalid GeoJSON: {0}")]
    Json(serde_json::Error),
    /// The top-level object is not a `FeatureCollection`.
    #[error("expected a FeatureCollection, found `{found}`")]
    NotAFeatureCollection {
        /// The `type` member that was found.
        found: String,
    },
    /// The source could not provide data (for example a failed fetch on the host side).
    #[error("geometry source unavailable: {0}")]
    Unavailable(String),
    /// Reading a geometry file failed.
    #[cfg(feature = "std")]
    #[error("failed to read `{}`", path.display())]
    Io {
        /// The file that could not be read.
        path: std::path::PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for GeoDataError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Error returned when parsing an unknown resolution name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown resolution `{0}` (expected `low` or `medium`)")]
pub struct ParseResolutionError(pub String);
