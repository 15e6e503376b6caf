// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry sources and the one-shot load lifecycle.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;

use globe_core::FeatureCollection;
use tracing::{error, info};

use crate::error::GeoDataError;
use crate::geojson::parse_feature_collection;
use crate::resolution::Resolution;

/// Where geometry comes from.
///
/// A source returns the raw GeoJSON text for a resolution tier. Parsing and caching are handled
/// by [`GeometryCache`].
pub trait GeometrySource {
    /// Fetches the GeoJSON document for `resolution`.
    ///
    /// # Errors
    ///
    /// Returns an error when the tier cannot be provided.
    fn fetch(&mut self, resolution: Resolution) -> Result<String, GeoDataError>;
}

/// The lifecycle of a geometry load: loading, then either failed or ready.
#[derive(Debug, Default)]
pub enum LoadState {
    /// No data yet.
    #[default]
    Loading,
    /// The load failed; nothing can be drawn.
    Failed(GeoDataError),
    /// The features are available.
    Ready(Arc<FeatureCollection>),
}

impl LoadState {
    /// Returns `true` once features are available.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The loaded features, if ready.
    #[must_use]
    pub fn collection(&self) -> Option<&Arc<FeatureCollection>> {
        match self {
            Self::Ready(collection) => Some(collection),
            _ => None,
        }
    }

    /// The failure, if the load failed.
    #[must_use]
    pub fn error(&self) -> Option<&GeoDataError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<Result<FeatureCollection, GeoDataError>> for LoadState {
    fn from(result: Result<FeatureCollection, GeoDataError>) -> Self {
        match result {
            Ok(collection) => Self::Ready(Arc::new(collection)),
            Err(err) => Self::Failed(err),
        }
    }
}

/// GeoJSON documents held in memory, one per tier.
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    documents: [Option<String>; 2],
}

impl InMemorySource {
    /// An empty source; every fetch fails until a document is inserted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document for `resolution`.
    #[must_use]
    pub fn with_document(mut self, resolution: Resolution, text: impl Into<String>) -> Self {
        self.documents[resolution.index()] = Some(text.into());
        self
    }
}

impl GeometrySource for InMemorySource {
    fn fetch(&mut self, resolution: Resolution) -> Result<String, GeoDataError> {
        self.documents[resolution.index()]
            .clone()
            .ok_or_else(|| GeoDataError::Unavailable(alloc::format!("no {resolution} document")))
    }
}

/// Reads `<root>/<file_name>` for each tier.
#[cfg(feature = "std")]
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: std::path::PathBuf,
}

#[cfg(feature = "std")]
impl DirectorySource {
    /// A source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The path of the file for `resolution`.
    #[must_use]
    pub fn path_for(&self, resolution: Resolution) -> std::path::PathBuf {
        self.root.join(resolution.file_name())
    }
}

#[cfg(feature = "std")]
impl GeometrySource for DirectorySource {
    fn fetch(&mut self, resolution: Resolution) -> Result<String, GeoDataError> {
        let path = self.path_for(resolution);
        std::fs::read_to_string(&path).map_err(|source| GeoDataError::Io { path, source })
    }
}

/// Reads and parses the file for `resolution` under `dir`.
///
/// # Errors
///
/// Returns [`GeoDataError::Io`] if the file cannot be read, or a parse error.
#[cfg(feature = "std")]
pub fn load_from_dir(
    dir: impl AsRef<std::path::Path>,
    resolution: Resolution,
) -> Result<FeatureCollection, GeoDataError> {
    let text = DirectorySource::new(dir.as_ref()).fetch(resolution)?;
    parse_feature_collection(&text)
}

/// Loads each tier at most once and shares the parsed result.
///
/// Failures are not cached, so a later call retries the source.
#[derive(Debug)]
pub struct GeometryCache<S> {
    source: S,
    loaded: [Option<Arc<FeatureCollection>>; 2],
}

impl<S: GeometrySource> GeometryCache<S> {
    /// Wraps `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            loaded: [None, None],
        }
    }

    /// The wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the features for `resolution`, fetching and parsing them on first use.
    pub fn load(&mut self, resolution: Resolution) -> LoadState {
        if let Some(collection) = &self.loaded[resolution.index()] {
            return LoadState::Ready(Arc::clone(collection));
        }
        let result = self
            .source
            .fetch(resolution)
            .and_then(|text| parse_feature_collection(&text));
        match result {
            Ok(collection) => {
                info!(%resolution, features = collection.len(), "geometry loaded");
                let collection = Arc::new(collection);
                self.loaded[resolution.index()] = Some(Arc::clone(&collection));
                LoadState::Ready(collection)
            }
            Err(err) => {
                error!(%resolution, error = %err, "geometry load failed");
                LoadState::Failed(err)
            }
        }
    }
}
