// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GeoJSON `FeatureCollection` parsing.
//!
//! Only what the globe draws is kept: `Polygon` and `MultiPolygon` features. Other geometry
//! types and null geometries are skipped. Positions may carry extra ordinates (elevation), which
//! are ignored.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use globe_core::{Feature, FeatureCollection, Geometry, LonLat, Polygon, Ring};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::GeoDataError;

/// Property keys consulted for a feature's display name, in order.
const NAME_KEYS: [&str; 4] = ["name", "NAME", "ADMIN", "admin"];

#[derive(Deserialize)]
struct RawCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Option<serde_json::Map<String, Value>>,
    #[serde(default)]
    geometry: Option<RawGeometry>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    #[serde(other)]
    Unsupported,
}

/// Parses a GeoJSON `FeatureCollection` into drawable features, preserving source order.
///
/// # Errors
///
/// Returns [`GeoDataError::Json`] for malformed input and
/// [`GeoDataError::NotAFeatureCollection`] when the top-level `type` is anything else.
pub fn parse_feature_collection(text: &str) -> Result<FeatureCollection, GeoDataError> {
    let raw: RawCollection = serde_json::from_str(text)?;
    if raw.kind != "FeatureCollection" {
        return Err(GeoDataError::NotAFeatureCollection { found: raw.kind });
    }
    let total = raw.features.len();
    let features: Vec<Feature> = raw
        .features
        .into_iter()
        .enumerate()
        .filter_map(|(index, feature)| convert_feature(index, feature))
        .collect();
    debug!(kept = features.len(), total, "parsed feature collection");
    Ok(FeatureCollection { features })
}

fn convert_feature(index: usize, feature: RawFeature) -> Option<Feature> {
    let name = feature.properties.as_ref().and_then(feature_name);
    let geometry = match feature.geometry {
        Some(RawGeometry::Polygon { coordinates }) => {
            let polygon = convert_polygon(coordinates);
            (!polygon.is_empty()).then_some(Geometry::Polygon(polygon))
        }
        Some(RawGeometry::MultiPolygon { coordinates }) => {
            let polygons: Vec<Polygon> = coordinates
                .into_iter()
                .map(convert_polygon)
                .filter(|p| !p.is_empty())
                .collect();
            (!polygons.is_empty()).then_some(Geometry::MultiPolygon(polygons))
        }
        Some(RawGeometry::Unsupported) | None => {
            debug!(index, name = name.as_deref(), "skipping feature without polygon geometry");
            return None;
        }
    };
    if geometry.is_none() {
        warn!(index, name = name.as_deref(), "skipping feature with degenerate polygons");
    }
    Some(Feature {
        name,
        geometry: geometry?,
    })
}

fn feature_name(properties: &serde_json::Map<String, Value>) -> Option<String> {
    NAME_KEYS
        .iter()
        .find_map(|key| properties.get(*key).and_then(Value::as_str))
        .map(String::from)
}

fn convert_polygon(rings: Vec<Vec<Vec<f64>>>) -> Polygon {
    Polygon::new(rings.into_iter().map(convert_ring))
}

fn convert_ring(positions: Vec<Vec<f64>>) -> Ring {
    positions
        .into_iter()
        .filter_map(|position| match position.as_slice() {
            [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Some(LonLat::new(*lon, *lat)),
            _ => None,
        })
        .collect()
}
