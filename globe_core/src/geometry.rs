// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geographic geometry in longitude/latitude degrees.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

/// A position in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LonLat {
    /// Longitude, east positive.
    pub lon: f64,
    /// Latitude, north positive.
    pub lat: f64,
}

impl LonLat {
    /// Creates a position from longitude and latitude in degrees.
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// A linear ring. The closing point is implicit (first and last are not repeated).
pub type Ring = Vec<LonLat>;

/// A polygon: one exterior ring followed by zero or more holes.
///
/// Construction normalizes winding so the exterior runs counter-clockwise and holes run
/// clockwise in lon/lat, whatever convention the source data used.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    rings: Vec<Ring>,
}

impl Polygon {
    /// Creates a polygon from its rings, exterior first.
    ///
    /// A repeated closing point is dropped. Rings with fewer than three distinct positions are
    /// discarded; if the exterior is discarded the polygon is empty.
    #[must_use]
    pub fn new(rings: impl IntoIterator<Item = Ring>) -> Self {
        let mut out = Vec::new();
        for (index, mut ring) in rings.into_iter().enumerate() {
            if ring.len() > 1 && ring.first() == ring.last() {
                ring.pop();
            }
            if ring.len() < 3 {
                if index == 0 {
                    return Self::default();
                }
                continue;
            }
            let area = signed_area(&ring);
            let exterior = index == 0;
            if (exterior && area < 0.0) || (!exterior && area > 0.0) {
                ring.reverse();
            }
            out.push(ring);
        }
        Self { rings: out }
    }

    /// All rings, exterior first.
    #[must_use]
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// The exterior ring, if the polygon is not empty.
    #[must_use]
    pub fn exterior(&self) -> Option<&Ring> {
        self.rings.first()
    }

    /// The hole rings.
    #[must_use]
    pub fn holes(&self) -> &[Ring] {
        self.rings.get(1..).unwrap_or(&[])
    }

    /// Returns `true` if the polygon has no exterior.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
}

/// Renderable geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// The whole sphere; renders as the outline of the visible region.
    Sphere,
    /// A single polygon.
    Polygon(Polygon),
    /// Several polygons sharing one path.
    MultiPolygon(Vec<Polygon>),
}

impl Geometry {
    /// Iterates the polygons of this geometry. The sphere has none.
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        let slice: &[Polygon] = match self {
            Self::Sphere => &[],
            Self::Polygon(p) => core::slice::from_ref(p),
            Self::MultiPolygon(ps) => ps,
        };
        slice.iter()
    }
}

/// A named geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    /// Display name (for example a country name).
    pub name: Option<String>,
    /// The feature geometry.
    pub geometry: Geometry,
}

/// An ordered list of features. Order is draw order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureCollection {
    /// Features in source order.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns `true` if there are no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Shoelace area in lon/lat; positive for counter-clockwise rings.
fn signed_area(ring: &[LonLat]) -> f64 {
    let n = ring.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        sum += a.lon * b.lat - b.lon * a.lat;
    }
    sum * 0.5
}
