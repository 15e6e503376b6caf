// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Standalone SVG documents for download.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use globe_core::{RenderExtent, ViewState};

use crate::format::round_tenth_away;
use crate::surface::SvgSurface;

/// A serialized globe, ready to be written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SvgExport {
    /// Suggested file name.
    pub filename: String,
    /// The complete document.
    pub document: String,
}

impl SvgExport {
    /// Serializes `surface` and names the file after `view`.
    #[must_use]
    pub fn from_surface(surface: &SvgSurface, view: &ViewState) -> Self {
        Self {
            filename: export_filename(view),
            document: svg_document(&surface.to_inner_svg(), surface.extent()),
        }
    }
}

/// The download name for a view: `globe-{meridian}-{parallel}-{roll}-{zoom}x.svg`, each value
/// with one decimal, ties rounded away from zero.
#[must_use]
pub fn export_filename(view: &ViewState) -> String {
    format!(
        "globe-{:.1}-{:.1}-{:.1}-{:.1}x.svg",
        round_tenth_away(view.central_meridian),
        round_tenth_away(view.central_parallel),
        round_tenth_away(view.z_rotation),
        round_tenth_away(view.zoom),
    )
}

/// Wraps drawn content in a self-contained SVG document of the given size.
#[must_use]
pub fn svg_document(inner: &str, extent: RenderExtent) -> String {
    let RenderExtent { width, height } = extent;
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\">\n{inner}\n</svg>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_has_one_decimal_per_field() {
        let view = ViewState {
            central_meridian: -73.987,
            central_parallel: 40.76,
            z_rotation: -0.0,
            zoom: 2.0,
            ..ViewState::default()
        };
        assert_eq!(export_filename(&view), "globe--74.0-40.8-0.0-2.0x.svg");
    }

    #[test]
    fn filename_ties_round_away_from_zero() {
        let view = ViewState {
            central_meridian: 1.25,
            central_parallel: -1.25,
            zoom: 1.25,
            ..ViewState::default()
        };
        assert_eq!(export_filename(&view), "globe-1.3--1.3-0.0-1.3x.svg");
    }

    #[test]
    fn document_wraps_content() {
        let doc = svg_document("<path/>", RenderExtent::square(480));
        assert_eq!(
            doc,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"480\" height=\"480\" \
             viewBox=\"0 0 480 480\">\n<path/>\n</svg>"
        );
    }

    #[test]
    fn empty_surface_exports_an_empty_document() {
        let export = SvgExport::from_surface(&SvgSurface::new(), &ViewState::default());
        assert_eq!(export.filename, "globe-0.0-0.0-0.0-1.0x.svg");
        assert!(export.document.ends_with("viewBox=\"0 0 0 0\">\n\n</svg>"));
    }
}
