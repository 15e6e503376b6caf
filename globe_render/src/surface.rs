// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vector surfaces that consume mark diffs.

extern crate alloc;

use alloc::string::String;
use core::fmt::Write;

use globe_core::{RenderExtent, write_svg_path};
use peniko::Brush;

use crate::mark::{MarkDiff, MarkId, MarkScene, PathMark};

/// Something the pipeline draws into.
///
/// Implementations mirror the pipeline's marks by applying diffs in order. Sizing is reported
/// separately so a surface can update its own dimensions.
pub trait VectorSurface {
    /// Applies a batch of diffs.
    fn apply_diffs(&mut self, diffs: &[MarkDiff]);

    /// Called when the render extent changes.
    fn set_extent(&mut self, extent: RenderExtent) {
        let _ = extent;
    }
}

/// An in-memory SVG element tree.
#[derive(Clone, Debug, Default)]
pub struct SvgSurface {
    marks: MarkScene,
    extent: RenderExtent,
}

impl SvgSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current size.
    #[must_use]
    pub fn extent(&self) -> RenderExtent {
        self.extent
    }

    /// Number of path elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` when nothing has been drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// The element for `id`.
    #[must_use]
    pub fn mark(&self, id: MarkId) -> Option<&PathMark> {
        self.marks.get(id).map(|mark| &**mark)
    }

    /// The drawn content: one `<path>` per mark, in draw order.
    #[must_use]
    pub fn to_inner_svg(&self) -> String {
        let mut out = String::new();
        for (_, mark) in self.marks.iter() {
            if !out.is_empty() {
                out.push('\n');
            }
            write_path_element(&mut out, mark);
        }
        out
    }
}

impl VectorSurface for SvgSurface {
    fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
        self.marks.apply_diffs(diffs);
    }

    fn set_extent(&mut self, extent: RenderExtent) {
        self.extent = extent;
    }
}

fn write_path_element(out: &mut String, mark: &PathMark) {
    out.push_str(r#"<path class=""#);
    out.push_str(mark.class.as_str());
    out.push('"');
    // A hidden feature stays in the tree without path data.
    if !mark.is_empty() {
        out.push_str(r#" d=""#);
        // Writing to a `String` cannot fail.
        let _ = write_svg_path(&mark.path, out);
        out.push('"');
    }
    write_paint_attr(out, "fill", &mark.fill);
    if mark.stroke_width > 0.0 {
        write_paint_attr(out, "stroke", &mark.stroke);
        let _ = write!(out, r#" stroke-width="{}""#, mark.stroke_width);
    }
    out.push_str("/>");
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let paint = alloc::format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (paint, opacity)
        }
        _ => ("none".into(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}
