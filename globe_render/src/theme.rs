// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Light and dark palettes.

use peniko::Color;

/// Color scheme of the globe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Theme {
    /// Pale ocean, grey land.
    #[default]
    Light,
    /// Dark ocean, mid-grey land.
    Dark,
}

impl Theme {
    /// The palette for this theme.
    #[must_use]
    pub fn colors(self) -> ThemeColors {
        match self {
            Self::Light => ThemeColors::LIGHT,
            Self::Dark => ThemeColors::DARK,
        }
    }

    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Paints for the sphere and the countries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeColors {
    /// Sphere fill.
    pub ocean_fill: Color,
    /// Sphere outline.
    pub ocean_stroke: Color,
    /// Country fill.
    pub country_fill: Color,
    /// Country borders.
    pub country_stroke: Color,
    /// Sphere outline width.
    pub ocean_stroke_width: f64,
    /// Country border width.
    pub country_stroke_width: f64,
}

impl ThemeColors {
    /// The light palette.
    pub const LIGHT: Self = Self {
        ocean_fill: Color::from_rgb8(0xe8, 0xe8, 0xe8),
        ocean_stroke: Color::from_rgb8(0xcc, 0xcc, 0xcc),
        country_fill: Color::from_rgb8(0xbb, 0xbb, 0xbb),
        country_stroke: Color::from_rgb8(0xff, 0xff, 0xff),
        ocean_stroke_width: 1.0,
        country_stroke_width: 0.5,
    };

    /// The dark palette.
    pub const DARK: Self = Self {
        ocean_fill: Color::from_rgb8(0x33, 0x33, 0x33),
        ocean_stroke: Color::from_rgb8(0x55, 0x55, 0x55),
        country_fill: Color::from_rgb8(0x66, 0x66, 0x66),
        country_stroke: Color::from_rgb8(0x88, 0x88, 0x88),
        ocean_stroke_width: 1.0,
        country_stroke_width: 0.5,
    };
}
