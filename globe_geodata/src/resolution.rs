// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry detail tiers.

use core::fmt;
use core::str::FromStr;

use crate::error::ParseResolutionError;

/// Level of detail of the country outlines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Coarse 1:110m outlines; fast to draw while dragging.
    #[default]
    Low,
    /// Finer 1:50m outlines.
    Medium,
}

impl Resolution {
    /// Every tier, coarse first.
    pub const ALL: [Self; 2] = [Self::Low, Self::Medium];

    /// The data file holding this tier.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Low => "countries110.geojson",
            Self::Medium => "countries50.geojson",
        }
    }

    /// Map scale label, for display.
    #[must_use]
    pub fn scale_label(self) -> &'static str {
        match self {
            Self::Low => "1:110m",
            Self::Medium => "1:50m",
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = ParseResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            other => Err(ParseResolutionError(other.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_map_to_natural_earth_files() {
        assert_eq!(Resolution::Low.file_name(), "countries110.geojson");
        assert_eq!(Resolution::Medium.file_name(), "countries50.geojson");
        assert_eq!(Resolution::default(), Resolution::Low);
    }

    #[test]
    fn parses_names() {
        assert_eq!("medium".parse(), Ok(Resolution::Medium));
        assert!("high".parse::<Resolution>().is_err());
    }
}
