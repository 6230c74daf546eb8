//! The regional command areas datasets are published for, and their fixed bounds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Axis-aligned geographic bounds in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionBounds {
    pub north: f64,
    pub south: f64,
    pub west: f64,
    pub east: f64,
}

impl RegionBounds {
    /// Returns `true` if the point lies within the bounds (edges included).
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.south && lat <= self.north && lng >= self.west && lng <= self.east
    }

    /// Center of the bounds as `(lat, lng)`.
    pub fn center(&self) -> (f64, f64) {
        ((self.north + self.south) / 2.0, (self.east + self.west) / 2.0)
    }

    /// South-west and north-east corners, as `[[south, west], [north, east]]`.
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [[self.south, self.west], [self.north, self.east]]
    }
}

/// One of the predefined geographic command areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Northern,
    Central,
    Eastern,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown region '{0}', expected one of: northern, central, eastern")]
pub struct UnknownRegion(pub String);

impl Region {
    pub const ALL: [Region; 3] = [Region::Northern, Region::Central, Region::Eastern];

    /// The slug used in dataset file names (`northern`, `central`, `eastern`).
    pub fn slug(&self) -> &'static str {
        match self {
            Region::Northern => "northern",
            Region::Central => "central",
            Region::Eastern => "eastern",
        }
    }

    pub fn bounds(&self) -> RegionBounds {
        match self {
            Region::Northern => RegionBounds {
                north: 37.8,
                south: 31.5,
                west: 71.5,
                east: 81.0,
            },
            Region::Central => RegionBounds {
                north: 32.0,
                south: 27.5,
                west: 76.0,
                east: 82.0,
            },
            Region::Eastern => RegionBounds {
                north: 30.0,
                south: 20.5,
                west: 86.5,
                east: 98.5,
            },
        }
    }

    /// Display title of the command area, e.g. `NORTHERN COMMAND`.
    pub fn command(&self) -> &'static str {
        match self {
            Region::Northern => "NORTHERN COMMAND",
            Region::Central => "CENTRAL COMMAND",
            Region::Eastern => "EASTERN COMMAND",
        }
    }

    /// States covered by the command area.
    pub fn subtitle(&self) -> &'static str {
        match self {
            Region::Northern => "Jammu & Kashmir, Himachal Pradesh",
            Region::Central => "Uttarakhand, Uttar Pradesh",
            Region::Eastern => "West Bengal, North East States",
        }
    }

    pub(crate) fn baseline_file_name(&self) -> String {
        format!("{}.csv", self.slug())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "northern" => Ok(Region::Northern),
            "central" => Ok(Region::Central),
            "eastern" => Ok(Region::Eastern),
            _ => Err(UnknownRegion(s.to_string())),
        }
    }
}
