//! Defines the sampled ground point record shared by the dataset loader, the
//! nearest-location resolver and the CSV helpers.

use crate::types::forecast_day::ForecastDay;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Hazard risk classification attached to a sampled point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown risk level '{0}', expected Low, Medium or High")]
pub struct UnknownRiskLevel(pub String);

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = UnknownRiskLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(UnknownRiskLevel(s.to_string())),
        }
    }
}

/// Records of the same position for each of the three forecast days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub day1: LocationRecord,
    pub day2: LocationRecord,
    pub day3: LocationRecord,
}

impl Forecast {
    pub fn get(&self, day: ForecastDay) -> &LocationRecord {
        match day {
            ForecastDay::Day1 => &self.day1,
            ForecastDay::Day2 => &self.day2,
            ForecastDay::Day3 => &self.day3,
        }
    }
}

/// One sampled ground point of a regional dataset.
///
/// Field names serialize in camelCase, matching the dataset CSV header, so the
/// record can be handed to the dashboard as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    /// Sample identifier. Only unique within one regional dataset.
    pub id: i64,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
    /// Place name of the sample.
    pub location: String,
    /// Elevation above sea level in meters.
    pub elevation: i64,
    /// Terrain slope in degrees.
    pub slope_angle: i64,
    /// Rainfall in millimeters.
    pub rainfall: i64,
    pub soil_type: String,
    pub vegetation: String,
    pub landslide_risk: RiskLevel,
    pub avalanche_risk: RiskLevel,
    /// Temperature in degrees Celsius.
    pub temperature: i64,
    /// Relative humidity in percent.
    pub humidity: i64,
    /// Great-circle distance in kilometers from the query point. Only set on
    /// records returned by the nearest-location resolver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Observation date label, e.g. `Oct 16, 2026`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<Box<Forecast>>,
}

impl LocationRecord {
    /// The record for `day`, falling back to `self` when no forecast is attached.
    pub fn for_day(&self, day: ForecastDay) -> &LocationRecord {
        match &self.forecast {
            Some(forecast) => forecast.get(day),
            None => self,
        }
    }

    /// Copy of this record with the query distance attached.
    pub(crate) fn with_distance(&self, distance: f64) -> LocationRecord {
        LocationRecord {
            distance: Some(distance),
            ..self.clone()
        }
    }
}
