//! Request and response bodies of the risk classification service.

use bon::bon;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weather conditions at a point on a given date, submitted for classification.
///
/// Serialized with the service's snake_case field names; `date` is written as
/// `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub lat: f64,
    pub lon: f64,
    pub date: NaiveDate,
    /// Maximum temperature at 2 m, °C.
    pub temperature_2m_max: f64,
    /// Minimum temperature at 2 m, °C.
    pub temperature_2m_min: f64,
    /// mm
    pub rain_sum: f64,
    /// cm
    pub snowfall_sum: f64,
    /// Maximum wind speed at 10 m, km/h.
    pub windspeed_10m_max: f64,
    /// hPa
    pub surface_pressure_mean: f64,
}

#[bon]
impl PredictionRequest {
    /// Builds a request; every field is required.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use laps::PredictionRequest;
    ///
    /// let request = PredictionRequest::builder()
    ///     .lat(30.73)
    ///     .lon(79.06)
    ///     .date(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    ///     .temperature_2m_max(14.2)
    ///     .temperature_2m_min(3.1)
    ///     .rain_sum(42.0)
    ///     .snowfall_sum(0.0)
    ///     .windspeed_10m_max(18.5)
    ///     .surface_pressure_mean(780.4)
    ///     .build();
    /// assert_eq!(serde_json::to_value(&request).unwrap()["date"], "2026-10-16");
    /// ```
    #[builder]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        lat: f64,
        lon: f64,
        date: NaiveDate,
        temperature_2m_max: f64,
        temperature_2m_min: f64,
        rain_sum: f64,
        snowfall_sum: f64,
        windspeed_10m_max: f64,
        surface_pressure_mean: f64,
    ) -> Self {
        Self {
            lat,
            lon,
            date,
            temperature_2m_max,
            temperature_2m_min,
            rain_sum,
            snowfall_sum,
            windspeed_10m_max,
            surface_pressure_mean,
        }
    }
}

/// Risk class predicted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictedRisk {
    Low,
    High,
}

impl fmt::Display for PredictedRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictedRisk::Low => f.write_str("Low Risk"),
            PredictedRisk::High => f.write_str("High Risk"),
        }
    }
}

/// Classification of one request, located at the service's closest known sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub lat: f64,
    pub lon: f64,
    pub closest_db_lat: f64,
    pub closest_db_lon: f64,
    /// Raw class label: `0` is low risk, anything else high risk.
    pub prediction: i64,
}

impl PredictionResponse {
    pub fn risk(&self) -> PredictedRisk {
        if self.prediction == 0 {
            PredictedRisk::Low
        } else {
            PredictedRisk::High
        }
    }
}
