//! Turns delimited dataset text into typed [`LocationRecord`]s.
//!
//! Columns are located by header name, so column order in the source file does not
//! matter and unknown columns are ignored. Rows whose field count differs from the
//! header are skipped; any other structural problem fails the whole parse.

use crate::dataset::error::DataFormatError;
use crate::dataset::region_dataset::sort_by_latitude;
use crate::types::forecast_day::ForecastDay;
use crate::types::location_record::{LocationRecord, RiskLevel};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use log::debug;

/// Dataset columns, in the order they are exported.
pub const COLUMNS: [&str; 13] = [
    "id",
    "lat",
    "lng",
    "location",
    "elevation",
    "slopeAngle",
    "rainfall",
    "soilType",
    "vegetation",
    "landslideRisk",
    "avalancheRisk",
    "temperature",
    "humidity",
];

#[derive(Debug, Clone, Copy)]
enum Column {
    Id,
    Lat,
    Lng,
    Location,
    Elevation,
    SlopeAngle,
    Rainfall,
    SoilType,
    Vegetation,
    LandslideRisk,
    AvalancheRisk,
    Temperature,
    Humidity,
}

impl Column {
    const ALL: [Column; 13] = [
        Column::Id,
        Column::Lat,
        Column::Lng,
        Column::Location,
        Column::Elevation,
        Column::SlopeAngle,
        Column::Rainfall,
        Column::SoilType,
        Column::Vegetation,
        Column::LandslideRisk,
        Column::AvalancheRisk,
        Column::Temperature,
        Column::Humidity,
    ];

    fn name(self) -> &'static str {
        COLUMNS[self as usize]
    }
}

/// Position of every known column within a header row.
struct HeaderMap {
    positions: [usize; 13],
    width: usize,
}

impl HeaderMap {
    fn from_header(header: &StringRecord) -> Result<Self, DataFormatError> {
        let mut positions = [0usize; 13];
        for column in Column::ALL {
            positions[column as usize] = header
                .iter()
                .position(|name| name.trim() == column.name())
                .ok_or(DataFormatError::MissingColumn(column.name()))?;
        }
        Ok(HeaderMap {
            positions,
            width: header.len(),
        })
    }

    fn field<'r>(&self, row: &'r StringRecord, column: Column) -> &'r str {
        row.get(self.positions[column as usize]).unwrap_or_default()
    }
}

/// Integer parsing with leading-integer semantics: surrounding whitespace is ignored
/// and anything after the leading digits is discarded, so `"12.7"` reads as `12`.
fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    trimmed[..sign_len + digits].parse().ok()
}

fn record_from_row(header: &HeaderMap, row: &StringRecord) -> Result<LocationRecord, DataFormatError> {
    let line = row.position().map(|p| p.line()).unwrap_or_default();
    let invalid = |column: Column| DataFormatError::InvalidField {
        line,
        column: column.name(),
        value: header.field(row, column).to_string(),
    };
    let int = |column: Column| parse_leading_int(header.field(row, column)).ok_or_else(|| invalid(column));
    // Coordinates must be finite: `NaN` or `inf` would break the latitude order.
    let coordinate = |column: Column| {
        header
            .field(row, column)
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| invalid(column))
    };
    let risk = |column: Column| {
        header
            .field(row, column)
            .parse::<RiskLevel>()
            .map_err(|_| invalid(column))
    };
    let text = |column: Column| header.field(row, column).to_string();

    Ok(LocationRecord {
        id: int(Column::Id)?,
        lat: coordinate(Column::Lat)?,
        lng: coordinate(Column::Lng)?,
        location: text(Column::Location),
        elevation: int(Column::Elevation)?,
        slope_angle: int(Column::SlopeAngle)?,
        rainfall: int(Column::Rainfall)?,
        soil_type: text(Column::SoilType),
        vegetation: text(Column::Vegetation),
        landslide_risk: risk(Column::LandslideRisk)?,
        avalanche_risk: risk(Column::AvalancheRisk)?,
        temperature: int(Column::Temperature)?,
        humidity: int(Column::Humidity)?,
        distance: None,
        date: None,
        forecast: None,
    })
}

/// Reads every well-formed row into a record, sorted by ascending latitude.
/// No date label is attached.
pub(crate) fn read_records(bytes: &[u8]) -> Result<Vec<LocationRecord>, DataFormatError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let header = HeaderMap::from_header(reader.headers()?)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in reader.records() {
        let row = row?;
        if row.len() != header.width {
            dropped += 1;
            continue;
        }
        records.push(record_from_row(&header, &row)?);
    }
    if dropped > 0 {
        debug!(
            "Dropped {} row(s) whose column count differs from the header ({} columns)",
            dropped, header.width
        );
    }

    sort_by_latitude(&mut records);
    Ok(records)
}

/// Parses one day's dataset, stamping every record with the date label of `day`
/// relative to `today`.
///
/// The result is sorted by ascending latitude regardless of input order.
///
/// # Errors
///
/// Returns a [`DataFormatError`] if the data is not valid UTF-8 CSV, a required
/// column is missing, or a numeric or risk field cannot be read. No partial result
/// is returned.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use laps::{parse_records, ForecastDay};
///
/// let csv = "id,lat,lng,location,elevation,slopeAngle,rainfall,soilType,vegetation,landslideRisk,avalancheRisk,temperature,humidity\n\
///            2,32.2,77.1,Manali,2050,35,1400,Rocky,Dense Forest,High,Medium,8,70\n\
///            1,31.1,77.2,Shimla,2276,28,1500,Loamy,Mixed,Medium,Low,14,65\n";
/// let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
/// let records = parse_records(csv.as_bytes(), ForecastDay::Day2, today).unwrap();
///
/// assert_eq!(records[0].location, "Shimla");
/// assert_eq!(records[1].date.as_deref(), Some("Oct 17, 2026"));
/// ```
pub fn parse_records(
    bytes: &[u8],
    day: ForecastDay,
    today: NaiveDate,
) -> Result<Vec<LocationRecord>, DataFormatError> {
    let label = day.date_label(today);
    let mut records = read_records(bytes)?;
    for record in &mut records {
        record.date = Some(label.clone());
    }
    Ok(records)
}
