//! CSV export and import in the dataset file schema.

use crate::dataset::error::DataFormatError;
use crate::dataset::parser::{read_records, COLUMNS};
use crate::types::location_record::LocationRecord;
use csv::{Terminator, WriterBuilder};

/// Writes `records` as CSV: the dataset header, then one row per record, each
/// line terminated by `\n`. Fields are quoted only when they need it.
///
/// Derived fields (`distance`, `date`, `forecast`) are not exported.
pub fn export_to_csv(records: &[LocationRecord]) -> Result<String, DataFormatError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for record in records {
        writer.write_record([
            record.id.to_string(),
            record.lat.to_string(),
            record.lng.to_string(),
            record.location.clone(),
            record.elevation.to_string(),
            record.slope_angle.to_string(),
            record.rainfall.to_string(),
            record.soil_type.clone(),
            record.vegetation.clone(),
            record.landslide_risk.to_string(),
            record.avalanche_risk.to_string(),
            record.temperature.to_string(),
            record.humidity.to_string(),
        ])?;
    }

    writer.flush().map_err(DataFormatError::Write)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| DataFormatError::Write(std::io::Error::new(e.error().kind(), e.error().to_string())))?;
    Ok(String::from_utf8(bytes)?)
}

/// Reads CSV text in the dataset schema.
///
/// Rows whose column count differs from the header are dropped, the result is
/// sorted by ascending latitude, and no date label is set.
pub fn import_from_csv(text: &str) -> Result<Vec<LocationRecord>, DataFormatError> {
    read_records(text.as_bytes())
}
