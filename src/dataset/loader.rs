use crate::dataset::error::{DatasetError, FetchError};
use crate::dataset::parser::parse_records;
use crate::dataset::region_dataset::RegionDataset;
use crate::dataset::source::DatasetSource;
use crate::types::forecast_day::ForecastDay;
use crate::types::location_record::{Forecast, LocationRecord};
use crate::types::region::Region;
use chrono::{Local, NaiveDate};
use futures_util::try_join;
use log::{info, warn};
use std::sync::Arc;
use tokio::task;

/// Loads per-region, per-day datasets from a [`DatasetSource`].
///
/// Nothing is cached: every call fetches and parses again.
#[derive(Clone)]
pub struct RegionDataLoader {
    source: Arc<dyn DatasetSource>,
}

impl RegionDataLoader {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &dyn DatasetSource {
        self.source.as_ref()
    }

    /// Loads `region` with date labels relative to the local date.
    ///
    /// See [`RegionDataLoader::load_region_on`].
    pub async fn load_region(
        &self,
        region: Region,
        include_forecast: bool,
    ) -> Result<RegionDataset, DatasetError> {
        self.load_region_on(region, include_forecast, Local::now().date_naive())
            .await
    }

    /// Loads `region` with date labels relative to `today`.
    ///
    /// Without a forecast only day 1 is loaded. With a forecast the three days are
    /// fetched concurrently and merged by position: record `i` of day 1 carries
    /// record `i` of each later day, or itself where a later day has fewer records.
    ///
    /// # Errors
    ///
    /// Any failed day fails the whole load. A day whose own file is unavailable is
    /// read from the region's shared `{region}.csv` instead; if that is missing too,
    /// or the source cannot be reached, a [`DatasetError::Fetch`] is returned.
    /// Unparsable data gives [`DatasetError::DataFormat`] naming the file.
    pub async fn load_region_on(
        &self,
        region: Region,
        include_forecast: bool,
        today: NaiveDate,
    ) -> Result<RegionDataset, DatasetError> {
        if !include_forecast {
            let records = self.load_day(region, ForecastDay::Day1, today).await?;
            info!("Loaded {} records for {} region", records.len(), region);
            return Ok(RegionDataset::from_records(records));
        }

        let (day1, day2, day3) = try_join!(
            self.load_day(region, ForecastDay::Day1, today),
            self.load_day(region, ForecastDay::Day2, today),
            self.load_day(region, ForecastDay::Day3, today),
        )?;

        if day2.len() < day1.len() || day3.len() < day1.len() {
            info!(
                "Forecast for {} region is shorter than day 1 ({} / {} / {} records); reusing day 1 values",
                region,
                day1.len(),
                day2.len(),
                day3.len()
            );
        }
        let merged = merge_forecast(day1, day2, day3);
        info!("Merged {} forecast records for {} region", merged.len(), region);
        Ok(RegionDataset::from_records(merged))
    }

    /// Fetches one day's file, falling back to the regional baseline when the file
    /// is unavailable. Returns the name of the file actually read.
    async fn fetch_day(&self, region: Region, day: ForecastDay) -> Result<(String, Vec<u8>), FetchError> {
        let file_name = day.file_name(region.slug());
        info!("Fetching {} data from {}", day, self.source.describe(&file_name));

        match self.source.fetch(&file_name).await {
            Ok(bytes) => Ok((file_name, bytes)),
            Err(e) if e.is_unavailable() => {
                let fallback = region.baseline_file_name();
                warn!(
                    "{} unavailable ({}), using shared {} for {}; forecast days read from it are identical",
                    file_name, e, fallback, day
                );
                let bytes = self.source.fetch(&fallback).await?;
                Ok((fallback, bytes))
            }
            Err(e) => Err(e),
        }
    }

    async fn load_day(
        &self,
        region: Region,
        day: ForecastDay,
        today: NaiveDate,
    ) -> Result<Vec<LocationRecord>, DatasetError> {
        let (file, bytes) = self.fetch_day(region, day).await?;
        task::spawn_blocking(move || parse_records(&bytes, day, today))
            .await?
            .map_err(|source| DatasetError::DataFormat { file, source })
    }
}

/// Positional merge of three latitude-sorted days.
fn merge_forecast(
    day1: Vec<LocationRecord>,
    day2: Vec<LocationRecord>,
    day3: Vec<LocationRecord>,
) -> Vec<LocationRecord> {
    let mut day2 = day2.into_iter();
    let mut day3 = day3.into_iter();
    day1.into_iter()
        .map(|base| {
            let second = day2.next().unwrap_or_else(|| base.clone());
            let third = day3.next().unwrap_or_else(|| base.clone());
            let mut merged = base.clone();
            merged.forecast = Some(Box::new(Forecast {
                day1: base,
                day2: second,
                day3: third,
            }));
            merged
        })
        .collect()
}
