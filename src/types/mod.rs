pub mod forecast_day;
pub mod location_record;
pub mod region;
