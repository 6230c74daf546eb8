pub mod csv_io;
pub mod error;
pub mod loader;
pub mod parser;
pub mod region_dataset;
pub mod source;
