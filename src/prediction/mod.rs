pub mod client;
pub mod error;
pub mod log;
pub mod types;
