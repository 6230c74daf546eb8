pub mod error;
pub mod fallback;
pub mod loader;
pub mod types;
