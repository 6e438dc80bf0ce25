pub mod config;
pub mod error;
pub mod public;
pub mod telemetry;
