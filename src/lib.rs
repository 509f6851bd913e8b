pub mod allocation;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod scoring;
pub mod snapshot;
pub mod telemetry;

pub use error::{EngineError, Result};

#[cfg(test)]
pub(crate) mod test_support;
