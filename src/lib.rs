pub mod analyzers;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;

pub use analyzers::{max_fluctuation_station, min_temperature_station, StationAnalyzer};
pub use error::{ProcessingError, Result};
pub use models::{DateRange, Nested, NestedValue, Node, Reading, StationReport};
pub use processors::{flat_iter, flatten};
