pub mod accumulators;
pub mod station_analyzer;

pub use accumulators::{ColdestTracker, FluctuationAccumulator};
pub use station_analyzer::{
    max_fluctuation_station, min_temperature_station, try_max_fluctuation_station,
    try_min_temperature_station, StationAnalyzer,
};
