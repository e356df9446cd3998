use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::DateRange;

/// Winner of a fluctuation query together with its accumulated total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FluctuationWinner {
    pub station_id: i64,
    pub total_fluctuation: f64,
    pub sightings: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangedFluctuation {
    pub date_range: DateRange,
    pub records_in_range: usize,
    pub winner: FluctuationWinner,
}

/// Answers to every station query, gathered in a single pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationReport {
    pub total_records: usize,
    pub unique_stations: usize,
    pub coldest_station: i64,
    pub coldest_temperature: f64,
    pub coldest_date: f64,
    pub max_fluctuation: FluctuationWinner,
    pub ranged_fluctuation: Option<RangedFluctuation>,
    pub generated_at: DateTime<Utc>,
}

impl StationReport {
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Records: {} total\n\
            Stations: {} stations\n\
            Coldest: station {} at {:.1}°C (date {})\n\
            Largest fluctuation: station {} with {:.1}°C over {} readings",
            self.total_records,
            self.unique_stations,
            self.coldest_station,
            self.coldest_temperature,
            self.coldest_date,
            self.max_fluctuation.station_id,
            self.max_fluctuation.total_fluctuation,
            self.max_fluctuation.sightings,
        );

        if let Some(ranged) = &self.ranged_fluctuation {
            summary.push_str(&format!(
                "\nLargest fluctuation in [{}, {}]: station {} with {:.1}°C ({} records in range)",
                ranged.date_range.start,
                ranged.date_range.end,
                ranged.winner.station_id,
                ranged.winner.total_fluctuation,
                ranged.records_in_range,
            ));
        }

        summary
    }
}
