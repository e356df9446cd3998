use serde::{Deserialize, Serialize};

/// One row of the station dataset: who measured, when, and how cold it was.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub station_id: i64,
    pub date: f64,
    pub temperature: f64,
}

impl Reading {
    pub fn new(station_id: i64, date: f64, temperature: f64) -> Self {
        Self {
            station_id,
            date,
            temperature,
        }
    }
}

impl From<(i64, f64, f64)> for Reading {
    fn from((station_id, date, temperature): (i64, f64, f64)) -> Self {
        Self::new(station_id, date, temperature)
    }
}

/// Inclusive `[start, end]` window over reading dates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: f64,
    pub end: f64,
}

impl DateRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: f64) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn admits(&self, reading: &Reading) -> bool {
        self.contains(reading.date)
    }

    /// A range whose start lies after its end can never admit a reading.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn is_empty(&self) -> bool {
        !(self.start <= self.end)
    }
}
