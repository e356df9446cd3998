use crate::error::{ProcessingError, Result};
use crate::models::{DateRange, FluctuationWinner, Reading};
use std::collections::HashMap;

pub(crate) const COLDEST_QUERY: &str = "minimum temperature station";
pub(crate) const FLUCTUATION_QUERY: &str = "maximum fluctuation station";

/// Running minimum over a stream of readings.
///
/// Only a strictly colder reading replaces the current one, so the first
/// of several equally cold readings is kept.
#[derive(Debug, Default, Clone)]
pub struct ColdestTracker {
    coldest: Option<Reading>,
    observed: usize,
}

impl ColdestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, reading: &Reading) {
        self.observed += 1;

        let colder = match &self.coldest {
            Some(current) => reading.temperature < current.temperature,
            None => true,
        };
        if colder {
            self.coldest = Some(*reading);
        }
    }

    pub fn observed(&self) -> usize {
        self.observed
    }

    pub fn coldest(&self) -> Option<&Reading> {
        self.coldest.as_ref()
    }

    pub fn finish(self) -> Result<Reading> {
        self.coldest
            .ok_or_else(|| ProcessingError::empty_input(COLDEST_QUERY))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct StationFlux {
    station_id: i64,
    last_temperature: f64,
    total_fluctuation: f64,
    sightings: usize,
}

/// Per-station running total of absolute temperature changes.
///
/// Stations are remembered in the order they were first seen; that order
/// settles ties between equal totals.
#[derive(Debug, Default, Clone)]
pub struct FluctuationAccumulator {
    date_range: Option<DateRange>,
    index: HashMap<i64, usize>,
    stations: Vec<StationFlux>,
    observed: usize,
    accepted: usize,
}

impl FluctuationAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_range(date_range: Option<DateRange>) -> Self {
        Self {
            date_range,
            ..Self::default()
        }
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    /// Feed one reading; returns whether it passed the date filter.
    pub fn observe(&mut self, reading: &Reading) -> bool {
        self.observed += 1;

        if let Some(range) = &self.date_range {
            if !range.admits(reading) {
                return false;
            }
        }
        self.accepted += 1;

        match self.index.get(&reading.station_id) {
            Some(&slot) => {
                let station = &mut self.stations[slot];
                station.total_fluctuation += (reading.temperature - station.last_temperature).abs();
                station.last_temperature = reading.temperature;
                station.sightings += 1;
            }
            None => {
                self.index.insert(reading.station_id, self.stations.len());
                self.stations.push(StationFlux {
                    station_id: reading.station_id,
                    last_temperature: reading.temperature,
                    total_fluctuation: 0.0,
                    sightings: 1,
                });
            }
        }

        true
    }

    /// Readings offered, including those outside the date range.
    pub fn observed(&self) -> usize {
        self.observed
    }

    /// Readings that passed the date filter.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn fluctuation_of(&self, station_id: i64) -> Option<f64> {
        self.index
            .get(&station_id)
            .map(|&slot| self.stations[slot].total_fluctuation)
    }

    /// Station with the largest total so far; the earliest-seen station wins ties.
    pub fn leader(&self) -> Option<FluctuationWinner> {
        let mut best: Option<&StationFlux> = None;

        for station in &self.stations {
            let ahead = match best {
                Some(current) => station.total_fluctuation > current.total_fluctuation,
                None => true,
            };
            if ahead {
                best = Some(station);
            }
        }

        best.map(|station| FluctuationWinner {
            station_id: station.station_id,
            total_fluctuation: station.total_fluctuation,
            sightings: station.sightings,
        })
    }

    pub fn finish(self) -> Result<FluctuationWinner> {
        self.leader()
            .ok_or_else(|| ProcessingError::empty_input(FLUCTUATION_QUERY))
    }
}
