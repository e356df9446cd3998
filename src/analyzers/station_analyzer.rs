use crate::analyzers::accumulators::{ColdestTracker, FluctuationAccumulator};
use crate::error::Result;
use crate::models::{DateRange, RangedFluctuation, Reading, StationReport};
use chrono::Utc;
use tracing::debug;

/// Station that recorded the lowest temperature; the earliest reading wins a tie.
pub fn min_temperature_station<I>(records: I) -> Result<i64>
where
    I: IntoIterator<Item = Reading>,
{
    try_min_temperature_station(records.into_iter().map(Ok))
}

/// Station whose temperature moved the most between consecutive readings,
/// optionally counting only readings dated inside `date_range`.
pub fn max_fluctuation_station<I>(records: I, date_range: Option<DateRange>) -> Result<i64>
where
    I: IntoIterator<Item = Reading>,
{
    try_max_fluctuation_station(records.into_iter().map(Ok), date_range)
}

/// [`min_temperature_station`] over a stream that may fail part way.
pub fn try_min_temperature_station<I>(records: I) -> Result<i64>
where
    I: IntoIterator<Item = Result<Reading>>,
{
    let mut tracker = ColdestTracker::new();
    for record in records {
        tracker.observe(&record?);
    }

    let observed = tracker.observed();
    let coldest = tracker.finish()?;
    debug!(
        records = observed,
        station_id = coldest.station_id,
        temperature = coldest.temperature,
        "coldest station found"
    );

    Ok(coldest.station_id)
}

/// [`max_fluctuation_station`] over a stream that may fail part way.
pub fn try_max_fluctuation_station<I>(records: I, date_range: Option<DateRange>) -> Result<i64>
where
    I: IntoIterator<Item = Result<Reading>>,
{
    let mut accumulator = FluctuationAccumulator::with_date_range(date_range);
    for record in records {
        accumulator.observe(&record?);
    }

    debug!(
        records = accumulator.observed(),
        accepted = accumulator.accepted(),
        stations = accumulator.station_count(),
        ?date_range,
        "fluctuation pass complete"
    );
    let winner = accumulator.finish()?;

    Ok(winner.station_id)
}

/// Answers every station query in one pass, for streams that cannot be
/// replayed.
#[derive(Debug, Clone, Default)]
pub struct StationAnalyzer {
    date_range: Option<DateRange>,
}

impl StationAnalyzer {
    pub fn new() -> Self {
        Self { date_range: None }
    }

    pub fn with_date_range(mut self, date_range: Option<DateRange>) -> Self {
        self.date_range = date_range;
        self
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    pub fn analyze_readings<I>(&self, records: I) -> Result<StationReport>
    where
        I: IntoIterator<Item = Reading>,
    {
        self.analyze(records.into_iter().map(Ok))
    }

    /// Consume `records` once. The first upstream error aborts the pass, and
    /// any query left without eligible readings fails the whole report.
    pub fn analyze<I>(&self, records: I) -> Result<StationReport>
    where
        I: IntoIterator<Item = Result<Reading>>,
    {
        let mut coldest = ColdestTracker::new();
        let mut overall = FluctuationAccumulator::new();
        let mut ranged = self
            .date_range
            .map(|range| (range, FluctuationAccumulator::with_date_range(Some(range))));

        for record in records {
            let reading = record?;
            coldest.observe(&reading);
            overall.observe(&reading);
            if let Some((_, acc)) = ranged.as_mut() {
                acc.observe(&reading);
            }
        }

        let total_records = overall.observed();
        let unique_stations = overall.station_count();
        debug!(
            records = total_records,
            stations = unique_stations,
            "station pass complete"
        );

        let coldest = coldest.finish()?;
        let max_fluctuation = overall.finish()?;
        let ranged_fluctuation = match ranged {
            Some((date_range, acc)) => {
                let records_in_range = acc.accepted();
                Some(RangedFluctuation {
                    date_range,
                    records_in_range,
                    winner: acc.finish()?,
                })
            }
            None => None,
        };

        Ok(StationReport {
            total_records,
            unique_stations,
            coldest_station: coldest.station_id,
            coldest_temperature: coldest.temperature,
            coldest_date: coldest.date,
            max_fluctuation,
            ranged_fluctuation,
            generated_at: Utc::now(),
        })
    }
}
