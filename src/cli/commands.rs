use crate::analyzers::{try_max_fluctuation_station, try_min_temperature_station, StationAnalyzer};
use crate::cli::args::{Cli, Commands, DateArgs, InputArgs};
use crate::config::Settings;
use crate::error::Result;
use crate::models::Reading;
use crate::processors::flatten;
use crate::readers::ReadingReader;
use crate::utils::logging::init_logging;
use crate::utils::progress::ProgressReporter;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

pub fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    init_logging(cli.verbose, &settings.log_level, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Coldest { input } => {
            let station_id = with_readings(&settings, &input, cli.no_progress, |readings| {
                try_min_temperature_station(readings)
            })?;
            println!("{}", station_id);
        }

        Commands::Fluctuation { input, dates } => {
            let settings = apply_dates(settings, &dates)?;
            let date_range = settings.date_range();
            if let Some(range) = &date_range {
                info!(start = range.start, end = range.end, "restricting to date range");
            }

            let station_id = with_readings(&settings, &input, cli.no_progress, |readings| {
                try_max_fluctuation_station(readings, date_range)
            })?;
            println!("{}", station_id);
        }

        Commands::Report { input, dates, json } => {
            let settings = apply_dates(settings, &dates)?;
            let analyzer = StationAnalyzer::new().with_date_range(settings.date_range());

            let report = with_readings(&settings, &input, cli.no_progress, |readings| {
                analyzer.analyze(readings)
            })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.summary());
            }
        }

        Commands::Flatten { input, output } => {
            let flat = flatten_json_file(&input)?;
            let rendered = serde_json::to_string_pretty(&Value::Array(flat))?;

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    fs::write(&path, rendered)?;
                    info!(path = %path.display(), "flattened output written");
                }
                None => println!("{}", rendered),
            }
        }
    }

    Ok(())
}

fn apply_dates(settings: Settings, dates: &DateArgs) -> Result<Settings> {
    settings.with_dates(dates.start, dates.end)
}

/// Stream the input file once through `query`, counting rows on a spinner.
fn with_readings<T, F>(settings: &Settings, input: &InputArgs, no_progress: bool, query: F) -> Result<T>
where
    F: FnOnce(&mut dyn Iterator<Item = Result<Reading>>) -> Result<T>,
{
    info!(path = %input.input.display(), limit = ?input.limit, "streaming readings");

    let reader = ReadingReader::from_settings(settings);
    let rows = reader.stream_readings(&input.input)?;
    let progress = ProgressReporter::new_spinner("Reading", no_progress);

    let mut readings = progress.track(rows.take(input.limit.unwrap_or(usize::MAX)));
    let answer = query(&mut readings);

    progress.finish_with_message("Done");
    info!(rows = progress.position(), "pass complete");
    answer
}

/// Parse and flatten a JSON document. Parsing is bounded by `serde_json`'s
/// recursion limit of 128 levels; the flatten itself is not.
pub fn flatten_json_file(path: &Path) -> Result<Vec<Value>> {
    let text = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&text)?;
    Ok(flatten(document))
}
