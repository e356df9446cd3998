//! Property-based tests for flattening and the station queries.
//!
//! Each property is checked against a straightforward reference computed
//! independently inside the test: a recursive flatten for shallow inputs, and
//! a group-then-sum pass for fluctuation totals.

use proptest::prelude::*;
use station_stats::analyzers::{ColdestTracker, FluctuationAccumulator};
use station_stats::models::{DateRange, NestedValue, Reading};
use station_stats::{flatten, max_fluctuation_station, min_temperature_station, StationAnalyzer};
use std::collections::HashMap;

fn arb_nested() -> impl Strategy<Value = NestedValue<i32>> {
    let leaf = any::<i32>().prop_map(NestedValue::Leaf);
    leaf.prop_recursive(8, 128, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(NestedValue::Container)
    })
}

fn arb_reading() -> impl Strategy<Value = Reading> {
    (-2i64..4, 0u32..20, -500i32..500).prop_map(|(station_id, day, tenths)| {
        Reading::new(station_id, 2000.0 + f64::from(day) / 1000.0, f64::from(tenths) / 10.0)
    })
}

fn arb_readings() -> impl Strategy<Value = Vec<Reading>> {
    prop::collection::vec(arb_reading(), 0..80)
}

fn arb_range() -> impl Strategy<Value = DateRange> {
    (0u32..20, 0u32..20).prop_map(|(a, b)| {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        DateRange::new(2000.0 + f64::from(lo) / 1000.0, 2000.0 + f64::from(hi) / 1000.0)
    })
}

/// Recursive flatten; fine for the shallow values generated here.
fn flatten_recursive(value: &NestedValue<i32>, out: &mut Vec<i32>) {
    match value {
        NestedValue::Leaf(v) => out.push(*v),
        NestedValue::Container(children) => {
            for child in children {
                flatten_recursive(child, out);
            }
        }
    }
}

fn reference_totals(readings: &[Reading]) -> HashMap<i64, f64> {
    let mut temps: HashMap<i64, Vec<f64>> = HashMap::new();
    for r in readings {
        temps.entry(r.station_id).or_default().push(r.temperature);
    }

    temps
        .into_iter()
        .map(|(station, series)| {
            let total = series
                .windows(2)
                .fold(0.0, |acc, pair| acc + (pair[1] - pair[0]).abs());
            (station, total)
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_flatten_matches_recursive_walk(value in arb_nested()) {
        let mut expected = Vec::new();
        flatten_recursive(&value, &mut expected);
        let leaf_count = value.leaf_count();

        let flat = flatten(value);
        prop_assert_eq!(flat.len(), leaf_count);
        prop_assert_eq!(flat, expected);
    }

    #[test]
    fn prop_wrapping_does_not_change_leaves(value in arb_nested(), levels in 0usize..200) {
        let expected = flatten(value.clone());
        prop_assert_eq!(flatten(value.wrapped(levels)), expected);
    }

    #[test]
    fn prop_coldest_is_first_minimum(readings in arb_readings()) {
        let result = min_temperature_station(readings.iter().copied());

        let mut expected: Option<&Reading> = None;
        for r in &readings {
            if expected.map_or(true, |best| r.temperature < best.temperature) {
                expected = Some(r);
            }
        }

        match expected {
            Some(best) => prop_assert_eq!(result.unwrap(), best.station_id),
            None => prop_assert!(result.unwrap_err().is_empty_input()),
        }
    }

    #[test]
    fn prop_totals_match_grouped_sums(readings in arb_readings()) {
        let mut acc = FluctuationAccumulator::new();
        for r in &readings {
            acc.observe(r);
        }

        let expected = reference_totals(&readings);
        prop_assert_eq!(acc.station_count(), expected.len());
        for (station, total) in expected {
            prop_assert_eq!(acc.fluctuation_of(station), Some(total));
        }
    }

    #[test]
    fn prop_range_is_a_pure_prefilter(readings in arb_readings(), range in arb_range()) {
        let in_range: Vec<Reading> = readings
            .iter()
            .copied()
            .filter(|r| range.contains(r.date))
            .collect();

        let ranged = max_fluctuation_station(readings.iter().copied(), Some(range)).ok();
        let unrestricted_on_subset = max_fluctuation_station(in_range, None).ok();

        prop_assert_eq!(ranged, unrestricted_on_subset);
    }

    #[test]
    fn prop_queries_are_idempotent(readings in arb_readings(), range in arb_range()) {
        let first = max_fluctuation_station(readings.iter().copied(), Some(range)).ok();
        let second = max_fluctuation_station(readings.iter().copied(), Some(range)).ok();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_report_agrees_with_individual_queries(
        readings in prop::collection::vec(arb_reading(), 1..80),
        range in arb_range(),
    ) {
        let report = StationAnalyzer::new()
            .with_date_range(Some(range))
            .analyze_readings(readings.iter().copied());
        let ranged = max_fluctuation_station(readings.iter().copied(), Some(range));

        match ranged {
            Ok(station) => {
                let report = report.unwrap();
                prop_assert_eq!(report.coldest_station, min_temperature_station(readings.iter().copied()).unwrap());
                prop_assert_eq!(report.max_fluctuation.station_id, max_fluctuation_station(readings.iter().copied(), None).unwrap());
                prop_assert_eq!(report.ranged_fluctuation.unwrap().winner.station_id, station);
            }
            Err(_) => prop_assert!(report.unwrap_err().is_empty_input()),
        }
    }

    #[test]
    fn prop_tracker_sees_every_reading(readings in arb_readings()) {
        let mut tracker = ColdestTracker::new();
        for r in &readings {
            tracker.observe(r);
        }
        prop_assert_eq!(tracker.observed(), readings.len());
        prop_assert_eq!(tracker.coldest().is_some(), !readings.is_empty());
    }
}
