mod support;

use eta_core::traffic::hour_label;
use eta_core::{
    adjust, average_tti, compose, match_location, CompositeFactor, CompositionMode, Day,
    DayCategory, EtaError, HourMultiplierTable, MatchResult, MatchedLocation,
};
use support::fixtures::reference_table;

const WEEKDAY: [f64; 24] = [
    1.0, 1.0, 1.0, 1.0, 1.1, 1.2, 1.4, 1.7, 2.3, 2.1, 1.7, 1.5, 1.6, 1.7, 1.6, 1.7, 1.9, 2.2,
    2.4, 2.0, 1.6, 1.4, 1.2, 1.1,
];
const WEEKEND: [f64; 24] = [
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.1, 1.2, 1.4, 1.6, 1.8, 1.9, 2.0, 2.0, 1.9, 1.8, 1.8, 1.9,
    2.0, 1.9, 1.7, 1.5, 1.3, 1.1,
];

fn matched(tti: f64) -> MatchResult {
    MatchResult::Matched {
        area_name: "Area".to_string(),
        road_name: "Road".to_string(),
        travel_time_index: tti,
    }
}

fn day_hour(pickup_tti: f64, drop_tti: f64, day: Day, hour: &str) -> CompositeFactor {
    compose(
        &matched(pickup_tti),
        &matched(drop_tti),
        day,
        hour,
        &HourMultiplierTable::standard(),
        CompositionMode::DayHour,
    )
}

#[test]
fn unmatched_text_is_neutral_on_every_day() {
    let table = reference_table();
    for day in Day::ALL {
        let result = match_location(&table, "Electronic City", day);
        assert_eq!(result, MatchResult::NoMatch);
        assert_eq!(result.travel_time_index(), 1.0);
        assert_eq!(result.location(), MatchedLocation::default());
    }
}

#[test]
fn earliest_row_wins_for_ambiguous_text() {
    let table = reference_table();
    // "koramangala" hits the junction row and the 5th Block row on Monday.
    assert_eq!(match_location(&table, "koramangala", Day::Mon).travel_time_index(), 1.2);
    assert_eq!(match_location(&table, "Feet Road", Day::Mon).travel_time_index(), 1.5);
    assert_eq!(match_location(&table, "koramangala", Day::Tue).travel_time_index(), 1.3);
}

#[test]
fn empty_text_matches_first_row_of_the_day() {
    let table = reference_table();
    let result = match_location(&table, "", Day::Sun);
    assert_eq!(result.location().area.as_deref(), Some("MG Road"));
    assert_eq!(match_location(&table, "", Day::Wed), MatchResult::NoMatch);
}

#[test]
fn multiplier_table_matches_constants() {
    let table = HourMultiplierTable::standard();
    for hour in 0..24u32 {
        let label = hour_label(hour);
        assert_eq!(
            table.multiplier(DayCategory::Weekday, &label),
            WEEKDAY[hour as usize],
            "weekday {label}"
        );
        assert_eq!(
            table.multiplier(DayCategory::Weekend, &label),
            WEEKEND[hour as usize],
            "weekend {label}"
        );
    }
}

#[test]
fn hours_outside_the_table_are_neutral() {
    let table = HourMultiplierTable::standard();
    for label in ["24", "99", "8", "-1", "08:30", ""] {
        assert_eq!(table.multiplier(DayCategory::Weekday, label), 1.0);
        assert_eq!(table.multiplier(DayCategory::Weekend, label), 1.0);
    }
}

#[test]
fn category_follows_day() {
    let table = HourMultiplierTable::standard();
    for day in [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri] {
        assert_eq!(table.for_day(day, "08"), 2.3);
    }
    for day in [Day::Sat, Day::Sun] {
        assert_eq!(table.for_day(day, "08"), 1.4);
    }
}

#[test]
fn average_is_invariant_under_swap() {
    let pairs = [(1.2, 1.4), (1.0, 1.0), (1.333, 2.717), (0.85, 1.9999), (3.1, 0.4)];
    for (p, d) in pairs {
        assert_eq!(average_tti(p, d), average_tti(d, p));
        assert_eq!(average_tti(p, d), eta_core::round3((p + d) / 2.0));
    }
}

#[test]
fn composite_factor_is_symmetric_and_repeatable() {
    let a = day_hour(1.2, 1.4, Day::Thu, "17");
    let b = day_hour(1.4, 1.2, Day::Thu, "17");
    let c = day_hour(1.2, 1.4, Day::Thu, "17");
    assert_eq!(a, b);
    assert_eq!(a, c);
    // 1.3 * 2.2 = 2.86
    assert_eq!(a.final_factor, 2.86);
}

#[test]
fn scenario_weekday_morning_peak() {
    let factor = day_hour(1.2, 1.4, Day::Mon, "08");
    assert_eq!(factor.final_factor, 2.99);
    assert_eq!(adjust("10 min", factor.final_factor).unwrap(), 30);
}

#[test]
fn scenario_weekend_afternoon_no_match() {
    let table = HourMultiplierTable::standard();
    let factor = compose(
        &MatchResult::NoMatch,
        &MatchResult::NoMatch,
        Day::Sat,
        "14",
        &table,
        CompositionMode::DayHour,
    );
    assert_eq!(factor.hour_multiplier, 1.9);
    assert_eq!(factor.final_factor, 1.9);
    assert_eq!(adjust("20 min", factor.final_factor).unwrap(), 38);
}

#[test]
fn adjust_rounds_half_away_from_zero() {
    assert_eq!(adjust("15 min", 1.0).unwrap(), 15);
    assert_eq!(adjust("15 min", 2.3).unwrap(), 35);
    assert_eq!(adjust("1 min", 0.5).unwrap(), 1);
}

#[test]
fn adjust_without_digits_fails() {
    for factor in [0.0, 1.0, 1.9, 2.99] {
        assert!(matches!(adjust("no integer here", factor), Err(EtaError::EtaParse(_))));
    }
}
