//! Human-readable output for the terminal.

use std::fmt::Write;

use eta_core::{DayCategory, EstimateOutcome, EtaEstimate, HourMultiplierTable, MatchedLocation};

pub fn outcome_text(outcome: &EstimateOutcome) -> String {
    let mut out = String::new();
    match outcome {
        EstimateOutcome::Complete(estimate) => write_estimate(&mut out, estimate),
        EstimateOutcome::Partial { estimate, reason } => {
            write_estimate(&mut out, estimate);
            let _ = writeln!(out, "Warning: {} ({})", reason.user_message(), reason.message);
        }
        EstimateOutcome::Failed { reason } => {
            let _ = writeln!(out, "Warning: {} ({})", reason.user_message(), reason.message);
        }
    }
    out
}

fn write_estimate(out: &mut String, estimate: &EtaEstimate) {
    let _ = writeln!(out, "ETA: {}", estimate.raw_eta_text);
    if let Some(minutes) = estimate.adjusted_eta_minutes {
        let _ = writeln!(out, "Traffic-adjusted ETA: {} min", minutes);
    }
    let _ = writeln!(out, "Distance: {}", estimate.distance_text);
    let _ = writeln!(out, "Route Info: {}", estimate.route_description_text);
    let _ = writeln!(
        out,
        "Traffic factor: {} (location {} x hour {})",
        estimate.factor.final_factor, estimate.factor.average_tti, estimate.factor.hour_multiplier
    );
    let _ = writeln!(out, "Pickup match: {}", location_text(&estimate.matched_pickup));
    let _ = writeln!(out, "Drop match: {}", location_text(&estimate.matched_drop));
}

fn location_text(location: &MatchedLocation) -> String {
    match (&location.area, &location.road) {
        (Some(area), Some(road)) => format!("{area} / {road}"),
        _ => "no match (neutral)".to_string(),
    }
}

pub fn multipliers_text(table: &HourMultiplierTable, category: Option<DayCategory>) -> String {
    let categories = match category {
        Some(category) => vec![category],
        None => vec![DayCategory::Weekday, DayCategory::Weekend],
    };
    let mut out = String::new();
    for category in categories {
        let _ = writeln!(out, "{category}:");
        for (hour, factor) in table.profile(category).hourly_factors.iter().enumerate() {
            let _ = writeln!(out, "  {:02}  {:?}", hour, factor);
        }
    }
    out
}
