//! Free-text location matching against the reference table.

use serde::{Deserialize, Serialize};

use crate::day::Day;
use crate::reference::{ReferenceTable, TravelTimeRecord};

/// TTI used when no reference row matches.
pub const NEUTRAL_TTI: f64 = 1.0;

/// Outcome of matching one location text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchResult {
    Matched {
        area_name: String,
        road_name: String,
        travel_time_index: f64,
    },
    NoMatch,
}

impl MatchResult {
    fn from_record(record: &TravelTimeRecord) -> Self {
        MatchResult::Matched {
            area_name: record.area_name.clone(),
            road_name: record.road_name.clone(),
            travel_time_index: record.travel_time_index,
        }
    }

    /// TTI of the matched row, or [`NEUTRAL_TTI`].
    pub fn travel_time_index(&self) -> f64 {
        match self {
            MatchResult::Matched {
                travel_time_index, ..
            } => *travel_time_index,
            MatchResult::NoMatch => NEUTRAL_TTI,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }

    /// Area/road pair for display; both `None` on no match.
    pub fn location(&self) -> MatchedLocation {
        match self {
            MatchResult::Matched {
                area_name,
                road_name,
                ..
            } => MatchedLocation {
                area: Some(area_name.clone()),
                road: Some(road_name.clone()),
            },
            MatchResult::NoMatch => MatchedLocation::default(),
        }
    }
}

/// Matched area and road names as reported to callers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedLocation {
    pub area: Option<String>,
    pub road: Option<String>,
}

/// Find the first row for `day` whose area or road name contains
/// `input_text`, ignoring case.
///
/// Rows are scanned in table order and the earliest hit wins. An empty
/// `input_text` is a substring of every name, so it matches the first row of
/// the day; callers that want blank input rejected must check before calling.
pub fn match_location(table: &ReferenceTable, input_text: &str, day: Day) -> MatchResult {
    let needle = input_text.to_lowercase();
    for record in table.rows_for_day(day) {
        if record.area_name.to_lowercase().contains(&needle)
            || record.road_name.to_lowercase().contains(&needle)
        {
            log::debug!(
                "matched {:?} on {} to {} / {} (tti {})",
                input_text,
                day,
                record.area_name,
                record.road_name,
                record.travel_time_index
            );
            return MatchResult::from_record(record);
        }
    }
    log::debug!("no reference row for {:?} on {}", input_text, day);
    MatchResult::NoMatch
}
