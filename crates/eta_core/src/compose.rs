//! Composite adjustment factor from pickup/drop TTI and the hour multiplier.

use serde::{Deserialize, Serialize};

use crate::day::{Day, DayCategory};
use crate::matching::MatchResult;
use crate::traffic::{HourMultiplierTable, NEUTRAL_MULTIPLIER};

/// Whether the hour-of-day multiplier takes part in the composite factor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionMode {
    /// Location TTI only.
    DayOnly,
    /// Location TTI scaled by the hour multiplier.
    #[default]
    DayHour,
}

/// Factor applied to a raw ETA, with the intermediate values that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompositeFactor {
    pub average_tti: f64,
    pub hour_multiplier: f64,
    pub final_factor: f64,
}

/// Round to 3 decimal places.
///
/// Rounds the exact binary value of `value` (ties to even), so `1.3255`,
/// stored just below the tie, gives `1.325` and the exact tie `1.0625` gives
/// `1.062`. Scaling by 1000 first would round both up.
pub fn round3(value: f64) -> f64 {
    format!("{value:.3}").parse().unwrap_or(value)
}

/// Mean of the two endpoint indices, rounded to 3 decimals.
pub fn average_tti(pickup_tti: f64, drop_tti: f64) -> f64 {
    round3((pickup_tti + drop_tti) / 2.0)
}

/// Combine pickup and drop matches into one factor.
///
/// Both the average and the final product are rounded to 3 decimals; the
/// intermediate rounding is observable in outputs and must not be folded away.
/// `hour_label` is ignored in [`CompositionMode::DayOnly`].
pub fn compose(
    pickup: &MatchResult,
    drop: &MatchResult,
    day: Day,
    hour_label: &str,
    multipliers: &HourMultiplierTable,
    mode: CompositionMode,
) -> CompositeFactor {
    let average = average_tti(pickup.travel_time_index(), drop.travel_time_index());
    let hour_multiplier = match mode {
        CompositionMode::DayOnly => NEUTRAL_MULTIPLIER,
        CompositionMode::DayHour => multipliers.multiplier(DayCategory::of(day), hour_label),
    };
    CompositeFactor {
        average_tti: average,
        hour_multiplier,
        final_factor: round3(average * hour_multiplier),
    }
}
