//! Hour-of-day traffic multipliers.
//!
//! Two hourly profiles, one for weekdays and one for weekends, scale the
//! location-based travel time index by the typical congestion at a given hour.
//! Factor 1.0 means no adjustment; the weekday profile has a morning and an
//! evening commute peak, the weekend profile a single midday plateau.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::day::{Day, DayCategory};
use crate::error::EtaError;

/// Multiplier returned for hours without a table entry.
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

// ---------------------------------------------------------------------------
// Hour labels
// ---------------------------------------------------------------------------

/// Parse a two-digit 24-hour label (`"00"`..`"23"`) into an hour index.
///
/// Anything else (`"8"`, `"24"`, `"08:00"`) is not a table key and yields `None`.
pub fn parse_hour_label(label: &str) -> Option<usize> {
    let bytes = label.as_bytes();
    if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let hour = usize::from(bytes[0] - b'0') * 10 + usize::from(bytes[1] - b'0');
    (hour < 24).then_some(hour)
}

/// Two-digit label for an hour index.
pub fn hour_label(hour: u32) -> String {
    format!("{:02}", hour)
}

// ---------------------------------------------------------------------------
// Hourly profile
// ---------------------------------------------------------------------------

/// Traffic multiplier for each hour of the day (index 0 = midnight).
#[derive(Clone, Debug, PartialEq)]
pub struct HourlyProfile {
    pub hourly_factors: [f64; 24],
}

impl HourlyProfile {
    /// All factors 1.0.
    pub fn neutral() -> Self {
        Self {
            hourly_factors: [NEUTRAL_MULTIPLIER; 24],
        }
    }

    /// Weekday commute shape.
    ///
    /// - 00-03: 1.0 (night)
    /// - 08: 2.3 (morning peak)
    /// - 12-15: 1.6-1.7 (midday)
    /// - 18: 2.4 (evening peak)
    pub fn standard_weekday() -> Self {
        Self {
            hourly_factors: [
                1.0, 1.0, 1.0, 1.0, 1.1, 1.2, 1.4, 1.7, // 00-07
                2.3, 2.1, 1.7, 1.5, 1.6, 1.7, 1.6, 1.7, // 08-15
                1.9, 2.2, 2.4, 2.0, 1.6, 1.4, 1.2, 1.1, // 16-23
            ],
        }
    }

    /// Weekend shape: quiet mornings, plateau from late morning to evening.
    pub fn standard_weekend() -> Self {
        Self {
            hourly_factors: [
                1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.1, 1.2, // 00-07
                1.4, 1.6, 1.8, 1.9, 2.0, 2.0, 1.9, 1.8, // 08-15
                1.8, 1.9, 2.0, 1.9, 1.7, 1.5, 1.3, 1.1, // 16-23
            ],
        }
    }

    /// Build from a sparse label -> multiplier map; missing hours stay neutral.
    pub fn from_labels(labels: &BTreeMap<String, f64>) -> Result<Self, EtaError> {
        let mut profile = Self::neutral();
        for (label, factor) in labels {
            let hour = parse_hour_label(label).ok_or_else(|| {
                EtaError::Config(format!("hour multiplier key {label:?} is not \"00\"..\"23\""))
            })?;
            if !factor.is_finite() || *factor <= 0.0 {
                return Err(EtaError::Config(format!(
                    "hour multiplier for {label} must be positive, got {factor}"
                )));
            }
            profile.hourly_factors[hour] = *factor;
        }
        Ok(profile)
    }

    /// Multiplier for a two-digit hour label, [`NEUTRAL_MULTIPLIER`] if the
    /// label is not an hour in the table.
    pub fn factor_for_label(&self, label: &str) -> f64 {
        match parse_hour_label(label) {
            Some(hour) => self.hourly_factors[hour],
            None => {
                log::warn!("unknown hour label {:?}, using neutral multiplier", label);
                NEUTRAL_MULTIPLIER
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Weekday/weekend table
// ---------------------------------------------------------------------------

/// Which hour-multiplier tables to use.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HourMultiplierKind {
    /// Built-in commute-peak tables.
    #[default]
    Standard,
    /// No hour-of-day effect.
    Neutral,
    /// Per-category maps from hour label (`"08"`) to multiplier.
    Custom {
        #[serde(default)]
        weekday: BTreeMap<String, f64>,
        #[serde(default)]
        weekend: BTreeMap<String, f64>,
    },
}

/// Weekday and weekend hourly profiles.
#[derive(Clone, Debug, PartialEq)]
pub struct HourMultiplierTable {
    pub weekday: HourlyProfile,
    pub weekend: HourlyProfile,
}

impl Default for HourMultiplierTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl HourMultiplierTable {
    pub fn standard() -> Self {
        Self {
            weekday: HourlyProfile::standard_weekday(),
            weekend: HourlyProfile::standard_weekend(),
        }
    }

    pub fn neutral() -> Self {
        Self {
            weekday: HourlyProfile::neutral(),
            weekend: HourlyProfile::neutral(),
        }
    }

    /// Build from a [`HourMultiplierKind`] descriptor.
    pub fn from_kind(kind: &HourMultiplierKind) -> Result<Self, EtaError> {
        match kind {
            HourMultiplierKind::Standard => Ok(Self::standard()),
            HourMultiplierKind::Neutral => Ok(Self::neutral()),
            HourMultiplierKind::Custom { weekday, weekend } => Ok(Self {
                weekday: HourlyProfile::from_labels(weekday)?,
                weekend: HourlyProfile::from_labels(weekend)?,
            }),
        }
    }

    pub fn profile(&self, category: DayCategory) -> &HourlyProfile {
        match category {
            DayCategory::Weekday => &self.weekday,
            DayCategory::Weekend => &self.weekend,
        }
    }

    /// Multiplier for `category` at `hour_label`; 1.0 for unknown hours.
    pub fn multiplier(&self, category: DayCategory, hour_label: &str) -> f64 {
        self.profile(category).factor_for_label(hour_label)
    }

    pub fn for_day(&self, day: Day, hour_label: &str) -> f64 {
        self.multiplier(DayCategory::of(day), hour_label)
    }
}
