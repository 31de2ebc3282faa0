//! Raw ETA text handling and the traffic adjustment itself.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::EtaError;

static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("static regex is valid"));
static ETA_MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\s*min)").expect("static regex is valid"));
static DETAILS_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bDetails\b\.?").expect("static regex is valid"));

/// First run of digits in `raw_eta_text`, read as whole minutes.
pub fn parse_eta_minutes(raw_eta_text: &str) -> Result<u32, EtaError> {
    let digits = LEADING_INT
        .find(raw_eta_text)
        .ok_or_else(|| EtaError::EtaParse(raw_eta_text.to_string()))?;
    digits
        .as_str()
        .parse::<u32>()
        .map_err(|_| EtaError::EtaOutOfRange(raw_eta_text.to_string()))
}

/// Scale the minutes in `raw_eta_text` by `factor`.
///
/// The product is rounded to the nearest minute with halves away from zero,
/// so 15 min at 2.3 is 34.5 and becomes 35.
pub fn adjust(raw_eta_text: &str, factor: f64) -> Result<i64, EtaError> {
    let minutes = parse_eta_minutes(raw_eta_text)?;
    Ok((f64::from(minutes) * factor).round() as i64)
}

/// Split a mapping provider's trip summary into the ETA and the trailing
/// route description.
///
/// `"25 min (8.4 km) via Outer Ring Rd Details"` becomes
/// `("25 min", "(8.4 km) via Outer Ring Rd")`. Without an `N min` token the
/// whole text is returned as the ETA and the description is empty.
pub fn split_eta_text(full_text: &str) -> (String, String) {
    match ETA_MINUTES.find(full_text) {
        Some(m) => {
            let trailing = full_text[m.end()..].trim();
            let route_info = DETAILS_WORD.replace_all(trailing, "").trim().to_string();
            (m.as_str().to_string(), route_info)
        }
        None => (full_text.to_string(), String::new()),
    }
}
