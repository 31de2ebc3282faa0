use crate::error::RouteLookupError;
use crate::routing::RawRouteResult;

use super::response::DirectionsResponse;

pub(super) fn parse_directions_response(
    resp: DirectionsResponse,
) -> Result<RawRouteResult, RouteLookupError> {
    match resp.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" | "NOT_FOUND" => return Err(RouteLookupError::NotFound),
        other => {
            let status = match resp.error_message {
                Some(message) => format!("{other}: {message}"),
                None => other.to_string(),
            };
            return Err(RouteLookupError::Api(status));
        }
    }

    let route = resp.routes.first().ok_or(RouteLookupError::NotFound)?;
    let leg = route
        .legs
        .first()
        .ok_or(RouteLookupError::MissingElement("routes[0].legs[0]"))?;
    let duration = leg
        .duration
        .as_ref()
        .ok_or(RouteLookupError::MissingElement("duration"))?;
    let distance = leg
        .distance
        .as_ref()
        .ok_or(RouteLookupError::MissingElement("distance"))?;

    log::debug!(
        "provider reports {} ({}s) over {} ({}m)",
        duration.text,
        duration.value,
        distance.text,
        distance.value
    );

    let summary = route.summary.trim();
    let route_description_text = if summary.is_empty() {
        String::new()
    } else {
        format!("via {summary}")
    };

    RawRouteResult {
        raw_eta_text: format!("{} min", duration_minutes(duration.value)),
        distance_text: distance.text.clone(),
        route_description_text,
    }
    .ensure_complete()
}

/// Whole minutes for a leg duration in seconds, never below one minute for a
/// non-zero trip.
pub(super) fn duration_minutes(seconds: f64) -> u64 {
    if seconds <= 0.0 {
        return 0;
    }
    ((seconds / 60.0).round() as u64).max(1)
}
