//! Route lookups against a Google-Directions-compatible HTTP endpoint.
//!
//! The endpoint takes free-text `origin`/`destination` and returns routes with
//! per-leg duration and distance. Only the first route's first leg is used; its
//! duration is normalized into whole minutes so the adjuster can read it.

mod client;
mod parser;
mod response;


/// Public Google Directions JSON endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/directions/json";

pub(crate) fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

pub use client::DirectionsRouteLookup;
