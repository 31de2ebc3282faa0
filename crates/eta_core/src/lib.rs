//! Traffic-adjusted trip ETA estimation.
//!
//! A raw ETA from a mapping provider is scaled by a composite traffic factor
//! built from historical data: each endpoint's free-text location is matched
//! against a reference table of Travel Time Indices (TTI) for the requested
//! day, the two indices are averaged, and the average is scaled by an
//! hour-of-day multiplier from a weekday or weekend profile.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use eta_core::{Day, EtaEstimator, EtaRequest, FixtureRouteLookup, ReferenceTable};
//!
//! let table = ReferenceTable::from_path(Path::new("tti.csv")).unwrap();
//! let routes = FixtureRouteLookup::from_file(Path::new("routes.json")).unwrap();
//! let estimator = EtaEstimator::with_table(table, Some(Box::new(routes)));
//!
//! let request = EtaRequest::new("Koramangala", "Hebbal", Day::Mon, Some("08"));
//! let outcome = estimator.estimate(&request);
//! println!("{}", serde_json::to_string_pretty(&outcome).unwrap());
//! ```
//!
//! # Architecture
//!
//! - [`reference`]: CSV-backed reference table and its swappable handle
//! - [`matching`]: case-insensitive, first-match-wins location lookup
//! - [`traffic`]: weekday/weekend hour multipliers
//! - [`compose`]: composite factor with two-stage rounding
//! - [`eta`]: raw ETA parsing and adjustment
//! - [`routing`]: mapping-provider trait, fixture/directions providers, caching
//! - [`estimator`]: the per-request pipeline and its structured outcome
//! - [`config`]: JSON configuration

pub mod compose;
pub mod config;
pub mod day;
pub mod error;
pub mod estimator;
pub mod eta;
pub mod matching;
pub mod reference;
pub mod routing;
pub mod traffic;

pub use compose::{average_tti, compose, round3, CompositeFactor, CompositionMode};
pub use config::EstimatorConfig;
pub use day::{Day, DayCategory};
pub use error::{EtaError, RouteLookupError};
pub use estimator::{
    EstimateOutcome, EtaEstimate, EtaEstimator, EtaRequest, FactorBreakdown, FailureKind,
    FailureReason,
};
pub use eta::{adjust, parse_eta_minutes, split_eta_text};
pub use matching::{match_location, MatchResult, MatchedLocation, NEUTRAL_TTI};
pub use reference::{ReferenceTable, ReferenceTableHandle, TravelTimeRecord};
pub use routing::{
    build_route_lookup, CachedRouteLookup, FixtureRouteLookup, RawRouteResult, RouteFixture,
    RouteLookup, RouteProviderKind,
};
pub use traffic::{HourMultiplierKind, HourMultiplierTable, HourlyProfile};
