//! Request pipeline: match both endpoints, compose the traffic factor, fetch
//! the raw route and adjust its ETA.
//!
//! All per-request failures are folded into an [`EstimateOutcome`]; only
//! construction (loading the reference table, building the provider) can
//! return an error.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::compose::{compose, CompositeFactor, CompositionMode};
use crate::config::EstimatorConfig;
use crate::day::Day;
use crate::error::{EtaError, RouteLookupError};
use crate::eta::adjust;
use crate::matching::{match_location, MatchResult, MatchedLocation};
use crate::reference::{ReferenceTable, ReferenceTableHandle};
use crate::routing::{build_route_lookup, RawRouteResult, RouteLookup};
use crate::traffic::HourMultiplierTable;

/// One estimate request as entered by the operator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtaRequest {
    pub pickup: String,
    pub drop: String,
    pub day: Day,
    /// Two-digit hour label; `None` composes without the hour multiplier.
    #[serde(default)]
    pub hour: Option<String>,
}

impl EtaRequest {
    pub fn new(pickup: &str, drop: &str, day: Day, hour: Option<&str>) -> Self {
        Self {
            pickup: pickup.to_string(),
            drop: drop.to_string(),
            day,
            hour: hour.map(str::to_string),
        }
    }

    fn validate(&self) -> Result<(), EtaError> {
        if self.pickup.trim().is_empty() {
            return Err(EtaError::InvalidRequest("pickup location is empty".to_string()));
        }
        if self.drop.trim().is_empty() {
            return Err(EtaError::InvalidRequest("drop location is empty".to_string()));
        }
        Ok(())
    }
}

/// Matches and composite factor for a request, without any route data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub pickup: MatchResult,
    pub drop: MatchResult,
    pub mode: CompositionMode,
    pub factor: CompositeFactor,
}

/// Raw route data together with the traffic adjustment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EtaEstimate {
    pub raw_eta_text: String,
    pub distance_text: String,
    pub route_description_text: String,
    /// `None` when the raw ETA could not be parsed.
    pub adjusted_eta_minutes: Option<i64>,
    pub matched_pickup: MatchedLocation,
    pub matched_drop: MatchedLocation,
    pub factor: CompositeFactor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidRequest,
    RouteLookup,
    EtaParse,
}

/// Why a request did not produce a full estimate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReason {
    pub kind: FailureKind,
    pub message: String,
}

impl FailureReason {
    fn from_error(err: &EtaError) -> Self {
        let kind = match err {
            EtaError::RouteLookup(_) => FailureKind::RouteLookup,
            EtaError::EtaParse(_) | EtaError::EtaOutOfRange(_) => FailureKind::EtaParse,
            _ => FailureKind::InvalidRequest,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }

    /// Short operator-facing explanation.
    pub fn user_message(&self) -> &'static str {
        match self.kind {
            FailureKind::InvalidRequest => "Please enter both pickup and drop locations.",
            FailureKind::RouteLookup => {
                "Could not fetch data. Please check the input or try again."
            }
            FailureKind::EtaParse => "Traffic adjustment unavailable for this ETA.",
        }
    }
}

/// Result of [`EtaEstimator::estimate`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EstimateOutcome {
    /// Raw route and adjusted ETA available.
    Complete(EtaEstimate),
    /// Raw route available, adjustment failed.
    Partial {
        estimate: EtaEstimate,
        reason: FailureReason,
    },
    /// No raw route data.
    Failed { reason: FailureReason },
}

impl EstimateOutcome {
    pub fn estimate(&self) -> Option<&EtaEstimate> {
        match self {
            EstimateOutcome::Complete(estimate) => Some(estimate),
            EstimateOutcome::Partial { estimate, .. } => Some(estimate),
            EstimateOutcome::Failed { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&FailureReason> {
        match self {
            EstimateOutcome::Complete(_) => None,
            EstimateOutcome::Partial { reason, .. } | EstimateOutcome::Failed { reason } => {
                Some(reason)
            }
        }
    }
}

/// Immutable estimation context: reference data, hour multipliers and the
/// route provider, passed explicitly instead of living in globals.
pub struct EtaEstimator {
    table: Arc<ReferenceTableHandle>,
    multipliers: HourMultiplierTable,
    lookup: Option<Box<dyn RouteLookup>>,
    mode: CompositionMode,
}

impl EtaEstimator {
    pub fn new(
        table: Arc<ReferenceTableHandle>,
        multipliers: HourMultiplierTable,
        lookup: Option<Box<dyn RouteLookup>>,
    ) -> Self {
        Self {
            table,
            multipliers,
            lookup,
            mode: CompositionMode::DayHour,
        }
    }

    /// Estimator over an in-memory table with the standard multipliers.
    pub fn with_table(table: ReferenceTable, lookup: Option<Box<dyn RouteLookup>>) -> Self {
        Self::new(
            Arc::new(ReferenceTableHandle::new(table)),
            HourMultiplierTable::standard(),
            lookup,
        )
    }

    pub fn with_mode(mut self, mode: CompositionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Build everything a config describes. A missing or malformed reference
    /// table is fatal.
    pub fn from_config(config: &EstimatorConfig) -> Result<Self, EtaError> {
        config.validate()?;
        let reference_path = config
            .reference_path
            .as_deref()
            .ok_or_else(|| EtaError::data_load(None, "no reference table configured"))?;
        let table = ReferenceTable::from_path(Path::new(reference_path))?;
        let multipliers = HourMultiplierTable::from_kind(&config.hour_multipliers)?;
        let lookup = config
            .route_provider
            .as_ref()
            .map(|kind| {
                build_route_lookup(kind, config.route_cache_capacity, config.request_timeout())
            })
            .transpose()?;
        Ok(Self::new(Arc::new(ReferenceTableHandle::new(table)), multipliers, lookup)
            .with_mode(config.composition_mode))
    }

    /// Shared handle for hot-reloading the reference table.
    pub fn table_handle(&self) -> Arc<ReferenceTableHandle> {
        Arc::clone(&self.table)
    }

    pub fn multipliers(&self) -> &HourMultiplierTable {
        &self.multipliers
    }

    /// Match a single location against the current table snapshot.
    pub fn match_text(&self, input_text: &str, day: Day) -> MatchResult {
        match_location(&self.table.snapshot(), input_text, day)
    }

    fn effective_mode(&self, request: &EtaRequest) -> CompositionMode {
        match request.hour {
            Some(_) => self.mode,
            None => CompositionMode::DayOnly,
        }
    }

    /// Match both endpoints and compose the traffic factor.
    pub fn factor(&self, request: &EtaRequest) -> Result<FactorBreakdown, EtaError> {
        request.validate()?;
        let table = self.table.snapshot();
        let pickup = match_location(&table, &request.pickup, request.day);
        let drop = match_location(&table, &request.drop, request.day);
        let mode = self.effective_mode(request);
        let factor = compose(
            &pickup,
            &drop,
            request.day,
            request.hour.as_deref().unwrap_or_default(),
            &self.multipliers,
            mode,
        );
        Ok(FactorBreakdown {
            pickup,
            drop,
            mode,
            factor,
        })
    }

    fn fetch_route(&self, request: &EtaRequest) -> Result<RawRouteResult, EtaError> {
        let lookup = self.lookup.as_ref().ok_or_else(|| {
            EtaError::Config("no route provider configured".to_string())
        })?;
        let route = lookup
            .lookup(request.pickup.trim(), request.drop.trim())
            .inspect_err(|err: &RouteLookupError| {
                log::warn!(
                    "route lookup {:?} -> {:?} failed: {}",
                    request.pickup,
                    request.drop,
                    err
                );
            })?;
        Ok(route)
    }

    /// Run the full pipeline for one request. Never panics on bad input or
    /// provider failures.
    pub fn estimate(&self, request: &EtaRequest) -> EstimateOutcome {
        let breakdown = match self.factor(request) {
            Ok(breakdown) => breakdown,
            Err(err) => {
                return EstimateOutcome::Failed {
                    reason: FailureReason::from_error(&err),
                }
            }
        };

        let route = match self.fetch_route(request) {
            Ok(route) => route,
            Err(err) => {
                let mut reason = FailureReason::from_error(&err);
                if matches!(err, EtaError::Config(_)) {
                    reason.kind = FailureKind::RouteLookup;
                }
                return EstimateOutcome::Failed { reason };
            }
        };

        let adjusted = adjust(&route.raw_eta_text, breakdown.factor.final_factor);
        let mut estimate = EtaEstimate {
            raw_eta_text: route.raw_eta_text,
            distance_text: route.distance_text,
            route_description_text: route.route_description_text,
            adjusted_eta_minutes: None,
            matched_pickup: breakdown.pickup.location(),
            matched_drop: breakdown.drop.location(),
            factor: breakdown.factor,
        };

        match adjusted {
            Ok(minutes) => {
                log::info!(
                    "{:?} -> {:?} on {}: raw {} x {} = {} min",
                    request.pickup,
                    request.drop,
                    request.day,
                    estimate.raw_eta_text,
                    estimate.factor.final_factor,
                    minutes
                );
                estimate.adjusted_eta_minutes = Some(minutes);
                EstimateOutcome::Complete(estimate)
            }
            Err(err) => {
                log::warn!("cannot adjust raw ETA {:?}: {}", estimate.raw_eta_text, err);
                EstimateOutcome::Partial {
                    estimate,
                    reason: FailureReason::from_error(&err),
                }
            }
        }
    }
}
