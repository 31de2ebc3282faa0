//! Pluggable raw-route lookups: trait abstraction for mapping providers.
//!
//! Two implementations, selectable via [`RouteProviderKind`]:
//!
//! - **`FixtureRouteLookup`**: Route results loaded from a JSON file. No network.
//! - **`DirectionsRouteLookup`** (feature `directions`): Calls a directions HTTP endpoint.
//!
//! Network-backed providers are wrapped in a [`CachedRouteLookup`] by
//! [`build_route_lookup`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::error::{EtaError, RouteLookupError};
use crate::eta::split_eta_text;

// ---------------------------------------------------------------------------
// Core types
// ---------------------------------------------------------------------------

/// Raw route data for one pickup/drop pair, as displayed by the provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRouteResult {
    /// Unadjusted ETA, e.g. `"15 min"`.
    pub raw_eta_text: String,
    /// Distance for display, e.g. `"8.4 km"`.
    pub distance_text: String,
    /// Free-text description of the route, e.g. `"via Outer Ring Rd"`.
    pub route_description_text: String,
}

impl RawRouteResult {
    /// A result missing any of its three fields is treated as a failed lookup.
    pub fn ensure_complete(self) -> Result<Self, RouteLookupError> {
        if self.raw_eta_text.trim().is_empty() {
            return Err(RouteLookupError::MissingElement("eta"));
        }
        if self.distance_text.trim().is_empty() {
            return Err(RouteLookupError::MissingElement("distance"));
        }
        if self.route_description_text.trim().is_empty() {
            return Err(RouteLookupError::MissingElement("route description"));
        }
        Ok(self)
    }
}

/// Which mapping provider to query.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteProviderKind {
    /// JSON file of recorded routes.
    Fixture { path: String },
    /// Directions HTTP endpoint (Google Directions compatible).
    #[cfg(feature = "directions")]
    Directions {
        #[serde(default = "directions::default_endpoint")]
        endpoint: String,
        api_key: String,
    },
}

/// Trait for mapping providers. Implementations must be `Send + Sync` so one
/// lookup can serve concurrent requests.
pub trait RouteLookup: Send + Sync {
    /// Fetch the raw route between two free-text locations.
    fn lookup(&self, pickup: &str, drop: &str) -> Result<RawRouteResult, RouteLookupError>;
}

fn route_key(pickup: &str, drop: &str) -> (String, String) {
    (pickup.trim().to_lowercase(), drop.trim().to_lowercase())
}

// ---------------------------------------------------------------------------
// Fixture provider (always available)
// ---------------------------------------------------------------------------

/// One recorded route in a fixture file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteFixture {
    pub pickup: String,
    pub drop: String,
    /// Either a plain ETA (`"15 min"`) or a full trip summary such as
    /// `"15 min (4.2 km) via MG Road Details"`.
    pub eta_text: String,
    pub distance_text: String,
    /// Route description; derived from `eta_text` when omitted.
    #[serde(default)]
    pub route_description_text: Option<String>,
}

impl RouteFixture {
    fn into_result(self) -> RawRouteResult {
        match self.route_description_text {
            Some(route) => RawRouteResult {
                raw_eta_text: self.eta_text,
                distance_text: self.distance_text,
                route_description_text: route,
            },
            None => {
                let (eta, route) = split_eta_text(&self.eta_text);
                RawRouteResult {
                    raw_eta_text: eta,
                    distance_text: self.distance_text,
                    route_description_text: route,
                }
            }
        }
    }
}

/// Looks routes up in a table of recorded results keyed by
/// case-insensitive `(pickup, drop)`.
#[derive(Clone, Debug, Default)]
pub struct FixtureRouteLookup {
    routes: HashMap<(String, String), RawRouteResult>,
}

impl FixtureRouteLookup {
    pub fn from_fixtures(fixtures: Vec<RouteFixture>) -> Self {
        let routes = fixtures
            .into_iter()
            .map(|f| (route_key(&f.pickup, &f.drop), f.into_result()))
            .collect();
        Self { routes }
    }

    /// Load from a JSON array of [`RouteFixture`]s.
    pub fn from_file(path: &Path) -> Result<Self, EtaError> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            EtaError::Config(format!("cannot read route fixtures {}: {e}", path.display()))
        })?;
        let fixtures: Vec<RouteFixture> = serde_json::from_str(&data).map_err(|e| {
            EtaError::Config(format!("invalid route fixtures {}: {e}", path.display()))
        })?;
        log::info!("loaded {} route fixtures from {}", fixtures.len(), path.display());
        Ok(Self::from_fixtures(fixtures))
    }

    pub fn insert(&mut self, pickup: &str, drop: &str, route: RawRouteResult) {
        self.routes.insert(route_key(pickup, drop), route);
    }
}

impl RouteLookup for FixtureRouteLookup {
    fn lookup(&self, pickup: &str, drop: &str) -> Result<RawRouteResult, RouteLookupError> {
        self.routes
            .get(&route_key(pickup, drop))
            .cloned()
            .ok_or(RouteLookupError::NotFound)?
            .ensure_complete()
    }
}

// ---------------------------------------------------------------------------
// Directions provider (behind `directions` feature)
// ---------------------------------------------------------------------------

#[cfg(feature = "directions")]
pub mod directions;

// ---------------------------------------------------------------------------
// Caching wrapper
// ---------------------------------------------------------------------------

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;

/// LRU-cached wrapper around any [`RouteLookup`].
///
/// Cache key is the case-insensitive, trimmed `(pickup, drop)` pair
/// (directional). Failures are never cached so a retry hits the provider.
pub struct CachedRouteLookup {
    inner: Box<dyn RouteLookup>,
    cache: Mutex<LruCache<(String, String), RawRouteResult>>,
}

impl CachedRouteLookup {
    pub fn new(inner: Box<dyn RouteLookup>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }
}

impl RouteLookup for CachedRouteLookup {
    fn lookup(&self, pickup: &str, drop: &str) -> Result<RawRouteResult, RouteLookupError> {
        let key = route_key(pickup, drop);

        // Fast path: cache hit
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(cached) = cache.get(&key) {
                log::debug!("route cache hit for {:?} -> {:?}", pickup, drop);
                return Ok(cached.clone());
            }
        }

        // Slow path: query inner provider
        let route = self.inner.lookup(pickup, drop)?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, route.clone());
        }
        Ok(route)
    }
}

// ---------------------------------------------------------------------------
// Factory: build a lookup from RouteProviderKind
// ---------------------------------------------------------------------------

/// Default route cache capacity for network-backed providers.
pub const DEFAULT_ROUTE_CACHE_CAPACITY: usize = 256;

/// Default bound on a single provider request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Construct a boxed [`RouteLookup`] from a [`RouteProviderKind`] descriptor.
///
/// - `Fixture` is returned without caching (it is an in-memory map already).
/// - `Directions` is wrapped in a [`CachedRouteLookup`] of `cache_capacity`.
#[cfg_attr(not(feature = "directions"), allow(unused_variables))]
pub fn build_route_lookup(
    kind: &RouteProviderKind,
    cache_capacity: usize,
    timeout: Duration,
) -> Result<Box<dyn RouteLookup>, EtaError> {
    match kind {
        RouteProviderKind::Fixture { path } => {
            Ok(Box::new(FixtureRouteLookup::from_file(Path::new(path))?))
        }

        #[cfg(feature = "directions")]
        RouteProviderKind::Directions { endpoint, api_key } => {
            let inner = Box::new(directions::DirectionsRouteLookup::new(
                endpoint, api_key, timeout,
            )?);
            Ok(Box::new(CachedRouteLookup::new(inner, cache_capacity)))
        }
    }
}
