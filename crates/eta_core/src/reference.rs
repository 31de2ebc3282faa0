//! Historical travel-time reference data.
//!
//! The reference table holds one row per (day, location) observation with a
//! Travel Time Index (TTI). It is loaded once from CSV and never mutated; a
//! [`ReferenceTableHandle`] allows swapping in a freshly loaded snapshot
//! without disturbing readers that still hold the previous one.

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::day::Day;
use crate::error::EtaError;

/// One row of the reference table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TravelTimeRecord {
    pub day: Day,
    #[serde(rename = "Area Name")]
    pub area_name: String,
    #[serde(rename = "Road/Intersection Name")]
    pub road_name: String,
    /// Multiplicative slowdown relative to a 1.0 baseline. Always > 0.
    #[serde(rename = "Travel Time Index")]
    pub travel_time_index: f64,
}

/// Ordered, immutable collection of [`TravelTimeRecord`]s.
///
/// Row order is the order of the source file and decides ties during
/// location matching.
#[derive(Clone, Debug, Default)]
pub struct ReferenceTable {
    records: Vec<TravelTimeRecord>,
}

impl ReferenceTable {
    /// Build from in-memory records, rejecting non-positive indices.
    pub fn from_records(records: Vec<TravelTimeRecord>) -> Result<Self, EtaError> {
        for (idx, record) in records.iter().enumerate() {
            validate_record(record, idx, None)?;
        }
        Ok(Self { records })
    }

    /// Load a CSV file with columns `day`, `Area Name`,
    /// `Road/Intersection Name`, `Travel Time Index`.
    pub fn from_path(path: &Path) -> Result<Self, EtaError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| {
                EtaError::data_load(Some(path), format!("cannot open reference file: {e}"))
            })?;
        let table = read_records(reader, Some(path))?;
        log::info!(
            "loaded {} reference rows from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Load CSV from any reader (same format as [`ReferenceTable::from_path`]).
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, EtaError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);
        read_records(reader, None)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows for `day`, in table order.
    pub fn rows_for_day(&self, day: Day) -> impl Iterator<Item = &TravelTimeRecord> + '_ {
        self.records.iter().filter(move |r| r.day == day)
    }
}

const REQUIRED_COLUMNS: [&str; 4] = [
    "day",
    "Area Name",
    "Road/Intersection Name",
    "Travel Time Index",
];

fn read_records<R: Read>(
    mut reader: csv::Reader<R>,
    path: Option<&Path>,
) -> Result<ReferenceTable, EtaError> {
    let headers = reader
        .headers()
        .map_err(|e| EtaError::data_load(path, format!("cannot read header row: {e}")))?
        .clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(EtaError::data_load(
                path,
                format!("missing required column '{column}'"),
            ));
        }
    }

    let mut records = Vec::new();
    for (idx, row) in reader.deserialize::<TravelTimeRecord>().enumerate() {
        let record = row.map_err(|e| {
            EtaError::data_load(path, format!("failed to deserialize row {}: {e}", idx + 1))
        })?;
        validate_record(&record, idx, path)?;
        records.push(record);
    }
    Ok(ReferenceTable { records })
}

fn validate_record(
    record: &TravelTimeRecord,
    idx: usize,
    path: Option<&Path>,
) -> Result<(), EtaError> {
    let tti = record.travel_time_index;
    if !tti.is_finite() || tti <= 0.0 {
        return Err(EtaError::data_load(
            path,
            format!("row {} has non-positive travel time index {tti}", idx + 1),
        ));
    }
    Ok(())
}

/// Shared, swappable reference-table snapshot.
///
/// `snapshot()` hands out an `Arc` to the current table; `replace()` installs a
/// new table atomically. A request should take one snapshot and use it for
/// both endpoints so it never mixes two table versions.
#[derive(Debug, Default)]
pub struct ReferenceTableHandle {
    current: RwLock<Arc<ReferenceTable>>,
}

impl ReferenceTableHandle {
    pub fn new(table: ReferenceTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    pub fn snapshot(&self) -> Arc<ReferenceTable> {
        // The guarded value is a plain Arc, so a poisoned lock still holds a
        // complete table.
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Swap in `table`, returning the previous snapshot.
    pub fn replace(&self, table: ReferenceTable) -> Arc<ReferenceTable> {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        log::info!("replacing reference table ({} rows)", table.len());
        std::mem::replace(&mut *guard, Arc::new(table))
    }

    /// Reload from `path`; on failure the current snapshot stays in place.
    pub fn reload_from_path(&self, path: &Path) -> Result<Arc<ReferenceTable>, EtaError> {
        let table = ReferenceTable::from_path(path)?;
        Ok(self.replace(table))
    }
}
