//! Result materialization: positional scan of a row cursor into typed records, with
//! the derived `Status` computed against one `now` per call.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rusqlite::types::ValueRef;
use rusqlite::{Row, Rows};
use serde::{Deserialize, Serialize};

use super::CatalogEntry;
use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Open,
    Closed,
}

impl Status {
    /// OPEN only while the advertised start is strictly after `now`.
    pub fn at(advertised_start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if now < advertised_start { Status::Open } else { Status::Closed }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "OPEN",
            Status::Closed => "CLOSED",
        }
    }
}

/// Fields every catalog row shares, scanned before the catalog-specific columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventHeader {
    pub id: i64,
    pub grouping_id: i64,
    pub visible: bool,
    pub advertised_start_time: DateTime<Utc>,
    pub status: Status,
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Integers above this magnitude are unix milliseconds rather than seconds.
const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

/// Parse a stored advertised-start value. RFC 3339 text keeps its offset and is
/// normalized to UTC; SQLite's naive `YYYY-MM-DD HH:MM:SS` forms are taken as UTC,
/// and a bare `YYYY-MM-DD` is midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_FORMATS.iter().find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok()) {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Integer storage is unix seconds, or unix milliseconds past `MILLIS_THRESHOLD`.
pub fn timestamp_from_integer(v: i64) -> Option<DateTime<Utc>> {
    if v.unsigned_abs() > MILLIS_THRESHOLD as u64 {
        DateTime::from_timestamp_millis(v)
    } else {
        DateTime::from_timestamp(v, 0)
    }
}

fn advertised_start(row: &Row<'_>, idx: usize, column: &'static str) -> CatalogResult<DateTime<Utc>> {
    match row.get_ref(idx)? {
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            parse_timestamp(&text).ok_or_else(|| CatalogError::Conversion { column, value: text.into_owned() })
        }
        ValueRef::Integer(v) => timestamp_from_integer(v).ok_or(CatalogError::Conversion { column, value: v.to_string() }),
        ValueRef::Null => Err(CatalogError::Conversion { column, value: "NULL".to_string() }),
        other => Err(CatalogError::Conversion { column, value: format!("{:?}", other.data_type()) }),
    }
}

pub fn scan_header<E: CatalogEntry>(row: &Row<'_>, now: DateTime<Utc>) -> CatalogResult<EventHeader> {
    let def = E::TABLE;
    let advertised_start_time = advertised_start(row, def.advertised_start_index(), def.advertised_start_column())?;
    Ok(EventHeader {
        id: row.get(0)?,
        grouping_id: row.get(1)?,
        visible: row.get(def.visible_index())?,
        advertised_start_time,
        status: Status::at(advertised_start_time, now),
    })
}

/// Drain `rows` into records. Any scan or conversion failure discards the whole batch.
pub fn materialize<E: CatalogEntry>(mut rows: Rows<'_>, now: DateTime<Utc>) -> CatalogResult<Vec<E>> {
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let header = scan_header::<E>(row, now)?;
        out.push(E::from_row(row, header)?);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "materialize_tests.rs"]
mod materialize_tests;
