//! Normalization of raw backend records into canonical [`WorkoutRecord`]s.
//!
//! The backend sends loosely-typed snake_case objects whose field names
//! drifted over time (`workout_date` vs `date`). Optional fields get
//! documented defaults; a missing or unparseable date is the caller's
//! contract violation and the one failure that propagates.

use crate::{EngineError, WorkoutRecord};
use chrono::NaiveDate;
use serde_json::Value;

/// Normalize a date string to a calendar date.
///
/// Accepts:
/// - YYYY-MM-DD
/// - RFC3339 datetime (date part extracted)
/// - Naive datetime YYYY-MM-DDTHH:MM:SS (date part extracted)
pub fn normalize_date_str(s: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(ndt.date());
    }
    None
}

/// Map one raw backend record to a canonical [`WorkoutRecord`].
pub fn normalize_record(raw: &Value) -> Result<WorkoutRecord, EngineError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| EngineError::ContractViolation("record is not an object".into()))?;

    let date = ["workout_date", "date"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .and_then(normalize_date_str)
        .ok_or_else(|| {
            EngineError::ContractViolation("record has no parseable workout date".into())
        })?;

    let raw_notes = obj
        .get("notes")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let duration_minutes = obj
        .get("duration_minutes")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    let satisfaction_rating = obj.get("satisfaction_rating").and_then(Value::as_f64);

    Ok(WorkoutRecord {
        date,
        raw_notes,
        duration_minutes,
        satisfaction_rating,
    })
}

/// Normalize a whole backend response. Non-array input violates the
/// contract; the result is sorted ascending by date, which is the
/// ordering the aggregator assumes.
pub fn normalize_records(raw: &Value) -> Result<Vec<WorkoutRecord>, EngineError> {
    let arr = raw
        .as_array()
        .ok_or_else(|| EngineError::ContractViolation("records payload is not an array".into()))?;

    let mut records = arr
        .iter()
        .map(normalize_record)
        .collect::<Result<Vec<_>, _>>()?;
    records.sort_by_key(|r| r.date);
    Ok(records)
}
