//! Fetch-then-aggregate convenience over the progress API.
//!
//! Fetching and normalization happen here; the aggregation itself is
//! the engine's pure single pass. This is also where the aggregator's
//! ordering contract is upheld: `normalize_records` sorts ascending
//! before anything is aggregated.

use crate::{ClientError, ProgressApi};
use chrono::Duration;
use fittrack_engine::{
    AggregateResult, MuscleGroupTable, Window, WorkoutRecord, aggregate, normalize_records,
};

/// Fetch and normalize the raw records covering `window`.
pub async fn fetch_workout_records<A>(
    api: &A,
    window: Window,
) -> Result<Vec<WorkoutRecord>, ClientError>
where
    A: ProgressApi + ?Sized,
{
    let newest = window.start + Duration::days(i64::from(window.days.saturating_sub(1)));
    let raw = api.get_progress_records(window.start, newest).await?;
    let records = normalize_records(&raw)?;
    tracing::debug!(count = records.len(), "fetched workout records");
    Ok(records)
}

/// Fetch one window of records and aggregate every derived view.
pub async fn fetch_and_aggregate<A>(
    api: &A,
    window: Window,
    table: &MuscleGroupTable,
) -> Result<AggregateResult, ClientError>
where
    A: ProgressApi + ?Sized,
{
    let records = fetch_workout_records(api, window).await?;
    Ok(aggregate(&records, window, table))
}
