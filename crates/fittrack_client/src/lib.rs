//! Async client for the fittrack progress REST API.
//!
//! Supplies the raw record collection the engine aggregates; the engine
//! itself stays pure and never touches the network.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

pub mod config;
pub mod http_client;
pub mod observability;
pub mod retry;
pub mod summary;

pub use config::Config;
pub use http_client::ReqwestProgressClient;
pub use summary::{fetch_and_aggregate, fetch_workout_records};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("api error (status {status}): {body}")]
    Api { status: u16, body: String },
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Engine(#[from] fittrack_engine::EngineError),
}

impl ClientError {
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::Auth(body),
            404 => Self::NotFound(body),
            422 => Self::InvalidInput(body),
            _ => Self::Api { status, body },
        }
    }
}

/// The progress API surface this crate needs. Implemented by
/// [`ReqwestProgressClient`]; kept as a trait so the aggregation
/// helpers are testable against fakes.
#[async_trait]
pub trait ProgressApi: Send + Sync + 'static {
    /// Fetch raw progress records in `[oldest, newest]`, sorted
    /// ascending by date by the backend. Returned untyped; the engine's
    /// normalizer owns the field mapping.
    async fn get_progress_records(
        &self,
        oldest: NaiveDate,
        newest: NaiveDate,
    ) -> Result<serde_json::Value, ClientError>;

    /// Dates (`YYYY-MM-DD`) with at least one workout in a month.
    async fn get_workout_days(&self, year: i32, month: u32) -> Result<Vec<String>, ClientError>;

    /// Record a workout completion with optional notes.
    async fn record_workout(
        &self,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> Result<(), ClientError>;
}
