//! Core engine for the fittrack progress views: recovers structured
//! workout data from free-text notes and aggregates it into the series
//! backing the charts and summaries.
//!
//! Everything in this crate is pure and synchronous; fetching the raw
//! records is the client crate's job.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod aggregate;
pub mod muscle_groups;
pub mod normalize;
pub mod note_parser;
pub mod series;

pub use aggregate::{AggregateResult, Window, aggregate};
pub use muscle_groups::MuscleGroupTable;
pub use normalize::{normalize_record, normalize_records};
pub use note_parser::parse_notes;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The caller did not uphold the normalization contract (non-array
    /// input, or a record without a usable date). The only error class
    /// that propagates; everything parse-level degrades to a
    /// [`ParseOutcome`] variant instead.
    #[error("contract violation: {0}")]
    ContractViolation(String),
}

/// One set within an exercise. Absent fields decode as zero so volume
/// arithmetic (`reps * weight`) is always defined.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SetEntry {
    #[serde(default)]
    pub reps: u32,
    #[serde(default)]
    pub weight: f64,
}

impl SetEntry {
    pub fn volume(&self) -> f64 {
        f64::from(self.reps) * self.weight
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExerciseEntry {
    pub name: String,
    #[serde(default)]
    pub sets: Vec<SetEntry>,
}

impl ExerciseEntry {
    pub fn volume(&self) -> f64 {
        self.sets.iter().map(SetEntry::volume).sum()
    }
}

/// Machine-written payload embedded in a note, either behind the
/// `WORKOUT_DATA:` marker or as a bare JSON object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WorkoutPayload {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<String>,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
}

/// Whatever subset the textual heuristics managed to recover from a
/// hand-written note.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HeuristicPayload {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_count: Option<u32>,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
}

/// Result of classifying one raw note string.
///
/// The historical notes field accumulated several incompatible
/// encodings; a single nullable return cannot tell "body composition"
/// from "empty" from "unparseable", so the outcome is explicit and
/// callers branch exhaustively.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseOutcome {
    /// Embedded or bare JSON object recovered (trusted machine path).
    Json(WorkoutPayload),
    /// Textual heuristic extraction recovered at least something.
    Heuristic(HeuristicPayload),
    /// The note is a body-composition record, not a workout. Must never
    /// contribute to workout aggregation.
    BodyComposition,
    /// No structured data; callers fall back to showing the raw text.
    Unparsed,
}

impl ParseOutcome {
    /// Exercises usable for volume aggregation. Empty for
    /// `BodyComposition` and `Unparsed`.
    pub fn exercises(&self) -> &[ExerciseEntry] {
        match self {
            Self::Json(p) => &p.exercises,
            Self::Heuristic(p) => &p.exercises,
            Self::BodyComposition | Self::Unparsed => &[],
        }
    }

    /// Workout type label, when one was recovered.
    pub fn workout_type(&self) -> Option<&str> {
        match self {
            Self::Json(p) => p.workout_type.as_deref(),
            Self::Heuristic(p) => p.workout_type.as_deref(),
            Self::BodyComposition | Self::Unparsed => None,
        }
    }

    pub fn is_body_composition(&self) -> bool {
        matches!(self, Self::BodyComposition)
    }
}

/// Canonical workout record, post-normalization. Immutable; consumed
/// only by the aggregator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WorkoutRecord {
    /// Calendar date, no time component.
    pub date: chrono::NaiveDate,
    /// The free-text notes field, possibly empty.
    pub raw_notes: String,
    #[serde(default)]
    pub duration_minutes: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satisfaction_rating: Option<f64>,
}
