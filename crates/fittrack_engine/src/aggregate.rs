//! Windowed aggregation of workout records into the derived views
//! behind the progress charts and summaries.
//!
//! One pass over the caller-supplied records: each in-window record's
//! notes are parsed exactly once and every view is fed from that single
//! [`ParseOutcome`]. The caller supplies records pre-sorted ascending
//! by date; the aggregator never re-sorts.

use crate::muscle_groups::MuscleGroupTable;
use crate::note_parser::parse_notes;
use crate::{ExerciseEntry, WorkoutRecord};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::Serialize;
use std::collections::HashMap;

/// Ranking depth of the per-exercise volume view.
const RANKING_SIZE: usize = 10;

/// How many exercises get a dedicated time series.
const TRACKED_EXERCISES: usize = 5;

/// Contiguous date range, inclusive start, exclusive end, compared at
/// day granularity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDate,
    pub days: u32,
}

impl Window {
    pub fn new(start: NaiveDate, days: u32) -> Self {
        Self { start, days }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.start + chrono::Duration::days(i64::from(self.days))
    }
}

/// Per-date workout counts, durations and mean satisfaction.
#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct DailyPerformance {
    pub date: NaiveDate,
    pub workout_count: u32,
    pub total_duration_minutes: f64,
    /// Present only when at least one record that day carried a rating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_satisfaction: Option<f64>,
}

/// Per-date training volume (`reps * weight` summed over all sets).
/// Dates with no parseable exercises are omitted, not zero-filled.
#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct DailyVolume {
    pub date: NaiveDate,
    pub volume: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct MuscleGroupStat {
    pub group: String,
    /// Full record volume, attributed to every resolved group rather
    /// than split between them.
    pub volume: f64,
    /// Records counted once per resolved group.
    pub frequency: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct ExerciseStat {
    pub name: String,
    pub volume: f64,
}

/// Value-per-date series for one tracked exercise, aligned with
/// [`AggregateResult::series_dates`] and zero-filled where the exercise
/// did not appear.
#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct ExerciseSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// All derived views over one window of records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, JsonSchema)]
pub struct AggregateResult {
    pub daily: Vec<DailyPerformance>,
    pub daily_volume: Vec<DailyVolume>,
    /// First-seen label order across the scanned records.
    pub muscle_groups: Vec<MuscleGroupStat>,
    /// Top exercises by descending volume; ties keep first-seen order.
    pub exercise_ranking: Vec<ExerciseStat>,
    /// Every date present in the window's records, ascending.
    pub series_dates: Vec<NaiveDate>,
    /// Up to five exercises in first-seen order (not by volume).
    pub exercise_series: Vec<ExerciseSeries>,
}

struct DayAcc {
    date: NaiveDate,
    workout_count: u32,
    duration: f64,
    rating_sum: f64,
    rating_count: u32,
    volume: f64,
    saw_exercises: bool,
}

impl DayAcc {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            workout_count: 0,
            duration: 0.0,
            rating_sum: 0.0,
            rating_count: 0,
            volume: 0.0,
            saw_exercises: false,
        }
    }
}

/// Aggregate one window of records into every derived view.
///
/// Body-composition notes are excluded outright, even when they also
/// contain exercise-looking patterns. Unparseable notes still count
/// toward daily performance (the workout happened, its notes are just
/// prose) but contribute zero volume.
pub fn aggregate(
    records: &[WorkoutRecord],
    window: Window,
    table: &MuscleGroupTable,
) -> AggregateResult {
    let mut days: Vec<DayAcc> = Vec::new();

    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<MuscleGroupStat> = Vec::new();

    let mut exercise_index: HashMap<String, usize> = HashMap::new();
    let mut exercise_totals: Vec<ExerciseStat> = Vec::new();
    // Per-exercise volume keyed by day slot, for the time-series view.
    let mut exercise_by_day: Vec<HashMap<usize, f64>> = Vec::new();

    for record in records {
        if !window.contains(record.date) {
            continue;
        }
        let outcome = parse_notes(Some(record.raw_notes.as_str()));
        if outcome.is_body_composition() {
            continue;
        }

        // Records arrive ascending, so equal dates are adjacent.
        if !days.last().is_some_and(|last| last.date == record.date) {
            days.push(DayAcc::new(record.date));
        }
        let day_idx = days.len() - 1;
        let day = &mut days[day_idx];
        day.workout_count += 1;
        day.duration += record.duration_minutes;
        if let Some(rating) = record.satisfaction_rating {
            day.rating_sum += rating;
            day.rating_count += 1;
        }

        let exercises = outcome.exercises();
        let record_volume: f64 = exercises.iter().map(ExerciseEntry::volume).sum();
        if !exercises.is_empty() {
            day.saw_exercises = true;
            day.volume += record_volume;
        }

        for exercise in exercises {
            let slot = *exercise_index
                .entry(exercise.name.clone())
                .or_insert_with(|| {
                    exercise_totals.push(ExerciseStat {
                        name: exercise.name.clone(),
                        volume: 0.0,
                    });
                    exercise_by_day.push(HashMap::new());
                    exercise_totals.len() - 1
                });
            let volume = exercise.volume();
            exercise_totals[slot].volume += volume;
            *exercise_by_day[slot].entry(day_idx).or_insert(0.0) += volume;
        }

        if let Some(workout_type) = outcome.workout_type() {
            for group in table.resolve(workout_type) {
                let slot = *group_index.entry(group.clone()).or_insert_with(|| {
                    groups.push(MuscleGroupStat {
                        group,
                        volume: 0.0,
                        frequency: 0,
                    });
                    groups.len() - 1
                });
                groups[slot].volume += record_volume;
                groups[slot].frequency += 1;
            }
        }
    }

    let daily = days
        .iter()
        .map(|d| DailyPerformance {
            date: d.date,
            workout_count: d.workout_count,
            total_duration_minutes: d.duration,
            average_satisfaction: (d.rating_count > 0)
                .then(|| d.rating_sum / f64::from(d.rating_count)),
        })
        .collect();

    let daily_volume = days
        .iter()
        .filter(|d| d.saw_exercises)
        .map(|d| DailyVolume {
            date: d.date,
            volume: d.volume,
        })
        .collect();

    let exercise_ranking = rank_exercises(&exercise_totals);

    let series_dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
    let exercise_series = exercise_totals
        .iter()
        .zip(&exercise_by_day)
        .take(TRACKED_EXERCISES)
        .map(|(stat, by_day)| ExerciseSeries {
            name: stat.name.clone(),
            values: (0..days.len())
                .map(|i| by_day.get(&i).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect();

    AggregateResult {
        daily,
        daily_volume,
        muscle_groups: groups,
        exercise_ranking,
        series_dates,
        exercise_series,
    }
}

/// Top exercises by descending total volume; the stable sort keeps
/// first-seen order among ties.
fn rank_exercises(totals: &[ExerciseStat]) -> Vec<ExerciseStat> {
    let mut ranked = totals.to_vec();
    ranked.sort_by(|a, b| {
        b.volume
            .partial_cmp(&a.volume)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(RANKING_SIZE);
    ranked
}
