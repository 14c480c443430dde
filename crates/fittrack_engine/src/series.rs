//! Presentation-ready label/value shapes for the chart layer.
//!
//! Thin projections over [`AggregateResult`]; no colors, axes or other
//! styling, those belong to the renderer.

use crate::aggregate::AggregateResult;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::Serialize;

/// Ordered label axis paired with equal-length numeric series.
#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct RankedEntry {
    pub name: String,
    pub value: f64,
}

/// Short date label for chart axes, e.g. "05 Jan".
fn date_label(date: NaiveDate) -> String {
    date.format("%d %b").to_string()
}

fn single_series(label: &str, points: Vec<(NaiveDate, f64)>) -> ChartData {
    let (labels, data): (Vec<String>, Vec<f64>) = points
        .into_iter()
        .map(|(date, value)| (date_label(date), value))
        .unzip();
    ChartData {
        labels,
        datasets: vec![Dataset {
            label: label.to_string(),
            data,
        }],
    }
}

/// Workouts-per-day bar series.
pub fn workouts_chart(result: &AggregateResult) -> ChartData {
    single_series(
        "Workouts",
        result
            .daily
            .iter()
            .map(|d| (d.date, f64::from(d.workout_count)))
            .collect(),
    )
}

/// Total training minutes per day.
pub fn duration_chart(result: &AggregateResult) -> ChartData {
    single_series(
        "Duration (min)",
        result
            .daily
            .iter()
            .map(|d| (d.date, d.total_duration_minutes))
            .collect(),
    )
}

/// Mean satisfaction per day. Days without any rating are skipped
/// rather than plotted as zero.
pub fn rating_chart(result: &AggregateResult) -> ChartData {
    single_series(
        "Average Rating",
        result
            .daily
            .iter()
            .filter_map(|d| d.average_satisfaction.map(|r| (d.date, r)))
            .collect(),
    )
}

/// Training volume per day; days without parseable exercises are
/// already absent from the underlying view.
pub fn daily_volume_chart(result: &AggregateResult) -> ChartData {
    single_series(
        "Volume (kg)",
        result
            .daily_volume
            .iter()
            .map(|d| (d.date, d.volume))
            .collect(),
    )
}

/// Total volume per muscle group, first-seen label order.
pub fn muscle_volume_chart(result: &AggregateResult) -> ChartData {
    ChartData {
        labels: result
            .muscle_groups
            .iter()
            .map(|g| g.group.clone())
            .collect(),
        datasets: vec![Dataset {
            label: "Volume (kg)".to_string(),
            data: result.muscle_groups.iter().map(|g| g.volume).collect(),
        }],
    }
}

/// Training frequency per muscle group.
pub fn muscle_frequency_chart(result: &AggregateResult) -> ChartData {
    ChartData {
        labels: result
            .muscle_groups
            .iter()
            .map(|g| g.group.clone())
            .collect(),
        datasets: vec![Dataset {
            label: "Sessions".to_string(),
            data: result
                .muscle_groups
                .iter()
                .map(|g| f64::from(g.frequency))
                .collect(),
        }],
    }
}

/// One dataset per tracked exercise over the dates present in the
/// window's records.
pub fn exercise_series_chart(result: &AggregateResult) -> ChartData {
    ChartData {
        labels: result
            .series_dates
            .iter()
            .map(|d| date_label(*d))
            .collect(),
        datasets: result
            .exercise_series
            .iter()
            .map(|s| Dataset {
                label: s.name.clone(),
                data: s.values.clone(),
            })
            .collect(),
    }
}

/// Top-exercise ranking as an ordered name/value list.
pub fn exercise_ranking(result: &AggregateResult) -> Vec<RankedEntry> {
    result
        .exercise_ranking
        .iter()
        .map(|e| RankedEntry {
            name: e.name.clone(),
            value: e.volume,
        })
        .collect()
}
