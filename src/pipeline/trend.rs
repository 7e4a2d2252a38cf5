//! Trend calculator: compares a record's metric with its chronological
//! predecessor and judges the change by the metric's polarity.

use serde::{Deserialize, Serialize};

use crate::config::TREND_THRESHOLD;
use crate::models::{MeasurementRecord, Metric};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Same,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendIndicator {
    pub direction: TrendDirection,
    pub is_good: bool,
    pub value: f64,
    /// `None` for the oldest record, which has nothing to compare with.
    pub previous_value: Option<f64>,
}

impl TrendIndicator {
    /// Whether an up/down glyph should be drawn for this trend.
    pub fn is_renderable(&self) -> bool {
        self.previous_value.is_some() && self.direction != TrendDirection::Same
    }
}

/// Trend of `metric` from `previous` to `current`.
pub fn trend(
    current: &MeasurementRecord,
    previous: Option<&MeasurementRecord>,
    metric: Metric,
) -> TrendIndicator {
    let value = metric.value(current);
    let Some(previous) = previous else {
        return TrendIndicator {
            direction: TrendDirection::Same,
            is_good: true,
            value,
            previous_value: None,
        };
    };

    let previous_value = metric.value(previous);
    let diff = value - previous_value;
    let direction = if diff.abs() < TREND_THRESHOLD {
        TrendDirection::Same
    } else if diff > 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    };

    TrendIndicator {
        direction,
        is_good: (direction == TrendDirection::Up) == metric.higher_is_better(),
        value,
        previous_value: Some(previous_value),
    }
}

/// The record dated immediately before `current` among `records`.
///
/// Found by ordering `records` by date, newest first, and taking the entry
/// after `current` (matched by id). Records sharing a date keep their input
/// order, so which of them counts as "previous" depends on that order.
pub fn previous_record<'a>(
    records: &'a [MeasurementRecord],
    current: &MeasurementRecord,
) -> Option<&'a MeasurementRecord> {
    let mut by_date: Vec<&MeasurementRecord> = records.iter().collect();
    by_date.sort_by(|a, b| b.date().cmp(&a.date()));
    let index = by_date.iter().position(|r| r.id == current.id)?;
    by_date.get(index + 1).copied()
}

/// Trends for each of `metrics` on `current`, against its predecessor in `records`.
pub fn row_trends(
    records: &[MeasurementRecord],
    current: &MeasurementRecord,
    metrics: &[Metric],
) -> Vec<(Metric, TrendIndicator)> {
    let previous = previous_record(records, current);
    metrics
        .iter()
        .map(|&m| (m, trend(current, previous, m)))
        .collect()
}
