//! Derived series builder: chart-ready points from the raw record list.
//!
//! Charts always read oldest to newest, whatever order the table is in.
//! Each chart rounds its metrics to its own precision, listed in [`Chart`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::dates::format_date;
use super::round_to;
use crate::config::SMA_WINDOW;
use crate::models::{Axis, MeasurementRecord, Metric};

// ---------------------------------------------------------------------------
// ChartPoint / SeriesSpec
// ---------------------------------------------------------------------------

/// One x-axis position: a record's date plus its selected, rounded metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date_label: String,
    pub date: i64,
    pub values: BTreeMap<Metric, f64>,
}

impl ChartPoint {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied()
    }
}

/// A metric to plot and the number of decimals to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesSpec {
    pub metric: Metric,
    pub decimals: u32,
}

impl SeriesSpec {
    pub const fn new(metric: Metric, decimals: u32) -> Self {
        Self { metric, decimals }
    }
}

/// The fixed charts of the dashboard and report pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chart {
    /// Dashboard "Body Composition Trends".
    DashboardTrends,
    /// Reports overview line chart.
    Overview,
    Weight,
    BodyFat,
    MuscleMass,
}

impl Chart {
    pub fn series(self) -> &'static [SeriesSpec] {
        const ONE_DECIMAL_HEADLINE: [SeriesSpec; 3] = [
            SeriesSpec::new(Metric::Weight, 1),
            SeriesSpec::new(Metric::BodyFatPercentage, 1),
            SeriesSpec::new(Metric::MuscleMassPercentage, 1),
        ];
        const WEIGHT: [SeriesSpec; 1] = [SeriesSpec::new(Metric::Weight, 2)];
        const BODY_FAT: [SeriesSpec; 2] = [
            SeriesSpec::new(Metric::BodyFatPercentage, 2),
            SeriesSpec::new(Metric::Weight, 1),
        ];
        const MUSCLE: [SeriesSpec; 3] = [
            SeriesSpec::new(Metric::MuscleMassPercentage, 2),
            SeriesSpec::new(Metric::SkeletalMuscle, 2),
            SeriesSpec::new(Metric::MuscleMass, 2),
        ];
        match self {
            Chart::DashboardTrends | Chart::Overview => &ONE_DECIMAL_HEADLINE,
            Chart::Weight => &WEIGHT,
            Chart::BodyFat => &BODY_FAT,
            Chart::MuscleMass => &MUSCLE,
        }
    }

    pub fn build(self, records: &[MeasurementRecord]) -> Vec<ChartPoint> {
        build_series(records, self.series())
    }
}

/// Records oldest first, as borrowed references; ties keep input order.
fn chronological(records: &[MeasurementRecord]) -> Vec<&MeasurementRecord> {
    let mut sorted: Vec<&MeasurementRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date());
    sorted
}

/// One point per record, oldest first, with each selected metric rounded.
pub fn build_series(records: &[MeasurementRecord], selection: &[SeriesSpec]) -> Vec<ChartPoint> {
    chronological(records)
        .into_iter()
        .map(|r| ChartPoint {
            date_label: format_date(r.date()),
            date: r.date(),
            values: selection
                .iter()
                .map(|s| (s.metric, round_to(s.metric.value(r), s.decimals)))
                .collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Weight report: trailing moving average
// ---------------------------------------------------------------------------

/// Trailing simple moving average; early points average what exists so far.
/// Each output is rounded to two decimals.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let slice = &values[start..=i];
            round_to(slice.iter().sum::<f64>() / slice.len() as f64, 2)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightReportPoint {
    #[serde(flatten)]
    pub point: ChartPoint,
    pub sma7: f64,
}

/// Weight series (two decimals) with its seven-point moving average.
pub fn weight_report(records: &[MeasurementRecord]) -> Vec<WeightReportPoint> {
    let points = Chart::Weight.build(records);
    let weights: Vec<f64> = points
        .iter()
        .map(|p| p.get(Metric::Weight).unwrap_or_default())
        .collect();
    let averages = moving_average(&weights, SMA_WINDOW);
    points
        .into_iter()
        .zip(averages)
        .map(|(point, sma7)| WeightReportPoint { point, sma7 })
        .collect()
}

// ---------------------------------------------------------------------------
// Custom multi-metric chart
// ---------------------------------------------------------------------------

/// Metrics shown before the user picks any.
pub const DEFAULT_CUSTOM_SELECTION: [Metric; 3] = [
    Metric::Weight,
    Metric::BodyFatPercentage,
    Metric::MuscleMassPercentage,
];

/// Line metadata for one metric of the custom chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CustomSeries {
    pub metric: Metric,
    pub label: &'static str,
    pub color: &'static str,
    pub axis: Axis,
}

impl From<Metric> for CustomSeries {
    fn from(metric: Metric) -> Self {
        Self {
            metric,
            label: metric.label(),
            color: metric.color(),
            axis: metric.axis(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomChart {
    pub series: Vec<CustomSeries>,
    pub points: Vec<ChartPoint>,
}

/// Chart of a caller-chosen subset of metrics at two decimals.
///
/// Series come out in the fixed metric order regardless of the order
/// they were picked in; duplicates collapse.
pub fn custom_chart(records: &[MeasurementRecord], selected: &[Metric]) -> CustomChart {
    let metrics: Vec<Metric> = Metric::ALL
        .iter()
        .copied()
        .filter(|m| selected.contains(m))
        .collect();
    let specs: Vec<SeriesSpec> = metrics.iter().map(|&m| SeriesSpec::new(m, 2)).collect();
    CustomChart {
        series: metrics.into_iter().map(CustomSeries::from).collect(),
        points: build_series(records, &specs),
    }
}

/// Add `metric` to the selection, or take it out if already there.
pub fn toggle_metric(selected: &mut Vec<Metric>, metric: Metric) {
    if let Some(pos) = selected.iter().position(|&m| m == metric) {
        selected.remove(pos);
    } else {
        selected.push(metric);
    }
}

// ---------------------------------------------------------------------------
// Composition breakdown (pie)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownStyle {
    /// Dashboard pie: raw values.
    Dashboard,
    /// Reports overview pie: `%` labels, bone mass and "Other" at one decimal.
    Overview,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionSlice {
    pub name: &'static str,
    pub value: f64,
    pub color: &'static str,
}

/// Most recent record by date; the first in input order among ties.
pub fn latest_record(records: &[MeasurementRecord]) -> Option<&MeasurementRecord> {
    records.iter().fold(None, |best: Option<&MeasurementRecord>, r| match best {
        Some(b) if b.date() >= r.date() => Some(b),
        _ => Some(r),
    })
}

/// Pie slices for the most recent record. Empty for an empty list.
///
/// "Other" is `100 - body fat % - muscle mass % - hydration % - bone mass`,
/// clamped at zero. Slices that are not positive are left out.
pub fn composition_breakdown(
    records: &[MeasurementRecord],
    style: BreakdownStyle,
) -> Vec<CompositionSlice> {
    let Some(latest) = latest_record(records) else {
        return Vec::new();
    };
    let obs = &latest.observation;
    let other = (100.0
        - obs.body_fat_percentage
        - obs.muscle_mass_percentage
        - obs.body_hydration
        - obs.bone_mass)
        .max(0.0);

    let slice = |name, value, color| CompositionSlice { name, value, color };
    let slices = match style {
        BreakdownStyle::Dashboard => vec![
            slice("Muscle Mass", obs.muscle_mass_percentage, "#10b981"),
            slice("Water", obs.body_hydration, "#3b82f6"),
            slice("Body Fat", obs.body_fat_percentage, "#ef4444"),
            slice("Other", other, "#8b5cf6"),
            slice("Bone Mass", obs.bone_mass, "#f59e0b"),
        ],
        BreakdownStyle::Overview => vec![
            slice("Muscle Mass %", obs.muscle_mass_percentage, "#10b981"),
            slice("Water %", obs.body_hydration, "#3b82f6"),
            slice("Body Fat %", obs.body_fat_percentage, "#ef4444"),
            slice("Bone Mass %", round_to(obs.bone_mass, 1), "#f59e0b"),
            slice("Other %", round_to(other, 1), "#8b5cf6"),
        ],
    };
    slices.into_iter().filter(|s| s.value > 0.0).collect()
}
