//! Derived series builder tests: ordering, per-chart precision, custom
//! selections, moving average, and the composition breakdown.

mod common;

use body_composition_sdk::pipeline::series::{
    build_series, composition_breakdown, custom_chart, latest_record, moving_average,
    toggle_metric, weight_report, BreakdownStyle, SeriesSpec, DEFAULT_CUSTOM_SELECTION,
};
use body_composition_sdk::{Axis, Chart, Metric};

// ---------------------------------------------------------------------------
// build_series
// ---------------------------------------------------------------------------

#[test]
fn series_are_chronological_regardless_of_input_order() {
    let records = vec![
        common::record("c", 1_736_899_200, 78.0),
        common::record("a", 1_735_689_600, 80.0),
        common::record("b", 1_736_294_400, 79.0),
    ];

    let points = build_series(&records, &[SeriesSpec::new(Metric::Weight, 2)]);
    let dates: Vec<i64> = points.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![1_735_689_600, 1_736_294_400, 1_736_899_200]);
    assert_eq!(points[0].date_label, "01 Jan 2025");
    assert_eq!(points[2].date_label, "15 Jan 2025");
}

#[test]
fn only_selected_metrics_are_emitted() {
    let records = common::daily_records(2);
    let points = build_series(&records, &[SeriesSpec::new(Metric::Bmi, 2)]);

    assert_eq!(points[0].values.len(), 1);
    assert_eq!(points[0].get(Metric::Bmi), Some(24.5));
    assert_eq!(points[0].get(Metric::Weight), None);
}

#[test]
fn precision_is_per_chart() {
    let mut r = common::record("a", 1_735_689_600, 80.456);
    r.observation.body_fat_percentage = 21.234;

    let body_fat = Chart::BodyFat.build(std::slice::from_ref(&r));
    assert_eq!(body_fat[0].get(Metric::BodyFatPercentage), Some(21.23));
    assert_eq!(body_fat[0].get(Metric::Weight), Some(80.5));

    let overview = Chart::Overview.build(std::slice::from_ref(&r));
    assert_eq!(overview[0].get(Metric::BodyFatPercentage), Some(21.2));
    assert_eq!(overview[0].get(Metric::Weight), Some(80.5));

    let weight = Chart::Weight.build(std::slice::from_ref(&r));
    assert_eq!(weight[0].get(Metric::Weight), Some(80.46));
}

#[test]
fn muscle_chart_carries_three_series() {
    let records = common::daily_records(1);
    let points = Chart::MuscleMass.build(&records);

    assert_eq!(points[0].get(Metric::MuscleMassPercentage), Some(40.0));
    assert_eq!(points[0].get(Metric::SkeletalMuscle), Some(45.0));
    assert_eq!(points[0].get(Metric::MuscleMass), Some(32.0));
}

#[test]
fn empty_input_gives_empty_series() {
    assert!(Chart::DashboardTrends.build(&[]).is_empty());
}

// ---------------------------------------------------------------------------
// Weight report
// ---------------------------------------------------------------------------

#[test]
fn moving_average_uses_what_exists_early_on() {
    let avg = moving_average(&[1.0, 2.0, 3.0, 4.0], 3);
    assert_eq!(avg, vec![1.0, 1.5, 2.0, 3.0]);
}

#[test]
fn weight_report_has_seven_point_average() {
    let records = common::daily_records(8);
    let points = weight_report(&records);

    assert_eq!(points.len(), 8);
    assert_eq!(points[0].sma7, 80.0);
    // Entries 1..=7: 79.5 down to 76.5, mean 78.0
    assert_eq!(points[7].sma7, 78.0);
    assert_eq!(points[7].point.get(Metric::Weight), Some(76.5));
}

// ---------------------------------------------------------------------------
// Custom chart
// ---------------------------------------------------------------------------

#[test]
fn custom_chart_follows_fixed_metric_order() {
    let records = common::daily_records(3);
    let chart = custom_chart(&records, &[Metric::Bmr, Metric::Weight, Metric::Bmr]);

    let metrics: Vec<Metric> = chart.series.iter().map(|s| s.metric).collect();
    assert_eq!(metrics, vec![Metric::Weight, Metric::Bmr]);
    assert_eq!(chart.series[0].color, "#6366f1");
    assert_eq!(chart.series[0].axis, Axis::Left);
    assert_eq!(chart.series[1].label, "BMR (kcal)");
    assert_eq!(chart.points.len(), 3);
    assert_eq!(chart.points[0].values.len(), 2);
}

#[test]
fn custom_chart_with_nothing_selected_has_no_series() {
    let records = common::daily_records(2);
    let chart = custom_chart(&records, &[]);
    assert!(chart.series.is_empty());
    assert!(chart.points.iter().all(|p| p.values.is_empty()));
}

#[test]
fn toggling_adds_and_removes() {
    let mut selected = DEFAULT_CUSTOM_SELECTION.to_vec();
    toggle_metric(&mut selected, Metric::Weight);
    assert!(!selected.contains(&Metric::Weight));
    toggle_metric(&mut selected, Metric::Protein);
    assert_eq!(selected.last(), Some(&Metric::Protein));
}

#[test]
fn every_metric_has_lookup_entries() {
    for m in Metric::ALL {
        assert!(m.color().starts_with('#'));
        assert!(!m.label().is_empty());
        assert_eq!(m.key().parse::<Metric>().unwrap(), m);
    }
    assert_eq!(Metric::BodyFatPercentage.axis(), Axis::Right);
}

// ---------------------------------------------------------------------------
// Composition breakdown
// ---------------------------------------------------------------------------

#[test]
fn breakdown_uses_most_recent_record() {
    let mut old = common::record("old", 1, 80.0);
    old.observation.body_fat_percentage = 30.0;
    let new = common::record("new", 2, 78.0);

    let slices = composition_breakdown(&[old, new], BreakdownStyle::Dashboard);
    let names: Vec<&str> = slices.iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Muscle Mass", "Water", "Body Fat", "Bone Mass"]);
    assert_eq!(slices[2].value, 20.0);
}

#[test]
fn other_is_the_positive_remainder() {
    let mut r = common::record("a", 1, 80.0);
    r.observation.body_fat_percentage = 20.0;
    r.observation.muscle_mass_percentage = 30.0;
    r.observation.body_hydration = 40.0;
    r.observation.bone_mass = 3.0;

    let slices = composition_breakdown(&[r], BreakdownStyle::Dashboard);
    let other = slices.iter().find(|s| s.name == "Other").unwrap();
    assert_eq!(other.value, 7.0);
    assert_eq!(other.color, "#8b5cf6");
}

#[test]
fn other_is_dropped_when_parts_reach_one_hundred() {
    let mut r = common::record("a", 1, 80.0);
    r.observation.body_fat_percentage = 30.0;
    r.observation.muscle_mass_percentage = 40.0;
    r.observation.body_hydration = 35.0;
    r.observation.bone_mass = 0.0;

    for style in [BreakdownStyle::Dashboard, BreakdownStyle::Overview] {
        let slices = composition_breakdown(std::slice::from_ref(&r), style);
        assert!(slices.iter().all(|s| !s.name.starts_with("Other")));
        assert!(slices.iter().all(|s| !s.name.starts_with("Bone")));
        assert!(slices.iter().all(|s| s.value > 0.0));
    }
}

#[test]
fn overview_breakdown_rounds_bone_and_other() {
    let mut r = common::record("a", 1, 80.0);
    r.observation.body_fat_percentage = 20.0;
    r.observation.muscle_mass_percentage = 30.0;
    r.observation.body_hydration = 40.0;
    r.observation.bone_mass = 3.26;

    let slices = composition_breakdown(&[r], BreakdownStyle::Overview);
    let names: Vec<&str> = slices.iter().map(|s| s.name).collect();
    assert_eq!(
        names,
        vec!["Muscle Mass %", "Water %", "Body Fat %", "Bone Mass %", "Other %"]
    );
    assert_eq!(slices[3].value, 3.3);
    assert_eq!(slices[4].value, 6.7);
}

#[test]
fn breakdown_of_nothing_is_empty() {
    assert!(composition_breakdown(&[], BreakdownStyle::Dashboard).is_empty());
    assert!(latest_record(&[]).is_none());
}

#[test]
fn latest_prefers_first_among_equal_dates() {
    let records = vec![
        common::record("a", 5, 80.0),
        common::record("b", 9, 80.0),
        common::record("c", 9, 80.0),
    ];
    assert_eq!(latest_record(&records).unwrap().id, "b");
}
