//! ReportQuery tests: each report fetches and shapes the collection.

mod common;

use body_composition_sdk::{Chart, Metric, SdkError};
use common::FakeApi;
use serde_json::json;

fn api_with_week() -> FakeApi {
    let records: Vec<_> = (0..8)
        .rev()
        .map(|i| {
            common::record_json(
                &format!("d{}", i),
                1_735_689_600 + i * 86_400,
                80.0 - i as f64,
            )
        })
        .collect();
    FakeApi::with_records(&records)
}

#[test]
fn fixed_charts_read_oldest_first() {
    let api = api_with_week();
    let sdk = api.signed_in_sdk();

    let points = sdk.reports().chart(Chart::Weight).unwrap();
    assert_eq!(points.len(), 8);
    assert_eq!(points[0].date_label, "01 Jan 2025");
    assert_eq!(points[0].get(Metric::Weight), Some(80.0));
    assert_eq!(points[7].get(Metric::Weight), Some(73.0));
    assert_eq!(points[0].get(Metric::BodyFatPercentage), None);

    let muscle = sdk.reports().muscle_mass().unwrap();
    assert_eq!(muscle[0].values.len(), 3);
    assert_eq!(muscle[0].get(Metric::SkeletalMuscle), Some(45.0));
}

#[test]
fn weight_report_carries_moving_average() {
    let api = api_with_week();
    let sdk = api.signed_in_sdk();

    let report = sdk.reports().weight().unwrap();
    assert_eq!(report[0].sma7, 80.0);
    assert_eq!(report[1].sma7, 79.5);
    // Day eight averages days two through eight: 79..=73.
    assert_eq!(report[7].sma7, 76.0);
}

#[test]
fn overview_and_composition_use_latest_record() {
    let api = FakeApi::with_records(&[
        json!({ "id": "old", "date": 1, "weight": 90.0, "bodyFatPercentage": 30.0 }),
        json!({
            "id": "new", "date": 2, "weight": 80.0,
            "bodyFatPercentage": 20.0, "muscleMassPercentage": 40.0,
            "bodyHydration": 30.0, "boneMass": 3.26
        }),
    ]);
    let sdk = api.signed_in_sdk();

    let overview = sdk.reports().overview().unwrap();
    assert_eq!(overview.trends.len(), 2);
    let names: Vec<&str> = overview.composition.iter().map(|s| s.name).collect();
    assert_eq!(names, ["Muscle Mass %", "Water %", "Body Fat %", "Bone Mass %", "Other %"]);
    assert_eq!(overview.composition[3].value, 3.3);
    assert_eq!(overview.composition[4].value, 6.7);

    let pie = sdk.reports().composition().unwrap();
    let names: Vec<&str> = pie.iter().map(|s| s.name).collect();
    assert_eq!(names, ["Muscle Mass", "Water", "Body Fat", "Other", "Bone Mass"]);
}

#[test]
fn custom_chart_keeps_fixed_order() {
    let api = api_with_week();
    let sdk = api.signed_in_sdk();

    let chart = sdk
        .reports()
        .custom(&[Metric::Bmr, Metric::Weight, Metric::Bmr])
        .unwrap();
    let metrics: Vec<Metric> = chart.series.iter().map(|s| s.metric).collect();
    assert_eq!(metrics, [Metric::Weight, Metric::Bmr]);
    assert_eq!(chart.series[1].color, "#14b8a6");
    assert_eq!(chart.points[0].get(Metric::Bmr), Some(1700.0));
}

#[test]
fn report_errors_propagate() {
    let api = FakeApi::start();
    api.require_token("someone-else");
    let sdk = api.signed_in_sdk();

    assert!(matches!(
        sdk.reports().overview().unwrap_err(),
        SdkError::NotAuthenticated
    ));
}
