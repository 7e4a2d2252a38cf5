use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::Metric;
use crate::pipeline::series::{
    composition_breakdown, custom_chart, weight_report, BreakdownStyle, Chart, ChartPoint,
    CompositionSlice, CustomChart, WeightReportPoint,
};

// ---------------------------------------------------------------------------
// OverviewReport
// ---------------------------------------------------------------------------

/// Headline trends plus the latest composition breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewReport {
    pub trends: Vec<ChartPoint>,
    pub composition: Vec<CompositionSlice>,
}

// ---------------------------------------------------------------------------
// ReportQuery
// ---------------------------------------------------------------------------

/// Query interface for the chart pages, borrowing an [`ApiClient`].
pub struct ReportQuery<'a> {
    client: &'a ApiClient,
}

impl<'a> ReportQuery<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Points for one of the fixed charts.
    pub fn chart(&self, chart: Chart) -> Result<Vec<ChartPoint>> {
        let records = self.client.list_records()?;
        Ok(chart.build(&records))
    }

    pub fn overview(&self) -> Result<OverviewReport> {
        let records = self.client.list_records()?;
        Ok(OverviewReport {
            trends: Chart::Overview.build(&records),
            composition: composition_breakdown(&records, BreakdownStyle::Overview),
        })
    }

    /// Weight at two decimals with its seven-point moving average.
    pub fn weight(&self) -> Result<Vec<WeightReportPoint>> {
        let records = self.client.list_records()?;
        Ok(weight_report(&records))
    }

    pub fn body_fat(&self) -> Result<Vec<ChartPoint>> {
        self.chart(Chart::BodyFat)
    }

    pub fn muscle_mass(&self) -> Result<Vec<ChartPoint>> {
        self.chart(Chart::MuscleMass)
    }

    /// Chart of the `selected` metrics with colours and axes attached.
    pub fn custom(&self, selected: &[Metric]) -> Result<CustomChart> {
        let records = self.client.list_records()?;
        Ok(custom_chart(&records, selected))
    }

    /// The dashboard pie for the most recent record.
    pub fn composition(&self) -> Result<Vec<CompositionSlice>> {
        let records = self.client.list_records()?;
        Ok(composition_breakdown(&records, BreakdownStyle::Dashboard))
    }
}
