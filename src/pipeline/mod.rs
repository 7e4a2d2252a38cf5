//! Pure transformations from a flat record list to table and chart views.
//!
//! Nothing here performs I/O or keeps state between calls; every function
//! works on a borrowed slice and never reorders the caller's data.

pub mod dates;
pub mod series;
pub mod sort;
pub mod trend;

pub use series::{
    build_series, composition_breakdown, custom_chart, latest_record, BreakdownStyle, Chart,
    ChartPoint, CompositionSlice, CustomChart, CustomSeries, SeriesSpec,
};
pub use sort::{paginate, sort_records, total_pages, SortDirection, SortField, SortState};
pub use trend::{previous_record, trend, TrendDirection, TrendIndicator};

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
