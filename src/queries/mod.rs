//! Report queries: fetch the collection and shape it for one chart page.
//!
//! Each query fetches independently, the way each report page loads its
//! own data on mount.

pub mod reports;

pub use reports::{OverviewReport, ReportQuery};
