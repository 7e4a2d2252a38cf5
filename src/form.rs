//! Record entry form: free-text metric inputs committed into a request body.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::{CreateRecordRequest, MeasurementRecord, Metric};
use crate::pipeline::dates::{format_date_for_input, now_timestamp, parse_input_date};
use crate::pipeline::round_to;

/// State of the add/edit dialog.
///
/// Metric inputs are kept as typed so half-entered values like `"72,"` or
/// `"-"` survive until [`commit`](Self::commit).
#[derive(Debug, Clone, PartialEq)]
pub struct RecordForm {
    editing_id: Option<String>,
    base: CreateRecordRequest,
    inputs: BTreeMap<Metric, String>,
}

impl Default for RecordForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordForm {
    /// Empty form dated now.
    pub fn new() -> Self {
        Self {
            editing_id: None,
            base: CreateRecordRequest::new(now_timestamp(), 0.0),
            inputs: Metric::ALL.iter().map(|&m| (m, String::new())).collect(),
        }
    }

    /// Form prefilled from `record` for editing. Values are shown at two
    /// decimals; zero shows as an empty input.
    pub fn edit(record: &MeasurementRecord) -> Self {
        let mut base = CreateRecordRequest::new(record.date(), 0.0);
        let mut inputs = BTreeMap::new();
        for &m in Metric::ALL.iter() {
            let v = round_to(m.value(record), 2);
            m.set(&mut base, v);
            let text = if v == 0.0 { String::new() } else { v.to_string() };
            inputs.insert(m, text);
        }
        Self {
            editing_id: Some(record.id.clone()),
            base,
            inputs,
        }
    }

    /// Id of the record being edited, `None` when creating.
    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn date(&self) -> i64 {
        self.base.date
    }

    pub fn date_input(&self) -> String {
        format_date_for_input(self.base.date)
    }

    /// Set the date from a `YYYY-MM-DD` input. Empty input leaves it unchanged.
    pub fn set_date_input(&mut self, input: &str) -> Result<()> {
        if input.trim().is_empty() {
            return Ok(());
        }
        self.base.date = parse_input_date(input)?;
        Ok(())
    }

    pub fn set_date(&mut self, timestamp: i64) {
        self.base.date = timestamp;
    }

    pub fn input(&self, metric: Metric) -> &str {
        self.inputs.get(&metric).map(String::as_str).unwrap_or("")
    }

    pub fn set_input(&mut self, metric: Metric, text: impl Into<String>) {
        self.inputs.insert(metric, text.into());
    }

    /// Turn the text inputs into a request body.
    ///
    /// Blank or a lone `-` becomes `0` and a decimal comma is accepted.
    /// Anything unparsable or non-finite (`inf`, `1e400`) keeps the last
    /// committed value. Numbers are rounded to two decimals.
    pub fn commit(&self) -> CreateRecordRequest {
        let mut request = self.base.clone();
        for &m in Metric::ALL.iter() {
            let raw = self.input(m).trim();
            let normalized = raw.replacen(',', ".", 1);
            let parsed = if normalized.is_empty() || normalized == "-" {
                Some(0.0)
            } else {
                normalized.parse::<f64>().ok().filter(|v| v.is_finite())
            };
            match parsed {
                Some(v) => m.set(&mut request, round_to(v, 2)),
                None => m.set(&mut request, m.get(&self.base)),
            }
        }
        request
    }

    /// Field errors of the committed values; empty when submittable.
    pub fn errors(&self) -> BTreeMap<String, String> {
        self.commit().field_errors()
    }

    /// The committed request, or [`SdkError::Validation`](crate::SdkError::Validation).
    pub fn submission(&self) -> Result<CreateRecordRequest> {
        let request = self.commit();
        request.validate()?;
        Ok(request)
    }
}
