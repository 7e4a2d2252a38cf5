//! Sort/paginate engine for the records table.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::SdkError;
use crate::models::{MeasurementRecord, Metric};

// ---------------------------------------------------------------------------
// SortField / SortDirection
// ---------------------------------------------------------------------------

/// Any field of a [`MeasurementRecord`] the table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    UserId,
    CreatedAt,
    UpdatedAt,
    Date,
    Metric(Metric),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// A field's value, typed for comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
enum FieldValue<'a> {
    Number(f64),
    Text(&'a str),
}

impl SortField {
    pub fn key(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::UserId => "userId",
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
            SortField::Date => "date",
            SortField::Metric(m) => m.key(),
        }
    }

    fn value(self, record: &MeasurementRecord) -> FieldValue<'_> {
        match self {
            SortField::Id => FieldValue::Text(&record.id),
            SortField::UserId => FieldValue::Text(&record.user_id),
            SortField::CreatedAt => FieldValue::Number(record.created_at as f64),
            SortField::UpdatedAt => FieldValue::Number(record.updated_at as f64),
            SortField::Date => FieldValue::Number(record.date() as f64),
            SortField::Metric(m) => FieldValue::Number(m.value(record)),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortField {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "userId" => Ok(SortField::UserId),
            "createdAt" => Ok(SortField::CreatedAt),
            "updatedAt" => Ok(SortField::UpdatedAt),
            "date" => Ok(SortField::Date),
            other => other.parse().map(SortField::Metric),
        }
    }
}

// ---------------------------------------------------------------------------
// SortState
// ---------------------------------------------------------------------------

/// Active sort column and direction. Starts at `date`, descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::Date,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    /// Header click: re-selecting the active field flips the direction,
    /// a different field starts out descending.
    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.toggled();
        } else {
            self.field = field;
            self.direction = SortDirection::Desc;
        }
    }
}

// ---------------------------------------------------------------------------
// Comparison, sorting, pagination
// ---------------------------------------------------------------------------

/// Case-insensitive first, lowercase ahead of uppercase on ties: `"a" < "A" < "b"`.
fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| b.cmp(a))
}

fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => {
            (x - y).partial_cmp(&0.0).unwrap_or(Ordering::Equal)
        }
        (FieldValue::Text(x), FieldValue::Text(y)) => locale_compare(x, y),
        _ => Ordering::Equal,
    }
}

/// Compare two records on `field`. `Desc` swaps the operands rather than
/// reversing the result, so ties stay ties.
pub fn compare(
    a: &MeasurementRecord,
    b: &MeasurementRecord,
    field: SortField,
    direction: SortDirection,
) -> Ordering {
    match direction {
        SortDirection::Asc => compare_values(field.value(a), field.value(b)),
        SortDirection::Desc => compare_values(field.value(b), field.value(a)),
    }
}

/// Return a sorted copy; equal elements keep their relative order.
pub fn sort_records(
    records: &[MeasurementRecord],
    field: SortField,
    direction: SortDirection,
) -> Vec<MeasurementRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare(a, b, field, direction));
    sorted
}

/// The `page`-th (1-based) slice of `page_size` items.
///
/// Pages past the end yield an empty slice; page `0` is not a page and
/// also yields nothing. Callers clamp before asking.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// `ceil(total / page_size)`.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
