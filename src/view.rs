//! Headless table view over the signed-in user's records.
//!
//! [`TableView`] owns the in-memory copy of the collection plus the sort,
//! page and error state a records table needs. The copy is a read-through
//! cache: every successful create, update or delete is followed by a full
//! re-fetch, and nothing changes locally until the server has confirmed.

use crate::client::ApiClient;
use crate::config::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use crate::error::{Result, SdkError};
use crate::form::RecordForm;
use crate::models::{MeasurementRecord, Metric};
use crate::pipeline::series::latest_record;
use crate::pipeline::sort::{paginate, sort_records, total_pages, SortField, SortState};
use crate::pipeline::trend::{previous_record, trend, TrendIndicator};

#[derive(Debug, Clone)]
pub struct TableView {
    records: Vec<MeasurementRecord>,
    sort: SortState,
    page: usize,
    page_size: usize,
    loaded: bool,
    error: Option<String>,
}

impl Default for TableView {
    fn default() -> Self {
        Self::new()
    }
}

impl TableView {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            sort: SortState::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            loaded: false,
            error: None,
        }
    }

    // -- Data ----------------------------------------------------------------

    /// Replace the collection with a fresh fetch.
    ///
    /// On failure the previous records stay and the error message is kept
    /// for display until the next successful call.
    pub fn load(&mut self, client: &ApiClient) -> Result<()> {
        self.error = None;
        let result = client.list_records();
        self.loaded = true;
        match result {
            Ok(records) => {
                self.records = records;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Use an already-fetched collection.
    pub fn set_records(&mut self, records: Vec<MeasurementRecord>) {
        self.records = records;
        self.loaded = true;
        self.error = None;
    }

    /// Submit the form (create, or update when it was opened for editing)
    /// and re-fetch on success.
    ///
    /// Validation failures are returned without touching the view's error
    /// slot; the form shows those per field.
    pub fn submit(&mut self, client: &ApiClient, form: &RecordForm) -> Result<MeasurementRecord> {
        let request = form.submission()?;
        let result = match form.editing_id() {
            Some(id) => client.update_record(id, &request),
            None => client.create_record(&request),
        };
        let saved = result.map_err(|e| self.fail(e))?;
        self.load(client)?;
        Ok(saved)
    }

    /// Delete a record after the user confirmed, then re-fetch.
    pub fn delete(&mut self, client: &ApiClient, id: &str) -> Result<()> {
        client.delete_record(id).map_err(|e| self.fail(e))?;
        self.load(client)
    }

    fn fail(&mut self, e: SdkError) -> SdkError {
        log::debug!("view operation failed: {}", e);
        self.error = Some(e.user_message());
        e
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // -- Sorting and paging --------------------------------------------------

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Header click. Always returns to the first page.
    pub fn select_sort(&mut self, field: SortField) {
        self.sort.select(field);
        self.page = 1;
    }

    /// Set field and direction directly, as a sort dropdown does.
    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
        self.page = 1;
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change the page size to one of [`PAGE_SIZE_OPTIONS`]; returns to page 1.
    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        if !PAGE_SIZE_OPTIONS.contains(&size) {
            return Err(SdkError::InvalidArgument(format!(
                "page size must be one of {:?}, got {}",
                PAGE_SIZE_OPTIONS, size
            )));
        }
        self.page_size = size;
        self.page = 1;
        Ok(())
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.records.len(), self.page_size)
    }

    /// Current page, kept within `1..=total_pages` (page 1 when empty).
    pub fn current_page(&self) -> usize {
        self.page.clamp(1, self.total_pages().max(1))
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages().max(1));
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page() + 1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.current_page().saturating_sub(1));
    }

    /// All records in table order.
    pub fn sorted(&self) -> Vec<MeasurementRecord> {
        sort_records(&self.records, self.sort.field, self.sort.direction)
    }

    /// Rows of the current page.
    pub fn visible(&self) -> Vec<MeasurementRecord> {
        let sorted = self.sorted();
        paginate(&sorted, self.current_page(), self.page_size).to_vec()
    }

    // -- Derived values ------------------------------------------------------

    /// Trend of `metric` on `record` against the record dated just before it,
    /// independent of the table's sort.
    pub fn trend_for(&self, record: &MeasurementRecord, metric: Metric) -> TrendIndicator {
        let sorted = self.sorted();
        trend(record, previous_record(&sorted, record), metric)
    }

    /// Most recent record by date.
    pub fn latest(&self) -> Option<&MeasurementRecord> {
        latest_record(&self.records)
    }
}
