//! Body composition SDK for Rust.
//!
//! Provides a client for the body composition API (weight, body fat %,
//! muscle mass, BMI and the rest of a smart-scale reading) together with the
//! pure transformations a dashboard needs on top of it: table sorting and
//! paging, trend arrows against the previous reading, and chart-ready series.
//!
//! # Quick start
//!
//! ```no_run
//! use body_composition_sdk::{BodyCompositionSdk, Chart, Metric};
//!
//! let sdk = BodyCompositionSdk::builder().build().unwrap();
//!
//! // Table view: sorted, paged, with trend arrows
//! let mut table = sdk.table();
//! table.load(sdk.client()).unwrap();
//! for row in table.visible() {
//!     let t = table.trend_for(&row, Metric::Weight);
//!     println!("{} {:?}", row.observation.weight, t.direction);
//! }
//!
//! // Chart data
//! let points = sdk.reports().chart(Chart::Weight).unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod pipeline;
pub mod queries;
pub mod store;
pub mod view;

#[cfg(feature = "async")]
pub use async_client::AsyncBodyCompositionSdk;
pub use auth::{IdentityProvider, ProviderError};
pub use client::ApiClient;
pub use error::{Result, SdkError};
pub use form::RecordForm;
pub use models::{Axis, CreateRecordRequest, MeasurementRecord, Metric};
pub use pipeline::{Chart, SortDirection, SortField, TrendDirection, TrendIndicator};
pub use store::{FileStore, KeyValueStore, MemoryStore, Session};
pub use view::TableView;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use models::LoginResponse;

// ---------------------------------------------------------------------------
// BodyCompositionSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`BodyCompositionSdk`].
///
/// Use [`BodyCompositionSdk::builder()`] to obtain a builder, chain
/// configuration methods, and call [`build()`](BodyCompositionSdkBuilder::build).
pub struct BodyCompositionSdkBuilder {
    base_url: String,
    timeout: Option<Duration>,
    store: Option<Arc<dyn KeyValueStore>>,
    store_dir: Option<PathBuf>,
}

impl Default for BodyCompositionSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: config::API_BASE_URL.to_string(),
            timeout: None,
            store: None,
            store_dir: None,
        }
    }
}

impl BodyCompositionSdkBuilder {
    /// Point the SDK at a different API deployment.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Bound every HTTP request. By default requests have no timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a caller-supplied key-value store for the session.
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Keep the session in memory only.
    pub fn memory_store(self) -> Self {
        self.store(Arc::new(MemoryStore::new()))
    }

    /// Directory for the default [`FileStore`].
    ///
    /// If not set, the platform data directory is used (e.g.
    /// `~/.local/share/body-composition-sdk` on Linux). Ignored when a
    /// store was supplied explicitly.
    pub fn store_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.store_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the SDK, opening the session store and HTTP client.
    ///
    /// Nothing is fetched eagerly.
    pub fn build(self) -> Result<BodyCompositionSdk> {
        let store: Arc<dyn KeyValueStore> = match self.store {
            Some(store) => store,
            None => Arc::new(FileStore::open(self.store_dir)?),
        };
        let client = ApiClient::new(&self.base_url, Session::new(store), self.timeout)?;
        Ok(BodyCompositionSdk { client })
    }
}

// ---------------------------------------------------------------------------
// BodyCompositionSdk
// ---------------------------------------------------------------------------

/// The main entry point for the SDK.
///
/// Wraps an [`ApiClient`] (which owns the HTTP client and the session) and
/// hands out views and query interfaces that borrow it.
pub struct BodyCompositionSdk {
    client: ApiClient,
}

impl BodyCompositionSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> BodyCompositionSdkBuilder {
        BodyCompositionSdkBuilder::default()
    }

    // -- Accessors -----------------------------------------------------------

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    /// Access the chart/report query interface.
    pub fn reports(&self) -> queries::ReportQuery<'_> {
        queries::ReportQuery::new(&self.client)
    }

    /// A fresh, unloaded table view. Call [`TableView::load`] with
    /// [`client()`](Self::client) to populate it.
    pub fn table(&self) -> TableView {
        TableView::new()
    }

    // -- Records -------------------------------------------------------------

    pub fn records(&self) -> Result<Vec<MeasurementRecord>> {
        self.client.list_records()
    }

    pub fn create_record(&self, request: &CreateRecordRequest) -> Result<MeasurementRecord> {
        self.client.create_record(request)
    }

    pub fn update_record(&self, id: &str, request: &CreateRecordRequest) -> Result<MeasurementRecord> {
        self.client.update_record(id, request)
    }

    pub fn delete_record(&self, id: &str) -> Result<()> {
        self.client.delete_record(id)
    }

    // -- Authentication ------------------------------------------------------

    /// Exchange an identity-provider ID token and store the session.
    pub fn login_with_backend(&self, id_token: &str) -> Result<LoginResponse> {
        self.client.login_with_backend(id_token)
    }

    /// Popup (or redirect) sign-in followed by the backend exchange.
    pub fn complete_google_login<P: IdentityProvider + ?Sized>(
        &self,
        provider: &P,
    ) -> Result<LoginResponse> {
        self.client.complete_google_login(provider)
    }

    pub fn complete_redirect_login_if_present<P: IdentityProvider + ?Sized>(
        &self,
        provider: &P,
    ) -> Result<Option<LoginResponse>> {
        self.client.complete_redirect_login_if_present(provider)
    }

    pub fn logout(&self) -> Result<()> {
        self.client.logout()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for BodyCompositionSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let logged_in = self.session().is_logged_in().unwrap_or(false);
        write!(
            f,
            "BodyCompositionSdk(base_url={}, logged_in={})",
            self.client.base_url(),
            logged_in
        )
    }
}
