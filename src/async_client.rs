//! Async wrapper around [`BodyCompositionSdk`] for use in async runtimes (Tokio, etc.).
//!
//! The SDK talks HTTP through reqwest's blocking client, which must not run
//! on an async worker thread. Every operation is therefore dispatched to
//! [`tokio::task::spawn_blocking`].
//!
//! # Example
//!
//! ```no_run
//! use body_composition_sdk::AsyncBodyCompositionSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncBodyCompositionSdk::builder().build().await.unwrap();
//!
//!     let records = sdk.run(|s| s.records()).await.unwrap();
//!     println!("{} records", records.len());
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{Result, SdkError};
use crate::models::MeasurementRecord;
use crate::store::KeyValueStore;
use crate::BodyCompositionSdk;

// ---------------------------------------------------------------------------
// AsyncBodyCompositionSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncBodyCompositionSdk`].
#[derive(Default)]
pub struct AsyncBodyCompositionSdkBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    store: Option<Arc<dyn KeyValueStore>>,
    store_dir: Option<PathBuf>,
}

impl AsyncBodyCompositionSdkBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn store_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.store_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the async SDK on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncBodyCompositionSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = BodyCompositionSdk::builder();
            if let Some(url) = self.base_url {
                builder = builder.base_url(&url);
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            if let Some(store) = self.store {
                builder = builder.store(store);
            }
            if let Some(dir) = self.store_dir {
                builder = builder.store_dir(dir);
            }
            let sdk = builder.build()?;
            Ok(AsyncBodyCompositionSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| SdkError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncBodyCompositionSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`BodyCompositionSdk`].
///
/// Calls are serialised through a [`Mutex`], matching the one-request-at-a-time
/// behaviour of the dashboard.
#[derive(Clone)]
pub struct AsyncBodyCompositionSdk {
    inner: Arc<Mutex<BodyCompositionSdk>>,
}

impl AsyncBodyCompositionSdk {
    pub fn builder() -> AsyncBodyCompositionSdkBuilder {
        AsyncBodyCompositionSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// ```no_run
    /// # use body_composition_sdk::{AsyncBodyCompositionSdk, Chart};
    /// # async fn example() -> body_composition_sdk::Result<()> {
    /// # let sdk = AsyncBodyCompositionSdk::builder().build().await?;
    /// let points = sdk.run(|s| s.reports().chart(Chart::Overview)).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&BodyCompositionSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| SdkError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| SdkError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Fetch every record asynchronously.
    pub async fn records(&self) -> Result<Vec<MeasurementRecord>> {
        self.run(|s| s.records()).await
    }

    pub async fn delete_record(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.run(move |s| s.delete_record(&id)).await
    }

    pub async fn logout(&self) -> Result<()> {
        self.run(|s| s.logout()).await
    }
}
