//! Fetch/Sync gateway: authenticated HTTP calls to the body composition API.
//!
//! Every call is a single blocking request with no retry and no timeout
//! unless one was configured on the builder. Responses go through
//! [`parse_envelope`], which maps transport, HTTP-level, and envelope-level
//! failures onto [`SdkError`].

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::config;
use crate::error::{Result, SdkError};
use crate::models::{CreateRecordRequest, Envelope, MeasurementRecord};
use crate::store::Session;

/// Typed client for the `/bodyComposition` endpoints.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    session: Session,
}

impl ApiClient {
    /// Create a client for `base_url` that reads its token from `session`.
    ///
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, session: Session, timeout: Option<Duration>) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn url(&self, path: &str) -> String {
        config::api_url(&self.base_url, path)
    }

    /// Build a request carrying the stored token, if there is one.
    ///
    /// Without a token the request goes out unauthenticated and the
    /// server is expected to reject it.
    fn authenticated(&self, method: reqwest::Method, path: &str) -> Result<RequestBuilder> {
        log::debug!("{} {}", method, path);
        let mut builder = self
            .http
            .request(method, self.url(path))
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(token) = self.session.token()? {
            builder = builder.header(config::TOKEN_HEADER, token);
        }
        Ok(builder)
    }

    pub(crate) fn unauthenticated(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        log::debug!("{} {}", method, path);
        self.http
            .request(method, self.url(path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    // -- Record endpoints ----------------------------------------------------

    /// Fetch every record owned by the signed-in user.
    ///
    /// Calls `GET /bodyComposition`.
    pub fn list_records(&self) -> Result<Vec<MeasurementRecord>> {
        let resp = self
            .authenticated(reqwest::Method::GET, config::BODY_COMPOSITION_PATH)?
            .send()?;
        let data: Option<Vec<MeasurementRecord>> =
            parse_envelope(resp, "fetch body composition", "Failed to fetch data")?;
        Ok(data.unwrap_or_default())
    }

    /// Create a record. The server assigns id, owner and timestamps.
    ///
    /// Calls `POST /bodyComposition`. The request is validated locally
    /// first and never sent if `date` or `weight` is missing.
    pub fn create_record(&self, request: &CreateRecordRequest) -> Result<MeasurementRecord> {
        request.validate()?;
        let resp = self
            .authenticated(reqwest::Method::POST, config::BODY_COMPOSITION_PATH)?
            .json(request)
            .send()?;
        require_data(parse_envelope(
            resp,
            "create body composition",
            "Failed to create record",
        )?)
    }

    /// Replace every observation field of record `id`.
    ///
    /// Calls `PUT /bodyComposition/{id}`.
    pub fn update_record(
        &self,
        id: &str,
        request: &CreateRecordRequest,
    ) -> Result<MeasurementRecord> {
        if id.is_empty() {
            return Err(SdkError::InvalidArgument("record id is empty".into()));
        }
        request.validate()?;
        let path = format!("{}/{}", config::BODY_COMPOSITION_PATH, id);
        let resp = self
            .authenticated(reqwest::Method::PUT, &path)?
            .json(request)
            .send()?;
        require_data(parse_envelope(
            resp,
            "update body composition",
            "Failed to update record",
        )?)
    }

    /// Delete record `id`.
    ///
    /// Calls `DELETE /bodyComposition/{id}`. Any payload is ignored.
    pub fn delete_record(&self, id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(SdkError::InvalidArgument("record id is empty".into()));
        }
        let path = format!("{}/{}", config::BODY_COMPOSITION_PATH, id);
        let resp = self.authenticated(reqwest::Method::DELETE, &path)?.send()?;
        let _: Option<serde_json::Value> =
            parse_envelope(resp, "delete body composition", "Failed to delete record")?;
        Ok(())
    }
}

fn require_data<T>(data: Option<T>) -> Result<T> {
    data.ok_or_else(|| SdkError::NotFound("response envelope carried no data".into()))
}

/// Parse the response of a token-bearing call.
///
/// A 401 means the stored token is missing or expired and maps to
/// [`SdkError::NotAuthenticated`]; everything else goes through
/// [`parse_response`].
pub(crate) fn parse_envelope<T: DeserializeOwned>(
    resp: Response,
    action: &str,
    fallback: &str,
) -> Result<Option<T>> {
    if resp.status() == StatusCode::UNAUTHORIZED {
        return Err(SdkError::NotAuthenticated);
    }
    parse_response(resp, action, fallback)
}

/// Check the HTTP status, then the envelope, and hand back `data`.
///
/// Any non-2xx status, 401 included, becomes [`SdkError::Status`] carrying
/// the server's message.
///
/// * `action` - used in the message for a non-2xx response without an
///   envelope, e.g. `"Failed to fetch body composition: 500"`.
/// * `fallback` - message for a failed envelope that names no reason.
pub(crate) fn parse_response<T: DeserializeOwned>(
    resp: Response,
    action: &str,
    fallback: &str,
) -> Result<Option<T>> {
    let status = resp.status();
    let body = resp.text()?;

    if !status.is_success() {
        let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
            .ok()
            .map(|env| env.failure_message(""))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Failed to {}: {}", action, status.as_u16()));
        log::warn!("{} failed with HTTP {}", action, status.as_u16());
        return Err(SdkError::Status {
            status: status.as_u16(),
            message,
        });
    }

    // Check the envelope before shaping `data`: failed calls may carry junk there.
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(&body)?;
    if !envelope.is_success() {
        let message = envelope.failure_message(fallback);
        log::warn!("{} rejected: status={} {}", action, envelope.status, message);
        return Err(SdkError::Api {
            status: envelope.status,
            message,
        });
    }
    match envelope.data {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(data) => Ok(Some(serde_json::from_value(data)?)),
    }
}
