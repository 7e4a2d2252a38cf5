use serde::{Deserialize, Serialize};

use crate::config::STATUS_OK;

// ---------------------------------------------------------------------------
// Envelope: Uniform API response wrapper
// ---------------------------------------------------------------------------

/// `{status, message, error, data}` wrapper around every API response.
///
/// `data` is optional because delete responses carry no meaningful payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, deserialize_with = "status_as_string")]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK && self.error.is_none()
    }

    /// The most specific failure text the server gave, or `fallback`.
    pub fn failure_message(&self, fallback: &str) -> String {
        if !self.message.is_empty() {
            return self.message.clone();
        }
        match &self.error {
            Some(e) if !e.is_empty() => e.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Accept `"0"` or `0`; the API has sent both.
fn status_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
