use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Not authenticated. Please log in.")]
    NotAuthenticated,

    #[error("{message}")]
    Api { status: String, message: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(BTreeMap<String, String>),

    #[error("Sign-in continues via redirect")]
    AuthRedirect,

    #[error("Identity provider error: {0}")]
    IdentityProvider(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SdkError {
    /// Message suitable for showing directly in a view's error slot.
    ///
    /// Envelope and status failures already carry the server's wording;
    /// everything else falls back to the `Display` rendering.
    pub fn user_message(&self) -> String {
        match self {
            SdkError::Status { message, .. } | SdkError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

fn join_errors(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(field, msg)| format!("{field}: {msg}"))
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, SdkError>;
