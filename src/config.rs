use std::path::PathBuf;

pub const API_BASE_URL: &str = "https://api.body-composition.contactsunny.com";

pub const BODY_COMPOSITION_PATH: &str = "/bodyComposition";
pub const FIREBASE_LOGIN_PATH: &str = "/user/firebase/login";

/// Header carrying the application token on authenticated requests.
pub const TOKEN_HEADER: &str = "token";

// Persistent key-value storage keys
pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const INSTALL_DISMISSED_KEY: &str = "pwa-install-dismissed";

/// Envelope `status` value that marks a successful call.
pub const STATUS_OK: &str = "0";

pub const PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Differences smaller than this are treated as floating-point noise.
pub const TREND_THRESHOLD: f64 = 0.01;

/// Window of the weight report's simple moving average.
pub const SMA_WINDOW: usize = 7;

/// Join a path onto a base URL, making sure exactly one `/` separates them.
pub fn api_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

pub fn default_store_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("body-composition-sdk")
    } else {
        PathBuf::from(".body-composition-sdk")
    }
}
