//! Sign-in: identity-provider ID token exchanged for an application token.
//!
//! The identity provider itself (Google via Firebase in the hosted app) is
//! external; [`IdentityProvider`] is the seam it plugs into. A popup flow is
//! tried first. When the popup is blocked or closed the provider is asked to
//! start a redirect flow instead, and the redirect result is collected on the
//! next start-up through
//! [`complete_redirect_login_if_present`](ApiClient::complete_redirect_login_if_present).

use crate::client::{parse_response, ApiClient};
use crate::config;
use crate::error::{Result, SdkError};
use crate::models::{FirebaseLoginRequest, LoginResponse};

/// Failures reported by an [`IdentityProvider`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("popup closed by user")]
    PopupClosedByUser,
    #[error("popup blocked")]
    PopupBlocked,
    #[error("popup request cancelled")]
    CancelledPopupRequest,
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Whether the failure should trigger the redirect-based fallback.
    pub fn falls_back_to_redirect(&self) -> bool {
        matches!(
            self,
            ProviderError::PopupClosedByUser
                | ProviderError::PopupBlocked
                | ProviderError::CancelledPopupRequest
        )
    }
}

impl From<ProviderError> for SdkError {
    fn from(e: ProviderError) -> Self {
        SdkError::IdentityProvider(e.to_string())
    }
}

/// An external identity provider that hands out ID tokens.
pub trait IdentityProvider {
    /// Interactive sign-in; returns the ID token.
    fn popup_sign_in(&self) -> std::result::Result<String, ProviderError>;

    /// Begin a redirect-based sign-in. Completion arrives later through
    /// [`redirect_result`](Self::redirect_result).
    fn start_redirect(&self) -> std::result::Result<(), ProviderError>;

    /// ID token from a finished redirect sign-in, if one is pending.
    fn redirect_result(&self) -> std::result::Result<Option<String>, ProviderError>;
}

/// Run the popup flow, falling back to a redirect when the popup fails.
///
/// Returns the ID token, or [`SdkError::AuthRedirect`] once a redirect has
/// been started.
pub fn sign_in_with_google<P: IdentityProvider + ?Sized>(provider: &P) -> Result<String> {
    match provider.popup_sign_in() {
        Ok(token) => Ok(token),
        Err(e) if e.falls_back_to_redirect() => {
            log::debug!("popup sign-in failed ({}); starting redirect", e);
            provider.start_redirect()?;
            Err(SdkError::AuthRedirect)
        }
        Err(e) => Err(e.into()),
    }
}

impl ApiClient {
    /// Exchange an identity-provider ID token for an application token.
    ///
    /// Calls `POST /user/firebase/login` and, on success, stores the token
    /// and profile in the session. The call carries no token, so a 401 here
    /// is a rejected ID token and surfaces the server's message.
    pub fn login_with_backend(&self, id_token: &str) -> Result<LoginResponse> {
        let resp = self
            .unauthenticated(reqwest::Method::POST, config::FIREBASE_LOGIN_PATH)
            .json(&FirebaseLoginRequest { id_token })
            .send()?;
        let login: LoginResponse = parse_response(resp, "log in", "Login failed")?
            .ok_or_else(|| SdkError::NotFound("login response carried no data".into()))?;
        self.session().login(&login.user, &login.token)?;
        Ok(login)
    }

    /// Full sign-in: provider popup (or redirect) followed by the backend exchange.
    pub fn complete_google_login<P: IdentityProvider + ?Sized>(
        &self,
        provider: &P,
    ) -> Result<LoginResponse> {
        let id_token = sign_in_with_google(provider)?;
        self.login_with_backend(&id_token)
    }

    /// Finish a redirect sign-in started on a previous run, if any.
    pub fn complete_redirect_login_if_present<P: IdentityProvider + ?Sized>(
        &self,
        provider: &P,
    ) -> Result<Option<LoginResponse>> {
        match provider.redirect_result()? {
            Some(id_token) => self.login_with_backend(&id_token).map(Some),
            None => Ok(None),
        }
    }

    /// Forget the stored token and profile.
    pub fn logout(&self) -> Result<()> {
        self.session().logout()
    }
}
