use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ApiUser: Profile returned by the backend login exchange
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    pub id: String,
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub image_url: String,
    pub apple_user_id: Option<String>,
    #[serde(default)]
    pub last_active_date: String,
}

// ---------------------------------------------------------------------------
// LoginResponse: Application token plus profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: ApiUser,
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FirebaseLoginRequest<'a> {
    pub id_token: &'a str,
}
