use serde::{Deserialize, Serialize};

/// Body of a successful `POST /api/v1/auth/login`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TokenResponse {
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub access_token: Option<String>,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub token_type: Option<String>,
}

/// Body of `GET /api/v1/auth/me`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentUser {
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub id: i64,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub username: String,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub email: String,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub full_name: Option<String>,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub is_active: bool,
    #[serde(deserialize_with = "crate::lenient::or_default")]
    pub is_superuser: bool,
}
