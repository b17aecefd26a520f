use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// A user session returned from sign-in, sign-up, OTP verification or refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime of the access token in seconds.
    pub expires_in: i64,
    pub token_type: String,
    pub user: User,
}

/// A platform user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, alias = "user_metadata", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonValue>,
}

impl User {
    pub fn is_email_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }
}

/// Whether the session holder currently has a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated,
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::Authenticated => write!(f, "authenticated"),
        }
    }
}

/// Confirmation returned when a one-time code has been dispatched.
///
/// Carries no session; the code must be verified in a second call.
#[derive(Debug, Clone, PartialEq)]
pub struct OtpDispatch {
    pub message: Option<String>,
    /// Seconds until the code expires, when the service reports it.
    pub expires_in: Option<i64>,
    /// The full response body.
    pub raw: JsonValue,
}

impl OtpDispatch {
    pub(crate) fn from_value(raw: JsonValue) -> Self {
        Self {
            message: raw.get("message").and_then(JsonValue::as_str).map(str::to_string),
            expires_in: raw.get("expires_in").and_then(JsonValue::as_i64),
            raw,
        }
    }
}
