use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Attributes accepted by `AuthClient::update_profile`. Unset fields are left
/// untouched by the service.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfileParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonValue>,
}

impl UpdateProfileParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn metadata(mut self, metadata: JsonValue) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Second step of the two-step sign-up: the emailed code plus, optionally,
/// the password to set on the new account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifySignUpParams {
    pub email: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl VerifySignUpParams {
    pub fn new(email: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            code: code.into(),
            password: None,
        }
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}
