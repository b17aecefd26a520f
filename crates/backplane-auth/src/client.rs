use backplane_core::{ApiError, ApiResult, RequestOptions, Transport};
use serde_json::{json, Value as JsonValue};
use tracing::debug;

use crate::params::{UpdateProfileParams, VerifySignUpParams};
use crate::session::SessionStore;
use crate::types::*;

/// Client for the project's auth endpoints at `/v1/projects/{project}/auth/...`.
///
/// Owns the [`SessionStore`]: sign-in style calls store the returned session,
/// and profile/account calls send its access token as the bearer credential.
/// Clones share the same session.
///
/// # Example
/// ```ignore
/// let auth = AuthClient::new(transport);
/// let session = auth.sign_in("user@example.com", "password").await?;
/// let me = auth.get_profile().await?;
/// auth.sign_out().await?;
/// ```
#[derive(Debug, Clone)]
pub struct AuthClient {
    transport: Transport,
    session: SessionStore,
}

impl AuthClient {
    pub fn new(transport: Transport) -> Self {
        Self {
            transport,
            session: SessionStore::new(),
        }
    }

    /// The session holder backing this client.
    pub fn session_store(&self) -> &SessionStore {
        &self.session
    }

    // ─── Sign Up ───────────────────────────────────────────────

    /// Register with email and password and store the returned session.
    pub async fn sign_up(&self, email: &str, password: &str) -> ApiResult<Session> {
        self.sign_up_with_data(email, password, None).await
    }

    /// Register with email, password and custom user metadata.
    pub async fn sign_up_with_data(
        &self,
        email: &str,
        password: &str,
        metadata: Option<JsonValue>,
    ) -> ApiResult<Session> {
        let mut body = json!({
            "email": email,
            "password": password,
        });
        if let Some(metadata) = metadata {
            body["metadata"] = metadata;
        }
        self.establish("signup", body).await
    }

    /// First step of the two-step sign-up: ask the service to email a code.
    ///
    /// Does not touch the session.
    pub async fn sign_up_with_otp(
        &self,
        email: &str,
        metadata: Option<JsonValue>,
    ) -> ApiResult<OtpDispatch> {
        let mut body = json!({ "email": email });
        if let Some(metadata) = metadata {
            body["metadata"] = metadata;
        }
        self.dispatch_code("signup/otp", body).await
    }

    /// Second step of the two-step sign-up: verify the code and store the
    /// session it yields.
    pub async fn verify_sign_up(&self, params: VerifySignUpParams) -> ApiResult<Session> {
        let body = serde_json::to_value(&params)
            .map_err(|e| ApiError::new(format!("Failed to encode request: {e}")))?;
        self.establish("signup/verify", body).await
    }

    // ─── Sign In ───────────────────────────────────────────────

    /// Sign in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> ApiResult<Session> {
        let body = json!({
            "email": email,
            "password": password,
        });
        self.establish("signin", body).await
    }

    /// Passwordless sign-in: send a one-time code to `email`.
    pub async fn sign_in_with_otp(&self, email: &str) -> ApiResult<OtpDispatch> {
        self.dispatch_code("otp", json!({ "email": email })).await
    }

    /// Complete a passwordless sign-in.
    pub async fn verify_otp(&self, email: &str, code: &str) -> ApiResult<Session> {
        let body = json!({
            "email": email,
            "code": code,
        });
        self.establish("otp/verify", body).await
    }

    // ─── Sign Out ──────────────────────────────────────────────

    /// Sign out.
    ///
    /// Without a session this is a local no-op. With one, the sign-out call
    /// is made with the current access token and the session is cleared
    /// whether or not that call succeeds; its error, if any, is returned.
    pub async fn sign_out(&self) -> ApiResult<()> {
        let Some(token) = self.session.access_token().await else {
            self.session.clear().await;
            return Ok(());
        };

        let result = self
            .transport
            .send(&self.path("signout"), RequestOptions::post().bearer(&token))
            .await;

        self.session.clear().await;
        debug!(remote_ok = result.is_ok(), "Session cleared by sign-out");
        result.map(|_| ())
    }

    // ─── Session Management ────────────────────────────────────

    /// Exchange the held refresh token for a new session.
    pub async fn refresh_session(&self) -> ApiResult<Session> {
        let refresh_token = self
            .session
            .refresh_token()
            .await
            .ok_or_else(|| ApiError::no_session("No refresh token available"))?;

        self.establish("refresh", json!({ "refresh_token": refresh_token }))
            .await
    }

    /// Overwrite the held session, e.g. to restore one saved by the caller.
    pub async fn set_session(&self, session: Session) {
        debug!(user_id = %session.user.id, "Session set externally");
        self.session.replace(session).await;
    }

    /// Drop the held session without calling the service.
    pub async fn clear_session(&self) {
        self.session.clear().await;
    }

    pub async fn get_session(&self) -> Option<Session> {
        self.session.get().await
    }

    /// The signed-in user, read from the held session (no network call).
    pub async fn get_user(&self) -> Option<User> {
        self.session.user().await
    }

    pub async fn access_token(&self) -> Option<String> {
        self.session.access_token().await
    }

    pub async fn state(&self) -> AuthState {
        self.session.state().await
    }

    // ─── Profile / Account ─────────────────────────────────────

    /// Fetch the current user's profile from the service.
    pub async fn get_profile(&self) -> ApiResult<User> {
        let token = self.require_access_token().await?;
        self.transport
            .request(&self.path("user"), RequestOptions::get().bearer(&token))
            .await
    }

    /// Update the current user's profile.
    pub async fn update_profile(&self, params: UpdateProfileParams) -> ApiResult<User> {
        let token = self.require_access_token().await?;
        let body = serde_json::to_value(&params)
            .map_err(|e| ApiError::new(format!("Failed to encode request: {e}")))?;
        self.transport
            .request(
                &self.path("user"),
                RequestOptions::patch().json(body).bearer(&token),
            )
            .await
    }

    /// Delete the current account. Clears the session on success.
    pub async fn delete_account(&self) -> ApiResult<()> {
        let token = self.require_access_token().await?;
        self.transport
            .send(&self.path("user"), RequestOptions::delete().bearer(&token))
            .await?;
        self.session.clear().await;
        debug!("Session cleared by account deletion");
        Ok(())
    }

    // ─── Password Recovery ─────────────────────────────────────

    /// Email a password reset link. Does not read or change the session.
    pub async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> ApiResult<()> {
        let mut body = json!({ "email": email });
        if let Some(redirect) = redirect_to {
            body["redirect_to"] = json!(redirect);
        }
        self.transport
            .send(&self.path("password/recover"), RequestOptions::post().json(body))
            .await
            .map(|_| ())
    }

    /// Set a new password using the token from a reset link. Does not read or
    /// change the session.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> ApiResult<()> {
        let body = json!({
            "token": token,
            "password": new_password,
        });
        self.transport
            .send(&self.path("password/reset"), RequestOptions::post().json(body))
            .await
            .map(|_| ())
    }

    // ─── Internal Helpers ──────────────────────────────────────

    pub(crate) fn path(&self, endpoint: &str) -> String {
        self.transport.project_path(&format!("auth/{endpoint}"))
    }

    async fn establish(&self, endpoint: &str, body: JsonValue) -> ApiResult<Session> {
        let session: Session = self
            .transport
            .request(&self.path(endpoint), RequestOptions::post().json(body))
            .await?;
        debug!(endpoint, user_id = %session.user.id, "Session established");
        self.session.replace(session.clone()).await;
        Ok(session)
    }

    async fn dispatch_code(&self, endpoint: &str, body: JsonValue) -> ApiResult<OtpDispatch> {
        let raw = self
            .transport
            .send(&self.path(endpoint), RequestOptions::post().json(body))
            .await?;
        Ok(OtpDispatch::from_value(raw))
    }

    async fn require_access_token(&self) -> ApiResult<String> {
        self.session
            .access_token()
            .await
            .ok_or_else(|| ApiError::no_session("No active session"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backplane_core::ClientConfig;

    fn client() -> AuthClient {
        let transport = Transport::new(ClientConfig::new("demo", "key123")).unwrap();
        AuthClient::new(transport)
    }

    #[test]
    fn paths_are_project_scoped() {
        let auth = client();
        assert_eq!(auth.path("signin"), "/v1/projects/demo/auth/signin");
        assert_eq!(auth.path("password/reset"), "/v1/projects/demo/auth/password/reset");
    }

    #[tokio::test]
    async fn get_profile_without_session_fails_locally() {
        let err = client().get_profile().await.unwrap_err();
        assert_eq!(err.message, "No active session");
        assert!(err.is_no_session());
        assert_eq!(err.status, None);
    }

    #[tokio::test]
    async fn refresh_without_session_fails_locally() {
        let err = client().refresh_session().await.unwrap_err();
        assert_eq!(err.message, "No refresh token available");
        assert!(err.is_no_session());
    }

    #[tokio::test]
    async fn sign_out_without_session_is_noop() {
        let auth = client();
        assert!(auth.sign_out().await.is_ok());
        assert_eq!(auth.state().await, AuthState::Anonymous);
    }
}
