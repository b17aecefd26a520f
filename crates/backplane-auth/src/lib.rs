//! Backplane auth client.
//!
//! Talks to `/v1/projects/{project}/auth/...` and keeps the signed-in
//! session in memory so later calls can use it.
//!
//! # Usage
//!
//! ```ignore
//! use backplane_auth::AuthClient;
//!
//! let auth = AuthClient::new(transport);
//!
//! // Direct sign-up or sign-in stores the session
//! let session = auth.sign_in("user@example.com", "password").await?;
//!
//! // Two-step sign-up: request a code, then verify it
//! auth.sign_up_with_otp("new@example.com", None).await?;
//! auth.verify_sign_up(VerifySignUpParams::new("new@example.com", "123456")).await?;
//!
//! // Session-bearing calls
//! let me = auth.get_profile().await?;
//! auth.refresh_session().await?;
//! auth.sign_out().await?;
//! ```

pub mod client;
pub mod params;
pub mod session;
pub mod types;

pub use client::AuthClient;
pub use params::{UpdateProfileParams, VerifySignUpParams};
pub use session::SessionStore;
pub use types::{AuthState, OtpDispatch, Session, User};
