//! Typed client for the backend REST surface.
//!
//! All routes live under `/api/auth`; routes that touch a user record
//! require the session's bearer token. The backend signals validation
//! and credential failures with a `{ "message": ... }` body, which the
//! client surfaces verbatim as [`AccountError::Rejected`].

use reqwest::multipart::{Form, Part};
use reqwest::Response;

use super::error::{AccountError, Result};
use super::types::{
    ApiMessage, EmergencyContact, LocationUpdate, LoginRequest, Password, Session, SignupRequest,
    UserProfile,
};
use crate::location::Coordinates;

/// Client for the Aegis backend.
///
/// Cheap to clone; all clones share one connection pool.
///
/// # Example
///
/// ```ignore
/// use aegis_core::account::{AccountClient, Password};
///
/// let client = AccountClient::new("http://localhost:5000");
/// let session = client.login("asha@example.com", Password::new("hunter2")).await?;
/// let profile = client.profile(&session, &session.user.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct AccountClient {
    http: reqwest::Client,
    base_url: String,
}

impl AccountClient {
    /// Creates a client for the backend at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client over an existing HTTP client.
    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Rejected`] with the backend's message
    /// (e.g. a duplicate email or phone), or a transport error.
    pub async fn signup(&self, request: &SignupRequest) -> Result<()> {
        let response = self
            .http
            .post(self.url("/api/auth/signup"))
            .json(request)
            .send()
            .await?;
        checked(response).await?;
        Ok(())
    }

    /// Logs in and returns the session token with the user identity.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Rejected`] carrying the backend's own
    /// wording on bad credentials, or a transport error.
    pub async fn login(&self, email: &str, password: Password) -> Result<Session> {
        let request = LoginRequest {
            email: email.to_string(),
            password,
        };
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&request)
            .send()
            .await?;
        let session = checked(response).await?.json().await?;
        Ok(session)
    }

    /// Fetches a user profile.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Rejected`] if the token is missing or
    /// expired, or a transport error.
    pub async fn profile(&self, session: &Session, user_id: &str) -> Result<UserProfile> {
        let response = self
            .http
            .get(self.url(&format!("/api/auth/profile/{user_id}")))
            .bearer_auth(&session.token)
            .send()
            .await?;
        let profile = checked(response).await?.json().await?;
        Ok(profile)
    }

    /// Appends an emergency contact to the user's backend record.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Rejected`] on validation failure, or a
    /// transport error.
    pub async fn add_emergency_contact(
        &self,
        session: &Session,
        user_id: &str,
        contact: &EmergencyContact,
    ) -> Result<UserProfile> {
        let response = self
            .http
            .post(self.url(&format!("/api/auth/profile/{user_id}/contacts")))
            .bearer_auth(&session.token)
            .json(contact)
            .send()
            .await?;
        let profile = checked(response).await?.json().await?;
        Ok(profile)
    }

    /// Updates the user's last-known location.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Rejected`] on validation failure, or a
    /// transport error.
    pub async fn update_location(
        &self,
        session: &Session,
        user_id: &str,
        position: Coordinates,
    ) -> Result<UserProfile> {
        let response = self
            .http
            .post(self.url(&format!("/api/auth/profile/{user_id}/location")))
            .bearer_auth(&session.token)
            .json(&LocationUpdate::from(position))
            .send()
            .await?;
        let profile = checked(response).await?.json().await?;
        Ok(profile)
    }

    /// Uploads a profile picture and returns its stored path.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Rejected`] on rejection (e.g. unsupported
    /// file type), or a transport error.
    pub async fn upload_profile_picture(
        &self,
        session: &Session,
        user_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("profilePicture", part);

        let response = self
            .http
            .post(self.url(&format!("/api/auth/upload-profile-picture/{user_id}")))
            .bearer_auth(&session.token)
            .multipart(form)
            .send()
            .await?;
        let profile: UserProfile = checked(response).await?.json().await?;
        Ok(profile.profile_picture)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Splits backend rejections from successful responses.
///
/// A rejection body is decoded as the `{ "message": ... }` envelope;
/// when even that fails, the HTTP status text stands in so the user
/// still sees something actionable.
async fn checked(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.json::<ApiMessage>().await.map_or_else(
        |_| {
            status
                .canonical_reason()
                .unwrap_or("request rejected")
                .to_string()
        },
        |envelope| envelope.message,
    );

    Err(AccountError::Rejected {
        status: status.as_u16(),
        message,
    })
}
