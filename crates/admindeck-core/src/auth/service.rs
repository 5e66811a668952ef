//! Session lifecycle around the API client.
//!
//! `AuthService` owns the storage keys `token` and `user`: login writes both,
//! logout removes both, and nothing else in the application touches them
//! directly. A malformed persisted profile is treated as absence, never as
//! an error.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::models::{Credentials, Registration, UserProfile};
use crate::storage::{Storage, TOKEN_KEY, USER_KEY};

pub struct AuthService {
    api: ApiClient,
    storage: Storage,
}

impl AuthService {
    pub fn new(api: ApiClient, storage: Storage) -> Self {
        Self { api, storage }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Log in and persist the session. On failure nothing is persisted and
    /// the server's message propagates unchanged.
    pub async fn login(&self, credentials: &Credentials) -> Result<UserProfile> {
        let data = self.api.login(credentials).await?;

        self.storage
            .set(TOKEN_KEY, &data.token)
            .context("Failed to persist session token")?;
        let serialized =
            serde_json::to_string(&data.user).context("Failed to serialize user profile")?;
        self.storage
            .set(USER_KEY, &serialized)
            .context("Failed to persist user profile")?;

        info!(username = %data.user.username, "Login successful");
        Ok(data.user)
    }

    /// Create an account. Does not touch session storage - registering is
    /// not logging in.
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        self.api.register(registration).await?;
        info!(username = %registration.username, "Registration successful");
        Ok(())
    }

    /// Clear the persisted session unconditionally. Cannot fail; storage
    /// errors are logged and swallowed.
    pub fn logout(&self) {
        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            warn!(error = %e, "Failed to remove session token");
        }
        if let Err(e) = self.storage.remove(USER_KEY) {
            warn!(error = %e, "Failed to remove user profile");
        }
        info!("Logged out");
    }

    /// The persisted profile, or `None` when missing or malformed.
    pub fn user(&self) -> Option<UserProfile> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                debug!(error = %e, "Persisted user profile is malformed, treating as absent");
                None
            }
        }
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    /// True iff a session token is present in storage.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Fetch the authoritative profile from the server, refreshing the
    /// persisted copy on success.
    pub async fn current_user(&self) -> Result<UserProfile> {
        let profile = self.api.current_user().await?;

        let serialized =
            serde_json::to_string(&profile).context("Failed to serialize user profile")?;
        if let Err(e) = self.storage.set(USER_KEY, &serialized) {
            warn!(error = %e, "Failed to refresh persisted user profile");
        }
        Ok(profile)
    }
}
