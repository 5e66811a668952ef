//! HTTP transport for the admindeck API.
//!
//! Every application response is wrapped in an envelope carrying a numeric
//! `err_code` and an optional `err_msg`; `200` means success and anything
//! else is an application-level failure whose message is surfaced verbatim.
//! The envelope is validated here, at the transport boundary, so callers
//! only ever see typed payloads or an [`ApiError`].

use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{Attachment, Credentials, Registration, UserProfile};
use crate::storage::{Storage, TOKEN_KEY};

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Envelope success code used by the server.
const ENVELOPE_OK: i64 = 200;

/// Fallback message when the server omits `err_msg` on a failed envelope.
const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// The server's response envelope.
///
/// `err_msg` and `data` are plain `Option` fields so a missing key reads as
/// `None` without constraining the payload type.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    err_code: i64,
    err_msg: Option<String>,
    data: Option<T>,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub user: UserProfile,
}

/// API client for the admindeck server.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    storage: Storage,
}

impl ApiClient {
    /// Create a new API client against the given base URL.
    ///
    /// The bearer token is read from storage at send time on every request,
    /// so login and logout take effect without rebuilding the client.
    pub fn new(base_url: impl Into<String>, storage: Storage) -> Result<Self, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .build()
            .map_err(ApiError::from_transport)?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url, storage })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request, attaching the bearer token iff one is present in
    /// storage right now.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.storage.get(TOKEN_KEY) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and fail on transport errors and non-success HTTP
    /// statuses. 401 maps to [`ApiError::Unauthorized`] with no side effects;
    /// reacting to it is the top-level listener's job.
    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = builder.send().await.map_err(ApiError::from_transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Request failed");
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Unwrap an envelope that must carry a payload.
    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        if envelope.err_code != ENVELOPE_OK {
            return Err(Self::envelope_failure(&envelope));
        }
        envelope
            .data
            .ok_or_else(|| ApiError::InvalidResponse("Envelope is missing data".to_string()))
    }

    /// Unwrap an envelope whose payload (if any) the caller does not need.
    async fn read_envelope_unit(response: reqwest::Response) -> Result<(), ApiError> {
        let envelope: Envelope<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        if envelope.err_code != ENVELOPE_OK {
            return Err(Self::envelope_failure(&envelope));
        }
        Ok(())
    }

    fn envelope_failure<T>(envelope: &Envelope<T>) -> ApiError {
        ApiError::App {
            code: envelope.err_code,
            message: envelope
                .err_msg
                .clone()
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
        }
    }

    // =========================================================================
    // Verb helpers
    // =========================================================================

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        debug!(path, "GET");
        let mut builder = self.request(Method::GET, path);
        if !params.is_empty() {
            builder = builder.query(params);
        }
        let response = self.send(builder).await?;
        Self::read_envelope(response).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!(path, "POST");
        let builder = self.request(Method::POST, path).json(body);
        let response = self.send(builder).await?;
        Self::read_envelope(response).await
    }

    /// POST where the caller does not consume the success payload.
    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        debug!(path, "POST");
        let builder = self.request(Method::POST, path).json(body);
        let response = self.send(builder).await?;
        Self::read_envelope_unit(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        debug!(path, "DELETE");
        let builder = self.request(Method::DELETE, path);
        let response = self.send(builder).await?;
        Self::read_envelope_unit(response).await
    }

    // =========================================================================
    // Endpoints
    // =========================================================================

    /// Authenticate and return the session token plus the user's profile.
    /// Persisting the session is the auth layer's responsibility.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginData, ApiError> {
        self.post("/api/auth/login", credentials).await
    }

    /// Create a new account. Registration does not imply login.
    pub async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        self.post_unit("/api/auth/register", registration).await
    }

    /// Fetch the authoritative profile for the current session.
    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.get("/api/user/me", &[]).await
    }

    /// Upload a file as a multipart form and return its descriptor.
    pub async fn upload_attachment(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        entity_type: &str,
        attachment_type: &str,
    ) -> Result<Attachment, ApiError> {
        debug!(file_name, entity_type, attachment_type, "Uploading attachment");

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("entity_type", entity_type.to_string())
            .text("attachment_type", attachment_type.to_string());

        let builder = self
            .request(Method::POST, "/api/attachments/upload")
            .multipart(form);
        let response = self.send(builder).await?;
        Self::read_envelope(response).await
    }

    pub async fn delete_attachment(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/attachments/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login_envelope() {
        let json = r#"{
            "err_code": 200,
            "err_msg": "",
            "data": {
                "token": "abc123",
                "user": {"username": "alice", "role": "user"}
            }
        }"#;

        let envelope: Envelope<LoginData> =
            serde_json::from_str(json).expect("Failed to parse login envelope");
        assert_eq!(envelope.err_code, 200);
        let data = envelope.data.expect("Envelope should carry data");
        assert_eq!(data.token, "abc123");
        assert_eq!(data.user.username, "alice");
        assert_eq!(data.user.role, "user");
    }

    #[test]
    fn test_envelope_fields_may_be_absent() {
        // The payload type deliberately has no Default impl; a bare envelope
        // must still deserialize with both optional fields as None.
        let envelope: Envelope<UserProfile> = serde_json::from_str(r#"{"err_code":200}"#)
            .expect("Failed to parse bare envelope");
        assert_eq!(envelope.err_code, 200);
        assert!(envelope.err_msg.is_none());
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_parse_failure_envelope_without_data() {
        let json = r#"{"err_code": 400, "err_msg": "invalid credentials"}"#;
        let envelope: Envelope<LoginData> =
            serde_json::from_str(json).expect("Failed to parse failure envelope");
        assert_eq!(envelope.err_code, 400);
        assert!(envelope.data.is_none());

        let err = ApiClient::envelope_failure(&envelope);
        assert_eq!(err.to_string(), "invalid credentials");
    }

    #[test]
    fn test_envelope_failure_falls_back_to_generic_message() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"err_code": 500}"#).unwrap();
        let err = ApiClient::envelope_failure(&envelope);
        assert_eq!(err.to_string(), DEFAULT_FAILURE_MESSAGE);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());
        let client = ApiClient::new("http://localhost:3000/", storage).unwrap();
        assert_eq!(client.url("/api/user/me"), "http://localhost:3000/api/user/me");
    }
}
