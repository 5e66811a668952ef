use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP 401. The transport only reports this; clearing the stored
    /// session and navigating back to the landing screen is the job of a
    /// single top-level listener, not of every response path.
    #[error("Unauthorized - session is not valid")]
    Unauthorized,

    /// The server's envelope carried a non-success code. The message is
    /// passed through verbatim so the UI can show it unchanged.
    #[error("{message}")]
    App { code: i64, message: String },

    #[error("Server error: {0}")]
    Server(String),

    #[error("Request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data.
    /// The cut backs up to a char boundary; the server sends multibyte text.
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    /// Classify a non-success HTTP status.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            500..=599 => ApiError::Server(truncated),
            code => ApiError::Http { status: code, body: truncated },
        }
    }

    /// Classify a transport-level reqwest failure.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(err)
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
