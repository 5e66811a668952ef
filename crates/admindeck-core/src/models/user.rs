//! User identity types: the profile returned by the server and the
//! request bodies for login and registration.

use serde::{Deserialize, Serialize};

/// Well-known role strings used by the server.
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const USER: &str = "user";
    pub const GUEST: &str = "guest";
}

/// The authenticated user's identity record.
///
/// Returned inside the login payload and by `GET /api/user/me`, and persisted
/// as JSON under the `user` storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == roles::ADMIN
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Registration request body. Registering does not log the user in.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}
