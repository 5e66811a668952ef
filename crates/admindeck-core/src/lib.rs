//! Core library for admindeck: a client for the admindeck admin API.
//!
//! The pieces fit together in one direction: the UI calls [`auth::AuthService`],
//! which calls [`api::ApiClient`], which round-trips to the server and reads
//! the bearer token from [`storage::Storage`]; results flow back through the
//! auth layer (persisting the session) and the UI updates
//! [`session::SessionStore`], the single owner of in-memory session state.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod session;
pub mod storage;

pub use api::{ApiClient, ApiError};
pub use auth::AuthService;
pub use config::Config;
pub use session::{SessionAction, SessionState, SessionStore};
pub use storage::Storage;
