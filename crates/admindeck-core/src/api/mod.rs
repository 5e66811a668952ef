//! HTTP transport for the admindeck server.
//!
//! The server wraps every response in a `{err_code, err_msg, data}` envelope;
//! this module unwraps it and exposes typed payloads. Authentication uses a
//! bearer token read from local storage at send time.

pub mod client;
pub mod error;

pub use client::{ApiClient, LoginData};
pub use error::ApiError;
