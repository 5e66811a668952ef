//! Authentication: the login/register/logout operations and the persisted
//! session (token + profile) they maintain in local storage.

pub mod service;

pub use service::AuthService;
