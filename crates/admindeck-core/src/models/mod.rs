//! Domain types shared between the API client, the auth layer, and the UI.

pub mod attachment;
pub mod user;

pub use attachment::Attachment;
pub use user::{Credentials, Registration, UserProfile};
