//! Credentials, redacted secrets, and validated player identifiers.

pub mod credential;
pub mod id;

pub use credential::*;
pub use id::*;
