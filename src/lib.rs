//! emisdesk - client library for EMIS school-administration backends.
//!
//! The crate owns two cooperating pieces:
//! - a token store ([`auth`]) that seals the session credential into an
//!   encrypted cookie-style envelope on disk, and
//! - an API request layer ([`api`]) that attaches that credential to every
//!   backend call and maps responses into typed values or typed errors.
//!
//! Feature operations (auth, user profile, calendar, students, admin) are
//! methods on [`ApiClient`]; all of them route through the same request
//! core, so header handling and error mapping live in exactly one place.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{FileTokenStore, MemoryTokenStore, SessionCipher, TokenError, TokenStore};
pub use config::Config;
