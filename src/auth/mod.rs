//! Session credential lifecycle: sealing, persistence, and retrieval.
//!
//! This module provides:
//! - `TokenStore`: the interface callers use to set, read, and clear the
//!   process-wide session token
//! - `FileTokenStore` / `MemoryTokenStore`: cookie-envelope backed stores
//! - `SessionCipher`: symmetric sealing of the token for at-rest storage
//!
//! Tokens are persisted as an encrypted cookie-style envelope that expires
//! after 7 days; the plaintext credential only ever exists in memory.

pub mod crypto;
pub mod envelope;
pub mod error;
pub mod store;

pub use crypto::SessionCipher;
pub use envelope::{CookieEnvelope, SameSite, COOKIE_NAME};
pub use error::TokenError;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
