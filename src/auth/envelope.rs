use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Cookie name under which the session credential is stored.
pub const COOKIE_NAME: &str = "emisdesk_session";

/// Cookie lifetime in days, matching the backend session window.
const COOKIE_EXPIRY_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// The at-rest form of the session credential: a cookie-style record whose
/// value is the sealed token. The plaintext token never appears here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieEnvelope {
    pub name: String,
    /// base64(nonce || ciphertext) of the raw token.
    pub value: String,
    pub expires: DateTime<Utc>,
    /// True when the API base URL uses a secure transport.
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookieEnvelope {
    pub fn new(sealed_value: String, secure: bool) -> Self {
        Self {
            name: COOKIE_NAME.to_string(),
            value: sealed_value,
            expires: Utc::now() + Duration::days(COOKIE_EXPIRY_DAYS),
            secure,
            same_site: SameSite::Strict,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires
    }
}
