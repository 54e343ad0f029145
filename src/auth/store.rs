use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use super::crypto::SessionCipher;
use super::envelope::CookieEnvelope;
use super::error::TokenError;

/// Owner of the process-wide session credential.
///
/// Callers depend on this trait rather than on a concrete cookie file so a
/// fake in-memory store can stand in during tests.
pub trait TokenStore: Send + Sync {
    /// Seal and persist the raw token, overwriting any previous envelope.
    /// Empty tokens are accepted and stored; no validation is performed.
    fn set_token(&self, raw_token: &str) -> Result<(), TokenError>;

    /// Decrypt and return the stored token.
    ///
    /// Absent or expired envelopes yield `Ok(None)`. A present envelope that
    /// cannot be opened yields `Err(TokenError::Corrupted)` so callers can
    /// tell a broken session apart from "never logged in".
    fn token(&self) -> Result<Option<String>, TokenError>;

    /// Delete the envelope unconditionally. Idempotent.
    fn remove_token(&self) -> Result<(), TokenError>;

    /// Presence check only: true while an unexpired envelope exists, even if
    /// it would fail to decrypt. `token()` is the validity check.
    fn is_authenticated(&self) -> bool;
}

/// Cookie-file backed store. The envelope lives as a single JSON file; writes
/// are whole-file, so concurrent setters degrade to last-write-wins.
pub struct FileTokenStore {
    path: PathBuf,
    cipher: SessionCipher,
    secure: bool,
}

impl FileTokenStore {
    pub fn new(path: PathBuf, cipher: SessionCipher, secure: bool) -> Self {
        Self {
            path,
            cipher,
            secure,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_envelope(&self) -> Result<Option<CookieEnvelope>, TokenError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let envelope = serde_json::from_str(&contents)
            .map_err(|e| TokenError::Corrupted(format!("Unreadable session envelope: {}", e)))?;
        Ok(Some(envelope))
    }
}

impl TokenStore for FileTokenStore {
    fn set_token(&self, raw_token: &str) -> Result<(), TokenError> {
        let envelope = CookieEnvelope::new(self.cipher.seal(raw_token)?, self.secure);
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&envelope)?;
        std::fs::write(&self.path, contents)?;
        debug!(path = %self.path.display(), "Stored session envelope");
        Ok(())
    }

    fn token(&self) -> Result<Option<String>, TokenError> {
        let Some(envelope) = self.read_envelope()? else {
            return Ok(None);
        };
        if envelope.is_expired() {
            debug!("Session envelope expired; discarding");
            let _ = std::fs::remove_file(&self.path);
            return Ok(None);
        }
        self.cipher.open(&envelope.value).map(Some)
    }

    fn remove_token(&self) -> Result<(), TokenError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn is_authenticated(&self) -> bool {
        match self.read_envelope() {
            Ok(Some(envelope)) => !envelope.is_expired(),
            Ok(None) => false,
            // Unreadable file: the cookie is still present, which is all this
            // check reports. token() surfaces the corruption.
            Err(_) => self.path.exists(),
        }
    }
}

/// In-memory store with the same contract as [`FileTokenStore`]. Intended for
/// tests and embedders that do not want disk persistence.
pub struct MemoryTokenStore {
    cipher: SessionCipher,
    slot: RwLock<Option<CookieEnvelope>>,
}

impl MemoryTokenStore {
    pub fn new(cipher: SessionCipher) -> Self {
        Self {
            cipher,
            slot: RwLock::new(None),
        }
    }

    /// Replace the stored envelope wholesale. Lets tests stage expired or
    /// undecryptable envelopes without going through `set_token`.
    pub fn inject_envelope(&self, envelope: CookieEnvelope) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(envelope);
    }
}

impl TokenStore for MemoryTokenStore {
    fn set_token(&self, raw_token: &str) -> Result<(), TokenError> {
        let envelope = CookieEnvelope::new(self.cipher.seal(raw_token)?, false);
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(envelope);
        Ok(())
    }

    fn token(&self) -> Result<Option<String>, TokenError> {
        let envelope = {
            let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
            slot.clone()
        };
        let Some(envelope) = envelope else {
            return Ok(None);
        };
        if envelope.is_expired() {
            let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
            *slot = None;
            return Ok(None);
        }
        self.cipher.open(&envelope.value).map(Some)
    }

    fn remove_token(&self) -> Result<(), TokenError> {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
        Ok(())
    }

    fn is_authenticated(&self) -> bool {
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        slot.as_ref().map(|e| !e.is_expired()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn cipher() -> SessionCipher {
        SessionCipher::derive("store-test-secret").unwrap()
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::new(cipher());
        assert!(!store.is_authenticated());
        assert!(store.token().unwrap().is_none());

        store.set_token("tok-abc").unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.token().unwrap().as_deref(), Some("tok-abc"));

        store.remove_token().unwrap();
        assert!(!store.is_authenticated());
        assert!(store.token().unwrap().is_none());
        // Removing again is a no-op.
        store.remove_token().unwrap();
    }

    #[test]
    fn test_memory_store_accepts_empty_token() {
        let store = MemoryTokenStore::new(cipher());
        store.set_token("").unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.token().unwrap().as_deref(), Some(""));
    }

    #[test]
    fn test_expired_envelope_reads_as_absent() {
        let store = MemoryTokenStore::new(cipher());
        store.set_token("tok-abc").unwrap();

        let mut envelope = CookieEnvelope::new(cipher().seal("tok-abc").unwrap(), false);
        envelope.expires = Utc::now() - Duration::days(1);
        store.inject_envelope(envelope);

        assert!(!store.is_authenticated());
        assert!(store.token().unwrap().is_none());
    }

    #[test]
    fn test_undecryptable_envelope_is_present_but_corrupted() {
        let store = MemoryTokenStore::new(cipher());
        store.inject_envelope(CookieEnvelope::new("not a sealed value".to_string(), false));

        // Presence check says yes, validity check says corrupted.
        assert!(store.is_authenticated());
        assert!(matches!(store.token(), Err(TokenError::Corrupted(_))));
    }
}
