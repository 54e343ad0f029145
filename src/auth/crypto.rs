//! Symmetric sealing of the session token for at-rest storage.
//!
//! The token is encrypted with ChaCha20-Poly1305 under a key derived from a
//! configured secret. This keeps the raw credential out of plain files; the
//! real trust boundary remains the backend validating the bearer token.

use argon2::Argon2;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use rand::RngCore;

use super::error::TokenError;

/// ChaCha20-Poly1305 key size in bytes.
pub const KEY_SIZE: usize = 32;

/// ChaCha20-Poly1305 nonce size in bytes.
pub const NONCE_SIZE: usize = 12;

/// Fixed KDF salt. The derived key must be stable across runs so a persisted
/// envelope can be reopened; per-install salting would break that.
const KDF_SALT: &[u8] = b"emisdesk.session.envelope.v1";

/// Seals and opens session tokens. Clone is cheap (the key is a small array).
#[derive(Clone)]
pub struct SessionCipher {
    key: [u8; KEY_SIZE],
}

impl SessionCipher {
    /// Derive a cipher from a secret string using Argon2id.
    pub fn derive(secret: &str) -> Result<Self, TokenError> {
        let mut key = [0u8; KEY_SIZE];
        Argon2::default()
            .hash_password_into(secret.as_bytes(), KDF_SALT, &mut key)
            .map_err(|e| TokenError::Crypto(format!("Key derivation failed: {}", e)))?;
        Ok(Self { key })
    }

    /// Encrypt a token, returning base64(nonce || ciphertext).
    pub fn seal(&self, plaintext: &str) -> Result<String, TokenError> {
        let cipher = ChaCha20Poly1305::new(Key::from_slice(&self.key));

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
            .map_err(|e| TokenError::Crypto(format!("Encryption failed: {}", e)))?;

        let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(sealed))
    }

    /// Decrypt a sealed value produced by [`seal`](Self::seal).
    pub fn open(&self, sealed: &str) -> Result<String, TokenError> {
        let bytes = BASE64
            .decode(sealed)
            .map_err(|e| TokenError::Corrupted(format!("Invalid envelope encoding: {}", e)))?;

        if bytes.len() < NONCE_SIZE {
            return Err(TokenError::Corrupted(
                "Envelope value shorter than a nonce".to_string(),
            ));
        }
        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_SIZE);

        let cipher = ChaCha20Poly1305::new(Key::from_slice(&self.key));
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| {
                TokenError::Corrupted(
                    "Envelope does not decrypt under the configured secret".to_string(),
                )
            })?;

        String::from_utf8(plaintext)
            .map_err(|_| TokenError::Corrupted("Decrypted token is not valid UTF-8".to_string()))
    }
}
