use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    /// An envelope is present but cannot be read back into a token.
    /// Callers should treat this as a broken session and force a logout
    /// rather than as "never logged in".
    #[error("Corrupted session envelope: {0}")]
    Corrupted(String),

    #[error("Encryption error: {0}")]
    Crypto(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode session envelope: {0}")]
    Encode(#[from] serde_json::Error),
}
