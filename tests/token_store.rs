//! Integration tests for the cookie-envelope token store.

use std::sync::Arc;

use chrono::{Duration, Utc};
use temp_dir::TempDir;

use emisdesk::auth::{
    CookieEnvelope, FileTokenStore, SessionCipher, TokenError, TokenStore, COOKIE_NAME,
};

fn cipher(secret: &str) -> SessionCipher {
    SessionCipher::derive(secret).unwrap()
}

fn store_in(dir: &TempDir, secret: &str, secure: bool) -> FileTokenStore {
    FileTokenStore::new(dir.child("session_cookie.json"), cipher(secret), secure)
}

#[test]
fn round_trip_returns_exact_token() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, "it-secret", false);

    store.set_token("tok-12345").unwrap();
    assert!(store.is_authenticated());
    assert_eq!(store.token().unwrap().as_deref(), Some("tok-12345"));
}

#[test]
fn raw_token_is_never_written_to_disk() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, "it-secret", true);

    store.set_token("tok-supersecret").unwrap();

    let contents = std::fs::read_to_string(dir.child("session_cookie.json")).unwrap();
    assert!(!contents.contains("tok-supersecret"));

    // The envelope carries the cookie attributes, not the credential.
    let envelope: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(envelope["name"], COOKIE_NAME);
    assert_eq!(envelope["secure"], true);
    assert_eq!(envelope["same_site"], "strict");

    let expires: chrono::DateTime<Utc> =
        serde_json::from_value(envelope["expires"].clone()).unwrap();
    let lifetime = expires - Utc::now();
    assert!(lifetime > Duration::days(6));
    assert!(lifetime <= Duration::days(7));
}

#[test]
fn set_token_overwrites_previous_value() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, "it-secret", false);

    store.set_token("first").unwrap();
    store.set_token("second").unwrap();
    assert_eq!(store.token().unwrap().as_deref(), Some("second"));
}

#[test]
fn empty_token_is_accepted_and_stored() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, "it-secret", false);

    store.set_token("").unwrap();
    assert!(store.is_authenticated());
    assert_eq!(store.token().unwrap().as_deref(), Some(""));
}

#[test]
fn remove_token_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, "it-secret", false);

    store.set_token("tok").unwrap();
    store.remove_token().unwrap();
    assert!(!store.is_authenticated());
    assert!(store.token().unwrap().is_none());

    // Removing with nothing stored is a no-op.
    store.remove_token().unwrap();
    assert!(!store.is_authenticated());
}

#[test]
fn corrupted_file_is_present_but_unreadable() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, "it-secret", false);

    std::fs::write(dir.child("session_cookie.json"), "{ not json at all").unwrap();

    // The presence check and the validity check deliberately disagree here:
    // a broken envelope still *exists*, it just cannot produce a token.
    assert!(store.is_authenticated());
    assert!(matches!(store.token(), Err(TokenError::Corrupted(_))));

    // Clearing the broken session works.
    store.remove_token().unwrap();
    assert!(!store.is_authenticated());
}

#[test]
fn envelope_sealed_under_other_secret_is_corrupted() {
    let dir = TempDir::new().unwrap();
    let writer = store_in(&dir, "secret-a", false);
    writer.set_token("tok").unwrap();

    let reader = store_in(&dir, "secret-b", false);
    assert!(reader.is_authenticated());
    assert!(matches!(reader.token(), Err(TokenError::Corrupted(_))));
}

#[test]
fn expired_envelope_reads_as_absent() {
    let dir = TempDir::new().unwrap();
    let path = dir.child("session_cookie.json");
    let store = FileTokenStore::new(path.clone(), cipher("it-secret"), false);

    let mut envelope = CookieEnvelope::new(cipher("it-secret").seal("tok").unwrap(), false);
    envelope.expires = Utc::now() - Duration::days(1);
    std::fs::write(&path, serde_json::to_string_pretty(&envelope).unwrap()).unwrap();

    assert!(!store.is_authenticated());
    assert!(store.token().unwrap().is_none());
    // An expired cookie is discarded on read.
    assert!(!path.exists());
}

#[test]
fn stores_are_usable_as_trait_objects() {
    let dir = TempDir::new().unwrap();
    let store: Arc<dyn TokenStore> = Arc::new(store_in(&dir, "it-secret", false));

    store.set_token("tok-dyn").unwrap();
    assert_eq!(store.token().unwrap().as_deref(), Some("tok-dyn"));
    store.remove_token().unwrap();
    assert!(!store.is_authenticated());
}
