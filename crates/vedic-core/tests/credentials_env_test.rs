//! Environment fallback for provider credentials, against the real process environment.
//!
//! Kept in its own test binary: it is the only test that mutates environment variables.
//!
//! Run with: `cargo test -p vedic-core --test credentials_env_test`

use vedic_core::{keys, CredentialStore, EngineConfig, FileCredentialStore, ProviderSettings};

#[test]
fn test_env_keys_are_read_live_and_never_persisted() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("credentials.toml");
    let store = FileCredentialStore::new(&path);
    let config = EngineConfig::default();

    std::env::set_var(keys::OPENAI_API_KEY, "sk-from-env-only");
    let first = ProviderSettings::snapshot(&config, &store);
    assert_eq!(first.credentials.openai_api_key.as_deref(), Some("sk-from-env-only"));
    assert!(!path.exists(), "environment values must not be written to the store");

    std::env::set_var(keys::OPENAI_API_KEY, "sk-rotated");
    let rotated = ProviderSettings::snapshot(&config, &store);
    assert_eq!(rotated.credentials.openai_api_key.as_deref(), Some("sk-rotated"));

    store.set(keys::OPENAI_API_KEY, "sk-stored").expect("set");
    let stored = ProviderSettings::snapshot(&config, &store);
    assert_eq!(stored.credentials.openai_api_key.as_deref(), Some("sk-stored"));

    store.remove(keys::OPENAI_API_KEY).expect("remove");
    std::env::remove_var(keys::OPENAI_API_KEY);
    let cleared = ProviderSettings::snapshot(&config, &store);
    assert_eq!(cleared.credentials.openai_api_key, None);

    let raw = std::fs::read_to_string(&path).expect("read store");
    assert!(!raw.contains("sk-rotated") && !raw.contains("sk-from-env-only"));
}
