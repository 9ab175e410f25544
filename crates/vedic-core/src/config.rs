//! Engine configuration and the per-attempt provider settings.
//!
//! | Source | Example |
//! |--------|---------|
//! | defaults | see [`EngineConfig::default`] |
//! | TOML file | `VEDIC_CONFIG` path, else `config/vedic.toml` |
//! | environment | `VEDIC__OPENAI_MODEL=gpt-4o-mini`, `VEDIC__LATITUDE=19.07` |
//!
//! Credentials are not part of this file; they live in a [`CredentialStore`].

use crate::credentials::{CredentialStore, Credentials};
use crate::error::ConfigResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "config/vedic.toml";

/// Endpoints, default coordinates and transport knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub prokerala_url: String,
    pub vedicrishi_url: String,
    /// Routes appended to the self-hosted backend's base URL.
    pub backend_chart_path: String,
    pub backend_chat_path: String,
    pub huggingface_url: String,
    pub openai_url: String,
    pub openai_model: String,
    /// Used for providers that need coordinates; the free-text location is never geocoded.
    pub latitude: f64,
    pub longitude: f64,
    /// Hours east of UTC sent with the coordinates.
    pub timezone_offset: f64,
    /// Per-request timeout. Unset leaves the transport default in place.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// TOML credential file used by the host.
    pub credentials_path: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prokerala_url: "https://api.prokerala.com/v2/astrology/birth-chart".to_string(),
            vedicrishi_url: "https://api.vedicrishiastro.com/v1/horoscope".to_string(),
            backend_chart_path: "/vedic_astrology_project/script/generate-birth-chart".to_string(),
            backend_chat_path: "/vedic_astrology_project/script/chat".to_string(),
            huggingface_url:
                "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2"
                    .to_string(),
            openai_url: "https://api.openai.com/v1/chat/completions".to_string(),
            openai_model: "gpt-3.5-turbo".to_string(),
            latitude: 28.6139,
            longitude: 77.2090,
            timezone_offset: 5.5,
            request_timeout_secs: None,
            credentials_path: "credentials.toml".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load config from file and environment. Precedence: env `VEDIC__*` > file
    /// (`VEDIC_CONFIG` or `config/vedic.toml`) > defaults.
    pub fn load() -> ConfigResult<Self> {
        let path = std::env::var("VEDIC_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Same as [`EngineConfig::load`] with an explicit file; a missing file is skipped.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let d = Self::default();
        let builder = config::Config::builder()
            .set_default("prokerala_url", d.prokerala_url)?
            .set_default("vedicrishi_url", d.vedicrishi_url)?
            .set_default("backend_chart_path", d.backend_chart_path)?
            .set_default("backend_chat_path", d.backend_chat_path)?
            .set_default("huggingface_url", d.huggingface_url)?
            .set_default("openai_url", d.openai_url)?
            .set_default("openai_model", d.openai_model)?
            .set_default("latitude", d.latitude)?
            .set_default("longitude", d.longitude)?
            .set_default("timezone_offset", d.timezone_offset)?
            .set_default("credentials_path", d.credentials_path)?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("VEDIC").separator("__"))
            .build()?;

        Ok(built.try_deserialize()?)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Everything a provider attempt may consult, passed explicitly rather than read from
/// ambient state.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub config: EngineConfig,
    pub credentials: Credentials,
}

impl ProviderSettings {
    pub fn new(config: EngineConfig, credentials: Credentials) -> Self {
        Self { config, credentials }
    }

    /// Default endpoints and no credentials: everything resolves locally.
    pub fn offline() -> Self {
        Self::default()
    }

    /// Snapshot `store` now, so keys set since the last call apply to this attempt.
    pub fn snapshot(config: &EngineConfig, store: &dyn CredentialStore) -> Self {
        Self::new(config.clone(), Credentials::from_store(store))
    }

    pub(crate) fn http_client(&self) -> reqwest::Client {
        let builder = reqwest::Client::builder();
        let builder = match self.config.request_timeout() {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        builder.build().unwrap_or_else(|_| reqwest::Client::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{keys, MemoryCredentialStore};

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = EngineConfig::load_from(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(config.latitude, 28.6139);
        assert_eq!(config.openai_model, "gpt-3.5-turbo");
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("vedic.toml");
        std::fs::write(
            &path,
            "openai_model = \"gpt-4o-mini\"\nlatitude = 19.076\nrequest_timeout_secs = 12\n",
        )
        .expect("write config");

        let config = EngineConfig::load_from(&path).expect("load");
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.latitude, 19.076);
        assert_eq!(config.longitude, 77.2090);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(12)));
    }

    #[test]
    fn test_snapshot_reads_store_at_call_time() {
        let store = MemoryCredentialStore::new().with(keys::OPENAI_API_KEY, "sk-live");
        let config = EngineConfig::default();
        let before = ProviderSettings::snapshot(&config, &store);
        assert_eq!(before.credentials.openai_api_key.as_deref(), Some("sk-live"));

        store.set(keys::OPENAI_API_KEY, "sk-next").expect("set");
        let settings = ProviderSettings::snapshot(&config, &store);
        assert_eq!(settings.credentials.openai_api_key.as_deref(), Some("sk-next"));
        assert_eq!(before.credentials.openai_api_key.as_deref(), Some("sk-live"));
    }
}
