//! Credential store: named string keys that decide which remote providers are eligible.
//!
//! Stores are queried at call time through [`Credentials::from_store`], so a key set
//! mid-session takes effect on the next provider attempt. A key the store lacks is read
//! from the process environment at the same moment; the environment is never written
//! back into a store.

use crate::error::ConfigResult;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key names understood by the providers.
pub mod keys {
    pub const PROKERALA_CLIENT_ID: &str = "PROKERALA_CLIENT_ID";
    pub const PROKERALA_CLIENT_SECRET: &str = "PROKERALA_CLIENT_SECRET";
    pub const VEDICRISHIASTRO_USER_ID: &str = "VEDICRISHIASTRO_USER_ID";
    pub const VEDICRISHIASTRO_API_KEY: &str = "VEDICRISHIASTRO_API_KEY";
    pub const HUGGINGFACE_API_TOKEN: &str = "HUGGINGFACE_API_TOKEN";
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    /// Base URL of a self-hosted chart backend.
    pub const BACKEND_URL: &str = "BACKEND_URL";

    pub const ALL: [&str; 7] = [
        PROKERALA_CLIENT_ID,
        PROKERALA_CLIENT_SECRET,
        VEDICRISHIASTRO_USER_ID,
        VEDICRISHIASTRO_API_KEY,
        HUGGINGFACE_API_TOKEN,
        OPENAI_API_KEY,
        BACKEND_URL,
    ];
}

/// Key/value side store for provider credentials.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> ConfigResult<()>;
    fn remove(&self, key: &str) -> ConfigResult<()>;
}

/// In-process store. Nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    values: DashMap<String, String>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: &str) -> ConfigResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ConfigResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// TOML file of `KEY = "value"` pairs. Read on every `get` so edits made by another
/// process are picked up.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> ConfigResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> ConfigResult<()> {
        let content = toml::to_string_pretty(values)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_all() {
            Ok(mut values) => values.remove(key),
            Err(e) => {
                debug!(target: "vedic::credentials", path = %self.path.display(), error = %e, "credential file unreadable");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> ConfigResult<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&self, key: &str) -> ConfigResult<()> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

/// Snapshot of the credentials relevant to provider eligibility. Empty values count as
/// absent. Priority: store > environment variable of the same name.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub prokerala_client_id: Option<String>,
    pub prokerala_client_secret: Option<String>,
    pub vedicrishi_user_id: Option<String>,
    pub vedicrishi_api_key: Option<String>,
    pub huggingface_token: Option<String>,
    pub openai_api_key: Option<String>,
    pub backend_url: Option<String>,
}

impl Credentials {
    /// No credentials at all: every remote provider is skipped.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_store(store: &dyn CredentialStore) -> Self {
        Self::resolve(store, |key| std::env::var(key).ok())
    }

    /// [`Credentials::from_store`] with an explicit fallback lookup in place of the
    /// process environment.
    pub fn resolve(store: &dyn CredentialStore, fallback: impl Fn(&str) -> Option<String>) -> Self {
        let present = |v: String| Some(v.trim().to_string()).filter(|v| !v.is_empty());
        let read = |key: &str| {
            store
                .get(key)
                .and_then(present)
                .or_else(|| fallback(key).and_then(present))
        };
        Self {
            prokerala_client_id: read(keys::PROKERALA_CLIENT_ID),
            prokerala_client_secret: read(keys::PROKERALA_CLIENT_SECRET),
            vedicrishi_user_id: read(keys::VEDICRISHIASTRO_USER_ID),
            vedicrishi_api_key: read(keys::VEDICRISHIASTRO_API_KEY),
            huggingface_token: read(keys::HUGGINGFACE_API_TOKEN),
            openai_api_key: read(keys::OPENAI_API_KEY),
            backend_url: read(keys::BACKEND_URL),
        }
    }

    pub fn prokerala(&self) -> Option<(&str, &str)> {
        Some((
            self.prokerala_client_id.as_deref()?,
            self.prokerala_client_secret.as_deref()?,
        ))
    }

    pub fn vedicrishi(&self) -> Option<(&str, &str)> {
        Some((
            self.vedicrishi_user_id.as_deref()?,
            self.vedicrishi_api_key.as_deref()?,
        ))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let present = |v: &Option<String>| if v.is_some() { "set" } else { "unset" };
        f.debug_struct("Credentials")
            .field("prokerala_client_id", &present(&self.prokerala_client_id))
            .field("prokerala_client_secret", &present(&self.prokerala_client_secret))
            .field("vedicrishi_user_id", &present(&self.vedicrishi_user_id))
            .field("vedicrishi_api_key", &present(&self.vedicrishi_api_key))
            .field("huggingface_token", &present(&self.huggingface_token))
            .field("openai_api_key", &present(&self.openai_api_key))
            .field("backend_url", &self.backend_url)
            .finish()
    }
}
