//! Backend configuration from TOML (`[backends.*]` sections)

use serde::{Deserialize, Serialize};
use vault_domain::{BackendKind, DISK_BACKEND, ENCRYPTED_BACKEND, IN_MEMORY_BACKEND};

/// In-memory flat index, built from the corpus at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInMemoryBackendConfig {
    pub enabled: bool,
    pub name: String,
}

impl Default for FileInMemoryBackendConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: IN_MEMORY_BACKEND.to_string(),
        }
    }
}

/// Disk-persisted index, loaded from `path` at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiskBackendConfig {
    pub enabled: bool,
    pub name: String,
    pub path: String,
}

impl Default for FileDiskBackendConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: DISK_BACKEND.to_string(),
            path: "data/disk_index.json".to_string(),
        }
    }
}

/// Encrypted remote index service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEncryptedBackendConfig {
    pub enabled: bool,
    pub name: String,
    pub base_url: String,
    pub index_name: String,
    /// Environment variable holding the service API key
    pub api_key_env: String,
    /// Direct API key (not recommended; use the env var instead)
    pub api_key: Option<String>,
    /// Environment variable holding the index encryption key
    pub index_key_env: String,
    pub index_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for FileEncryptedBackendConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: ENCRYPTED_BACKEND.to_string(),
            base_url: "http://localhost:8000".to_string(),
            index_name: "financial_transactions".to_string(),
            api_key_env: "CYBORGDB_API_KEY".to_string(),
            api_key: None,
            index_key_env: "CYBORGDB_INDEX_KEY".to_string(),
            index_key: None,
            timeout_seconds: 30,
        }
    }
}

impl FileEncryptedBackendConfig {
    /// Resolve the API key: explicit value first, then the environment
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_secret(self.api_key.as_ref(), &self.api_key_env)
    }

    pub fn resolve_index_key(&self) -> Option<String> {
        resolve_secret(self.index_key.as_ref(), &self.index_key_env)
    }
}

pub(crate) fn resolve_secret(explicit: Option<&String>, env_var: &str) -> Option<String> {
    explicit
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .or_else(|| std::env::var(env_var).ok().filter(|v| !v.trim().is_empty()))
}

/// All configured backends.
///
/// # Example
///
/// ```toml
/// [backends.disk]
/// path = "data/disk_index.json"
///
/// [backends.encrypted]
/// base_url = "https://cyborg.internal:8000"
/// index_name = "financial_transactions"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendsConfig {
    pub in_memory: FileInMemoryBackendConfig,
    pub disk: FileDiskBackendConfig,
    pub encrypted: FileEncryptedBackendConfig,
}

impl FileBackendsConfig {
    /// Enabled backends as `(name, kind)`, in orchestrator order
    pub fn enabled(&self) -> Vec<(&str, BackendKind)> {
        let mut backends = Vec::new();
        if self.in_memory.enabled {
            backends.push((self.in_memory.name.as_str(), BackendKind::InMemory));
        }
        if self.disk.enabled {
            backends.push((self.disk.name.as_str(), BackendKind::DiskBacked));
        }
        if self.encrypted.enabled {
            backends.push((self.encrypted.name.as_str(), BackendKind::Encrypted));
        }
        backends
    }

    pub fn is_configured(&self, name: &str) -> bool {
        self.enabled().iter().any(|(n, _)| *n == name)
    }
}
