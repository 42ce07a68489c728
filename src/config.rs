// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

const PROJECT_CONFIG: &str = ".gitter.toml";
#[cfg(feature = "secure-storage")]
const KEYRING_SERVICE: &str = "gitter";

/// Settings handed to the commit message backend.
///
/// An empty provider or a missing key is a valid local-only setup; the
/// backend factory and the backend report it when generation is attempted.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: String,
    pub api_key: Option<SecretString>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl ProviderConfig {
    pub fn new(provider: impl Into<String>, api_key: Option<&str>) -> Self {
        Self {
            provider: provider.into(),
            api_key: api_key.map(|k| SecretString::from(k.to_string())),
            model: None,
            base_url: None,
            timeout: Duration::from_secs(default_timeout_secs()),
            max_retries: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// LLM provider name (openai, gemini). Unset means local-only messages.
    #[serde(default)]
    pub provider: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,

    /// Model override; each provider has its own default
    #[serde(default)]
    pub model: Option<String>,

    /// Base URL for the chat-completions endpoint
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (default 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra attempts after a network failure (default 0)
    #[serde(default)]
    pub max_retries: u32,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: None,
            api_key: None,
            model: None,
            base_url: None,
            timeout_secs: default_timeout_secs(),
            max_retries: 0,
        }
    }
}

impl Config {
    /// Load with priority: ENV > user config > project config > defaults
    pub fn load() -> Result<Self> {
        let project = std::env::current_dir()
            .ok()
            .map(|cwd| cwd.join(PROJECT_CONFIG));
        let user = Self::config_path();
        Self::load_from(project.as_deref(), user.as_deref())
    }

    pub fn load_from(project_config: Option<&Path>, user_config: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        for path in [project_config, user_config].into_iter().flatten() {
            if path.exists() {
                debug!(path = %path.display(), "merging config file");
                figment = figment.merge(Toml::file(path));
            }
        }

        // GITTER_PROVIDER, GITTER_API_KEY, GITTER_TIMEOUT_SECS, ...
        figment = figment.merge(Env::prefixed("GITTER_"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        if config.provider.as_deref().is_some_and(|p| p.trim().is_empty()) {
            config.provider = None;
        }

        if config.api_key.is_none() {
            config.api_key = config
                .provider_key_env()
                .and_then(|var| std::env::var(var).ok())
                .filter(|k| !k.trim().is_empty());
        }

        #[cfg(feature = "secure-storage")]
        if config.api_key.is_none()
            && let Some(ref provider) = config.provider
            && let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &provider.to_lowercase())
            && let Ok(key) = entry.get_password()
        {
            config.api_key = Some(key);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gitter").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Provider-specific API key variable, e.g. `OPENAI_API_KEY`
    fn provider_key_env(&self) -> Option<&'static str> {
        match self.provider.as_deref()?.to_lowercase().as_str() {
            "openai" => Some("OPENAI_API_KEY"),
            "gemini" => Some("GEMINI_API_KEY"),
            _ => None,
        }
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            provider: self.provider.clone().unwrap_or_default(),
            api_key: self.api_key.clone().map(SecretString::from),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=300).contains(&self.timeout_secs) {
            return Err(Error::Config(format!(
                "timeout_secs must be 1–300, got {}",
                self.timeout_secs
            )));
        }

        if self.max_retries > 5 {
            return Err(Error::Config(format!(
                "max_retries must be 0–5, got {}",
                self.max_retries
            )));
        }

        if let Some(ref base_url) = self.base_url {
            let parsed = url::Url::parse(base_url)
                .map_err(|e| Error::Config(format!("base_url '{base_url}' is invalid: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(Error::Config(format!(
                    "base_url must start with http:// or https://, got '{base_url}'"
                )));
            }
        }

        Ok(())
    }

    /// Persist provider/model/key into the user config file.
    ///
    /// With `secure-storage` the key goes to the OS keychain instead.
    pub fn save_settings(update: &SettingsUpdate) -> Result<PathBuf> {
        let path = Self::config_path()
            .ok_or_else(|| Error::Config("Cannot determine config directory".into()))?;
        Self::save_settings_to(&path, update)?;
        Ok(path)
    }

    pub fn save_settings_to(path: &Path, update: &SettingsUpdate) -> Result<()> {
        let mut table = if path.exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str::<toml::Table>(&content)
                .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?
        } else {
            toml::Table::new()
        };

        if let Some(ref provider) = update.provider {
            table.insert("provider".into(), provider.to_lowercase().into());
        }
        if let Some(ref model) = update.model {
            table.insert("model".into(), model.clone().into());
        }
        if let Some(ref key) = update.api_key {
            if !Self::store_in_keyring(table.get("provider"), key)? {
                table.insert("api_key".into(), key.clone().into());
            } else {
                table.remove("api_key");
            }
        }

        let content = toml::to_string_pretty(&table)
            .map_err(|e| Error::Config(format!("cannot serialize config: {e}")))?;
        Self::write_private(path, &content)
    }

    #[cfg(feature = "secure-storage")]
    fn store_in_keyring(provider: Option<&toml::Value>, key: &str) -> Result<bool> {
        let Some(provider) = provider.and_then(|p| p.as_str()) else {
            // Keyring entries are per provider
            return Ok(false);
        };
        let entry = keyring::Entry::new(KEYRING_SERVICE, provider)
            .map_err(|e| Error::Keyring(e.to_string()))?;
        entry
            .set_password(key)
            .map_err(|e| Error::Keyring(e.to_string()))?;
        Ok(true)
    }

    #[cfg(not(feature = "secure-storage"))]
    fn store_in_keyring(_provider: Option<&toml::Value>, _key: &str) -> Result<bool> {
        Ok(false)
    }

    /// Create default config file with secure permissions
    pub fn create_default() -> Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            return Err(Error::Config("Cannot determine config directory".into()));
        };

        let path = dir.join("config.toml");
        let content = r#"# gitter configuration

# LLM provider: openai, gemini (leave unset for local-only messages)
# provider = "openai"

# Model name (defaults: gpt-4o-mini for openai, gemini-2.0-flash for gemini)
# model = "gpt-4o-mini"

# Base URL of an OpenAI-compatible chat-completions API
# base_url = "https://api.openai.com/v1"

# Request timeout in seconds
timeout_secs = 10

# Extra attempts after a network failure
max_retries = 0
"#;

        Self::write_private(&path, content)?;
        Ok(path)
    }

    fn write_private(path: &Path, content: &str) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, content)?;

        // Set secure permissions (0600)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        Ok(())
    }
}

/// Values passed to `gitter config`; `None` leaves the stored value alone.
#[derive(Debug, Default, Clone)]
pub struct SettingsUpdate {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.provider.is_none() && self.api_key.is_none() && self.model.is_none()
    }
}
