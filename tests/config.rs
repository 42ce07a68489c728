// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::time::Duration;

use gitter::config::{Config, SettingsUpdate};
use gitter::error::Error;
use secrecy::ExposeSecret;

const ENV_VARS: [&str; 7] = [
    "GITTER_PROVIDER",
    "GITTER_API_KEY",
    "GITTER_MODEL",
    "GITTER_BASE_URL",
    "GITTER_TIMEOUT_SECS",
    "GITTER_MAX_RETRIES",
    "OPENAI_API_KEY",
];

/// Run `f` with every variable the loader reads unset
fn with_clean_env<R>(f: impl FnOnce() -> R) -> R {
    let vars: Vec<(&str, Option<&str>)> = ENV_VARS.iter().map(|v| (*v, None)).collect();
    temp_env::with_vars(vars, f)
}

// ─── Default values ──────────────────────────────────────────────────────────

#[test]
fn default_config_values() {
    let config = Config::default();
    assert!(config.provider.is_none());
    assert!(config.api_key.is_none());
    assert!(config.model.is_none());
    assert!(config.base_url.is_none());
    assert_eq!(config.timeout_secs, 10);
    assert_eq!(config.max_retries, 0);
}

// ─── TOML deserialization ────────────────────────────────────────────────────

#[test]
fn load_from_valid_toml() {
    let toml_str = r#"
provider = "openai"
api_key = "sk-test"
model = "gpt-4o"
base_url = "http://localhost:8080/v1"
timeout_secs = 5
max_retries = 2
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.provider.as_deref(), Some("openai"));
    assert_eq!(config.api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.model.as_deref(), Some("gpt-4o"));
    assert_eq!(config.timeout_secs, 5);
    assert_eq!(config.max_retries, 2);
    assert!(config.validate().is_ok());
}

#[test]
fn empty_toml_uses_all_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert!(config.provider.is_none());
    assert_eq!(config.timeout_secs, Config::default().timeout_secs);
}

#[test]
fn invalid_toml_returns_error() {
    let result: std::result::Result<Config, _> = toml::from_str("provider = [invalid");
    assert!(result.is_err(), "invalid TOML should return an error");
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[test]
fn rejects_out_of_range_timeout() {
    let config = Config {
        timeout_secs: 0,
        ..Config::default()
    };
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn rejects_too_many_retries() {
    let config = Config {
        max_retries: 9,
        ..Config::default()
    };
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn rejects_non_http_base_url() {
    for url in ["ftp://example.com", "not a url"] {
        let config = Config {
            base_url: Some(url.into()),
            ..Config::default()
        };
        assert!(
            matches!(config.validate(), Err(Error::Config(_))),
            "expected {url} to be rejected"
        );
    }
}

// ─── Layered loading ─────────────────────────────────────────────────────────

#[test]
fn user_config_overrides_project_config() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join(".gitter.toml");
    let user = dir.path().join("config.toml");
    std::fs::write(&project, "provider = \"gemini\"\ntimeout_secs = 20\n").unwrap();
    std::fs::write(&user, "provider = \"openai\"\napi_key = \"sk-user\"\n").unwrap();

    let config = with_clean_env(|| Config::load_from(Some(&project), Some(&user))).unwrap();
    assert_eq!(config.provider.as_deref(), Some("openai"));
    assert_eq!(config.api_key.as_deref(), Some("sk-user"));
    assert_eq!(config.timeout_secs, 20);
}

#[test]
fn missing_files_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let config = with_clean_env(|| Config::load_from(Some(&missing), None)).unwrap();
    assert!(config.provider.is_none());
}

#[test]
fn env_overrides_files() {
    let dir = tempfile::tempdir().unwrap();
    let user = dir.path().join("config.toml");
    std::fs::write(&user, "provider = \"openai\"\napi_key = \"sk-file\"\n").unwrap();

    let config = with_clean_env(|| {
        temp_env::with_vars(
            [("GITTER_API_KEY", Some("sk-env")), ("GITTER_TIMEOUT_SECS", Some("3"))],
            || Config::load_from(None, Some(&user)),
        )
    })
    .unwrap();
    assert_eq!(config.api_key.as_deref(), Some("sk-env"));
    assert_eq!(config.timeout_secs, 3);
}

#[test]
fn provider_key_env_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let user = dir.path().join("config.toml");
    std::fs::write(&user, "provider = \"OpenAI\"\n").unwrap();

    let config = with_clean_env(|| {
        temp_env::with_var("OPENAI_API_KEY", Some("sk-fallback"), || {
            Config::load_from(None, Some(&user))
        })
    })
    .unwrap();
    assert_eq!(config.api_key.as_deref(), Some("sk-fallback"));
}

#[test]
fn blank_provider_means_local_only() {
    let dir = tempfile::tempdir().unwrap();
    let user = dir.path().join("config.toml");
    std::fs::write(&user, "provider = \"  \"\n").unwrap();

    let config = with_clean_env(|| Config::load_from(None, Some(&user))).unwrap();
    assert!(config.provider.is_none());
    assert_eq!(config.provider_config().provider, "");
}

#[test]
fn invalid_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let user = dir.path().join("config.toml");
    std::fs::write(&user, "timeout_secs = \"soon\"\n").unwrap();

    let result = with_clean_env(|| Config::load_from(None, Some(&user)));
    assert!(matches!(result, Err(Error::Config(_))));
}

// ─── Provider config ─────────────────────────────────────────────────────────

#[test]
fn provider_config_carries_settings() {
    let config = Config {
        provider: Some("gemini".into()),
        api_key: Some("g-key".into()),
        model: Some("gemini-1.5-pro".into()),
        timeout_secs: 7,
        max_retries: 1,
        ..Config::default()
    };

    let pc = config.provider_config();
    assert_eq!(pc.provider, "gemini");
    assert_eq!(pc.api_key.as_ref().map(|k| k.expose_secret()), Some("g-key"));
    assert_eq!(pc.model.as_deref(), Some("gemini-1.5-pro"));
    assert_eq!(pc.timeout, Duration::from_secs(7));
    assert_eq!(pc.max_retries, 1);
}

#[test]
fn provider_config_debug_hides_key() {
    let config = Config {
        provider: Some("openai".into()),
        api_key: Some("sk-very-secret".into()),
        ..Config::default()
    };
    let debug = format!("{:?}", config.provider_config());
    assert!(!debug.contains("sk-very-secret"));
}

// ─── Saving ──────────────────────────────────────────────────────────────────

#[test]
fn save_settings_merges_into_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gitter").join("config.toml");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "timeout_secs = 30\n").unwrap();

    let update = SettingsUpdate {
        provider: Some("Gemini".into()),
        model: Some("gemini-2.0-flash".into()),
        ..SettingsUpdate::default()
    };
    Config::save_settings_to(&path, &update).unwrap();

    let saved: Config = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved.provider.as_deref(), Some("gemini"));
    assert_eq!(saved.model.as_deref(), Some("gemini-2.0-flash"));
    assert_eq!(saved.timeout_secs, 30);
}

#[test]
fn save_key_without_provider_goes_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let update = SettingsUpdate {
        api_key: Some("sk-file-only".into()),
        ..SettingsUpdate::default()
    };
    Config::save_settings_to(&path, &update).unwrap();

    let saved: Config = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved.api_key.as_deref(), Some("sk-file-only"));
}

#[cfg(unix)]
#[test]
fn saved_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let update = SettingsUpdate {
        model: Some("gpt-4o".into()),
        ..SettingsUpdate::default()
    };
    Config::save_settings_to(&path, &update).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn settings_update_is_empty() {
    assert!(SettingsUpdate::default().is_empty());
    assert!(
        !SettingsUpdate {
            model: Some("m".into()),
            ..SettingsUpdate::default()
        }
        .is_empty()
    );
}
