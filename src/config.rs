//! Client configuration loading: JSON file plus environment overrides.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::{info, warn};

use crate::{api::ApiConfig, auth::User, state::StoreSettings};

/// Default location on disk where the client looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/client.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "GAME_TRACKER_CONFIG_PATH";
/// Environment variable that overrides the backend base URL.
const API_URL_ENV: &str = "GAME_TRACKER_API_URL";
/// Environment variable carrying a pre-issued ID token.
const ID_TOKEN_ENV: &str = "GAME_TRACKER_ID_TOKEN";

#[derive(Debug, Clone, Default)]
/// Runtime configuration of the client.
pub struct ClientConfig {
    /// Backend location and timeouts.
    pub api: ApiConfig,
    /// Games store tunables.
    pub store: StoreSettings,
    /// ID token issued by the identity provider, if obtained out of band.
    pub id_token: Option<String>,
    /// Profile reported for the signed-in user.
    pub profile: User,
}

impl ClientConfig {
    /// Load the configuration from disk and apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::from_file(&resolve_config_path());
        config.apply_overrides(|key| env::var(key).ok());
        config
    }

    /// Read `path`, falling back to defaults when it is missing or invalid.
    pub fn from_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        api_url = %config.api.base_url,
                        "loaded client config"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Apply `GAME_TRACKER_*` overrides resolved through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = non_empty(API_URL_ENV) {
            self.api.base_url = url;
        }
        if let Some(token) = non_empty(ID_TOKEN_ENV) {
            self.id_token = Some(token);
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
    calendar_months: Option<u8>,
    min_search_chars: Option<usize>,
    id_token: Option<String>,
    user: Option<User>,
}

impl From<RawConfig> for ClientConfig {
    fn from(value: RawConfig) -> Self {
        let mut api = value.api_url.map(ApiConfig::new).unwrap_or_default();
        if let Some(secs) = value.request_timeout_secs {
            api = api.with_timeout(Duration::from_secs(secs));
        }

        let defaults = StoreSettings::default();
        let store = StoreSettings {
            calendar_months: value.calendar_months.unwrap_or(defaults.calendar_months),
            min_search_chars: value.min_search_chars.unwrap_or(defaults.min_search_chars),
        };

        Self {
            api,
            store,
            id_token: value.id_token,
            profile: value.user.unwrap_or_default(),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
