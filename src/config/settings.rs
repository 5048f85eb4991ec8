use std::env;
use std::path::PathBuf;
use std::time::Duration;

use log::debug;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
const DEFAULT_STATE_DIR: &str = ".fantasy-console";
const DEFAULT_ADMIN_PASSWORD: &str = "change-me";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub user_agent: &'static str,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            user_agent: "FantasyConsole/1.0",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GateSettings {
    pub password: String,
    pub storage_key: &'static str,
    pub session_ttl: Duration,
    pub default_return: &'static str,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
            storage_key: "fantasy_admin_auth_v1",
            session_ttl: Duration::from_secs(12 * 60 * 60),
            default_return: "admin.html",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub state_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub gate: GateSettings,
    pub storage: StorageSettings,
}

impl AppConfig {
    /// Defaults, overridden by `FANTASY_*` environment variables when set.
    pub fn new() -> Self {
        let mut config = Self::default();

        if let Some(base) = read_var("FANTASY_API_BASE") {
            config.api.base_url = base;
        }
        if let Some(dir) = read_var("FANTASY_STATE_DIR") {
            config.storage.state_dir = PathBuf::from(dir);
        }
        if let Some(password) = read_var("FANTASY_ADMIN_PASSWORD") {
            config.gate.password = password;
        }

        config
    }

    pub fn with_api_base(mut self, base_url: Option<String>) -> Self {
        if let Some(base) = base_url {
            self.api.base_url = base;
        }
        self
    }

    pub fn with_state_dir(mut self, state_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = state_dir {
            self.storage.state_dir = dir;
        }
        self
    }
}

fn read_var(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => {
            debug!("{key} not set, using default");
            None
        }
    }
}
