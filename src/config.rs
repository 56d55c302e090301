use crate::error::FetchError;
use std::path::Path;
use std::time::Duration;

pub const API_URL_VAR: &str = "DASHBOARD_API_URL";
pub const API_TOKEN_VAR: &str = "DASHBOARD_API_TOKEN";
pub const TIMEOUT_VAR: &str = "DASHBOARD_API_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Env files in precedence order. A variable set by an earlier file (or the
/// process) is never overridden by a later one.
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Load every `ENV_FILES` entry present in `dir`. Missing files are skipped.
pub fn load_env_files(dir: &Path) {
    for name in ENV_FILES {
        let path = dir.join(name);
        if !path.is_file() {
            continue;
        }
        match dotenvy::from_path(&path) {
            Ok(()) => log::debug!("Loaded {}", path.display()),
            Err(e) => log::warn!("Failed to load {}: {}", path.display(), e),
        }
    }
}

/// Connection settings for the upstream dashboard API.
#[derive(Clone)]
pub struct DashboardConfig {
    pub api_url: String,
    pub api_token: String,
    pub timeout: Duration,
}

// Never print the token.
impl std::fmt::Debug for DashboardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &format_args!("<{} chars>", self.api_token.len()))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl DashboardConfig {
    /// Load `.env.local` then `.env` from the working directory and read the
    /// settings from the environment.
    pub fn from_env() -> Result<Self, FetchError> {
        if let Ok(dir) = std::env::current_dir() {
            load_env_files(&dir);
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any key lookup. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FetchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_url = read(API_URL_VAR).ok_or(FetchError::MissingConfig(API_URL_VAR))?;
        let api_token = read(API_TOKEN_VAR).ok_or(FetchError::MissingConfig(API_TOKEN_VAR))?;

        let timeout_secs = match read(TIMEOUT_VAR) {
            Some(raw) => raw.parse::<u64>().map_err(|e| FetchError::InvalidConfig {
                name: TIMEOUT_VAR,
                reason: format!("{} ({})", raw, e),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url,
            api_token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
