//! Runtime configuration.
//!
//! Defaults are compiled in; a handful of `ZODIAC_*` environment variables
//! override them. Bad values are logged and ignored.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://cultural-zodiac.onrender.com/get-zodiac";
pub const DEFAULT_SHARE_URL: &str = "https://cultural-zodiac.netlify.app";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the Oracle lives and how the client talks to it.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub endpoint: Url,
    pub timeout: Duration,
    pub user_agent: String,
    /// Link appended to the share text.
    pub share_url: String,
    /// Directory exported card images are written into.
    pub export_dir: PathBuf,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("CulturalZodiac/", env!("CARGO_PKG_VERSION")).to_string(),
            share_url: DEFAULT_SHARE_URL.to_string(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl OracleConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("ZODIAC_ORACLE_URL") {
            match Url::parse(raw.trim()) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => config.endpoint = url,
                Ok(url) => log::warn!("ZODIAC_ORACLE_URL: unsupported scheme {}", url.scheme()),
                Err(e) => log::warn!("ZODIAC_ORACLE_URL: invalid URL {:?}: {}", raw, e),
            }
        }

        if let Some(raw) = lookup("ZODIAC_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => log::warn!("ZODIAC_TIMEOUT_SECS: expected a positive integer, got {:?}", raw),
            }
        }

        if let Some(raw) = lookup("ZODIAC_SHARE_URL") {
            if !raw.trim().is_empty() {
                config.share_url = raw.trim().to_string();
            }
        }

        if let Some(raw) = lookup("ZODIAC_EXPORT_DIR") {
            if !raw.trim().is_empty() {
                config.export_dir = PathBuf::from(raw.trim());
            }
        }

        log::debug!(
            "Oracle endpoint {} (timeout {:?})",
            config.endpoint,
            config.timeout
        );
        config
    }
}

fn default_endpoint() -> Url {
    match Url::parse(DEFAULT_ENDPOINT) {
        Ok(url) => url,
        Err(e) => unreachable!("built-in endpoint must parse: {}", e),
    }
}
