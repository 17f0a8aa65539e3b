use std::{env, fmt, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration, immutable once a transport is built from it.
#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    /// Scheme + host of the Bot API server (no trailing `/bot<token>`).
    pub api_url: String,
    /// Forward proxy URL (`http://` or `https://`).
    pub proxy: Option<String>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            proxy: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Load from the environment, reading `.env` first (existing vars win).
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let bot_token = env_str("TELEGRAM_BOT_TOKEN")
            .and_then(non_empty)
            .ok_or_else(|| {
                Error::Config("TELEGRAM_BOT_TOKEN environment variable is required".to_string())
            })?;

        let api_url = env_str("TELEGRAM_API_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let proxy = env_str("TELEGRAM_PROXY").and_then(non_empty);
        let request_timeout = env_u64("TELEGRAM_REQUEST_TIMEOUT_MS")
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let cfg = Self {
            bot_token,
            api_url,
            proxy,
            request_timeout,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            return Err(Error::Config("bot token is empty".to_string()));
        }
        if self.bot_token.contains('/') {
            return Err(Error::Config("bot token must not contain '/'".to_string()));
        }
        if self.request_timeout.is_zero() {
            return Err(Error::Config("request timeout must be non-zero".to_string()));
        }
        url::Url::parse(&self.api_url)?;
        Ok(())
    }

    /// Base address every relative method path is joined onto.
    pub fn base_address(&self) -> Result<url::Url> {
        let base = format!("{}/bot{}/", self.api_url.trim_end_matches('/'), self.bot_token);
        Ok(url::Url::parse(&base)?)
    }
}

// Keeps the token out of logs and panic messages.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("proxy", &self.proxy)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
