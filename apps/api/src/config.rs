use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every key has a default; malformed values fail start-up with the offending key named.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory of the file-backed store (ignored when `redis_url` is set).
    pub store_dir: PathBuf,
    /// Name of the single slot the portfolio record lives in.
    pub store_key: String,
    pub redis_url: Option<String>,
    pub chat_delay: Duration,
    pub contact_delay: Duration,
    pub overlay_fade: Duration,
    pub notice_clear: Duration,
    pub speech_input: bool,
    pub speech_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            store_dir: PathBuf::from("./data"),
            store_key: "portfolio_builder_data".to_string(),
            redis_url: None,
            chat_delay: Duration::from_millis(800),
            contact_delay: Duration::from_millis(2000),
            overlay_fade: Duration::from_millis(500),
            notice_clear: Duration::from_millis(5000),
            speech_input: true,
            speech_output: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: env_or("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            store_dir: std::env::var("STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_dir),
            store_key: std::env::var("STORE_KEY").unwrap_or(defaults.store_key),
            redis_url: std::env::var("REDIS_URL").ok().filter(|v| !v.is_empty()),
            chat_delay: millis_or("CHAT_DELAY_MS", defaults.chat_delay)?,
            contact_delay: millis_or("CONTACT_DELAY_MS", defaults.contact_delay)?,
            overlay_fade: millis_or("OVERLAY_FADE_MS", defaults.overlay_fade)?,
            notice_clear: millis_or("NOTICE_CLEAR_MS", defaults.notice_clear)?,
            speech_input: env_or("SPEECH_INPUT", defaults.speech_input)?,
            speech_output: env_or("SPEECH_OUTPUT", defaults.speech_output)?,
        })
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn millis_or(key: &str, default: Duration) -> Result<Duration> {
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    env_or(key, default_ms).map(Duration::from_millis)
}
