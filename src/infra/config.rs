use std::{net::SocketAddr, path::PathBuf, str::FromStr};

use axum::http::HeaderValue;
use env_helpers::get_env_default;
use url::Url;

/// Where the waitlist keys live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Redis,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "redis" => Ok(StorageBackend::Redis),
            other => Err(format!("unknown storage backend: {other}")),
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::Redis => write!(f, "redis"),
        }
    }
}

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Landing page origin; referral links point here with `?ref=`.
    pub app_origin: Url,
    pub cors_origin: HeaderValue,
    pub storage_backend: StorageBackend,
    pub redis_url: String,
    /// Prepended to both storage keys.
    pub key_prefix: String,
    /// Optional JSON log file next to the console output.
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3001)));
        let app_origin: Url =
            get_env_default("APP_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .expect("APP_ORIGIN must be a valid URL");
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");
        let storage_backend: StorageBackend =
            get_env_default("STORAGE_BACKEND", StorageBackend::Memory);
        let redis_url: String = get_env_default("REDIS_URL", "redis://127.0.0.1:6379".to_string());
        let key_prefix: String = get_env_default("WAITLIST_KEY_PREFIX", String::new());
        let log_file: Option<PathBuf> = std::env::var("LOG_FILE")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            bind_addr,
            app_origin,
            cors_origin,
            storage_backend,
            redis_url,
            key_prefix,
            log_file,
        }
    }
}
