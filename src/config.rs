use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

pub const CLIENT_ID_VAR: &str = "SPOTIFY_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "SPOTIFY_CLIENT_SECRET";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: u32,
    pub http: HttpConfig,
    #[serde(default)]
    pub spotify: SpotifyConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.to_string_lossy()))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub bind_addr: String,
    pub port: u16,
}

/// Endpoints of the catalog service.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SpotifyConfig {
    pub accounts_url: String,
    pub api_url: String,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            accounts_url: "https://accounts.spotify.com".to_string(),
            api_url: "https://api.spotify.com/v1".to_string(),
        }
    }
}

/// Client credentials, read once at startup.
///
/// Missing variables are kept as empty strings: the service rejects them on
/// the first search, which is where the failure is reported.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    /// Reads the process environment after merging in a `.env` file from the
    /// working directory, if one exists. Variables already set win.
    pub fn load() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {e}");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name).unwrap_or_else(|| {
                log::warn!("{name} is not set");
                String::new()
            })
        };
        Self {
            client_id: read(CLIENT_ID_VAR),
            client_secret: read(CLIENT_SECRET_VAR),
        }
    }
}
