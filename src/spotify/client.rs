use log::{debug, info};
use std::{
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

use crate::{
    config::{Credentials, SpotifyConfig},
    domain::track::TrackResult,
    spotify::{
        TrackSearch,
        error::SearchError,
        models::{SearchResponse, TokenResponse},
    },
};

const USER_AGENT: &str = concat!("trackfinder/", env!("CARGO_PKG_VERSION"));

/// Tokens this close to expiry are treated as expired.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Upper bound on the lifetime the accounts service may announce.
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + EXPIRY_MARGIN < self.expires_at
    }
}

/// Authenticated handle to the catalog service.
///
/// Built once per process and shared between requests. The access token is
/// requested on the first search and reused until it expires.
pub struct SpotifyClient {
    agent: ureq::Agent,
    config: SpotifyConfig,
    credentials: Credentials,
    token: Mutex<Option<AccessToken>>,
}

impl SpotifyClient {
    pub fn new(config: SpotifyConfig, credentials: Credentials) -> Self {
        let agent = ureq::AgentBuilder::new().user_agent(USER_AGENT).build();
        Self {
            agent,
            config,
            credentials,
            token: Mutex::new(None),
        }
    }

    fn token_url(&self) -> String {
        format!("{}/api/token", self.config.accounts_url.trim_end_matches('/'))
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.api_url.trim_end_matches('/'))
    }

    /// returns a usable access token, requesting a new one if needed
    fn access_token(&self) -> Result<String, SearchError> {
        // the cache only ever holds a replaceable token
        let mut cached = self.token.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let token = self.request_token()?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    fn request_token(&self) -> Result<AccessToken, SearchError> {
        info!("Requesting access token from {}", self.token_url());

        let response = self
            .agent
            .post(&self.token_url())
            .send_form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
            ])
            .map_err(|e| match SearchError::from(e) {
                SearchError::Status {
                    status: 400 | 401,
                    body,
                } => SearchError::Auth(body),
                other => other,
            })?;

        let token: TokenResponse = response.into_json()?;
        let lifetime = Duration::from_secs(token.expires_in).min(MAX_TOKEN_LIFETIME);
        Ok(AccessToken {
            value: token.access_token,
            expires_at: Instant::now() + lifetime,
        })
    }
}

impl TrackSearch for SpotifyClient {
    fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<TrackResult>, SearchError> {
        let token = self.access_token()?;
        debug!("GET {} q={:?} limit={}", self.search_url(), query, limit);

        let response: SearchResponse = self
            .agent
            .get(&self.search_url())
            .set("Authorization", &format!("Bearer {token}"))
            .query("q", query)
            .query("type", "track")
            .query("limit", &limit.to_string())
            .call()?
            .into_json()?;

        Ok(response
            .tracks
            .items
            .into_iter()
            .map(TrackResult::from)
            .collect())
    }
}
