//! Client for the catalog search service.

use crate::domain::track::TrackResult;

pub mod client;
pub mod error;
mod models;

pub use client::SpotifyClient;
pub use error::SearchError;

/// Number of tracks requested per search.
pub const RESULT_LIMIT: u32 = 10;

/// Anything that can answer a track query.
pub trait TrackSearch: Send + Sync {
    /// Returns at most `limit` tracks, in the order the service ranks them.
    fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<TrackResult>, SearchError>;
}
