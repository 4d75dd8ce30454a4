//! Presentation of one search outcome.

use crate::{domain::track::TrackResult, spotify::SearchError};

pub mod html;
pub mod text;

pub const NO_RESULTS: &str = "No results found. Try different search criteria.";
pub const SEARCH_FAILED: &str = "An error occurred while searching. Please try again.";
pub const CREDENTIALS_HINT: &str =
    "Make sure SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET are set in the .env file or the environment.";
pub const NO_PREVIEW: &str = "No preview available";

/// What a single submission produced.
pub type SearchOutcome = Result<Vec<TrackResult>, SearchError>;
