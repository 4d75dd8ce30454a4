//! Wire format of the token and search endpoints.

use serde::Deserialize;

use crate::domain::track::{AlbumRef, ArtworkRef, TrackResult};

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub tracks: Paging<TrackObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Paging<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackObject {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
    pub album: AlbumObject,
    pub preview_url: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtistObject {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlbumObject {
    pub name: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub images: Vec<ImageObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageObject {
    pub url: String,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct ExternalUrls {
    pub spotify: Option<String>,
}

impl From<TrackObject> for TrackResult {
    fn from(track: TrackObject) -> Self {
        Self {
            name: track.name,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
            album: AlbumRef {
                name: track.album.name,
                release_date: track.album.release_date,
                // images come largest first
                cover: track
                    .album
                    .images
                    .into_iter()
                    .next()
                    .map(|img| ArtworkRef(img.url)),
            },
            preview_url: track.preview_url,
            external_url: track.external_urls.spotify,
        }
    }
}
