/// One catalog entry returned by a track search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackResult {
    pub name: String,
    pub artists: Vec<String>,
    pub album: AlbumRef,
    pub preview_url: Option<String>,
    pub external_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumRef {
    pub name: String,
    pub release_date: String,
    pub cover: Option<ArtworkRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkRef(pub String);

impl TrackResult {
    /// Artist names joined for display, in the order the service returned them.
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }
}

#[cfg(test)]
pub fn mock_track(name: &str, artists: &[&str]) -> TrackResult {
    TrackResult {
        name: name.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
        album: AlbumRef {
            name: format!("{name} (album)"),
            release_date: "1965-08-06".to_string(),
            cover: Some(ArtworkRef(format!("https://img.test/{name}.jpg"))),
        },
        preview_url: None,
        external_url: None,
    }
}
