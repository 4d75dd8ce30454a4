use crate::render::{CREDENTIALS_HINT, NO_PREVIEW, NO_RESULTS, SEARCH_FAILED, SearchOutcome};

/// Plain text rendering, used by the `search` command.
pub fn render_outcome(outcome: &SearchOutcome) -> String {
    let tracks = match outcome {
        Err(_) => return format!("{SEARCH_FAILED}\n{CREDENTIALS_HINT}\n"),
        Ok(tracks) if tracks.is_empty() => return format!("{NO_RESULTS}\n"),
        Ok(tracks) => tracks,
    };

    let mut out = String::from("Search Results\n");
    for (i, track) in tracks.iter().enumerate() {
        out.push_str(&format!("\n{}. {}\n", i + 1, track.name));
        out.push_str(&format!("   Artist: {}\n", track.artist_line()));
        out.push_str(&format!("   Album: {}\n", track.album.name));
        out.push_str(&format!("   Release Date: {}\n", track.album.release_date));
        out.push_str(&format!(
            "   Preview: {}\n",
            track.preview_url.as_deref().unwrap_or(NO_PREVIEW)
        ));
        if let Some(url) = &track.external_url {
            out.push_str(&format!("   Link: {url}\n"));
        }
    }
    out
}
