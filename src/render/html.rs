use crate::{
    domain::{
        criteria::{MAX_YEAR, MIN_YEAR},
        track::TrackResult,
    },
    render::{CREDENTIALS_HINT, NO_PREVIEW, NO_RESULTS, SEARCH_FAILED, SearchOutcome},
};

const PAGE: &str = include_str!("../../html/page.html");
const TRACK_PANEL: &str = include_str!("../../html/track_panel.html");

/// Raw field values as the user typed them, echoed back into the form.
#[derive(Debug, Default, Clone)]
pub struct FormValues {
    pub track: String,
    pub artist: String,
    pub composer: String,
    pub year: String,
}

/// Escapes text for element content and double-quoted attributes.
///
/// Braces are escaped too so that user text never forms a template placeholder.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full page: the form, then whatever `outcome_html` holds.
pub fn render_page(form: &FormValues, outcome_html: &str) -> String {
    PAGE.replace("{{MIN_YEAR}}", &MIN_YEAR.to_string())
        .replace("{{MAX_YEAR}}", &MAX_YEAR.to_string())
        .replace("{{TRACK}}", &escape(&form.track))
        .replace("{{ARTIST}}", &escape(&form.artist))
        .replace("{{COMPOSER}}", &escape(&form.composer))
        .replace("{{YEAR}}", &escape(&form.year))
        .replace("{{OUTCOME}}", outcome_html)
}

pub fn render_outcome(outcome: &SearchOutcome) -> String {
    match outcome {
        Err(_) => format!(
            "    <p class=\"error\">{}</p>\n    <p class=\"info\">{}</p>\n",
            escape(SEARCH_FAILED),
            escape(CREDENTIALS_HINT)
        ),
        Ok(tracks) if tracks.is_empty() => {
            format!("    <p class=\"warning\">{}</p>\n", escape(NO_RESULTS))
        }
        Ok(tracks) => {
            let mut out = String::from("    <h2>Search Results</h2>\n");
            for track in tracks {
                out.push_str(&render_track(track));
            }
            out
        }
    }
}

/// Notice shown in place of results when the form input is rejected.
pub fn render_invalid_input(reason: &str) -> String {
    format!("    <p class=\"error\">{}</p>\n", escape(reason))
}

fn render_track(track: &TrackResult) -> String {
    let cover = match &track.album.cover {
        Some(cover) => format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape(&cover.0),
            escape(&track.album.name)
        ),
        None => String::new(),
    };

    let preview = match &track.preview_url {
        Some(url) => format!(
            "<audio controls preload=\"none\" src=\"{}\"></audio>",
            escape(url)
        ),
        None => format!("<p class=\"no-preview\">{}</p>", escape(NO_PREVIEW)),
    };

    let name = match &track.external_url {
        Some(url) => format!(
            "<a href=\"{}\">{}</a>",
            escape(url),
            escape(&track.name)
        ),
        None => escape(&track.name),
    };

    TRACK_PANEL
        .replace("{{COVER}}", &cover)
        .replace("{{NAME}}", &name)
        .replace("{{ARTISTS}}", &escape(&track.artist_line()))
        .replace("{{ALBUM}}", &escape(&track.album.name))
        .replace("{{RELEASE_DATE}}", &escape(&track.album.release_date))
        .replace("{{PREVIEW}}", &preview)
}
