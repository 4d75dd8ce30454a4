use log::{debug, info, warn};
use rouille::{Request, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    config::HttpConfig,
    domain::{
        criteria::{CriteriaError, SearchCriteria},
        track::TrackResult,
    },
    http::error::ApiError,
    render::{
        SearchOutcome,
        html::{self, FormValues},
    },
    spotify::{RESULT_LIMIT, TrackSearch},
};

pub struct HttpServer {
    search: Arc<dyn TrackSearch>,
    pub config: HttpConfig,
}

impl HttpServer {
    pub fn new(search: Arc<dyn TrackSearch>, config: HttpConfig) -> Self {
        Self { search, config }
    }

    pub fn run(self) {
        let addr = format!("{}:{}", self.config.bind_addr, self.config.port);
        rouille::start_server(addr, move |request| self.handle_request(request));
    }

    fn handle_request(&self, request: &Request) -> Response {
        Self::log_request(request);

        let response = rouille::router!(request,
            (GET) (/) => {
                Response::html(html::render_page(&FormValues::default(), ""))
            },
            (GET) (/search) => {
                self.handle_search_page(request)
            },
            (GET) (/api/search) => {
                self.handle_search_api(request)
            },
            _ => ApiError::NotFound(format!("no route for {}", request.url())).into_response()
        );

        info!("Response: {} {}", request.method(), response.status_code);
        response
    }

    fn log_request(request: &Request) {
        info!("{} {}", request.method(), request.url());
    }

    fn read_form(request: &Request) -> FormValues {
        let param = |name: &str| request.get_param(name).unwrap_or_default();
        FormValues {
            track: param("track"),
            artist: param("artist"),
            composer: param("composer"),
            year: param("year"),
        }
    }

    fn criteria_from(form: &FormValues) -> Result<SearchCriteria, CriteriaError> {
        SearchCriteria::from_fields(
            Some(form.track.clone()),
            Some(form.artist.clone()),
            Some(form.composer.clone()),
            Some(form.year.as_str()),
        )
    }

    /// one round trip to the search service; failures are logged here and
    /// nowhere else
    fn run_search(&self, criteria: &SearchCriteria) -> (String, SearchOutcome) {
        if criteria.is_empty() {
            debug!("No fields given, sending an empty query");
        }
        let query = criteria.to_query();
        debug!("Search query: {query:?}");

        let outcome = self
            .search
            .search_tracks(&query, RESULT_LIMIT)
            .inspect_err(|e| warn!("Search for {query:?} failed: {e}"));
        (query, outcome)
    }

    fn handle_search_page(&self, request: &Request) -> Response {
        let form = Self::read_form(request);

        let criteria = match Self::criteria_from(&form) {
            Ok(c) => c,
            Err(err) => {
                let reason = err.to_string();
                let status = ApiError::from(err).status_code();
                return Response::html(html::render_page(
                    &form,
                    &html::render_invalid_input(&reason),
                ))
                .with_status_code(status);
            }
        };

        let (_, outcome) = self.run_search(&criteria);
        Response::html(html::render_page(&form, &html::render_outcome(&outcome)))
    }

    fn search_api(&self, request: &Request) -> Result<Response, ApiError> {
        let criteria = Self::criteria_from(&Self::read_form(request))?;
        let (query, outcome) = self.run_search(&criteria);
        let tracks = outcome?;

        Ok(Response::json(&SearchResponse {
            query,
            tracks: tracks.iter().map(TrackResponse::from_domain).collect(),
        }))
    }

    fn handle_search_api(&self, request: &Request) -> Response {
        match self.search_api(request) {
            Ok(r) => r,
            Err(e) => e.into_response(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct SearchResponse {
    query: String,
    tracks: Vec<TrackResponse>,
}

#[derive(Serialize, Deserialize)]
struct TrackResponse {
    name: String,
    artists: Vec<String>,
    album: String,
    release_date: String,
    cover_url: Option<String>,
    preview_url: Option<String>,
    external_url: Option<String>,
}

impl TrackResponse {
    fn from_domain(track: &TrackResult) -> Self {
        Self {
            name: track.name.clone(),
            artists: track.artists.clone(),
            album: track.album.name.clone(),
            release_date: track.album.release_date.clone(),
            cover_url: track.album.cover.as_ref().map(|c| c.0.clone()),
            preview_url: track.preview_url.clone(),
            external_url: track.external_url.clone(),
        }
    }
}

#[cfg(test)]
pub fn parse_json_response<T: serde::de::DeserializeOwned>(
    response: rouille::Response,
) -> anyhow::Result<T> {
    Ok(serde_json::from_reader(
        response.data.into_reader_and_size().0,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::track::mock_track,
        render::{CREDENTIALS_HINT, NO_RESULTS, SEARCH_FAILED, html::escape},
        spotify::SearchError,
    };

    use rouille::Request;
    use std::{io::Read, sync::Mutex};

    const PANEL_MARKER: &str = "class=\"track\"";

    /// Records every query and answers with canned tracks or a failure.
    struct FakeSearch {
        tracks: Vec<TrackResult>,
        fail: bool,
        queries: Mutex<Vec<(String, u32)>>,
    }

    impl TrackSearch for FakeSearch {
        fn search_tracks(
            &self,
            query: &str,
            limit: u32,
        ) -> Result<Vec<TrackResult>, SearchError> {
            self.queries.lock().unwrap().push((query.to_string(), limit));
            if self.fail {
                Err(SearchError::Auth("invalid_client".to_string()))
            } else {
                Ok(self.tracks.clone())
            }
        }
    }

    fn fake(tracks: Vec<TrackResult>, fail: bool) -> Arc<FakeSearch> {
        Arc::new(FakeSearch {
            tracks,
            fail,
            queries: Mutex::new(Vec::new()),
        })
    }

    fn create_server(search: &Arc<FakeSearch>) -> HttpServer {
        HttpServer {
            search: Arc::clone(search) as Arc<dyn TrackSearch>,
            config: HttpConfig {
                bind_addr: "0.0.0.0".to_string(),
                port: 8501,
            },
        }
    }

    fn get(server: &HttpServer, url: &str) -> Response {
        let request = Request::fake_http("GET", url, vec![], vec![]);
        server.handle_request(&request)
    }

    pub fn parse_text_response(response: rouille::Response) -> String {
        let mut buf = String::new();
        let mut reader = response.data.into_reader_and_size().0;
        reader.read_to_string(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_index_serves_form() {
        let search = fake(vec![], false);

        let response = get(&create_server(&search), "/");

        assert_eq!(response.status_code, 200);
        let body = parse_text_response(response);
        assert!(body.contains("<form method=\"get\" action=\"/search\">"));
        assert!(search.queries.lock().unwrap().is_empty());
    }

    #[test]
    fn test_search_page_builds_query() {
        let search = fake(vec![mock_track("Yesterday", &["The Beatles"])], false);

        let response = get(
            &create_server(&search),
            "/search?track=Yesterday&artist=&composer=&year=1965",
        );

        assert_eq!(response.status_code, 200);
        assert_eq!(
            *search.queries.lock().unwrap(),
            vec![("track:Yesterday year:1965".to_string(), 10)]
        );

        let body = parse_text_response(response);
        assert_eq!(body.matches(PANEL_MARKER).count(), 1);
        assert!(body.contains("Artist: The Beatles"));
    }

    #[test]
    fn test_search_page_decodes_params() {
        let search = fake(vec![], false);

        get(
            &create_server(&search),
            "/search?track=Let%20It%20Be&composer=Lennon%2FMcCartney",
        );

        assert_eq!(
            search.queries.lock().unwrap()[0].0,
            "track:Let It Be composer:Lennon/McCartney"
        );
    }

    #[test]
    fn test_search_page_no_results() {
        let search = fake(vec![], false);

        let response = get(&create_server(&search), "/search?artist=Nobody");

        assert_eq!(response.status_code, 200);
        let body = parse_text_response(response);
        assert_eq!(body.matches(&escape(NO_RESULTS)).count(), 1);
        assert_eq!(body.matches(PANEL_MARKER).count(), 0);
    }

    #[test]
    fn test_search_page_failure_is_generic() {
        let search = fake(vec![mock_track("unused", &[])], true);

        let response = get(&create_server(&search), "/search?track=x");

        assert_eq!(response.status_code, 200);
        let body = parse_text_response(response);
        assert_eq!(body.matches(&escape(SEARCH_FAILED)).count(), 1);
        assert_eq!(body.matches(&escape(CREDENTIALS_HINT)).count(), 1);
        assert_eq!(body.matches(PANEL_MARKER).count(), 0);
        assert!(!body.contains("invalid_client"));
    }

    #[test]
    fn test_search_page_rejects_year_out_of_range() {
        let search = fake(vec![], false);

        let response = get(&create_server(&search), "/search?track=x&year=1850");

        assert_eq!(response.status_code, 400);
        let body = parse_text_response(response);
        assert!(body.contains("between 1900 and 2024"));
        assert!(body.contains("value=\"1850\""));
        assert!(search.queries.lock().unwrap().is_empty());
    }

    #[test]
    fn test_api_search_returns_json() -> anyhow::Result<()> {
        let mut track = mock_track("Yesterday", &["The Beatles"]);
        track.preview_url = Some("https://p.test/y.mp3".to_string());
        let search = fake(vec![track], false);

        let response = get(&create_server(&search), "/api/search?track=Yesterday");

        assert_eq!(response.status_code, 200);
        let body: SearchResponse = parse_json_response(response)?;
        assert_eq!(body.query, "track:Yesterday");
        assert_eq!(body.tracks.len(), 1);
        assert_eq!(body.tracks[0].artists, vec!["The Beatles".to_string()]);
        assert_eq!(body.tracks[0].preview_url.as_deref(), Some("https://p.test/y.mp3"));

        Ok(())
    }

    #[test]
    fn test_api_search_failure() {
        let search = fake(vec![], true);

        let response = get(&create_server(&search), "/api/search?track=x");

        assert_eq!(response.status_code, 502);
        assert_eq!(parse_text_response(response), SEARCH_FAILED);
    }

    #[test]
    fn test_api_search_bad_year() {
        let search = fake(vec![], false);

        let response = get(&create_server(&search), "/api/search?year=soon");

        assert_eq!(response.status_code, 400);
        assert!(parse_text_response(response).contains("soon"));
    }

    #[test]
    fn test_unknown_route() {
        let search = fake(vec![], false);

        let response = get(&create_server(&search), "/tracks/123");

        assert_eq!(response.status_code, 404);
    }
}
