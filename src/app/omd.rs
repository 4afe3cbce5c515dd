use std::sync::mpsc;
use std::thread;

use image::DynamicImage;
use thiserror::Error;
use tracing::{info, warn};

use crate::app::movie::MovieData;

pub const DEFAULT_API_URL: &str = "http://www.omdbapi.com/";

#[derive(Debug, Error)]
pub enum OmdbError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API request failed with status: {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to decode poster: {0}")]
    Image(#[from] image::ImageError),
}

/// Messages sent from a lookup thread back to the event loop.
#[derive(Debug)]
pub enum FetchMessage {
    Movie(MovieData),
    Failed(String),
    Poster(DynamicImage),
}

/// Builds the OMDb title lookup URL.
pub fn lookup_url(api_url: &str, api_key: &str, movie_title: &str) -> String {
    format!(
        "{}?apikey={}&t={}",
        api_url,
        urlencoding::encode(api_key),
        urlencoding::encode(movie_title)
    )
}

/// Fetches a movie by title from the OMDb API.
///
/// A "not found" answer is still `Ok`: OMDb reports it in the body's
/// `Error` field, which the result card shows as its error branch.
pub fn fetch_movie(api_url: &str, api_key: &str, movie_title: &str) -> Result<MovieData, OmdbError> {
    let response = reqwest::blocking::get(lookup_url(api_url, api_key, movie_title))?;

    if !response.status().is_success() {
        return Err(OmdbError::Status(response.status()));
    }

    Ok(response.json()?)
}

/// OMDb puts `"N/A"` in `Poster` when it has no image.
pub fn has_poster_url(poster: &str) -> bool {
    poster.starts_with("http://") || poster.starts_with("https://")
}

/// Downloads and decodes a movie poster.
pub fn download_poster(poster_url: &str) -> Result<DynamicImage, OmdbError> {
    let response = reqwest::blocking::get(poster_url)?;

    if !response.status().is_success() {
        return Err(OmdbError::Status(response.status()));
    }

    let bytes = response.bytes()?;
    Ok(image::load_from_memory(&bytes)?)
}

/// Runs a lookup on a background thread.
///
/// The movie (or failure) is sent first. When `want_poster` is set and
/// the movie has a poster URL, the decoded image follows. Dropping the
/// receiver abandons the lookup; later sends are ignored.
pub fn spawn_lookup(
    api_url: String,
    api_key: String,
    movie_title: String,
    want_poster: bool,
) -> mpsc::Receiver<FetchMessage> {
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        info!(title = %movie_title, "looking up movie");
        let movie_data = match fetch_movie(&api_url, &api_key, &movie_title) {
            Ok(movie_data) => movie_data,
            Err(e) => {
                warn!(title = %movie_title, error = %e, "lookup failed");
                let _ = sender.send(FetchMessage::Failed(e.to_string()));
                return;
            }
        };

        let poster = movie_data
            .poster
            .clone()
            .filter(|poster| want_poster && movie_data.error.is_none() && has_poster_url(poster));

        if sender.send(FetchMessage::Movie(movie_data)).is_err() {
            return;
        }

        if let Some(poster_url) = poster {
            match download_poster(&poster_url) {
                Ok(image) => {
                    let _ = sender.send(FetchMessage::Poster(image));
                }
                Err(e) => warn!(url = %poster_url, error = %e, "poster download failed"),
            }
        }
    });

    receiver
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::movie::ViewState;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serves one canned HTTP response on a local port and returns the
    /// base URL to request.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        });

        format!("http://{}/", addr)
    }

    #[test]
    fn lookup_url_encodes_title() {
        let url = lookup_url(DEFAULT_API_URL, "abc123", "The Good, the Bad & the Ugly");
        assert_eq!(
            url,
            "http://www.omdbapi.com/?apikey=abc123&t=The%20Good%2C%20the%20Bad%20%26%20the%20Ugly"
        );
    }

    #[test]
    fn not_found_body_decodes_to_error_branch() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let data: MovieData = serde_json::from_str(body).unwrap();
        assert_eq!(data.error.as_deref(), Some("Movie not found!"));
        assert_eq!(data.view_state(), ViewState::Error);
    }

    #[test]
    fn found_body_decodes_to_populated_branch() {
        let body = r#"{
            "Title": "Spirited Away",
            "Year": "2001",
            "Rated": "PG",
            "Plot": "During her family's move to the suburbs...",
            "Poster": "https://m.media-amazon.com/images/M/spirited.jpg",
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "8.6/10"},
                {"Source": "Rotten Tomatoes", "Value": "96%"},
                {"Source": "Metacritic", "Value": "96/100"}
            ],
            "imdbID": "tt0245429",
            "Response": "True"
        }"#;
        let data: MovieData = serde_json::from_str(body).unwrap();
        let ViewState::Populated(record) = data.view_state() else {
            panic!("expected populated");
        };
        assert_eq!(record.year, "2001");
        let values: Vec<_> = record.ratings.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, ["8.6/10", "96%", "96/100"]);
    }

    #[test]
    fn non_success_status_is_an_error() {
        let api_url = serve_once("401 Unauthorized", r#"{"Response":"False","Error":"Invalid API key!"}"#);

        let err = fetch_movie(&api_url, "bad-key", "Heat").unwrap_err();

        assert!(matches!(err, OmdbError::Status(status) if status.as_u16() == 401));
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn not_found_answer_is_ok_with_error_set() {
        let api_url = serve_once("200 OK", r#"{"Response":"False","Error":"Movie not found!"}"#);

        let data = fetch_movie(&api_url, "key", "Qwertyuiop").unwrap();

        assert_eq!(data.error.as_deref(), Some("Movie not found!"));
        assert_eq!(data.view_state(), ViewState::Error);
    }

    #[test]
    fn found_answer_is_populated() {
        let api_url = serve_once(
            "200 OK",
            r#"{"Title":"Heat","Year":"1995","Poster":"N/A","Plot":"A heist.","Ratings":[],"Response":"True"}"#,
        );

        let data = fetch_movie(&api_url, "key", "Heat").unwrap();

        assert!(matches!(data.view_state(), ViewState::Populated(ref r) if r.title == "Heat"));
    }

    #[test]
    fn poster_url_check() {
        assert!(has_poster_url("https://m.media-amazon.com/images/x.jpg"));
        assert!(has_poster_url("http://example.com/x.jpg"));
        assert!(!has_poster_url("N/A"));
        assert!(!has_poster_url(""));
    }
}
