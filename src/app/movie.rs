use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rating {
    pub source: String,
    pub value: String,
}

/// The movie slot of the store, shaped like an OMDb response body.
///
/// Nothing here is mandatory: which fields are set decides what the
/// result card shows (see [`MovieData::view_state`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieData {
    pub error: Option<String>,
    #[serde(skip)]
    pub loading: bool,
    pub title: Option<String>,
    pub poster: Option<String>,
    pub year: Option<String>,
    pub plot: Option<String>,
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

/// A fetched movie with every displayed field filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    pub poster: String,
    pub title: String,
    pub year: String,
    pub plot: String,
    pub ratings: Vec<Rating>,
}

/// What the user saved with the "Watched" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WatchedEntry {
    pub poster: String,
    pub title: String,
    pub year: String,
    pub plot: String,
    pub ratings: Vec<Rating>,
}

/// Which branch of the result card is on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Error,
    Loading,
    Populated(MovieRecord),
    Empty,
}

fn is_set(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.is_empty())
}

impl MovieData {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Picks the branch to draw. First match wins: Error, Loading,
    /// Populated, Empty.
    pub fn view_state(&self) -> ViewState {
        if is_set(&self.error) {
            return ViewState::Error;
        }
        if self.loading {
            return ViewState::Loading;
        }
        if is_set(&self.title) {
            return ViewState::Populated(MovieRecord {
                poster: self.poster.clone().unwrap_or_default(),
                title: self.title.clone().unwrap_or_default(),
                year: self.year.clone().unwrap_or_default(),
                plot: self.plot.clone().unwrap_or_default(),
                ratings: self.ratings.clone(),
            });
        }
        ViewState::Empty
    }
}

impl From<WatchedEntry> for MovieData {
    fn from(entry: WatchedEntry) -> Self {
        Self {
            error: None,
            loading: false,
            title: Some(entry.title),
            poster: Some(entry.poster),
            year: Some(entry.year),
            plot: Some(entry.plot),
            ratings: entry.ratings,
        }
    }
}

impl From<&MovieRecord> for WatchedEntry {
    fn from(record: &MovieRecord) -> Self {
        Self {
            poster: record.poster.clone(),
            title: record.title.clone(),
            year: record.year.clone(),
            plot: record.plot.clone(),
            ratings: record.ratings.clone(),
        }
    }
}

/// Poster, title and year identify a movie. Plot and ratings are not compared.
fn movie_key<'a>(poster: &'a str, title: &'a str, year: &'a str) -> (&'a str, &'a str, &'a str) {
    (poster, title, year)
}

impl WatchedEntry {
    fn key(&self) -> (&str, &str, &str) {
        movie_key(&self.poster, &self.title, &self.year)
    }

    pub fn matches(&self, record: &MovieRecord) -> bool {
        self.key() == movie_key(&record.poster, &record.title, &record.year)
    }

    /// Whether two saved entries are the same movie.
    pub fn same_movie(&self, other: &WatchedEntry) -> bool {
        self.key() == other.key()
    }
}

pub fn is_watched(watched_movies: &[WatchedEntry], record: &MovieRecord) -> bool {
    watched_movies.iter().any(|entry| entry.matches(record))
}
