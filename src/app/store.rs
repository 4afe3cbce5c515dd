//! Application state container.
//!
//! The store owns the two slices the result card reads (`movie_data`
//! and `watched_movies`). Everything that changes them goes through
//! [`Store::dispatch`] with an [`Intent`].

use tracing::debug;

use crate::app::movie::{MovieData, WatchedEntry};

/// A request to change the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// A lookup has started.
    MovieRequested,
    /// A lookup finished. The body may still carry an OMDb `Error`.
    MovieReceived(MovieData),
    /// A lookup could not complete (network, HTTP status, bad body).
    MovieFailed(String),
    AddToWatchedList(WatchedEntry),
    RemoveFromWatchedList(usize),
    /// Clear the current movie.
    DeleteMovie,
}

impl Intent {
    pub fn changes_watched_list(&self) -> bool {
        matches!(
            self,
            Intent::AddToWatchedList(_) | Intent::RemoveFromWatchedList(_)
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    pub movie_data: MovieData,
    pub watched_movies: Vec<WatchedEntry>,
}

impl Store {
    pub fn new(watched_movies: Vec<WatchedEntry>) -> Self {
        Self {
            movie_data: MovieData::default(),
            watched_movies,
        }
    }

    pub fn dispatch(&mut self, intent: Intent) {
        debug!(?intent, "dispatch");
        match intent {
            Intent::MovieRequested => self.movie_data = MovieData::loading(),
            Intent::MovieReceived(data) => self.movie_data = data,
            Intent::MovieFailed(message) => self.movie_data = MovieData::failed(message),
            Intent::AddToWatchedList(entry) => {
                if !self.watched_movies.iter().any(|saved| saved.same_movie(&entry)) {
                    self.watched_movies.push(entry);
                }
            }
            Intent::RemoveFromWatchedList(index) => {
                if index < self.watched_movies.len() {
                    self.watched_movies.remove(index);
                }
            }
            Intent::DeleteMovie => self.movie_data = MovieData::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::movie::ViewState;

    fn entry(title: &str) -> WatchedEntry {
        WatchedEntry {
            poster: format!("https://img.example/{title}.jpg"),
            title: title.to_string(),
            year: "2001".into(),
            plot: String::new(),
            ratings: Vec::new(),
        }
    }

    #[test]
    fn request_then_receive() {
        let mut store = Store::default();
        store.dispatch(Intent::MovieRequested);
        assert_eq!(store.movie_data.view_state(), ViewState::Loading);

        store.dispatch(Intent::MovieReceived(MovieData {
            title: Some("Memento".into()),
            ..MovieData::default()
        }));
        assert!(matches!(
            store.movie_data.view_state(),
            ViewState::Populated(_)
        ));
    }

    #[test]
    fn failure_shows_error() {
        let mut store = Store::default();
        store.dispatch(Intent::MovieRequested);
        store.dispatch(Intent::MovieFailed("timed out".into()));
        assert_eq!(store.movie_data.view_state(), ViewState::Error);
        assert_eq!(store.movie_data.error.as_deref(), Some("timed out"));
    }

    #[test]
    fn delete_clears_movie_but_keeps_watched_list() {
        let mut store = Store::new(vec![entry("Amelie")]);
        store.dispatch(Intent::MovieReceived(MovieData::from(entry("Amelie"))));
        store.dispatch(Intent::DeleteMovie);
        assert_eq!(store.movie_data, MovieData::default());
        assert_eq!(store.watched_movies.len(), 1);
    }

    #[test]
    fn add_appends_in_order_and_skips_same_movie() {
        let mut store = Store::default();
        store.dispatch(Intent::AddToWatchedList(entry("Amelie")));
        store.dispatch(Intent::AddToWatchedList(entry("Brazil")));

        let mut again = entry("Amelie");
        again.plot = "different plot".into();
        store.dispatch(Intent::AddToWatchedList(again));

        let titles: Vec<_> = store.watched_movies.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Amelie", "Brazil"]);
    }

    #[test]
    fn remove_out_of_range_is_a_noop() {
        let mut store = Store::new(vec![entry("Amelie"), entry("Brazil")]);
        store.dispatch(Intent::RemoveFromWatchedList(5));
        assert_eq!(store.watched_movies.len(), 2);
        store.dispatch(Intent::RemoveFromWatchedList(0));
        assert_eq!(store.watched_movies, vec![entry("Brazil")]);
    }

    #[test]
    fn only_list_intents_change_watched_list() {
        assert!(Intent::AddToWatchedList(entry("Amelie")).changes_watched_list());
        assert!(Intent::RemoveFromWatchedList(0).changes_watched_list());
        assert!(!Intent::DeleteMovie.changes_watched_list());
        assert!(!Intent::MovieRequested.changes_watched_list());
    }
}
