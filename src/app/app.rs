use std::sync::mpsc;

use ratatui::widgets::ListState;
use ratatui_image::{picker::Picker, protocol::StatefulProtocol};
use throbber_widgets_tui::ThrobberState;
use tracing::{info, warn};

use crate::app::movie::{MovieRecord, ViewState};
use crate::app::omd::{self, FetchMessage};
use crate::app::store::{Intent, Store};
use crate::app::watched::{self, WatchedListError};
use crate::cli::Config;
use crate::ui::movie_result::{on_close_click, on_watched_click};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentScreen {
    Result,
    WatchedList,
}

pub struct App {
    pub config: Config,
    pub store: Store,
    pub current_screen: CurrentScreen,
    pub searching: bool,
    pub search_term: String,
    /// One-line message for the footer (missing key, save failures).
    pub status: Option<String>,
    pub receiver: Option<mpsc::Receiver<FetchMessage>>,
    pub picker: Option<Picker>,
    pub poster_protocol: Option<StatefulProtocol>,
    pub throbber_state: ThrobberState,
    pub watched_list_state: ListState,
}

impl App {
    /// Builds the app and loads the watched list from
    /// `config.watched_path`. A file that does not parse is moved to
    /// `<path>.bak` and the app starts with an empty list; any load
    /// problem is left in the footer status.
    pub fn new(config: Config, picker: Option<Picker>) -> Self {
        let mut status = None;
        let watched_movies = match watched::load(&config.watched_path) {
            Ok(movies) => movies,
            Err(e @ WatchedListError::Parse { .. }) => {
                warn!(error = %e, "could not parse watched list");
                status = Some(match watched::back_up(&config.watched_path) {
                    Ok(backup) => format!("{e} (kept as {})", backup.display()),
                    Err(backup_error) => format!("{e} (backup failed: {backup_error})"),
                });
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "could not load watched list");
                status = Some(e.to_string());
                Vec::new()
            }
        };

        let picker = picker.filter(|_| config.posters);

        Self {
            config,
            store: Store::new(watched_movies),
            current_screen: CurrentScreen::Result,
            searching: false,
            search_term: String::new(),
            status,
            receiver: None,
            picker,
            poster_protocol: None,
            throbber_state: ThrobberState::default(),
            watched_list_state: ListState::default(),
        }
    }

    /// Routes an intent to the store and persists the watched list when
    /// the intent touched it.
    pub fn dispatch(&mut self, intent: Intent) {
        let persist = intent.changes_watched_list();
        self.store.dispatch(intent);

        if persist {
            if let Err(e) = watched::save(&self.config.watched_path, &self.store.watched_movies) {
                warn!(error = %e, "could not save watched list");
                self.status = Some(e.to_string());
            }
        }
    }

    /// Starts a lookup for `title` on a background thread.
    pub fn search(&mut self, title: &str) {
        let title = title.trim();
        if title.is_empty() {
            return;
        }

        let Some(api_key) = self.config.api_key.clone() else {
            self.status = Some("Set OMDB_API_KEY (or pass --api-key) to search".to_string());
            return;
        };

        info!(title, "search");
        self.status = None;
        self.poster_protocol = None;
        self.current_screen = CurrentScreen::Result;
        self.dispatch(Intent::MovieRequested);
        self.receiver = Some(omd::spawn_lookup(
            self.config.api_url.clone(),
            api_key,
            title.to_string(),
            self.picker.is_some(),
        ));
    }

    pub fn submit_search(&mut self) {
        let term = std::mem::take(&mut self.search_term);
        self.searching = false;
        self.search(&term);
    }

    /// Drains messages from the lookup thread, if one is running.
    pub fn poll_fetch(&mut self) {
        let Some(receiver) = &self.receiver else {
            return;
        };

        let mut intents = Vec::new();
        let mut finished = false;
        loop {
            match receiver.try_recv() {
                Ok(FetchMessage::Movie(movie_data)) => intents.push(Intent::MovieReceived(movie_data)),
                Ok(FetchMessage::Failed(error)) => intents.push(Intent::MovieFailed(error)),
                Ok(FetchMessage::Poster(image)) => {
                    if let Some(picker) = &self.picker {
                        self.poster_protocol = Some(picker.new_resize_protocol(image));
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    finished = true;
                    break;
                }
            }
        }

        for intent in intents {
            self.dispatch(intent);
        }
        if finished {
            self.receiver = None;
        }
    }

    pub fn tick(&mut self) {
        if self.store.movie_data.loading {
            self.throbber_state.calc_next();
        }
    }

    fn current_record(&self) -> Option<MovieRecord> {
        match self.store.movie_data.view_state() {
            ViewState::Populated(record) => Some(record),
            _ => None,
        }
    }

    /// The "Watched" button. Only live while a movie is shown.
    pub fn watched_click(&mut self) {
        if let Some(record) = self.current_record() {
            on_watched_click(&record, |intent| self.dispatch(intent));
        }
    }

    /// The close control. Also dismisses the error message.
    pub fn close_click(&mut self) {
        match self.store.movie_data.view_state() {
            ViewState::Populated(_) | ViewState::Error => {
                self.receiver = None;
                self.poster_protocol = None;
                on_close_click(|intent| self.dispatch(intent));
            }
            ViewState::Loading | ViewState::Empty => {}
        }
    }

    pub fn open_watched_list(&mut self) {
        self.current_screen = CurrentScreen::WatchedList;
        let selected = (!self.store.watched_movies.is_empty()).then_some(0);
        self.watched_list_state.select(selected);
    }

    pub fn close_watched_list(&mut self) {
        self.current_screen = CurrentScreen::Result;
    }

    pub fn next_watched(&mut self) {
        let count = self.store.watched_movies.len();
        if count == 0 {
            return;
        }
        let index = self.watched_list_state.selected().map_or(0, |i| (i + 1) % count);
        self.watched_list_state.select(Some(index));
    }

    pub fn previous_watched(&mut self) {
        let count = self.store.watched_movies.len();
        if count == 0 {
            return;
        }
        let index = match self.watched_list_state.selected() {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        };
        self.watched_list_state.select(Some(index));
    }

    /// Puts the selected watched entry back on the result card.
    pub fn show_selected_watched(&mut self) {
        let Some(entry) = self
            .watched_list_state
            .selected()
            .and_then(|i| self.store.watched_movies.get(i))
            .cloned()
        else {
            return;
        };

        self.receiver = None;
        self.poster_protocol = None;
        self.dispatch(Intent::MovieReceived(entry.into()));
        self.current_screen = CurrentScreen::Result;
    }

    pub fn remove_selected_watched(&mut self) {
        let Some(index) = self.watched_list_state.selected() else {
            return;
        };
        self.dispatch(Intent::RemoveFromWatchedList(index));

        let count = self.store.watched_movies.len();
        let selected = (count > 0).then(|| index.min(count - 1));
        self.watched_list_state.select(selected);
    }
}
