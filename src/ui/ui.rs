use crate::app::{App, CurrentScreen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use super::footer::render_footer;
use super::header::render_header;
use super::movie_result::render_movie_result;
use super::watched_list::render_watched_list;

/// Main UI rendering function that orchestrates all UI components
pub fn ui(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    match app.current_screen {
        CurrentScreen::Result => render_movie_result(frame, app, chunks[1]),
        CurrentScreen::WatchedList => render_watched_list(frame, app, chunks[1]),
    }

    render_footer(frame, app, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::store::Intent;
    use crate::cli::Config;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    fn screen_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| ui(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn header_search_box_and_footer_status() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            api_key: None,
            api_url: crate::app::omd::DEFAULT_API_URL.to_string(),
            watched_path: dir.path().join("watched.json"),
            posters: false,
            initial_title: None,
        };
        let mut app = App::new(config, None);

        app.searching = true;
        app.search_term = "Heat".into();
        let content = screen_text(&mut app);
        assert!(content.contains("Search: Heat"));
        assert!(content.contains("(Enter) to search"));

        app.submit_search();
        app.dispatch(Intent::MovieFailed("Movie not found!".into()));
        let content = screen_text(&mut app);
        assert!(content.contains("0 watched"));
        assert!(content.contains("NO RESULTS FOUND"));
        assert!(content.contains("(x) dismiss"));
        assert!(content.contains("OMDB_API_KEY"));
    }
}
