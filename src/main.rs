mod app;
use app::App;

mod cli;
mod logging;
mod ui;

use std::error::Error;
use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::prelude::{Backend, CrosstermBackend};
use ratatui_image::picker::Picker;
use tracing::{info, warn};

use crate::app::CurrentScreen;

fn main() -> Result<(), Box<dyn Error>> {
    let config = cli::Cli::parse().into_config();
    logging::init_tracing();
    info!(watched = %config.watched_path.display(), "starting");

    // setup terminal
    enable_raw_mode()?;
    let mut stderr = io::stderr(); // This is a special case. Normally using stdout is fine
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    // Must run after entering the alternate screen and before reading events
    let picker = if config.posters {
        Picker::from_query_stdio()
            .inspect_err(|e| warn!(error = ?e, "no image support, posters disabled"))
            .ok()
    } else {
        None
    };

    let initial_title = config.initial_title.clone();
    let mut app = App::new(config, picker);
    if let Some(title) = initial_title {
        app.search(&title);
    }
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>>
where
    B::Error: 'static,
{
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        // Check for messages from the lookup thread
        app.poll_fetch();
        app.tick();

        // Poll for events with a timeout to allow UI updates
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == event::KeyEventKind::Release {
            continue;
        }

        if app.searching {
            match key.code {
                KeyCode::Char(c) => app.search_term.push(c),
                KeyCode::Backspace => {
                    app.search_term.pop();
                }
                KeyCode::Enter => app.submit_search(),
                KeyCode::Esc => {
                    app.searching = false;
                    app.search_term.clear();
                }
                _ => {}
            }
            continue;
        }

        match app.current_screen {
            CurrentScreen::Result => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('/') | KeyCode::Char('s') => {
                    app.searching = true;
                    app.status = None;
                }
                KeyCode::Char('w') => app.watched_click(),
                KeyCode::Char('x') | KeyCode::Esc => app.close_click(),
                KeyCode::Char('l') => app.open_watched_list(),
                _ => {}
            },
            CurrentScreen::WatchedList => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_watched(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_watched(),
                KeyCode::Enter => app.show_selected_watched(),
                KeyCode::Char('d') => app.remove_selected_watched(),
                KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('l') => app.close_watched_list(),
                _ => {}
            },
        }
    }
}
