use crate::app::movie::ViewState;
use crate::app::{App, CurrentScreen};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Returns the key hints for the current app state
fn get_instruction_text(app: &App) -> &'static str {
    if app.searching {
        return "(Enter) to search, (Esc) to cancel";
    }

    match app.current_screen {
        CurrentScreen::WatchedList => "(↑↓/jk) scroll, (Enter) show, (d) remove, (Esc) back, (q) quit",
        CurrentScreen::Result => match app.store.movie_data.view_state() {
            ViewState::Populated(_) => "(w) watched, (x) close, (/) search, (l) watched list, (q) quit",
            ViewState::Error => "(x) dismiss, (/) search, (l) watched list, (q) quit",
            ViewState::Loading => "Searching... (q) to quit",
            ViewState::Empty => "(/) search, (l) watched list, (q) quit",
        },
    }
}

/// Renders the footer with instructions at the bottom of the screen
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let bottom_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());

    let mut spans = vec![Span::raw(get_instruction_text(app))];
    if let Some(status) = &app.status {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(status.as_str(), Style::default().fg(Color::Red)));
    }

    let bottom = Paragraph::new(Line::from(spans)).block(bottom_block);

    frame.render_widget(bottom, area);
}
