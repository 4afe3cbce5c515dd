use crate::app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the title bar, with the search box while typing
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());

    let mut spans = vec![Span::styled(
        "FilmBuff",
        Style::default().fg(Color::Rgb(0x34, 0x98, 0xdb)).add_modifier(Modifier::BOLD),
    )];

    if app.searching {
        spans.push(Span::raw("  Search: "));
        spans.push(Span::styled(
            format!("{}█", app.search_term),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        spans.push(Span::styled(
            format!("  {} watched", app.store.watched_movies.len()),
            Style::default().fg(Color::Gray),
        ));
    }

    let title = Paragraph::new(Line::from(spans)).block(title_block);

    frame.render_widget(title, area);
}
