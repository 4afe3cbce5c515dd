use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::app::App;
use crate::app::movie::WatchedEntry;

fn entry_item(entry: &WatchedEntry) -> ListItem<'_> {
    let mut spans = vec![
        Span::styled(
            entry.title.as_str(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" ({})", entry.year), Style::default().fg(Color::Cyan)),
    ];
    if let Some(rating) = entry.ratings.first() {
        spans.push(Span::styled(
            format!("  {}", rating.value),
            Style::default().fg(Color::Yellow),
        ));
    }
    ListItem::new(Line::from(spans))
}

/// Renders the saved watched movies as a scrollable list.
pub fn render_watched_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let movies = &app.store.watched_movies;

    if movies.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "Nothing here yet - press (w) on a movie to mark it watched",
            Style::default().fg(Color::Gray),
        ))
        .block(Block::default().title("Watched (0)").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = movies.iter().map(entry_item).collect();
    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("Watched ({})", movies.len()))
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.watched_list_state);
}
