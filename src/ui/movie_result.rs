use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use ratatui_image::{Resize, StatefulImage, protocol::StatefulProtocol};
use throbber_widgets_tui::{BRAILLE_SIX, Throbber, ThrobberState};
use tui_big_text::{BigText, PixelSize};

use crate::app::App;
use crate::app::movie::{MovieRecord, Rating, ViewState, WatchedEntry, is_watched};
use crate::app::store::Intent;

const WATCHED_BLUE: Color = Color::Rgb(0x34, 0x98, 0xdb);
const CLOSE_RED: Color = Color::Rgb(0xc0, 0x39, 0x2b);

/// Renders the lookup result card for whatever the store holds.
pub fn render_movie_result(frame: &mut Frame, app: &mut App, area: Rect) {
    match app.store.movie_data.view_state() {
        ViewState::Error => render_no_results(frame, area),
        ViewState::Loading => render_loading(frame, area, &mut app.throbber_state),
        ViewState::Populated(record) => {
            let watched = is_watched(&app.store.watched_movies, &record);
            render_movie_card(frame, area, &record, watched, app.poster_protocol.as_mut());
        }
        ViewState::Empty => render_welcome(frame, area),
    }
}

/// Sends the shown movie to the watched list.
pub fn on_watched_click(record: &MovieRecord, dispatch: impl FnOnce(Intent)) {
    dispatch(Intent::AddToWatchedList(WatchedEntry::from(record)));
}

/// Clears the shown movie.
pub fn on_close_click(dispatch: impl FnOnce(Intent)) {
    dispatch(Intent::DeleteMovie);
}

/// One badge per rating, in the given order: value on top, source below.
pub fn rating_badges(ratings: &[Rating]) -> Vec<Text<'_>> {
    ratings
        .iter()
        .map(|rating| {
            Text::from(vec![
                Line::from(Span::styled(
                    rating.value.as_str(),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    rating.source.as_str(),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect()
}

pub fn watched_button_style(watched: bool) -> Style {
    let background = if watched { WATCHED_BLUE } else { Color::Gray };
    Style::default()
        .fg(Color::White)
        .bg(background)
        .add_modifier(Modifier::BOLD)
}

fn centered_message(frame: &mut Frame, area: Rect, heading: &str, detail: &str) {
    let text = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            heading.to_uppercase(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(detail.to_uppercase(), Style::default().fg(Color::Gray))),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_no_results(frame: &mut Frame, area: Rect) {
    centered_message(frame, area, "No results found", "please try again");
}

fn render_loading(frame: &mut Frame, area: Rect, throbber_state: &mut ThrobberState) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1), // "..."
            Constraint::Length(1),
            Constraint::Length(1), // throbber
            Constraint::Min(0),
        ])
        .split(inner);

    let dots = Paragraph::new(Line::from(Span::styled(
        "...",
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(dots, rows[1]);

    let label = "Fetching from OMDb";
    let width = (label.len() as u16 + 4).min(rows[3].width);
    let throbber_area = Rect {
        x: rows[3].x + rows[3].width.saturating_sub(width) / 2,
        width,
        ..rows[3]
    };
    let throbber = Throbber::default()
        .label(label)
        .style(Style::default().fg(Color::Cyan))
        .throbber_set(BRAILLE_SIX);
    frame.render_stateful_widget(throbber, throbber_area, throbber_state);
}

fn render_welcome(frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(4), // Big text
            Constraint::Min(3),
        ])
        .split(inner);

    let big_text = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(Style::default().fg(WATCHED_BLUE).add_modifier(Modifier::BOLD))
        .lines(vec!["FilmBuff".into()])
        .alignment(Alignment::Center)
        .build();
    frame.render_widget(big_text, rows[1]);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "WELCOME TO FILMBUFF",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "SEARCH FOR A MOVIE",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), rows[2]);
}

fn render_movie_card(
    frame: &mut Frame,
    area: Rect,
    record: &MovieRecord,
    watched: bool,
    poster: Option<&mut StatefulProtocol>,
) {
    let close = Line::from(Span::styled(
        " ✕ close (x) ",
        Style::default().fg(CLOSE_RED).add_modifier(Modifier::BOLD),
    ))
    .right_aligned();
    let card = Block::default().borders(Borders::ALL).title(close);

    let inner = card.inner(area);
    frame.render_widget(card, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(inner);

    render_poster(frame, columns[0], poster);

    let info = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Heading
            Constraint::Length(4), // Rating badges
            Constraint::Length(1), // "Plot"
            Constraint::Min(1),    // Plot text
            Constraint::Length(1), // Watched button
        ])
        .split(columns[1].inner(Margin::new(2, 1)));

    let heading = Paragraph::new(Line::from(Span::styled(
        format!("{} ({})", record.title, record.year),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .wrap(Wrap { trim: true });
    frame.render_widget(heading, info[0]);

    render_ratings(frame, info[1], &record.ratings);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Plot",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))),
        info[2],
    );
    frame.render_widget(
        Paragraph::new(record.plot.as_str()).wrap(Wrap { trim: true }),
        info[3],
    );

    let button = Paragraph::new(Line::from(Span::styled(
        " Watched (w) ",
        watched_button_style(watched),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(button, info[4]);
}

fn render_ratings(frame: &mut Frame, area: Rect, ratings: &[Rating]) {
    if ratings.is_empty() {
        let none = Paragraph::new(Span::styled("No ratings", Style::default().fg(Color::Gray)));
        frame.render_widget(none, area);
        return;
    }

    let count = ratings.len() as u32;
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area);

    for (badge, slot) in rating_badges(ratings).into_iter().zip(slots.iter()) {
        let paragraph = Paragraph::new(badge)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, *slot);
    }
}

fn render_poster(frame: &mut Frame, area: Rect, poster: Option<&mut StatefulProtocol>) {
    let block = Block::default().borders(Borders::ALL).title("Poster");

    match poster {
        Some(protocol) => {
            let image = StatefulImage::<StatefulProtocol>::default().resize(Resize::Fit(None));
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_stateful_widget(image, inner, protocol);
        }
        None => {
            let placeholder = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("No poster", Style::default().fg(Color::Gray))),
            ])
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(placeholder, area);
        }
    }
}
