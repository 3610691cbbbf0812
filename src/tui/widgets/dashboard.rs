use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::PaceStatus;
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Stats + Top readers row
            Constraint::Min(0),    // Standings
        ])
        .split(area);

    let top_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    draw_stats(f, app, top_chunks[0]);
    draw_top_readers(f, app, top_chunks[1]);
    draw_standings(f, app, chunks[1]);
}

fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let text = match &app.overview {
        Some(overview) => vec![
            Line::from(vec![
                Span::styled("Reading: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    overview.book.title.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Week: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{} of {}", overview.current_week, overview.book.duration_weeks),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(vec![
                Span::styled("Participants: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{}", overview.stats.participant_count),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(vec![
                Span::styled("Avg Progress: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{}%", overview.stats.average_progress),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
            Line::from(vec![
                Span::styled("Quiet this week: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{}", overview.stats.not_reading_this_week),
                    Style::default().fg(if overview.stats.not_reading_this_week > 0 {
                        Color::Yellow
                    } else {
                        Color::White
                    }),
                ),
            ]),
        ],
        None => vec![Line::from(Span::styled(
            "No active book",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Club ")
        .title_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(text).block(block);
    f.render_widget(paragraph, area);
}

fn draw_top_readers(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = match &app.overview {
        Some(overview) => overview
            .stats
            .ranked
            .iter()
            .take(5)
            .enumerate()
            .map(|(i, entry)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("{:<20}", truncate(&entry.name, 18)),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        progress_bar(entry.summary.percentage),
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(
                        format!(" {}%", entry.summary.percentage),
                        Style::default().fg(Color::Yellow),
                    ),
                ]))
            })
            .collect(),
        None => Vec::new(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Top Readers ")
        .title_style(Style::default().fg(Color::Yellow));

    let list = List::new(items).block(block);
    f.render_widget(list, area);
}

fn draw_standings(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = match &app.overview {
        Some(overview) => overview
            .stats
            .ranked
            .iter()
            .map(|entry| {
                let (pace_text, pace_color) = match entry.pace {
                    PaceStatus::Ahead => ("Ahead", Color::Green),
                    PaceStatus::OnTrack => ("On Track", Color::Cyan),
                    PaceStatus::Behind => ("Behind", Color::Red),
                };

                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<22}", truncate(&entry.name, 20)),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        format!(
                            "{:<8}",
                            format!("{}/{}", entry.summary.read_count, entry.summary.total_count)
                        ),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(
                        format!("{:<10}", format!("this wk {}", entry.read_this_week)),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(pace_text, Style::default().fg(pace_color)),
                ]))
            })
            .collect(),
        None => Vec::new(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Standings ")
        .title_style(Style::default().fg(Color::Magenta));

    let list = List::new(items).block(block);
    f.render_widget(list, area);
}

fn progress_bar(percentage: u32) -> String {
    let filled = (percentage as usize / 10).min(10);
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
