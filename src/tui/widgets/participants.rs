use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::models::PaceStatus;
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let title = if let Some(filter) = &app.filter_name {
        format!(" Participants (filter: {}) ", filter)
    } else {
        " Participants ".to_string()
    };

    let items: Vec<ListItem> = app
        .participants
        .items
        .iter()
        .map(|entry| {
            let (pace_text, pace_color) = match entry.pace {
                PaceStatus::Ahead => ("Ahead", Color::Green),
                PaceStatus::OnTrack => ("On Track", Color::Cyan),
                PaceStatus::Behind => ("Behind", Color::Red),
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<26}", truncate(&entry.name, 24)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    progress_bar(entry.summary.percentage),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(
                    format!(" {:<5}", format!("{}%", entry.summary.percentage)),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    format!("{:<10}", format!("this wk {}", entry.read_this_week)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(pace_text, Style::default().fg(pace_color)),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::default().fg(Color::Cyan));

    let header = Line::from(vec![
        Span::styled(
            format!("{:<26}", "Name"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:<16}", "Progress"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:<10}", "Week"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Pace",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(app.participants.selected);

    let header_area = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    f.render_widget(ratatui::widgets::Paragraph::new(header), header_area);

    let list_area = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: area.height.saturating_sub(1),
    };

    f.render_stateful_widget(list, list_area, &mut state);
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
