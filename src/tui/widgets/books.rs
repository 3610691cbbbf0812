use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .books
        .items
        .iter()
        .map(|overview| {
            let b = &overview.book;
            let marker = if b.is_active { "* " } else { "  " };
            let author = b.author.as_deref().unwrap_or("-");

            ListItem::new(Line::from(vec![
                Span::styled(
                    marker,
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{:<30}", truncate(&b.title, 28)),
                    Style::default().fg(if b.is_active {
                        Color::Green
                    } else {
                        Color::White
                    }),
                ),
                Span::styled(
                    format!("{:<22}", truncate(author, 20)),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("{:<6}", overview.chapter_count),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    format!("{:<6}", b.duration_weeks),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(b.start_date.to_string(), Style::default().fg(Color::White)),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Books ")
        .title_style(Style::default().fg(Color::Cyan));

    let header = Line::from(vec![
        Span::styled(
            format!("  {:<30}", "Title"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:<22}", "Author"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:<6}", "Ch"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:<6}", "Wks"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Start",
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
    state.select(app.books.selected);

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

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
