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
            Constraint::Length(7), // Summary
            Constraint::Min(6),    // Weekly grid
            Constraint::Length(8), // Check-ins
        ])
        .split(area);

    draw_summary(f, app, chunks[0]);
    draw_weeks(f, app, chunks[1]);
    draw_checkins(f, app, chunks[2]);
}

fn draw_summary(f: &mut Frame, app: &App, area: Rect) {
    let name = app
        .selected_participant
        .as_ref()
        .map(|p| p.name.clone())
        .unwrap_or_default();

    let text = match &app.selected_report {
        Some(report) => {
            let (pace_text, pace_color) = match report.pace {
                PaceStatus::Ahead => ("Ahead", Color::Green),
                PaceStatus::OnTrack => ("On Track", Color::Cyan),
                PaceStatus::Behind => ("Behind", Color::Red),
            };

            vec![
                Line::from(vec![
                    Span::styled("Book: ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        report.book.title.clone(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(vec![
                    Span::styled("Week: ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        format!("{} of {}", report.current_week, report.book.duration_weeks),
                        Style::default().fg(Color::White),
                    ),
                ]),
                Line::from(vec![
                    Span::styled("Read: ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        format!(
                            "{}/{} ({}%)",
                            report.summary.read_count,
                            report.summary.total_count,
                            report.summary.percentage
                        ),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled("   Expected: ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        format!("{}", report.expected_chapters),
                        Style::default().fg(Color::White),
                    ),
                ]),
                Line::from(vec![
                    Span::styled("Pace: ", Style::default().fg(Color::Gray)),
                    Span::styled(pace_text, Style::default().fg(pace_color)),
                ]),
            ]
        }
        None => vec![Line::from(Span::styled(
            "No active book",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", name))
        .title_style(Style::default().fg(Color::Cyan));

    f.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_weeks(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = match &app.selected_report {
        Some(report) => (1..=report.book.duration_weeks)
            .map(|week| {
                let checks: Vec<&crate::db::ChapterCheck> = report
                    .chapters
                    .iter()
                    .filter(|c| c.week_number == week)
                    .collect();
                let read = checks.iter().filter(|c| c.is_read).count();
                let marks: String = checks
                    .iter()
                    .map(|c| if c.is_read { '█' } else { '░' })
                    .collect();

                let week_style = if week == report.current_week {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(format!("Week {:<3}", week), week_style),
                    Span::styled(marks, Style::default().fg(Color::Green)),
                    Span::styled(
                        format!(" {}/{}", read, checks.len()),
                        Style::default().fg(Color::Gray),
                    ),
                    if week == report.current_week {
                        Span::styled("  <- now", Style::default().fg(Color::Yellow))
                    } else {
                        Span::raw("")
                    },
                ]))
            })
            .collect(),
        None => Vec::new(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Weekly Plan ")
        .title_style(Style::default().fg(Color::Green));

    f.render_widget(List::new(items).block(block), area);
}

fn draw_checkins(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .selected_checkins
        .iter()
        .map(|checkin| {
            let reflection = checkin.reflection.as_deref().unwrap_or("-");
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("Week {:<3}", checkin.week_number),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(truncate(reflection, 70), Style::default().fg(Color::White)),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Check-ins ")
        .title_style(Style::default().fg(Color::Magenta));

    f.render_widget(List::new(items).block(block), area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
