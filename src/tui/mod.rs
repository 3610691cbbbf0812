mod ui;
mod widgets;

use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::db::{BookOverview, ClubOverview, Database, ProgressReport};
use crate::models::{CheckIn, PaceStatus};
use crate::progress::{ParticipantProgress, ProgressSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Books,
    Participants,
    ParticipantDetail,
}

impl View {
    fn next(&self) -> Self {
        match self {
            View::Dashboard => View::Books,
            View::Books => View::Participants,
            View::Participants => View::Dashboard,
            View::ParticipantDetail => View::Participants,
        }
    }

    fn prev(&self) -> Self {
        match self {
            View::Dashboard => View::Participants,
            View::Books => View::Dashboard,
            View::Participants => View::Books,
            View::ParticipantDetail => View::Participants,
        }
    }
}

pub struct StatefulList<T> {
    pub items: Vec<T>,
    pub selected: Option<usize>,
}

impl<T> StatefulList<T> {
    fn with_items(items: Vec<T>) -> Self {
        let selected = if items.is_empty() { None } else { Some(0) };
        Self { items, selected }
    }

    fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i >= self.items.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i == 0 {
                    self.items.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    fn selected_item(&self) -> Option<&T> {
        self.selected.and_then(|i| self.items.get(i))
    }
}

pub struct App {
    db: Database,
    pub view: View,
    pub overview: Option<ClubOverview>,
    pub books: StatefulList<BookOverview>,
    pub participants: StatefulList<ParticipantProgress>,
    pub selected_participant: Option<ParticipantProgress>,
    pub selected_report: Option<ProgressReport>,
    pub selected_checkins: Vec<CheckIn>,
    pub filter_name: Option<String>,
    pub filter_input: String,
    pub filter_mode: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(db: Database) -> Result<Self, Box<dyn std::error::Error>> {
        let mut app = Self {
            db,
            view: View::Dashboard,
            overview: None,
            books: StatefulList::with_items(Vec::new()),
            participants: StatefulList::with_items(Vec::new()),
            selected_participant: None,
            selected_report: None,
            selected_checkins: Vec::new(),
            filter_name: None,
            filter_input: String::new(),
            filter_mode: false,
            should_quit: false,
        };
        app.refresh_data()?;
        Ok(app)
    }

    pub fn refresh_data(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let today = Local::now().date_naive();
        self.overview = self.db.club_stats(today)?;
        self.books = StatefulList::with_items(self.db.list_books()?);
        self.participants = StatefulList::with_items(self.participant_rows()?);
        Ok(())
    }

    // Standings when a book is active, a bare roster otherwise
    fn participant_rows(&self) -> Result<Vec<ParticipantProgress>, Box<dyn std::error::Error>> {
        let mut rows = match &self.overview {
            Some(overview) => overview.stats.ranked.clone(),
            None => self
                .db
                .list_participants()?
                .into_iter()
                .map(|p| ParticipantProgress {
                    participant_id: p.id,
                    name: p.name,
                    summary: ProgressSummary {
                        read_count: 0,
                        total_count: 0,
                        percentage: 0,
                    },
                    read_this_week: 0,
                    pace: PaceStatus::OnTrack,
                })
                .collect(),
        };

        if let Some(filter) = &self.filter_name {
            let needle = filter.to_lowercase();
            rows.retain(|r| r.name.to_lowercase().contains(&needle));
        }
        Ok(rows)
    }

    fn apply_filter(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if self.filter_input.is_empty() {
            self.filter_name = None;
        } else {
            self.filter_name = Some(self.filter_input.clone());
        }
        self.participants = StatefulList::with_items(self.participant_rows()?);
        Ok(())
    }

    fn select_participant(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(row) = self.participants.selected_item() {
            let today = Local::now().date_naive();
            let report = self.db.progress_report(row.participant_id, today)?;
            self.selected_checkins = match &report {
                Some(r) => self.db.checkins_for(row.participant_id, r.book.id)?,
                None => Vec::new(),
            };
            self.selected_participant = Some(row.clone());
            self.selected_report = report;
            self.view = View::ParticipantDetail;
        }
        Ok(())
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> Result<(), Box<dyn std::error::Error>> {
        // Filter mode captures raw input until Enter/Esc
        if self.filter_mode {
            match key {
                KeyCode::Esc => {
                    self.filter_mode = false;
                    self.filter_input.clear();
                }
                KeyCode::Enter => {
                    self.filter_mode = false;
                    self.apply_filter()?;
                }
                KeyCode::Backspace => {
                    self.filter_input.pop();
                }
                KeyCode::Char(c) => {
                    self.filter_input.push(c);
                }
                _ => {}
            }
            return Ok(());
        }

        match key {
            KeyCode::Char('q') => self.should_quit = true,

            KeyCode::Char('r') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.refresh_data()?;
            }

            KeyCode::Char('/') if self.view == View::Participants => {
                self.filter_mode = true;
                self.filter_input.clear();
            }

            KeyCode::Esc => match self.view {
                View::ParticipantDetail => {
                    self.view = View::Participants;
                    self.selected_participant = None;
                    self.selected_report = None;
                }
                View::Participants if self.filter_name.is_some() => {
                    self.filter_name = None;
                    self.filter_input.clear();
                    self.apply_filter()?;
                }
                _ => {}
            },

            KeyCode::Char('h') | KeyCode::Left => match self.view {
                View::ParticipantDetail => {
                    self.view = View::Participants;
                    self.selected_participant = None;
                    self.selected_report = None;
                }
                _ => self.view = self.view.prev(),
            },
            KeyCode::Char('l') | KeyCode::Right => match self.view {
                View::Participants => self.select_participant()?,
                _ => self.view = self.view.next(),
            },

            KeyCode::Tab => {
                if modifiers.contains(KeyModifiers::SHIFT) {
                    self.view = self.view.prev();
                } else {
                    self.view = self.view.next();
                }
            }
            KeyCode::BackTab => {
                self.view = self.view.prev();
            }

            KeyCode::Char('j') | KeyCode::Down => match self.view {
                View::Books => self.books.next(),
                View::Participants => self.participants.next(),
                _ => {}
            },
            KeyCode::Char('k') | KeyCode::Up => match self.view {
                View::Books => self.books.previous(),
                View::Participants => self.participants.previous(),
                _ => {}
            },

            KeyCode::Char('g') => match self.view {
                View::Books if !self.books.items.is_empty() => {
                    self.books.selected = Some(0);
                }
                View::Participants if !self.participants.items.is_empty() => {
                    self.participants.selected = Some(0);
                }
                _ => {}
            },
            KeyCode::Char('G') => match self.view {
                View::Books if !self.books.items.is_empty() => {
                    self.books.selected = Some(self.books.items.len() - 1);
                }
                View::Participants if !self.participants.items.is_empty() => {
                    self.participants.selected = Some(self.participants.items.len() - 1);
                }
                _ => {}
            },

            KeyCode::Enter => {
                if self.view == View::Participants {
                    self.select_participant()?;
                }
            }

            _ => {}
        }
        Ok(())
    }
}

pub fn run(db: Database) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(db)?;

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

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key.code, key.modifiers)?;
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
