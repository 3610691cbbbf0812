use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Result};
use serde::Serialize;

use crate::models::{
    Book, Chapter, CheckIn, Notification, NotificationKind, PaceStatus, Participant,
};
use crate::plan::{self, WeekAssignment};
use crate::progress::{
    self, ActivityRecord, BookHistoryEntry, CohortStats, ParticipantProgress, ProgressSummary,
};

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    pub fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                author TEXT,
                total_chapters INTEGER NOT NULL CHECK(total_chapters > 0),
                duration_weeks INTEGER NOT NULL CHECK(duration_weeks > 0),
                start_date TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS chapters (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                book_id INTEGER NOT NULL,
                chapter_number INTEGER NOT NULL,
                week_number INTEGER NOT NULL,
                UNIQUE (book_id, chapter_number),
                FOREIGN KEY (book_id) REFERENCES books(id) ON DELETE CASCADE
            );

            CREATE TABLE IF NOT EXISTS participants (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT UNIQUE,
                joined_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            -- One row per (participant, chapter); toggling overwrites in place
            CREATE TABLE IF NOT EXISTS completions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                participant_id INTEGER NOT NULL,
                chapter_id INTEGER NOT NULL,
                is_read INTEGER NOT NULL DEFAULT 0,
                read_at TEXT,
                updated_at TEXT NOT NULL DEFAULT (datetime('now')),
                UNIQUE (participant_id, chapter_id),
                FOREIGN KEY (participant_id) REFERENCES participants(id) ON DELETE CASCADE,
                FOREIGN KEY (chapter_id) REFERENCES chapters(id) ON DELETE CASCADE
            );

            CREATE TABLE IF NOT EXISTS checkins (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                participant_id INTEGER NOT NULL,
                book_id INTEGER NOT NULL,
                week_number INTEGER NOT NULL,
                reflection TEXT,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                UNIQUE (participant_id, book_id, week_number),
                FOREIGN KEY (participant_id) REFERENCES participants(id) ON DELETE CASCADE,
                FOREIGN KEY (book_id) REFERENCES books(id) ON DELETE CASCADE
            );

            CREATE TABLE IF NOT EXISTS notifications (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                participant_id INTEGER NOT NULL,
                kind TEXT NOT NULL CHECK(kind IN ('book', 'inactivity')),
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                read INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                FOREIGN KEY (participant_id) REFERENCES participants(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_chapters_book ON chapters(book_id);
            CREATE INDEX IF NOT EXISTS idx_completions_participant ON completions(participant_id);
            CREATE INDEX IF NOT EXISTS idx_completions_chapter ON completions(chapter_id);
            CREATE INDEX IF NOT EXISTS idx_checkins_participant_book ON checkins(participant_id, book_id);
            CREATE INDEX IF NOT EXISTS idx_notifications_participant ON notifications(participant_id, read);
            "#,
        )?;

        Ok(())
    }

    // Book operations

    /// Store a book together with the planner's chapter-to-week assignment.
    /// The assignment is computed by the caller so invalid plans never reach
    /// the store; everything lands in one transaction.
    pub fn add_book(
        &self,
        title: &str,
        author: Option<&str>,
        total_chapters: u32,
        duration_weeks: u32,
        start_date: NaiveDate,
        assignment: &[WeekAssignment],
    ) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            r#"
            INSERT INTO books (title, author, total_chapters, duration_weeks, start_date, is_active, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)
            "#,
            params![
                title,
                author,
                total_chapters,
                duration_weeks,
                start_date.format("%Y-%m-%d").to_string(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        let book_id = tx.last_insert_rowid();

        for a in assignment {
            tx.execute(
                "INSERT INTO chapters (book_id, chapter_number, week_number) VALUES (?1, ?2, ?3)",
                params![book_id, a.chapter_number, a.week_number],
            )?;
        }

        tx.commit()?;
        log::debug!("added book {} with {} chapters", book_id, assignment.len());
        Ok(book_id)
    }

    pub fn get_book(&self, id: i64) -> Result<Option<Book>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, title, author, total_chapters, duration_weeks, start_date, is_active, created_at
            FROM books WHERE id = ?1
            "#,
        )?;

        let book = stmt.query_row(params![id], row_to_book);

        match book {
            Ok(b) => Ok(Some(b)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn active_book(&self) -> Result<Option<Book>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, title, author, total_chapters, duration_weeks, start_date, is_active, created_at
            FROM books WHERE is_active = 1 LIMIT 1
            "#,
        )?;

        let book = stmt.query_row([], row_to_book);

        match book {
            Ok(b) => Ok(Some(b)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn list_books(&self) -> Result<Vec<BookOverview>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT b.id, b.title, b.author, b.total_chapters, b.duration_weeks,
                   b.start_date, b.is_active, b.created_at,
                   (SELECT COUNT(*) FROM chapters c WHERE c.book_id = b.id)
            FROM books b
            ORDER BY b.created_at DESC
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(BookOverview {
                book: row_to_book(row)?,
                chapter_count: row.get(8)?,
            })
        })?;

        rows.collect()
    }

    /// Activate one book and retire the rest; the club reads one book at a
    /// time.
    pub fn set_active_book(&self, id: i64) -> Result<bool> {
        self.conn.execute(
            "UPDATE books SET is_active = 0 WHERE id != ?1 AND is_active = 1",
            params![id],
        )?;
        let rows = self.conn.execute(
            "UPDATE books SET is_active = 1 WHERE id = ?1",
            params![id],
        )?;
        Ok(rows > 0)
    }

    pub fn delete_book(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    pub fn chapters_for_book(&self, book_id: i64) -> Result<Vec<Chapter>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, book_id, chapter_number, week_number
            FROM chapters WHERE book_id = ?1
            ORDER BY chapter_number
            "#,
        )?;

        let rows = stmt.query_map(params![book_id], |row| {
            Ok(Chapter {
                id: row.get(0)?,
                book_id: row.get(1)?,
                chapter_number: row.get(2)?,
                week_number: row.get(3)?,
            })
        })?;

        rows.collect()
    }

    pub fn chapter_by_number(&self, book_id: i64, chapter_number: u32) -> Result<Option<Chapter>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, book_id, chapter_number, week_number
            FROM chapters WHERE book_id = ?1 AND chapter_number = ?2
            "#,
        )?;

        let chapter = stmt.query_row(params![book_id, chapter_number], |row| {
            Ok(Chapter {
                id: row.get(0)?,
                book_id: row.get(1)?,
                chapter_number: row.get(2)?,
                week_number: row.get(3)?,
            })
        });

        match chapter {
            Ok(c) => Ok(Some(c)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    // Participant operations

    pub fn add_participant(&self, name: &str, email: Option<&str>) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO participants (name, email, joined_at) VALUES (?1, ?2, ?3)",
            params![name, email, Utc::now().to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_participant(&self, id: i64) -> Result<Option<Participant>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, email, joined_at FROM participants WHERE id = ?1")?;

        let participant = stmt.query_row(params![id], |row| {
            Ok(Participant {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                joined_at: row.get(3)?,
            })
        });

        match participant {
            Ok(p) => Ok(Some(p)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn list_participants(&self) -> Result<Vec<Participant>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, email, joined_at FROM participants ORDER BY name")?;

        let rows = stmt.query_map([], |row| {
            Ok(Participant {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                joined_at: row.get(3)?,
            })
        })?;

        rows.collect()
    }

    pub fn delete_participant(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM participants WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Completion operations

    /// Toggle a chapter's read mark. Keeps at most one row per
    /// (participant, chapter); the latest write wins and read_at tracks
    /// is_read exactly.
    pub fn set_chapter_read(
        &self,
        participant_id: i64,
        chapter_id: i64,
        is_read: bool,
    ) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let read_at = if is_read { Some(now.clone()) } else { None };

        let existing: Result<i64> = self.conn.query_row(
            "SELECT id FROM completions WHERE participant_id = ?1 AND chapter_id = ?2",
            params![participant_id, chapter_id],
            |row| row.get(0),
        );

        match existing {
            Ok(id) => {
                self.conn.execute(
                    "UPDATE completions SET is_read = ?1, read_at = ?2, updated_at = ?3 WHERE id = ?4",
                    params![is_read, read_at, now, id],
                )?;
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                self.conn.execute(
                    r#"
                    INSERT INTO completions (participant_id, chapter_id, is_read, read_at, updated_at)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                    params![participant_id, chapter_id, is_read, read_at, now],
                )?;
            }
            Err(e) => return Err(e),
        }

        log::debug!(
            "participant {} marked chapter {} read={}",
            participant_id,
            chapter_id,
            is_read
        );
        Ok(())
    }

    /// Chapter ids of one book the participant has marked read.
    pub fn read_chapter_ids(&self, participant_id: i64, book_id: i64) -> Result<HashSet<i64>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT c.chapter_id
            FROM completions c
            JOIN chapters ch ON c.chapter_id = ch.id
            WHERE c.participant_id = ?1 AND ch.book_id = ?2 AND c.is_read = 1
            "#,
        )?;

        let rows = stmt.query_map(params![participant_id, book_id], |row| row.get(0))?;
        rows.collect()
    }

    fn read_timestamps(&self, participant_id: i64, book_id: i64) -> Result<Vec<DateTime<Utc>>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT c.read_at
            FROM completions c
            JOIN chapters ch ON c.chapter_id = ch.id
            WHERE c.participant_id = ?1 AND ch.book_id = ?2 AND c.is_read = 1 AND c.read_at IS NOT NULL
            "#,
        )?;

        let rows = stmt.query_map(params![participant_id, book_id], |row| {
            row.get::<_, String>(0)
        })?;

        let mut timestamps = Vec::new();
        for raw in rows {
            if let Some(ts) = parse_timestamp(&raw?) {
                timestamps.push(ts);
            }
        }
        Ok(timestamps)
    }

    // Check-in operations

    /// Upsert the weekly check-in for (participant, book, week).
    pub fn save_checkin(
        &self,
        participant_id: i64,
        book_id: i64,
        week_number: u32,
        reflection: Option<&str>,
    ) -> Result<i64> {
        let existing: Result<i64> = self.conn.query_row(
            "SELECT id FROM checkins WHERE participant_id = ?1 AND book_id = ?2 AND week_number = ?3",
            params![participant_id, book_id, week_number],
            |row| row.get(0),
        );

        match existing {
            Ok(id) => {
                self.conn.execute(
                    "UPDATE checkins SET reflection = ?1 WHERE id = ?2",
                    params![reflection, id],
                )?;
                Ok(id)
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                self.conn.execute(
                    r#"
                    INSERT INTO checkins (participant_id, book_id, week_number, reflection, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                    params![
                        participant_id,
                        book_id,
                        week_number,
                        reflection,
                        Utc::now().to_rfc3339()
                    ],
                )?;
                Ok(self.conn.last_insert_rowid())
            }
            Err(e) => Err(e),
        }
    }

    pub fn checkins_for(&self, participant_id: i64, book_id: i64) -> Result<Vec<CheckIn>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, participant_id, book_id, week_number, reflection, created_at
            FROM checkins
            WHERE participant_id = ?1 AND book_id = ?2
            ORDER BY week_number
            "#,
        )?;

        let rows = stmt.query_map(params![participant_id, book_id], |row| {
            Ok(CheckIn {
                id: row.get(0)?,
                participant_id: row.get(1)?,
                book_id: row.get(2)?,
                week_number: row.get(3)?,
                reflection: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;

        rows.collect()
    }

    // Notification operations

    pub fn add_notification(
        &self,
        participant_id: i64,
        kind: NotificationKind,
        title: &str,
        body: &str,
    ) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO notifications (participant_id, kind, title, body, read, created_at)
            VALUES (?1, ?2, ?3, ?4, 0, ?5)
            "#,
            params![
                participant_id,
                kind.as_str(),
                title,
                body,
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Record the same notification for every participant; returns how many
    /// were written.
    pub fn notify_all_participants(
        &self,
        kind: NotificationKind,
        title: &str,
        body: &str,
    ) -> Result<u32> {
        let participants = self.list_participants()?;
        for p in &participants {
            self.add_notification(p.id, kind, title, body)?;
        }
        Ok(participants.len() as u32)
    }

    pub fn unread_notifications(&self, participant_id: i64) -> Result<Vec<Notification>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, participant_id, kind, title, body, read, created_at
            FROM notifications
            WHERE participant_id = ?1 AND read = 0
            ORDER BY created_at DESC
            "#,
        )?;

        let rows = stmt.query_map(params![participant_id], |row| {
            let kind_str: String = row.get(2)?;
            Ok(Notification {
                id: row.get(0)?,
                participant_id: row.get(1)?,
                kind: NotificationKind::from_str(&kind_str).unwrap_or(NotificationKind::Book),
                title: row.get(3)?,
                body: row.get(4)?,
                read: row.get(5)?,
                created_at: row.get(6)?,
            })
        })?;

        rows.collect()
    }

    pub fn mark_notifications_read(&self, participant_id: i64) -> Result<u32> {
        let rows = self.conn.execute(
            "UPDATE notifications SET read = 1 WHERE participant_id = ?1 AND read = 0",
            params![participant_id],
        )?;
        Ok(rows as u32)
    }

    // Derived reports

    /// One participant's standing in the active book as of `today`.
    pub fn progress_report(
        &self,
        participant_id: i64,
        today: NaiveDate,
    ) -> Result<Option<ProgressReport>> {
        let Some(book) = self.active_book()? else {
            return Ok(None);
        };

        let chapters = self.chapters_for_book(book.id)?;
        let read = self.read_chapter_ids(participant_id, book.id)?;

        // The schema CHECK keeps both counts positive, so the plan math
        // cannot reject them here.
        let current_week = plan::current_week(book.start_date, book.duration_weeks, today)
            .unwrap_or(1);
        let per_week =
            plan::chapters_per_week(book.total_chapters, book.duration_weeks).unwrap_or(1);
        let expected = plan::expected_chapters(current_week, per_week, book.total_chapters);

        let summary = progress::summarize(&chapters, &read);
        let read_this_week = progress::read_in_week(&chapters, &read, current_week);
        let pace = progress::classify_pace(expected, summary.read_count);

        let checks = chapters
            .iter()
            .map(|c| ChapterCheck {
                chapter_number: c.chapter_number,
                week_number: c.week_number,
                is_read: read.contains(&c.id),
            })
            .collect();

        Ok(Some(ProgressReport {
            book,
            current_week,
            chapters_per_week: per_week,
            expected_chapters: expected,
            summary,
            read_this_week,
            pace,
            chapters: checks,
        }))
    }

    /// Cohort statistics for the active book as of `today`. Completions for
    /// the whole cohort come back in one query and are aggregated in memory.
    pub fn club_stats(&self, today: NaiveDate) -> Result<Option<ClubOverview>> {
        let Some(book) = self.active_book()? else {
            return Ok(None);
        };

        let chapters = self.chapters_for_book(book.id)?;
        let participants = self.list_participants()?;

        let current_week = plan::current_week(book.start_date, book.duration_weeks, today)
            .unwrap_or(1);
        let per_week =
            plan::chapters_per_week(book.total_chapters, book.duration_weeks).unwrap_or(1);
        let expected = plan::expected_chapters(current_week, per_week, book.total_chapters);

        let mut reads_by_participant: HashMap<i64, HashSet<i64>> = HashMap::new();
        {
            let mut stmt = self.conn.prepare(
                r#"
                SELECT c.participant_id, c.chapter_id
                FROM completions c
                JOIN chapters ch ON c.chapter_id = ch.id
                WHERE ch.book_id = ?1 AND c.is_read = 1
                "#,
            )?;
            let rows = stmt.query_map(params![book.id], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
            })?;
            for row in rows {
                let (participant_id, chapter_id) = row?;
                reads_by_participant
                    .entry(participant_id)
                    .or_default()
                    .insert(chapter_id);
            }
        }

        let empty = HashSet::new();
        let entries: Vec<ParticipantProgress> = participants
            .iter()
            .map(|p| {
                let read = reads_by_participant.get(&p.id).unwrap_or(&empty);
                let summary = progress::summarize(&chapters, read);
                ParticipantProgress {
                    participant_id: p.id,
                    name: p.name.clone(),
                    read_this_week: progress::read_in_week(&chapters, read, current_week),
                    pace: progress::classify_pace(expected, summary.read_count),
                    summary,
                }
            })
            .collect();

        let week_has_chapters = chapters.iter().any(|c| c.week_number == current_week);
        let stats = progress::cohort_stats(&entries, book.total_chapters, week_has_chapters);

        Ok(Some(ClubOverview {
            book,
            current_week,
            chapters_per_week: per_week,
            stats,
        }))
    }

    /// Per-book reading history for one participant, newest interest first.
    pub fn history_for(&self, participant_id: i64) -> Result<Vec<BookHistoryEntry>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT DISTINCT b.id, b.title, b.author, b.total_chapters, b.is_active
            FROM books b
            JOIN chapters ch ON ch.book_id = b.id
            JOIN completions c ON c.chapter_id = ch.id
            WHERE c.participant_id = ?1
            "#,
        )?;

        let rows = stmt.query_map(params![participant_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, u32>(3)?,
                row.get::<_, bool>(4)?,
            ))
        })?;
        let books = rows.collect::<Result<Vec<_>>>()?;

        let mut entries = Vec::new();
        for (book_id, title, author, total_chapters, is_active) in books {
            let timestamps = self.read_timestamps(participant_id, book_id)?;
            entries.push(progress::history_entry(
                book_id,
                &title,
                author.as_deref(),
                is_active,
                total_chapters,
                &timestamps,
            ));
        }

        progress::sort_history(&mut entries);
        Ok(entries)
    }

    /// Activity snapshot per participant for the inactivity sweep.
    pub fn activity_records(&self) -> Result<Vec<ActivityRecord>> {
        let participants = self.list_participants()?;
        let mut records = Vec::with_capacity(participants.len());

        for p in participants {
            let last_completion: Option<String> = self.conn.query_row(
                "SELECT MAX(updated_at) FROM completions WHERE participant_id = ?1",
                params![p.id],
                |row| row.get(0),
            )?;
            let last_checkin: Option<String> = self.conn.query_row(
                "SELECT MAX(created_at) FROM checkins WHERE participant_id = ?1",
                params![p.id],
                |row| row.get(0),
            )?;
            let last_nudged: Option<String> = self.conn.query_row(
                "SELECT MAX(created_at) FROM notifications WHERE participant_id = ?1 AND kind = 'inactivity'",
                params![p.id],
                |row| row.get(0),
            )?;

            records.push(ActivityRecord {
                participant_id: p.id,
                name: p.name,
                joined_at: parse_timestamp(&p.joined_at),
                last_completion_at: last_completion.as_deref().and_then(parse_timestamp),
                last_checkin_at: last_checkin.as_deref().and_then(parse_timestamp),
                last_nudged_at: last_nudged.as_deref().and_then(parse_timestamp),
            });
        }

        Ok(records)
    }
}

fn row_to_book(row: &rusqlite::Row) -> Result<Book> {
    let start_date: String = row.get(5)?;
    let start_date = NaiveDate::parse_from_str(&start_date, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        total_chapters: row.get(3)?,
        duration_weeks: row.get(4)?,
        start_date,
        is_active: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

#[derive(Debug, Clone, Serialize)]
pub struct BookOverview {
    pub book: Book,
    pub chapter_count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChapterCheck {
    pub chapter_number: u32,
    pub week_number: u32,
    pub is_read: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub book: Book,
    pub current_week: u32,
    pub chapters_per_week: u32,
    pub expected_chapters: u32,
    pub summary: ProgressSummary,
    pub read_this_week: u32,
    pub pace: PaceStatus,
    pub chapters: Vec<ChapterCheck>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClubOverview {
    pub book: Book,
    pub current_week: u32,
    pub chapters_per_week: u32,
    pub stats: CohortStats,
}
