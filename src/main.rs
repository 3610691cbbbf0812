mod db;
mod models;
mod plan;
mod progress;
mod tui;

use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use db::Database;
use models::{JsonOutput, NotificationKind};

const DEFAULT_DB_NAME: &str = "bookclub.db";
const DEFAULT_NUDGE_DAYS: i64 = 5;

#[derive(Parser)]
#[command(name = "bookclub")]
#[command(about = "A reading club tracker for weekly chapter plans and shared progress")]
#[command(version)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Manage books and their weekly plans
    #[command(subcommand)]
    Book(BookCommands),

    /// Manage participants
    #[command(subcommand)]
    Participant(ParticipantCommands),

    /// Mark a chapter of the active book as read (or unread)
    Read {
        /// Participant ID
        participant: i64,

        /// Chapter number within the active book
        chapter: u32,

        /// Clear the mark instead of setting it
        #[arg(long)]
        unread: bool,
    },

    /// Record a weekly check-in for the active book
    Checkin {
        /// Participant ID
        participant: i64,

        /// Week number (defaults to the current week)
        #[arg(long, short)]
        week: Option<u32>,

        /// Reflection on the week's reading
        #[arg(long, short)]
        reflection: Option<String>,
    },

    /// Show a participant's progress in the active book
    Progress {
        /// Participant ID
        participant: i64,
    },

    /// Show cohort statistics for the active book
    Stats,

    /// Show a participant's reading history across books
    History {
        /// Participant ID
        participant: i64,
    },

    /// Record nudges for participants who have gone quiet
    Nudge {
        /// Days of silence before a participant counts as inactive
        #[arg(long, default_value_t = DEFAULT_NUDGE_DAYS)]
        days: i64,

        /// List candidates without recording notifications
        #[arg(long)]
        dry_run: bool,
    },

    /// Show unread notifications for a participant
    Inbox {
        /// Participant ID
        participant: i64,

        /// Mark the listed notifications as read
        #[arg(long)]
        mark_read: bool,
    },

    /// Launch interactive terminal UI
    Tui,
}

#[derive(Subcommand)]
enum BookCommands {
    /// List all books
    List,

    /// Add a book and generate its weekly chapter plan
    Add {
        /// Book title
        title: String,

        /// Book author
        #[arg(long, short)]
        author: Option<String>,

        /// Total number of chapters
        #[arg(long, short)]
        chapters: u32,

        /// Duration of the plan in weeks
        #[arg(long, short)]
        weeks: u32,

        /// Start date (YYYY-MM-DD)
        #[arg(long, short)]
        start: String,
    },

    /// Show a book and its chapter plan
    Show {
        /// Book ID
        id: i64,
    },

    /// Make a book the club's active read
    Activate {
        /// Book ID
        id: i64,
    },

    /// Delete a book and its chapters
    Delete {
        /// Book ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum ParticipantCommands {
    /// List all participants
    List,

    /// Add a participant
    Add {
        /// Participant name
        name: String,

        /// Participant email
        #[arg(long, short)]
        email: Option<String>,
    },

    /// Remove a participant and their records
    Delete {
        /// Participant ID
        id: i64,
    },
}

fn get_db_path() -> PathBuf {
    if let Ok(path) = std::env::var("BOOKCLUB_DB") {
        return PathBuf::from(path);
    }

    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bookclub");

    std::fs::create_dir_all(&config_dir).ok();
    config_dir.join(DEFAULT_DB_NAME)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = get_db_path();
    let db = Database::open(&db_path)?;

    match cli.command {
        Commands::Init => {
            db.init()?;
            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::<()>::ok(()))?);
            } else {
                println!("Database initialized at: {}", db_path.display());
            }
        }

        Commands::Book(book_cmd) => match book_cmd {
            BookCommands::List => {
                let books = db.list_books()?;
                if cli.json {
                    println!("{}", serde_json::to_string(&JsonOutput::ok(&books))?);
                } else if books.is_empty() {
                    println!("No books found.");
                } else {
                    println!(
                        "{:<5} {:<34} {:<10} {:<7} {:<12} ACTIVE",
                        "ID", "TITLE", "CHAPTERS", "WEEKS", "START"
                    );
                    println!("{}", "-".repeat(78));
                    for overview in books {
                        let b = &overview.book;
                        println!(
                            "{:<5} {:<34} {:<10} {:<7} {:<12} {}",
                            b.id,
                            truncate(&b.title, 32),
                            overview.chapter_count,
                            b.duration_weeks,
                            b.start_date.to_string(),
                            if b.is_active { "*" } else { "" }
                        );
                    }
                }
            }

            BookCommands::Add {
                title,
                author,
                chapters,
                weeks,
                start,
            } => {
                let start_date = NaiveDate::parse_from_str(&start, "%Y-%m-%d")
                    .map_err(|e| format!("Invalid start date '{}': {}", start, e))?;
                let assignment = plan::assign_weeks(chapters, weeks)?;
                let id = db.add_book(
                    &title,
                    author.as_deref(),
                    chapters,
                    weeks,
                    start_date,
                    &assignment,
                )?;

                if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                            "id": id,
                            "title": title
                        })))?
                    );
                } else {
                    println!(
                        "Added book '{}' with ID: {} ({} chapters over {} weeks)",
                        title, id, chapters, weeks
                    );
                }
            }

            BookCommands::Show { id } => {
                if let Some(book) = db.get_book(id)? {
                    let chapters = db.chapters_for_book(id)?;

                    if cli.json {
                        println!(
                            "{}",
                            serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                                "book": book,
                                "chapters": chapters
                            })))?
                        );
                    } else {
                        println!("Book: {}", book.title);
                        if let Some(author) = &book.author {
                            println!("Author: {}", author);
                        }
                        println!("ID: {}", book.id);
                        println!("Starts: {}", book.start_date);
                        println!("Active: {}", if book.is_active { "yes" } else { "no" });
                        println!();
                        println!("--- Weekly Plan ---");
                        for week in 1..=book.duration_weeks {
                            let numbers: Vec<String> = chapters
                                .iter()
                                .filter(|c| c.week_number == week)
                                .map(|c| c.chapter_number.to_string())
                                .collect();
                            if numbers.is_empty() {
                                println!("Week {}: -", week);
                            } else {
                                println!("Week {}: chapters {}", week, numbers.join(", "));
                            }
                        }
                    }
                } else if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::<()>::err("Book not found"))?
                    );
                } else {
                    println!("Book not found.");
                }
            }

            BookCommands::Activate { id } => {
                if let Some(book) = db.get_book(id)? {
                    db.set_active_book(id)?;
                    let notified = db.notify_all_participants(
                        NotificationKind::Book,
                        &format!("New book: {}", book.title),
                        &format!(
                            "The club starts '{}' on {}. Check the weekly plan!",
                            book.title, book.start_date
                        ),
                    )?;

                    if cli.json {
                        println!(
                            "{}",
                            serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                                "id": id,
                                "notified": notified
                            })))?
                        );
                    } else {
                        println!(
                            "'{}' is now the active book ({} participants notified).",
                            book.title, notified
                        );
                    }
                } else if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::<()>::err("Book not found"))?
                    );
                } else {
                    println!("Book not found.");
                }
            }

            BookCommands::Delete { id } => {
                if db.delete_book(id)? {
                    if cli.json {
                        println!("{}", serde_json::to_string(&JsonOutput::<()>::ok(()))?);
                    } else {
                        println!("Book {} deleted.", id);
                    }
                } else if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::<()>::err("Book not found"))?
                    );
                } else {
                    println!("Book not found.");
                }
            }
        },

        Commands::Participant(participant_cmd) => match participant_cmd {
            ParticipantCommands::List => {
                let participants = db.list_participants()?;
                if cli.json {
                    println!("{}", serde_json::to_string(&JsonOutput::ok(&participants))?);
                } else if participants.is_empty() {
                    println!("No participants found.");
                } else {
                    println!("{:<5} {:<28} EMAIL", "ID", "NAME");
                    println!("{}", "-".repeat(60));
                    for p in participants {
                        println!(
                            "{:<5} {:<28} {}",
                            p.id,
                            truncate(&p.name, 26),
                            p.email.as_deref().unwrap_or("-")
                        );
                    }
                }
            }

            ParticipantCommands::Add { name, email } => {
                let id = db.add_participant(&name, email.as_deref())?;
                if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                            "id": id,
                            "name": name
                        })))?
                    );
                } else {
                    println!("Added participant '{}' with ID: {}", name, id);
                }
            }

            ParticipantCommands::Delete { id } => {
                if db.delete_participant(id)? {
                    if cli.json {
                        println!("{}", serde_json::to_string(&JsonOutput::<()>::ok(()))?);
                    } else {
                        println!("Participant {} deleted.", id);
                    }
                } else if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::<()>::err("Participant not found"))?
                    );
                } else {
                    println!("Participant not found.");
                }
            }
        },

        Commands::Read {
            participant,
            chapter,
            unread,
        } => {
            if db.get_participant(participant)?.is_none() {
                return Err("Participant not found".into());
            }
            let Some(book) = db.active_book()? else {
                return Err("No active book. Activate one with: bookclub book activate <ID>".into());
            };
            let Some(target) = db.chapter_by_number(book.id, chapter)? else {
                return Err(format!("'{}' has no chapter {}", book.title, chapter).into());
            };

            db.set_chapter_read(participant, target.id, !unread)?;

            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::<()>::ok(()))?);
            } else if unread {
                println!("Chapter {} of '{}' marked unread.", chapter, book.title);
            } else {
                println!("Chapter {} of '{}' marked read.", chapter, book.title);
            }
        }

        Commands::Checkin {
            participant,
            week,
            reflection,
        } => {
            if db.get_participant(participant)?.is_none() {
                return Err("Participant not found".into());
            }
            let Some(book) = db.active_book()? else {
                return Err("No active book. Activate one with: bookclub book activate <ID>".into());
            };

            let today = Local::now().date_naive();
            let week = match week {
                Some(w) if w >= 1 && w <= book.duration_weeks => w,
                Some(w) => {
                    return Err(format!(
                        "Week {} is outside the plan (1-{})",
                        w, book.duration_weeks
                    )
                    .into())
                }
                None => plan::current_week(book.start_date, book.duration_weeks, today)?,
            };

            db.save_checkin(participant, book.id, week, reflection.as_deref())?;

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::ok(serde_json::json!({ "week": week })))?
                );
            } else {
                println!("Check-in saved for week {} of '{}'.", week, book.title);
            }
        }

        Commands::Progress { participant } => {
            let Some(p) = db.get_participant(participant)? else {
                return Err("Participant not found".into());
            };

            let today = Local::now().date_naive();
            if let Some(report) = db.progress_report(p.id, today)? {
                if cli.json {
                    println!("{}", serde_json::to_string(&JsonOutput::ok(&report))?);
                } else {
                    println!("=== {} — {} ===", p.name, report.book.title);
                    println!(
                        "Week {} of {} ({} chapters per week)",
                        report.current_week, report.book.duration_weeks, report.chapters_per_week
                    );
                    println!(
                        "Read: {}/{} ({}%)  Expected by now: {}",
                        report.summary.read_count,
                        report.summary.total_count,
                        report.summary.percentage,
                        report.expected_chapters
                    );
                    println!("Pace: {}", report.pace.label());
                    println!();
                    for week in 1..=report.book.duration_weeks {
                        let marks: String = report
                            .chapters
                            .iter()
                            .filter(|c| c.week_number == week)
                            .map(|c| if c.is_read { '#' } else { '.' })
                            .collect();
                        let tag = if week == report.current_week { " <- now" } else { "" };
                        println!("Week {}: [{}]{}", week, marks, tag);
                    }
                }
            } else if cli.json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::<()>::err("No active book"))?
                );
            } else {
                println!("No active book.");
            }
        }

        Commands::Stats => {
            let today = Local::now().date_naive();
            if let Some(overview) = db.club_stats(today)? {
                if cli.json {
                    println!("{}", serde_json::to_string(&JsonOutput::ok(&overview))?);
                } else {
                    println!("=== Club Statistics — {} ===", overview.book.title);
                    println!(
                        "Week {} of {}",
                        overview.current_week, overview.book.duration_weeks
                    );
                    println!("Participants: {}", overview.stats.participant_count);
                    println!("Average progress: {}%", overview.stats.average_progress);
                    println!(
                        "Not reading this week: {}",
                        overview.stats.not_reading_this_week
                    );
                    if !overview.stats.ranked.is_empty() {
                        println!();
                        println!("{:<5} {:<28} {:<10} PACE", "#", "NAME", "PROGRESS");
                        println!("{}", "-".repeat(56));
                        for (i, entry) in overview.stats.ranked.iter().enumerate() {
                            println!(
                                "{:<5} {:<28} {:<10} {}",
                                i + 1,
                                truncate(&entry.name, 26),
                                format!("{}%", entry.summary.percentage),
                                entry.pace.label()
                            );
                        }
                    }
                }
            } else if cli.json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::<()>::err("No active book"))?
                );
            } else {
                println!("No active book.");
            }
        }

        Commands::History { participant } => {
            let Some(p) = db.get_participant(participant)? else {
                return Err("Participant not found".into());
            };

            let history = db.history_for(p.id)?;
            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&history))?);
            } else if history.is_empty() {
                println!("No reading history for {} yet.", p.name);
            } else {
                println!("=== Reading History — {} ===", p.name);
                println!(
                    "{:<34} {:<10} {:<6} {:<11} DAYS",
                    "TITLE", "READ", "%", "STATUS"
                );
                println!("{}", "-".repeat(70));
                for entry in history {
                    let status = if entry.is_active {
                        "active"
                    } else if entry.is_completed {
                        "completed"
                    } else {
                        "-"
                    };
                    println!(
                        "{:<34} {:<10} {:<6} {:<11} {}",
                        truncate(&entry.title, 32),
                        format!("{}/{}", entry.read_chapters, entry.total_chapters),
                        entry.percentage,
                        status,
                        entry.reading_duration_days
                    );
                }
            }
        }

        Commands::Nudge { days, dry_run } => {
            let records = db.activity_records()?;
            let candidates = progress::inactive_participants(&records, Utc::now(), days);

            if !dry_run {
                for candidate in &candidates {
                    db.add_notification(
                        candidate.participant_id,
                        NotificationKind::Inactivity,
                        "We miss you!",
                        "It has been a while since your last reading. How about picking the book back up today?",
                    )?;
                }
                log::debug!("nudged {} of {} participants", candidates.len(), records.len());
            }

            if cli.json {
                let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                        "checked": records.len(),
                        "inactive": candidates.len(),
                        "participants": names,
                        "dry_run": dry_run
                    })))?
                );
            } else if candidates.is_empty() {
                println!("Checked {} participants; everyone is active.", records.len());
            } else {
                let verb = if dry_run { "would be nudged" } else { "nudged" };
                println!(
                    "Checked {} participants; {} {}:",
                    records.len(),
                    candidates.len(),
                    verb
                );
                for candidate in &candidates {
                    println!("  {} (ID: {})", candidate.name, candidate.participant_id);
                }
            }
        }

        Commands::Inbox {
            participant,
            mark_read,
        } => {
            let Some(p) = db.get_participant(participant)? else {
                return Err("Participant not found".into());
            };

            let notifications = db.unread_notifications(p.id)?;
            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&notifications))?);
            } else if notifications.is_empty() {
                println!("No unread notifications for {}.", p.name);
            } else {
                println!("=== Unread Notifications — {} ===", p.name);
                for n in &notifications {
                    println!("[{}] {}", n.kind.as_str(), n.title);
                    println!("      {}", n.body);
                }
            }

            if mark_read {
                let marked = db.mark_notifications_read(p.id)?;
                if !cli.json {
                    println!();
                    println!("{} notification(s) marked read.", marked);
                }
            }
        }

        Commands::Tui => {
            tui::run(db)?;
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    mod truncate_tests {
        use super::*;

        #[test]
        fn truncate_short_string() {
            assert_eq!(truncate("hello", 10), "hello");
        }

        #[test]
        fn truncate_exact_length() {
            assert_eq!(truncate("hello", 5), "hello");
        }

        #[test]
        fn truncate_long_string() {
            assert_eq!(truncate("hello world", 8), "hello...");
        }

        #[test]
        fn truncate_empty_string() {
            assert_eq!(truncate("", 10), "");
        }
    }

    mod cli_parsing_tests {
        use super::*;

        #[test]
        fn parses_init() {
            let cli = Cli::try_parse_from(["bookclub", "init"]).unwrap();
            assert!(matches!(cli.command, Commands::Init));
            assert!(!cli.json);
        }

        #[test]
        fn parses_global_json_flag() {
            let cli = Cli::try_parse_from(["bookclub", "--json", "stats"]).unwrap();
            assert!(cli.json);
            assert!(matches!(cli.command, Commands::Stats));
        }

        #[test]
        fn parses_book_add() {
            let cli = Cli::try_parse_from([
                "bookclub", "book", "add", "Meditations", "--author", "Marcus Aurelius",
                "--chapters", "12", "--weeks", "4", "--start", "2024-03-04",
            ])
            .unwrap();
            match cli.command {
                Commands::Book(BookCommands::Add {
                    title,
                    author,
                    chapters,
                    weeks,
                    start,
                }) => {
                    assert_eq!(title, "Meditations");
                    assert_eq!(author, Some("Marcus Aurelius".to_string()));
                    assert_eq!(chapters, 12);
                    assert_eq!(weeks, 4);
                    assert_eq!(start, "2024-03-04");
                }
                _ => panic!("Expected book add"),
            }
        }

        #[test]
        fn book_add_requires_chapters_and_weeks() {
            let result = Cli::try_parse_from(["bookclub", "book", "add", "Meditations"]);
            assert!(result.is_err());
        }

        #[test]
        fn parses_book_activate() {
            let cli = Cli::try_parse_from(["bookclub", "book", "activate", "3"]).unwrap();
            match cli.command {
                Commands::Book(BookCommands::Activate { id }) => assert_eq!(id, 3),
                _ => panic!("Expected book activate"),
            }
        }

        #[test]
        fn parses_participant_add_with_email() {
            let cli = Cli::try_parse_from([
                "bookclub", "participant", "add", "Ana", "--email", "ana@club.org",
            ])
            .unwrap();
            match cli.command {
                Commands::Participant(ParticipantCommands::Add { name, email }) => {
                    assert_eq!(name, "Ana");
                    assert_eq!(email, Some("ana@club.org".to_string()));
                }
                _ => panic!("Expected participant add"),
            }
        }

        #[test]
        fn parses_read_toggle() {
            let cli = Cli::try_parse_from(["bookclub", "read", "1", "7"]).unwrap();
            match cli.command {
                Commands::Read {
                    participant,
                    chapter,
                    unread,
                } => {
                    assert_eq!(participant, 1);
                    assert_eq!(chapter, 7);
                    assert!(!unread);
                }
                _ => panic!("Expected read"),
            }
        }

        #[test]
        fn parses_read_unread_flag() {
            let cli = Cli::try_parse_from(["bookclub", "read", "1", "7", "--unread"]).unwrap();
            match cli.command {
                Commands::Read { unread, .. } => assert!(unread),
                _ => panic!("Expected read"),
            }
        }

        #[test]
        fn parses_checkin_with_week_and_reflection() {
            let cli = Cli::try_parse_from([
                "bookclub", "checkin", "1", "--week", "2", "--reflection", "great chapters",
            ])
            .unwrap();
            match cli.command {
                Commands::Checkin {
                    participant,
                    week,
                    reflection,
                } => {
                    assert_eq!(participant, 1);
                    assert_eq!(week, Some(2));
                    assert_eq!(reflection, Some("great chapters".to_string()));
                }
                _ => panic!("Expected checkin"),
            }
        }

        #[test]
        fn checkin_week_defaults_to_none() {
            let cli = Cli::try_parse_from(["bookclub", "checkin", "1"]).unwrap();
            match cli.command {
                Commands::Checkin { week, .. } => assert!(week.is_none()),
                _ => panic!("Expected checkin"),
            }
        }

        #[test]
        fn nudge_defaults_to_five_days() {
            let cli = Cli::try_parse_from(["bookclub", "nudge"]).unwrap();
            match cli.command {
                Commands::Nudge { days, dry_run } => {
                    assert_eq!(days, 5);
                    assert!(!dry_run);
                }
                _ => panic!("Expected nudge"),
            }
        }

        #[test]
        fn parses_nudge_overrides() {
            let cli = Cli::try_parse_from(["bookclub", "nudge", "--days", "7", "--dry-run"]).unwrap();
            match cli.command {
                Commands::Nudge { days, dry_run } => {
                    assert_eq!(days, 7);
                    assert!(dry_run);
                }
                _ => panic!("Expected nudge"),
            }
        }

        #[test]
        fn parses_inbox_mark_read() {
            let cli = Cli::try_parse_from(["bookclub", "inbox", "2", "--mark-read"]).unwrap();
            match cli.command {
                Commands::Inbox {
                    participant,
                    mark_read,
                } => {
                    assert_eq!(participant, 2);
                    assert!(mark_read);
                }
                _ => panic!("Expected inbox"),
            }
        }

        #[test]
        fn parses_tui() {
            let cli = Cli::try_parse_from(["bookclub", "tui"]).unwrap();
            assert!(matches!(cli.command, Commands::Tui));
        }

        #[test]
        fn rejects_unknown_command() {
            assert!(Cli::try_parse_from(["bookclub", "frobnicate"]).is_err());
        }
    }
}
