use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub total_chapters: u32,
    pub duration_weeks: u32,
    pub start_date: NaiveDate,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub id: i64,
    pub book_id: i64,
    pub chapter_number: u32,
    pub week_number: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub joined_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckIn {
    pub id: i64,
    pub participant_id: i64,
    pub book_id: i64,
    pub week_number: u32,
    pub reflection: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Book,
    Inactivity,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Book => "book",
            NotificationKind::Inactivity => "inactivity",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "book" => Some(NotificationKind::Book),
            "inactivity" => Some(NotificationKind::Inactivity),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub participant_id: i64,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: String,
}

// Reading pace relative to the book's weekly plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaceStatus {
    Ahead,
    OnTrack,
    Behind,
}

impl PaceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaceStatus::Ahead => "ahead",
            PaceStatus::OnTrack => "on_track",
            PaceStatus::Behind => "behind",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ahead" | "a" => Some(PaceStatus::Ahead),
            "on_track" | "on-track" | "ok" => Some(PaceStatus::OnTrack),
            "behind" | "b" => Some(PaceStatus::Behind),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaceStatus::Ahead => "Ahead",
            PaceStatus::OnTrack => "On Track",
            PaceStatus::Behind => "Behind",
        }
    }
}

// JSON output wrapper for CLI
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod pace_status_tests {
        use super::*;

        #[test]
        fn as_str_returns_correct_values() {
            assert_eq!(PaceStatus::Ahead.as_str(), "ahead");
            assert_eq!(PaceStatus::OnTrack.as_str(), "on_track");
            assert_eq!(PaceStatus::Behind.as_str(), "behind");
        }

        #[test]
        fn from_str_valid_inputs() {
            assert_eq!(PaceStatus::from_str("ahead"), Some(PaceStatus::Ahead));
            assert_eq!(PaceStatus::from_str("a"), Some(PaceStatus::Ahead));
            assert_eq!(PaceStatus::from_str("on_track"), Some(PaceStatus::OnTrack));
            assert_eq!(PaceStatus::from_str("on-track"), Some(PaceStatus::OnTrack));
            assert_eq!(PaceStatus::from_str("behind"), Some(PaceStatus::Behind));
        }

        #[test]
        fn from_str_case_insensitive() {
            assert_eq!(PaceStatus::from_str("AHEAD"), Some(PaceStatus::Ahead));
            assert_eq!(PaceStatus::from_str("Behind"), Some(PaceStatus::Behind));
        }

        #[test]
        fn from_str_invalid_returns_none() {
            assert_eq!(PaceStatus::from_str("invalid"), None);
            assert_eq!(PaceStatus::from_str(""), None);
        }

        #[test]
        fn label_returns_human_readable() {
            assert_eq!(PaceStatus::Ahead.label(), "Ahead");
            assert_eq!(PaceStatus::OnTrack.label(), "On Track");
            assert_eq!(PaceStatus::Behind.label(), "Behind");
        }

        #[test]
        fn round_trips_through_as_str() {
            for status in [PaceStatus::Ahead, PaceStatus::OnTrack, PaceStatus::Behind] {
                assert_eq!(PaceStatus::from_str(status.as_str()), Some(status));
            }
        }
    }

    mod notification_kind_tests {
        use super::*;

        #[test]
        fn as_str_returns_correct_values() {
            assert_eq!(NotificationKind::Book.as_str(), "book");
            assert_eq!(NotificationKind::Inactivity.as_str(), "inactivity");
        }

        #[test]
        fn from_str_valid_inputs() {
            assert_eq!(
                NotificationKind::from_str("book"),
                Some(NotificationKind::Book)
            );
            assert_eq!(
                NotificationKind::from_str("inactivity"),
                Some(NotificationKind::Inactivity)
            );
        }

        #[test]
        fn from_str_invalid_returns_none() {
            assert_eq!(NotificationKind::from_str("email"), None);
            assert_eq!(NotificationKind::from_str(""), None);
        }
    }

    mod json_output_tests {
        use super::*;

        #[test]
        fn ok_with_string() {
            let output = JsonOutput::ok("test data");
            assert!(output.success);
            assert_eq!(output.data, Some("test data"));
            assert!(output.error.is_none());
        }

        #[test]
        fn err_with_string() {
            let output = JsonOutput::<()>::err("something went wrong");
            assert!(!output.success);
            assert!(output.data.is_none());
            assert_eq!(output.error, Some("something went wrong".to_string()));
        }

        #[test]
        fn serializes_ok_correctly() {
            let output = JsonOutput::ok("test");
            let json = serde_json::to_string(&output).unwrap();
            assert!(json.contains("\"success\":true"));
            assert!(json.contains("\"data\":\"test\""));
            assert!(json.contains("\"error\":null"));
        }

        #[test]
        fn serializes_err_correctly() {
            let output = JsonOutput::<()>::err("error");
            let json = serde_json::to_string(&output).unwrap();
            assert!(json.contains("\"success\":false"));
            assert!(json.contains("\"error\":\"error\""));
        }
    }

    mod book_tests {
        use super::*;

        #[test]
        fn serializes_start_date_as_iso_date() {
            let book = Book {
                id: 1,
                title: "Meditations".to_string(),
                author: Some("Marcus Aurelius".to_string()),
                total_chapters: 12,
                duration_weeks: 4,
                start_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                is_active: true,
                created_at: "2024-03-01T09:00:00+00:00".to_string(),
            };
            let json = serde_json::to_string(&book).unwrap();
            assert!(json.contains("\"start_date\":\"2024-03-04\""));
        }
    }
}
