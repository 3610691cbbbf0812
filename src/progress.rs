use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Chapter, PaceStatus};

// Grace allowance before a reader counts as behind: being short by one or
// two chapters is still on track.
const PACE_SLACK_CHAPTERS: i64 = 2;

/// Snapshot of one participant's completion state for one book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub read_count: u32,
    pub total_count: u32,
    pub percentage: u32,
}

/// Count reads against a chapter list. Zero chapters is a valid snapshot
/// and reports 0%, not an error.
pub fn summarize(chapters: &[Chapter], read_chapter_ids: &HashSet<i64>) -> ProgressSummary {
    let total_count = chapters.len() as u32;
    let read_count = chapters
        .iter()
        .filter(|c| read_chapter_ids.contains(&c.id))
        .count() as u32;
    ProgressSummary {
        read_count,
        total_count,
        percentage: percentage(read_count, total_count),
    }
}

/// Rounded-to-nearest percentage, with halves rounding up.
pub fn percentage(read_count: u32, total_count: u32) -> u32 {
    if total_count == 0 {
        0
    } else {
        (f64::from(read_count) / f64::from(total_count) * 100.0).round() as u32
    }
}

/// How many of the given week's chapters are in the read set.
pub fn read_in_week(chapters: &[Chapter], read_chapter_ids: &HashSet<i64>, week: u32) -> u32 {
    chapters
        .iter()
        .filter(|c| c.week_number == week && read_chapter_ids.contains(&c.id))
        .count() as u32
}

/// Classify a reader's pace against the expected chapter count.
///
/// Strictly more than expected is ahead; more than two chapters short is
/// behind; everything between (inclusive) is on track.
pub fn classify_pace(expected: u32, read_count: u32) -> PaceStatus {
    let read = i64::from(read_count);
    let expected = i64::from(expected);
    if read > expected {
        PaceStatus::Ahead
    } else if read < expected - PACE_SLACK_CHAPTERS {
        PaceStatus::Behind
    } else {
        PaceStatus::OnTrack
    }
}

/// One participant's standing within a book's cohort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantProgress {
    pub participant_id: i64,
    pub name: String,
    pub summary: ProgressSummary,
    pub read_this_week: u32,
    pub pace: PaceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortStats {
    pub participant_count: u32,
    pub average_progress: u32,
    pub not_reading_this_week: u32,
    pub ranked: Vec<ParticipantProgress>,
}

/// Fold per-participant snapshots into cohort statistics.
///
/// `current_week_has_chapters` guards the "not reading this week" count: a
/// week with no assigned chapters counts nobody as idle. Ranking is a
/// stable sort by percentage, so ties keep their input order.
pub fn cohort_stats(
    entries: &[ParticipantProgress],
    total_chapters: u32,
    current_week_has_chapters: bool,
) -> CohortStats {
    let participant_count = entries.len() as u32;

    let average_progress = if participant_count == 0 || total_chapters == 0 {
        0
    } else {
        let total_read: u64 = entries.iter().map(|e| u64::from(e.summary.read_count)).sum();
        let denominator = u64::from(participant_count) * u64::from(total_chapters);
        (total_read as f64 / denominator as f64 * 100.0).round() as u32
    };

    let not_reading_this_week = if current_week_has_chapters {
        entries.iter().filter(|e| e.read_this_week == 0).count() as u32
    } else {
        0
    };

    let mut ranked = entries.to_vec();
    ranked.sort_by(|a, b| b.summary.percentage.cmp(&a.summary.percentage));

    CohortStats {
        participant_count,
        average_progress,
        not_reading_this_week,
        ranked,
    }
}

/// A participant's record for one book, finished or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookHistoryEntry {
    pub book_id: i64,
    pub title: String,
    pub author: Option<String>,
    pub total_chapters: u32,
    pub read_chapters: u32,
    pub percentage: u32,
    pub is_completed: bool,
    pub is_active: bool,
    pub first_read_at: Option<DateTime<Utc>>,
    pub last_read_at: Option<DateTime<Utc>>,
    pub reading_duration_days: i64,
}

/// Build a history entry from a book's chapter count and the timestamps of
/// the participant's reads. Duration spans first to last read, rounded up
/// to whole days.
pub fn history_entry(
    book_id: i64,
    title: &str,
    author: Option<&str>,
    is_active: bool,
    total_chapters: u32,
    read_timestamps: &[DateTime<Utc>],
) -> BookHistoryEntry {
    let read_chapters = read_timestamps.len() as u32;
    let first_read_at = read_timestamps.iter().min().copied();
    let last_read_at = read_timestamps.iter().max().copied();

    let reading_duration_days = match (first_read_at, last_read_at) {
        (Some(first), Some(last)) => {
            let seconds = (last - first).num_seconds();
            (seconds + 86_399) / 86_400
        }
        _ => 0,
    };

    BookHistoryEntry {
        book_id,
        title: title.to_string(),
        author: author.map(|a| a.to_string()),
        total_chapters,
        read_chapters,
        percentage: percentage(read_chapters, total_chapters),
        is_completed: total_chapters > 0 && read_chapters == total_chapters,
        is_active,
        first_read_at,
        last_read_at,
        reading_duration_days,
    }
}

/// Order history entries: active book first, then finished books, then by
/// most recent read.
pub fn sort_history(entries: &mut [BookHistoryEntry]) {
    entries.sort_by(|a, b| {
        b.is_active
            .cmp(&a.is_active)
            .then(b.is_completed.cmp(&a.is_completed))
            .then(b.last_read_at.cmp(&a.last_read_at))
    });
}

/// Everything the inactivity sweep needs to know about one participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub participant_id: i64,
    pub name: String,
    pub joined_at: Option<DateTime<Utc>>,
    pub last_completion_at: Option<DateTime<Utc>>,
    pub last_checkin_at: Option<DateTime<Utc>>,
    pub last_nudged_at: Option<DateTime<Utc>>,
}

impl ActivityRecord {
    /// Most recent sign of life; joining the club counts as activity.
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        [
            self.joined_at,
            self.last_completion_at,
            self.last_checkin_at,
        ]
        .into_iter()
        .flatten()
        .max()
    }
}

/// Select participants who have been quiet for longer than the threshold
/// and have not already been nudged inside the same window.
pub fn inactive_participants(
    records: &[ActivityRecord],
    now: DateTime<Utc>,
    threshold_days: i64,
) -> Vec<ActivityRecord> {
    let cutoff = now - Duration::days(threshold_days);
    records
        .iter()
        .filter(|r| match r.last_activity() {
            Some(at) => at < cutoff,
            None => true,
        })
        .filter(|r| match r.last_nudged_at {
            Some(at) => at < cutoff,
            None => true,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn chapter(id: i64, week_number: u32) -> Chapter {
        Chapter {
            id,
            book_id: 1,
            chapter_number: id as u32,
            week_number,
        }
    }

    fn read_set(ids: &[i64]) -> HashSet<i64> {
        ids.iter().copied().collect()
    }

    fn ts(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    mod summarize_tests {
        use super::*;

        #[test]
        fn counts_reads_against_chapter_list() {
            let chapters: Vec<Chapter> = (1..=12).map(|i| chapter(i, 1)).collect();
            let summary = summarize(&chapters, &read_set(&[1, 2, 3, 4, 5, 6]));
            assert_eq!(summary.read_count, 6);
            assert_eq!(summary.total_count, 12);
            assert_eq!(summary.percentage, 50);
        }

        #[test]
        fn ignores_reads_outside_the_chapter_list() {
            let chapters: Vec<Chapter> = (1..=4).map(|i| chapter(i, 1)).collect();
            let summary = summarize(&chapters, &read_set(&[3, 4, 99, 100]));
            assert_eq!(summary.read_count, 2);
        }

        #[test]
        fn zero_chapters_is_zero_percent_not_an_error() {
            let summary = summarize(&[], &read_set(&[1, 2]));
            assert_eq!(summary.read_count, 0);
            assert_eq!(summary.total_count, 0);
            assert_eq!(summary.percentage, 0);
        }

        #[test]
        fn full_read_is_one_hundred_percent() {
            let chapters: Vec<Chapter> = (1..=5).map(|i| chapter(i, 1)).collect();
            let summary = summarize(&chapters, &read_set(&[1, 2, 3, 4, 5]));
            assert_eq!(summary.percentage, 100);
        }
    }

    mod percentage_tests {
        use super::*;

        #[test]
        fn rounds_half_up() {
            assert_eq!(percentage(1, 8), 13); // 12.5 -> 13
            assert_eq!(percentage(5, 8), 63); // 62.5 -> 63
        }

        #[test]
        fn rounds_down_below_half() {
            assert_eq!(percentage(1, 3), 33);
            assert_eq!(percentage(2, 3), 67);
        }

        #[test]
        fn bounds() {
            assert_eq!(percentage(0, 10), 0);
            assert_eq!(percentage(10, 10), 100);
            assert_eq!(percentage(0, 0), 0);
        }
    }

    mod read_in_week_tests {
        use super::*;

        #[test]
        fn filters_by_week_before_counting() {
            let chapters = vec![
                chapter(1, 1),
                chapter(2, 1),
                chapter(3, 2),
                chapter(4, 2),
            ];
            let read = read_set(&[1, 3, 4]);
            assert_eq!(read_in_week(&chapters, &read, 1), 1);
            assert_eq!(read_in_week(&chapters, &read, 2), 2);
        }

        #[test]
        fn week_with_no_chapters_counts_zero() {
            let chapters = vec![chapter(1, 1), chapter(2, 2)];
            assert_eq!(read_in_week(&chapters, &read_set(&[1, 2]), 5), 0);
        }
    }

    mod classify_pace_tests {
        use super::*;

        #[test]
        fn one_over_expected_is_ahead() {
            assert_eq!(classify_pace(6, 7), PaceStatus::Ahead);
        }

        #[test]
        fn exactly_expected_is_on_track() {
            assert_eq!(classify_pace(6, 6), PaceStatus::OnTrack);
        }

        #[test]
        fn two_short_is_still_on_track() {
            assert_eq!(classify_pace(6, 4), PaceStatus::OnTrack);
        }

        #[test]
        fn three_short_is_behind() {
            assert_eq!(classify_pace(6, 3), PaceStatus::Behind);
        }

        #[test]
        fn small_expected_does_not_underflow() {
            assert_eq!(classify_pace(1, 0), PaceStatus::OnTrack);
            assert_eq!(classify_pace(2, 0), PaceStatus::OnTrack);
            assert_eq!(classify_pace(3, 0), PaceStatus::Behind);
            assert_eq!(classify_pace(0, 0), PaceStatus::OnTrack);
        }

        #[test]
        fn week_two_of_the_standard_plan() {
            // 12 chapters over 4 weeks, week 2: expected 6, read 9
            let expected = crate::plan::expected_chapters(2, 3, 12);
            assert_eq!(expected, 6);
            assert_eq!(classify_pace(expected, 9), PaceStatus::Ahead);
        }
    }

    mod cohort_stats_tests {
        use super::*;

        fn entry(id: i64, read: u32, total: u32, this_week: u32) -> ParticipantProgress {
            ParticipantProgress {
                participant_id: id,
                name: format!("reader-{}", id),
                summary: ProgressSummary {
                    read_count: read,
                    total_count: total,
                    percentage: percentage(read, total),
                },
                read_this_week: this_week,
                pace: classify_pace(read, read),
            }
        }

        #[test]
        fn empty_cohort_is_all_zeros() {
            let stats = cohort_stats(&[], 12, true);
            assert_eq!(stats.participant_count, 0);
            assert_eq!(stats.average_progress, 0);
            assert_eq!(stats.not_reading_this_week, 0);
            assert!(stats.ranked.is_empty());
        }

        #[test]
        fn average_over_all_participants() {
            // 6 + 12 + 0 reads of 3 * 12 possible = 50%
            let entries = vec![entry(1, 6, 12, 1), entry(2, 12, 12, 3), entry(3, 0, 12, 0)];
            let stats = cohort_stats(&entries, 12, true);
            assert_eq!(stats.average_progress, 50);
        }

        #[test]
        fn counts_participants_idle_this_week() {
            let entries = vec![entry(1, 6, 12, 0), entry(2, 3, 12, 2), entry(3, 0, 12, 0)];
            let stats = cohort_stats(&entries, 12, true);
            assert_eq!(stats.not_reading_this_week, 2);
        }

        #[test]
        fn zero_chapter_week_counts_nobody_idle() {
            let entries = vec![entry(1, 3, 3, 0), entry(2, 0, 3, 0)];
            let stats = cohort_stats(&entries, 3, false);
            assert_eq!(stats.not_reading_this_week, 0);
        }

        #[test]
        fn ranks_by_percentage_descending() {
            let entries = vec![entry(1, 3, 12, 1), entry(2, 12, 12, 3), entry(3, 6, 12, 1)];
            let stats = cohort_stats(&entries, 12, true);
            let order: Vec<i64> = stats.ranked.iter().map(|e| e.participant_id).collect();
            assert_eq!(order, vec![2, 3, 1]);
        }

        #[test]
        fn ties_keep_input_order() {
            let entries = vec![entry(7, 6, 12, 1), entry(8, 6, 12, 1), entry(9, 6, 12, 1)];
            let stats = cohort_stats(&entries, 12, true);
            let order: Vec<i64> = stats.ranked.iter().map(|e| e.participant_id).collect();
            assert_eq!(order, vec![7, 8, 9]);
        }

        #[test]
        fn zero_total_chapters_is_zero_average() {
            let entries = vec![entry(1, 0, 0, 0)];
            let stats = cohort_stats(&entries, 0, false);
            assert_eq!(stats.average_progress, 0);
        }
    }

    mod history_tests {
        use super::*;

        #[test]
        fn no_reads_yields_empty_span() {
            let e = history_entry(1, "Meditations", None, false, 12, &[]);
            assert_eq!(e.read_chapters, 0);
            assert_eq!(e.percentage, 0);
            assert!(!e.is_completed);
            assert!(e.first_read_at.is_none());
            assert_eq!(e.reading_duration_days, 0);
        }

        #[test]
        fn span_rounds_up_to_whole_days() {
            let reads = vec![ts(2024, 3, 1, 8), ts(2024, 3, 5, 20)];
            let e = history_entry(1, "Meditations", None, false, 12, &reads);
            assert_eq!(e.first_read_at, Some(ts(2024, 3, 1, 8)));
            assert_eq!(e.last_read_at, Some(ts(2024, 3, 5, 20)));
            // 4 days 12 hours -> 5
            assert_eq!(e.reading_duration_days, 5);
        }

        #[test]
        fn single_read_is_zero_days() {
            let reads = vec![ts(2024, 3, 1, 8)];
            let e = history_entry(1, "Meditations", None, false, 12, &reads);
            assert_eq!(e.reading_duration_days, 0);
        }

        #[test]
        fn completion_requires_every_chapter() {
            let reads: Vec<_> = (1..=12).map(|d| ts(2024, 3, d, 9)).collect();
            let e = history_entry(1, "Meditations", Some("Marcus Aurelius"), false, 12, &reads);
            assert!(e.is_completed);
            assert_eq!(e.percentage, 100);
        }

        #[test]
        fn sorts_active_then_completed_then_recent() {
            let mut entries = vec![
                history_entry(1, "finished long ago", None, false, 2, &[ts(2023, 1, 1, 0), ts(2023, 1, 2, 0)]),
                history_entry(2, "abandoned", None, false, 10, &[ts(2024, 2, 1, 0)]),
                history_entry(3, "current", None, true, 10, &[ts(2024, 3, 1, 0)]),
                history_entry(4, "finished recently", None, false, 2, &[ts(2024, 1, 1, 0), ts(2024, 1, 2, 0)]),
            ];
            sort_history(&mut entries);
            let order: Vec<i64> = entries.iter().map(|e| e.book_id).collect();
            assert_eq!(order, vec![3, 4, 1, 2]);
        }
    }

    mod inactivity_tests {
        use super::*;

        fn record(
            id: i64,
            joined: DateTime<Utc>,
            last_completion: Option<DateTime<Utc>>,
            last_nudged: Option<DateTime<Utc>>,
        ) -> ActivityRecord {
            ActivityRecord {
                participant_id: id,
                name: format!("reader-{}", id),
                joined_at: Some(joined),
                last_completion_at: last_completion,
                last_checkin_at: None,
                last_nudged_at: last_nudged,
            }
        }

        #[test]
        fn last_activity_takes_the_latest_signal() {
            let r = ActivityRecord {
                participant_id: 1,
                name: "reader-1".to_string(),
                joined_at: Some(ts(2024, 1, 1, 0)),
                last_completion_at: Some(ts(2024, 3, 1, 0)),
                last_checkin_at: Some(ts(2024, 2, 1, 0)),
                last_nudged_at: None,
            };
            assert_eq!(r.last_activity(), Some(ts(2024, 3, 1, 0)));
        }

        #[test]
        fn quiet_participants_are_selected() {
            let now = ts(2024, 3, 10, 12);
            let records = vec![
                record(1, ts(2024, 1, 1, 0), Some(ts(2024, 3, 9, 0)), None),
                record(2, ts(2024, 1, 1, 0), Some(ts(2024, 3, 1, 0)), None),
            ];
            let inactive = inactive_participants(&records, now, 5);
            assert_eq!(inactive.len(), 1);
            assert_eq!(inactive[0].participant_id, 2);
        }

        #[test]
        fn recent_joiners_are_not_flagged() {
            let now = ts(2024, 3, 10, 12);
            let records = vec![record(1, ts(2024, 3, 8, 0), None, None)];
            assert!(inactive_participants(&records, now, 5).is_empty());
        }

        #[test]
        fn recently_nudged_are_skipped() {
            let now = ts(2024, 3, 10, 12);
            let records = vec![
                record(1, ts(2024, 1, 1, 0), None, Some(ts(2024, 3, 8, 0))),
                record(2, ts(2024, 1, 1, 0), None, Some(ts(2024, 2, 1, 0))),
            ];
            let inactive = inactive_participants(&records, now, 5);
            assert_eq!(inactive.len(), 1);
            assert_eq!(inactive[0].participant_id, 2);
        }

        #[test]
        fn boundary_day_is_not_yet_inactive() {
            let now = ts(2024, 3, 10, 12);
            let records = vec![record(1, ts(2024, 1, 1, 0), Some(ts(2024, 3, 5, 12)), None)];
            // exactly five days old is not strictly older than the cutoff
            assert!(inactive_participants(&records, now, 5).is_empty());
        }
    }
}
