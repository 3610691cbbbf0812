use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// One chapter's slot in a book's weekly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekAssignment {
    pub chapter_number: u32,
    pub week_number: u32,
}

/// How many chapters a week must cover so the book fits its duration.
pub fn chapters_per_week(total_chapters: u32, duration_weeks: u32) -> Result<u32, PlanError> {
    if total_chapters == 0 {
        return Err(PlanError::InvalidArgument("total_chapters must be positive"));
    }
    if duration_weeks == 0 {
        return Err(PlanError::InvalidArgument("duration_weeks must be positive"));
    }
    Ok((total_chapters + duration_weeks - 1) / duration_weeks)
}

/// Assign every chapter of a book to a week.
///
/// Chapter `i` (1-indexed) lands in week `ceil(i / chapters_per_week)`, so
/// chapters fill weeks front to back and the last week may come up short.
/// Pure and deterministic: the same inputs always produce the same schedule.
pub fn assign_weeks(
    total_chapters: u32,
    duration_weeks: u32,
) -> Result<Vec<WeekAssignment>, PlanError> {
    let per_week = chapters_per_week(total_chapters, duration_weeks)?;
    let assignments = (1..=total_chapters)
        .map(|chapter_number| WeekAssignment {
            chapter_number,
            week_number: (chapter_number + per_week - 1) / per_week,
        })
        .collect();
    Ok(assignments)
}

/// Which week of the reading plan `today` falls in.
///
/// Weeks start counting from `start_date`; the result is clamped so dates
/// before the start report week 1 and dates past the end report the final
/// week. The caller supplies `today` so the computation stays off the wall
/// clock.
pub fn current_week(
    start_date: NaiveDate,
    duration_weeks: u32,
    today: NaiveDate,
) -> Result<u32, PlanError> {
    if duration_weeks == 0 {
        return Err(PlanError::InvalidArgument("duration_weeks must be positive"));
    }
    let weeks_passed = (today - start_date).num_days().div_euclid(7);
    Ok((weeks_passed + 1).clamp(1, i64::from(duration_weeks)) as u32)
}

/// How many chapters a participant should have finished by `current_week`.
pub fn expected_chapters(current_week: u32, chapters_per_week: u32, total_chapters: u32) -> u32 {
    (current_week * chapters_per_week).min(total_chapters)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod chapters_per_week_tests {
        use super::*;

        #[test]
        fn even_split() {
            assert_eq!(chapters_per_week(12, 4), Ok(3));
        }

        #[test]
        fn rounds_up_on_remainder() {
            assert_eq!(chapters_per_week(20, 8), Ok(3));
            assert_eq!(chapters_per_week(10, 3), Ok(4));
        }

        #[test]
        fn more_weeks_than_chapters() {
            assert_eq!(chapters_per_week(3, 5), Ok(1));
        }

        #[test]
        fn zero_chapters_rejected() {
            assert!(matches!(
                chapters_per_week(0, 4),
                Err(PlanError::InvalidArgument(_))
            ));
        }

        #[test]
        fn zero_weeks_rejected() {
            assert!(matches!(
                chapters_per_week(12, 0),
                Err(PlanError::InvalidArgument(_))
            ));
        }
    }

    mod assign_weeks_tests {
        use super::*;

        #[test]
        fn twelve_chapters_over_four_weeks() {
            let plan = assign_weeks(12, 4).unwrap();
            assert_eq!(plan.len(), 12);
            for a in &plan {
                let expected_week = match a.chapter_number {
                    1..=3 => 1,
                    4..=6 => 2,
                    7..=9 => 3,
                    _ => 4,
                };
                assert_eq!(a.week_number, expected_week, "chapter {}", a.chapter_number);
            }
        }

        #[test]
        fn uneven_split_never_spills_past_duration() {
            // ceil(20/8) = 3, so the 20th chapter lands in week 7 of 8
            let plan = assign_weeks(20, 8).unwrap();
            assert_eq!(plan.last().unwrap().week_number, 7);
            assert!(plan.iter().all(|a| a.week_number <= 8));
        }

        #[test]
        fn last_week_may_be_short() {
            // 10 chapters, 3 weeks -> 4 per week -> weeks of 4, 4, 2
            let plan = assign_weeks(10, 3).unwrap();
            let in_week = |w| plan.iter().filter(|a| a.week_number == w).count();
            assert_eq!(in_week(1), 4);
            assert_eq!(in_week(2), 4);
            assert_eq!(in_week(3), 2);
        }

        #[test]
        fn fewer_chapters_than_weeks_leaves_tail_weeks_empty() {
            let plan = assign_weeks(3, 5).unwrap();
            let weeks: Vec<u32> = plan.iter().map(|a| a.week_number).collect();
            assert_eq!(weeks, vec![1, 2, 3]);
        }

        #[test]
        fn single_chapter_single_week() {
            let plan = assign_weeks(1, 1).unwrap();
            assert_eq!(
                plan,
                vec![WeekAssignment {
                    chapter_number: 1,
                    week_number: 1
                }]
            );
        }

        #[test]
        fn covers_every_chapter_exactly_once() {
            let plan = assign_weeks(37, 9).unwrap();
            let numbers: Vec<u32> = plan.iter().map(|a| a.chapter_number).collect();
            assert_eq!(numbers, (1..=37).collect::<Vec<u32>>());
        }

        #[test]
        fn week_numbers_are_non_decreasing_and_in_range() {
            for (total, weeks) in [(1, 1), (5, 2), (12, 4), (20, 8), (100, 7), (9, 10)] {
                let plan = assign_weeks(total, weeks).unwrap();
                let mut prev = 1;
                for a in &plan {
                    assert!(a.week_number >= 1 && a.week_number <= weeks);
                    assert!(a.week_number >= prev);
                    prev = a.week_number;
                }
            }
        }

        #[test]
        fn is_idempotent() {
            assert_eq!(assign_weeks(20, 8).unwrap(), assign_weeks(20, 8).unwrap());
        }

        #[test]
        fn invalid_arguments_rejected() {
            assert!(assign_weeks(0, 4).is_err());
            assert!(assign_weeks(12, 0).is_err());
        }
    }

    mod current_week_tests {
        use super::*;

        #[test]
        fn start_day_is_week_one() {
            let start = date(2024, 3, 4);
            assert_eq!(current_week(start, 6, start), Ok(1));
        }

        #[test]
        fn sixth_day_still_week_one() {
            let start = date(2024, 3, 4);
            assert_eq!(current_week(start, 6, date(2024, 3, 10)), Ok(1));
        }

        #[test]
        fn seventh_day_rolls_to_week_two() {
            let start = date(2024, 3, 4);
            assert_eq!(current_week(start, 6, date(2024, 3, 11)), Ok(2));
        }

        #[test]
        fn before_start_clamps_to_week_one() {
            let start = date(2024, 3, 4);
            assert_eq!(current_week(start, 6, date(2024, 3, 1)), Ok(1));
            assert_eq!(current_week(start, 6, date(2023, 1, 1)), Ok(1));
        }

        #[test]
        fn far_past_end_clamps_to_final_week() {
            let start = date(2024, 3, 4);
            assert_eq!(current_week(start, 6, date(2025, 3, 4)), Ok(6));
        }

        #[test]
        fn always_within_duration() {
            let start = date(2024, 1, 1);
            for offset in -30i64..400 {
                let today = start + chrono::Duration::days(offset);
                let week = current_week(start, 8, today).unwrap();
                assert!((1..=8).contains(&week), "offset {} gave week {}", offset, week);
            }
        }

        #[test]
        fn zero_duration_rejected() {
            assert!(matches!(
                current_week(date(2024, 3, 4), 0, date(2024, 3, 4)),
                Err(PlanError::InvalidArgument(_))
            ));
        }
    }

    mod expected_chapters_tests {
        use super::*;

        #[test]
        fn scales_with_week() {
            assert_eq!(expected_chapters(1, 3, 12), 3);
            assert_eq!(expected_chapters(2, 3, 12), 6);
            assert_eq!(expected_chapters(4, 3, 12), 12);
        }

        #[test]
        fn capped_at_total_chapters() {
            assert_eq!(expected_chapters(7, 3, 20), 20);
            assert_eq!(expected_chapters(8, 3, 20), 20);
        }
    }
}
